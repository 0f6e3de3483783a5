pub mod error;
pub mod date;
pub mod storage;
pub mod resource;

pub use resource::Resource;
pub use storage::StorageKind;

/// converts an empty string into None, leaves everything else untouched
pub fn non_empty(given: Option<String>) -> Option<String> {
    given.filter(|v| !v.is_empty())
}
