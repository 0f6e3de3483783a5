pub mod fetch;
pub mod summary;
pub mod insert;
