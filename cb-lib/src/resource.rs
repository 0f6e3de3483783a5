use serde::{Serialize, Deserialize};

use crate::storage::StorageKind;

/// metadata describing a single stored file.
///
/// every record is produced by the backend, the client only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Option<String>,
    pub file_name: String,
    pub file_type: String,
    pub file_storage: String,
    pub file_description: Option<String>,
    pub file_size: Option<u64>,
    pub file_owner: Option<String>,
    pub date_inserted: Option<String>,
    pub date_modified: Option<String>,
}

impl Resource {
    pub fn storage_kind(&self) -> StorageKind {
        StorageKind::from_name(&self.file_storage)
    }
}
