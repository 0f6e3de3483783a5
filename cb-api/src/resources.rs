use cloudbridge_lib::{non_empty, Resource};
use serde::{Serialize, Deserialize};

/// multipart field names expected by the insert endpoints
pub mod form {
    pub const FILE: &str = "file";
    pub const FILE_NAME: &str = "fileName";
    pub const FILE_TYPE: &str = "fileType";
    pub const FILE_DESCRIPTION: &str = "fileDescription";
    pub const FILE_OWNER: &str = "fileOwner";
}

/// a resource as it arrives over the wire.
///
/// earlier revisions of the backend dropped or misspelled fields so
/// everything is optional here. use [`Resource::from`] to get the
/// canonical shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourcePayload {
    pub id: Option<String>,
    #[serde(alias = "fineName")]
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub file_storage: Option<String>,
    pub file_description: Option<String>,
    pub file_size: Option<u64>,
    pub file_owner: Option<String>,
    pub date_inserted: Option<String>,
    pub date_modified: Option<String>,
}

impl From<ResourcePayload> for Resource {
    fn from(payload: ResourcePayload) -> Self {
        Resource {
            id: non_empty(payload.id),
            file_name: payload.file_name.unwrap_or_default(),
            file_type: payload.file_type.unwrap_or_default(),
            file_storage: payload.file_storage.unwrap_or_default(),
            file_description: non_empty(payload.file_description),
            file_size: payload.file_size,
            file_owner: non_empty(payload.file_owner),
            date_inserted: non_empty(payload.date_inserted),
            date_modified: non_empty(payload.date_modified),
        }
    }
}

/// converts a list of wire payloads into canonical resources, keeping order
pub fn normalize<I>(list: I) -> Vec<Resource>
where
    I: IntoIterator<Item = ResourcePayload>
{
    list.into_iter()
        .map(Resource::from)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn full_record() {
        let json = r#"[{
            "id": "5b7c0c1e-5f0e-4a43-9d0c-0f6c2c8e7a11",
            "fileName": "report.pdf",
            "fileType": "application/pdf",
            "fileStorage": "MongoDB",
            "fileDescription": "quarterly report",
            "fileSize": 1572864,
            "fileOwner": "mnnc",
            "dateInserted": "2025-04-04T05:48:27.283936Z",
            "dateModified": "2025-04-05T10:00:00Z",
            "fileContent": "aGVsbG8="
        }]"#;

        let list: Vec<ResourcePayload> = serde_json::from_str(json).unwrap();
        let resources = normalize(list);

        assert_eq!(resources.len(), 1);

        let resource = &resources[0];

        assert_eq!(resource.id.as_deref(), Some("5b7c0c1e-5f0e-4a43-9d0c-0f6c2c8e7a11"));
        assert_eq!(resource.file_name, "report.pdf");
        assert_eq!(resource.file_type, "application/pdf");
        assert_eq!(resource.file_storage, "MongoDB");
        assert_eq!(resource.file_description.as_deref(), Some("quarterly report"));
        assert_eq!(resource.file_size, Some(1572864));
        assert_eq!(resource.file_owner.as_deref(), Some("mnnc"));
        assert_eq!(resource.date_inserted.as_deref(), Some("2025-04-04T05:48:27.283936Z"));
        assert_eq!(resource.date_modified.as_deref(), Some("2025-04-05T10:00:00Z"));
    }

    #[test]
    fn legacy_misspelled_name() {
        let json = r#"{"fineName": "notes.txt", "fileType": "text/plain", "fileStorage": "Dynamo"}"#;
        let payload: ResourcePayload = serde_json::from_str(json).unwrap();
        let resource = Resource::from(payload);

        assert_eq!(resource.file_name, "notes.txt");
    }

    #[test]
    fn missing_and_null_fields() {
        let json = r#"{
            "fileName": "image.png",
            "fileDescription": null,
            "fileSize": null,
            "fileOwner": "",
            "dateInserted": "",
            "dateModified": null
        }"#;
        let payload: ResourcePayload = serde_json::from_str(json).unwrap();
        let resource = Resource::from(payload);

        assert_eq!(resource.id, None);
        assert_eq!(resource.file_name, "image.png");
        assert_eq!(resource.file_type, "");
        assert_eq!(resource.file_storage, "");
        assert_eq!(resource.file_description, None);
        assert_eq!(resource.file_size, None);
        assert_eq!(resource.file_owner, None);
        assert_eq!(resource.date_inserted, None);
        assert_eq!(resource.date_modified, None);
    }

    #[test]
    fn empty_object() {
        let payload: ResourcePayload = serde_json::from_str("{}").unwrap();

        assert_eq!(Resource::from(payload), Resource::default());
    }
}
