use cloudbridge_lib::{Resource, StorageKind};
use reqwest::multipart::{Form, Part};

use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::resources::{normalize, form, ResourcePayload};

/// retrieves the resource list.
///
/// without a store the aggregated list of every backing store is returned.
#[derive(Debug, Clone, Default)]
pub struct RetrieveResources {
    store: Option<StorageKind>,
}

impl RetrieveResources {
    pub fn new() -> Self {
        RetrieveResources { store: None }
    }

    pub fn store<S>(&mut self, store: S) -> &mut Self
    where
        S: Into<Option<StorageKind>>
    {
        self.store = store.into();
        self
    }

    pub fn path(&self) -> Result<String, RequestError> {
        let Some(store) = &self.store else {
            return Ok("/api/resources".into());
        };

        let Some(segment) = store.segment() else {
            return Err(RequestError::NoEndpoint(store.clone()));
        };

        Ok(format!("/api/{segment}/resources"))
    }

    pub async fn send(&self, client: &ApiClient) -> Result<Vec<Resource>, RequestError> {
        let res = client.get(self.path()?)?.send().await?;
        let res = RequestError::check(res).await?;
        let payload: Vec<ResourcePayload> = res.json().await?;

        Ok(normalize(payload))
    }
}

/// uploads a single file into one of the backing stores
pub struct InsertResource {
    store: StorageKind,
    file_name: String,
    file_type: mime::Mime,
    description: String,
    owner: String,
    contents: Vec<u8>,
}

impl InsertResource {
    pub fn new<N>(store: StorageKind, file_name: N, contents: Vec<u8>) -> Self
    where
        N: Into<String>
    {
        InsertResource {
            store,
            file_name: file_name.into(),
            file_type: mime::APPLICATION_OCTET_STREAM,
            description: String::new(),
            owner: String::new(),
            contents,
        }
    }

    pub fn file_type(&mut self, mime: mime::Mime) -> &mut Self {
        self.file_type = mime;
        self
    }

    pub fn description<D>(&mut self, description: D) -> &mut Self
    where
        D: Into<String>
    {
        self.description = description.into();
        self
    }

    pub fn owner<O>(&mut self, owner: O) -> &mut Self
    where
        O: Into<String>
    {
        self.owner = owner.into();
        self
    }

    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }

    pub fn path(&self) -> Result<String, RequestError> {
        let Some(segment) = self.store.segment() else {
            return Err(RequestError::NoEndpoint(self.store.clone()));
        };

        Ok(format!("/api/{segment}/resources"))
    }

    /// checks the target and size before anything is sent. the server
    /// confirmation message is returned on success
    pub async fn send(self, client: &ApiClient) -> Result<String, RequestError> {
        let path = self.path()?;

        self.store.check_size(self.size())?;

        let file_part = Part::bytes(self.contents)
            .file_name(self.file_name.clone())
            .mime_str(self.file_type.as_ref())?;

        let body = Form::new()
            .part(form::FILE, file_part)
            .text(form::FILE_NAME, self.file_name)
            .text(form::FILE_TYPE, self.file_type.to_string())
            .text(form::FILE_DESCRIPTION, self.description)
            .text(form::FILE_OWNER, self.owner);

        let res = client.post(path)?.multipart(body).send().await?;
        let res = RequestError::check(res).await?;

        Ok(res.text().await?)
    }
}
