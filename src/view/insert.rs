use std::path::PathBuf;

use cloudbridge_api::client::ApiClient;
use cloudbridge_api::client::resources::InsertResource;
use cloudbridge_lib::StorageKind;

use crate::error::{self, Context};
use crate::util;

/// the file insert form. holds exactly one file and the values that go
/// along with it, nothing is kept between submissions
#[derive(Debug)]
pub struct InsertForm {
    pub path: PathBuf,
    pub store: StorageKind,
    pub name: Option<String>,
    pub mime: Option<mime::Mime>,
    pub fallback: Option<mime::Mime>,
    pub description: String,
    pub owner: String,
}

impl InsertForm {
    pub fn new(path: PathBuf, store: StorageKind) -> Self {
        InsertForm {
            path,
            store,
            name: None,
            mime: None,
            fallback: None,
            description: String::new(),
            owner: String::new(),
        }
    }

    /// the given name or the basename of the selected file
    pub fn file_name(&self) -> error::Result<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }

        util::path_basename(&self.path)?
            .context("no name was provided and the selected file does not have a file name")
    }

    /// the given mime, a guess from the file extension or the fallback
    pub fn file_type(&self) -> error::Result<mime::Mime> {
        if let Some(given) = &self.mime {
            return Ok(given.clone());
        }

        if let Some(ext) = self.path.extension() {
            util::ext_mime(ext, self.fallback.clone())
        } else if let Some(given) = &self.fallback {
            Ok(given.clone())
        } else {
            Ok(mime::APPLICATION_OCTET_STREAM)
        }
    }

    /// reads the selected file and builds the request for it. files the
    /// target store will not accept are rejected before being read
    pub async fn prepare(self) -> error::Result<InsertResource> {
        let file_path = util::normalize_from(&util::cwd()?, self.path.clone());

        let metadata = match tokio::fs::metadata(&file_path).await {
            Ok(m) => m,
            Err(err) => match err.kind() {
                std::io::ErrorKind::NotFound => {
                    return Err(error::Error::new()
                        .context("requested file was not found"));
                },
                _ => {
                    return Err(error::Error::new()
                        .context("failed to read data about the requested file")
                        .source(err));
                }
            }
        };

        if !metadata.is_file() {
            return Err(error::Error::new()
                .context("requested file path is not a file"));
        }

        self.store.check_size(metadata.len())?;

        let file_name = self.file_name()?;
        let file_type = self.file_type()?;
        let contents = tokio::fs::read(&file_path)
            .await
            .context("failed to read file")?;

        let mut builder = InsertResource::new(self.store, file_name, contents);
        builder.file_type(file_type)
            .description(self.description)
            .owner(self.owner);

        Ok(builder)
    }

    pub async fn submit(self, client: &ApiClient) -> error::Result<String> {
        let builder = self.prepare().await?;

        tracing::debug!("uploading {} bytes", builder.size());

        let msg = builder.send(client)
            .await
            .context("failed to upload file")?;

        Ok(msg)
    }
}
