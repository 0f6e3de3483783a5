use std::error::Error;
use std::fmt;

use cloudbridge_lib::StorageKind;
use cloudbridge_lib::storage::SizeError;

#[derive(Debug)]
pub enum ApiClientError {
    InvalidPort,
    Url(url::ParseError),
    Reqwest(reqwest::Error),
}

impl fmt::Display for ApiClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiClientError::InvalidPort => write!(f, "ApiClientError::InvalidPort"),
            ApiClientError::Url(_) => write!(f, "ApiClientError::Url"),
            ApiClientError::Reqwest(_) => write!(f, "ApiClientError::Reqwest"),
        }
    }
}

impl Error for ApiClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiClientError::Url(v) => Some(v),
            ApiClientError::Reqwest(v) => Some(v),
            _ => None
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("server responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("storage \"{0}\" has no endpoint")]
    NoEndpoint(StorageKind),

    #[error(transparent)]
    Size(#[from] SizeError),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error)
}

impl RequestError {
    /// turns a non success response into a [`RequestError::Status`]
    pub(crate) async fn check(res: reqwest::Response) -> Result<reqwest::Response, RequestError> {
        let status = res.status();

        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();

        Err(RequestError::Status { status, body })
    }
}
