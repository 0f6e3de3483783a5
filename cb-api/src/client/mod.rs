use reqwest::{Url, RequestBuilder};

pub mod error;
pub mod resources;
pub mod service;

use error::{ApiClientError, RequestError};

pub use reqwest::StatusCode;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Info {
    pub url: Url
}

/// async http client for a CloudBridge backend.
///
/// cloning is cheap, the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) client: reqwest::Client,
    pub(crate) info: Info
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder {
            secure: false,
            host: DEFAULT_HOST.into(),
            port: Some(DEFAULT_PORT),
            agent: None
        }
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub(crate) fn url<U>(&self, path: U) -> Result<Url, RequestError>
    where
        U: AsRef<str>
    {
        Ok(self.info.url.join(path.as_ref())?)
    }

    pub(crate) fn get<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>,
    {
        let url = self.url(path)?;

        tracing::debug!("GET {url}");

        Ok(self.client.get(url))
    }

    pub(crate) fn post<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>
    {
        let url = self.url(path)?;

        tracing::debug!("POST {url}");

        Ok(self.client.post(url))
    }
}

pub struct ApiClientBuilder {
    secure: bool,
    host: String,
    port: Option<u16>,
    agent: Option<String>
}

impl ApiClientBuilder {
    pub fn secure(&mut self, is_secure: bool) {
        self.secure = is_secure;
    }

    /// sets the host name of the server. returns false if the value cannot
    /// be used as the host part of a url
    pub fn host<H>(&mut self, host: H) -> bool
    where
        H: AsRef<str>
    {
        let host = host.as_ref();

        if url::Host::parse(host).is_ok() {
            self.host = host.to_owned();
            true
        } else {
            false
        }
    }

    /// sets the port of the server. None falls back to the default port of
    /// the scheme
    pub fn port(&mut self, port: Option<u16>) {
        self.port = port;
    }

    pub fn user_agent<U>(&mut self, user_agent: U)
    where
        U: Into<String>
    {
        self.agent = Some(user_agent.into());
    }

    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        let user_agent = self.agent.unwrap_or("cloudbridge-client/0.1.0".into());
        let scheme = if self.secure { "https" } else { "http" };

        let mut url = Url::parse(&format!("{scheme}://{}/", self.host))
            .map_err(ApiClientError::Url)?;

        url.set_port(self.port)
            .map_err(|_| ApiClientError::InvalidPort)?;

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(ApiClientError::Reqwest)?;

        Ok(ApiClient {
            client,
            info: Info { url }
        })
    }
}
