use http::{Method, Uri};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::Error;

/// Connection settings for a Redash server.
///
/// `base_url` must carry an http or https scheme. `api_key` is either a user
/// API key or a query API key, as shown in the Redash profile page.
#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    /// When set, data source writes fail on options the server's type
    /// descriptor does not declare instead of silently dropping them.
    pub strict: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing or invalid base URL: {0}")]
    InvalidBaseUrl(#[from] http::uri::InvalidUri),
    #[error("Base URL scheme must be http or https")]
    UnsupportedScheme,
    #[error("Missing API key")]
    MissingApiKey,
}

#[derive(Debug)]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    strict: bool,
}

impl Client {
    pub fn new(config: Config) -> Result<Client, Error> {
        Client::with_http_client(reqwest::Client::new(), config)
    }

    /// Builds a client on top of a caller-supplied `reqwest::Client`.
    /// Timeouts, proxies and TLS settings belong to that client.
    pub fn with_http_client(client: reqwest::Client, config: Config) -> Result<Client, Error> {
        let uri: Uri = config
            .base_url
            .parse()
            .map_err(ConfigError::InvalidBaseUrl)?;
        match uri.scheme_str() {
            Some("http") | Some("https") => {}
            _ => return Err(ConfigError::UnsupportedScheme.into()),
        }
        if config.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey.into());
        }

        Ok(Client {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            strict: config.strict,
        })
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<reqwest::Response, Error> {
        debug!(%method, path, "sending Redash API request");

        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Key {}", self.api_key),
            );
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|err| Error::Http(err))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        Ok(response)
    }

    pub(crate) async fn get_json<Response: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Response, Error> {
        let response = self.execute(Method::GET, path, query, None).await?;
        let body = response.bytes().await.map_err(|err| Error::Http(err))?;
        serde_json::from_slice(&body).map_err(|err| Error::ResponseDecoding(err))
    }

    pub(crate) async fn get_raw(&self, path: &str) -> Result<Vec<u8>, Error> {
        let response = self.execute(Method::GET, path, &[], None).await?;
        let body = response.bytes().await.map_err(|err| Error::Http(err))?;
        Ok(body.to_vec())
    }

    pub(crate) async fn post_json<Body: Serialize, Response: DeserializeOwned>(
        &self,
        path: &str,
        body: &Body,
    ) -> Result<Response, Error> {
        let body = self.post_raw(path, body).await?;
        serde_json::from_slice(&body).map_err(|err| Error::ResponseDecoding(err))
    }

    pub(crate) async fn post_raw<Body: Serialize>(
        &self,
        path: &str,
        body: &Body,
    ) -> Result<Vec<u8>, Error> {
        let payload = serde_json::to_string(body).map_err(|err| Error::RequestEncoding(err))?;
        let response = self
            .execute(Method::POST, path, &[], Some(payload))
            .await?;
        let body = response.bytes().await.map_err(|err| Error::Http(err))?;
        Ok(body.to_vec())
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), Error> {
        self.execute(Method::POST, path, &[], None).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        self.execute(Method::DELETE, path, &[], None).await?;
        Ok(())
    }
}
