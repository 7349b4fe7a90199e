use serde::Deserialize;

pub mod client;
pub mod data_sources;
pub mod destinations;
pub mod groups;
pub mod newtypes;
pub mod queries;
pub mod schema;
pub mod users;

/// Pagination envelope wrapped around list endpoints such as `/api/users`
/// and `/api/queries`. `count` is the total across all pages.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub count: usize,
    pub page: usize,
    pub page_size: usize,
    // An explicit default path keeps the derive from requiring T: Default.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid client configuration: {0}")]
    Configuration(#[from] client::ConfigError),
    #[error("HTTP error: {0:?}")]
    Http(reqwest::Error),
    #[error("HTTP status {status}: {body:?}")]
    Api {
        status: http::StatusCode,
        body: String,
    },
    #[error("Failed to encode request body: {0:?}")]
    RequestEncoding(serde_json::Error),
    #[error("Failed to decode response body: {0:?}")]
    ResponseDecoding(serde_json::Error),
    #[error("Malformed destination envelope: {0}")]
    MalformedEnvelope(String),
    #[error("Unknown destination type: {0:?}")]
    UnknownDestinationType(String),
    #[error("Failed to decode {kind} destination options: {source:?}")]
    VariantDecode {
        kind: destinations::DestinationKind,
        source: serde_json::Error,
    },
    #[error("Invalid data source options: {0}")]
    Validation(#[from] data_sources::ValidationError),
    #[error("No user found with email address: {0}")]
    UserNotFound(String),
}

impl Error {
    /// Status code of the failed request, when the failure was an HTTP one.
    pub fn status(&self) -> Option<http::StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(http::StatusCode::NOT_FOUND)
    }
}
