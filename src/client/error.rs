use thiserror::Error;

/// Errors returned by the recipe catalog client.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The request could not complete: DNS, connect, timeout, reset
    #[error("Failed to reach recipe catalog: {0}")]
    RequestFailure(#[source] reqwest::Error),

    /// The catalog answered, but not with a usable response
    #[error("Recipe catalog returned an unusable response: {0}")]
    ResponseFailure(#[from] ResponseFailure),
}

#[derive(Error, Debug)]
pub enum ResponseFailure {
    #[error("status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed JSON body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn is_request_failure(&self) -> bool {
        matches!(self, CatalogError::RequestFailure(_))
    }

    pub fn is_response_failure(&self) -> bool {
        matches!(self, CatalogError::ResponseFailure(_))
    }

    /// HTTP status of a rejected request, if the catalog sent one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            CatalogError::ResponseFailure(ResponseFailure::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while loading catalog configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("SPOONACULAR_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid catalog base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid timeout '{0}': expected a whole number of seconds")]
    InvalidTimeout(String),
}
