use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure modes of a single identifier lookup
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("solr unreachable for {id}: {source}")]
    BackendUnreachable {
        id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("bad solr response for {id}: {reason}")]
    BackendError { id: String, reason: String },

    #[error("{id} not found")]
    NotFound { id: String },

    #[error("{id} matched {hits} records; query: {query}")]
    Ambiguous { id: String, hits: u64, query: String },
}

#[derive(Error, Debug)]
pub enum SiteLinksError {
    #[error("invalid site URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("{0} cannot be used as a base URL")]
    NotABase(String),
}

impl LookupError {
    pub fn id(&self) -> &str {
        match self {
            LookupError::BackendUnreachable { id, .. }
            | LookupError::BackendError { id, .. }
            | LookupError::NotFound { id }
            | LookupError::Ambiguous { id, .. } => id,
        }
    }

    /// Only ambiguity is reported distinctly; every other failure reads as not found.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::Ambiguous { .. } => StatusCode::BAD_REQUEST,
            LookupError::BackendUnreachable { .. }
            | LookupError::BackendError { .. }
            | LookupError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn message(&self) -> String {
        match self {
            LookupError::Ambiguous { .. } => self.to_string(),
            _ => format!("{} not found", self.id()),
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        (self.status_code(), self.message()).into_response()
    }
}
