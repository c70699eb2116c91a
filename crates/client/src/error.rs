use engine::{EngineError, StoreError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("invalid base_url: {0}")]
    BaseUrl(String),
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with an item the engine rejects.
    #[error(transparent)]
    Invalid(#[from] EngineError),
}

impl ClientError {
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound(body),
            422 => Self::Validation(body),
            _ => Self::Server(body),
        }
    }
}

impl StoreError for ClientError {
    fn validation(&self) -> Option<(&str, &str)> {
        match self {
            Self::Invalid(err) => err.validation(),
            _ => None,
        }
    }
}
