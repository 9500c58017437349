use thiserror::Error;

/// Failures of a single read or write of the strength record. None of them is
/// retried; each ends the current request.
#[derive(Debug, Error)]
pub enum StrengthError {
    #[error("auth key not configured")]
    Configuration,
    #[error("invalid auth key")]
    Authorization,
    #[error("{0}")]
    Validation(String),
    #[error("strength data not found")]
    NotFound,
    #[error("{0}")]
    Internal(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl StrengthError {
    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }

    pub fn internal(msg: impl Into<String>) -> Self { Self::Internal(msg.into()) }

    /// HTTP status class this error surfaces as.
    pub fn status_code(&self) -> u16 {
        match self {
            StrengthError::Configuration => 500,
            StrengthError::Authorization => 403,
            StrengthError::Validation(_) => 400,
            StrengthError::NotFound => 404,
            StrengthError::Internal(_) => 500,
            StrengthError::Storage(_) => 500,
        }
    }
}

impl From<std::io::Error> for StrengthError {
    fn from(e: std::io::Error) -> Self { Self::Storage(e.to_string()) }
}
