//! Error types for the timedesk client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Local validation failure. Blocked before any network call; no state
    /// change has happened when this is returned.
    #[error("{0}")]
    Validation(String),

    /// Attempt to append a role that is already in the assignment list.
    #[error("role \"{0}\" is already assigned")]
    DuplicateRole(String),

    /// No bearer credential available from the provider.
    #[error("no session credential stored")]
    NoCredential,

    /// The backend answered with HTML where JSON was expected, which in
    /// practice means the session cookie/token has expired.
    #[error("session expired or invalid")]
    SessionExpired,

    /// Non-success HTTP status from the backend.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (DNS, TLS, connection reset, bad JSON body).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// True for failures that should be surfaced as a blocking message
    /// without any remote side effects having occurred.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::DuplicateRole(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
