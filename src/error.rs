//! Error handling for cookiekit

use thiserror::Error;

/// Main error type for cookiekit operations
#[derive(Error, Debug)]
pub enum CookieError {
    #[error("cookie key is missing")]
    MissingKey,

    #[error(
        "cookie key '{0}' is reserved; keys cannot be one of expires, max-age, path, domain, secure"
    )]
    ReservedKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for cookiekit operations
pub type Result<T> = std::result::Result<T, CookieError>;
