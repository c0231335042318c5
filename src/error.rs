//! Error types for telewaves

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the service can surface
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors while creating directories or writing downloads
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session store could not be opened
    #[error("session error: {0}")]
    Session(String),

    /// A request to Telegram failed
    #[error("telegram request failed: {0}")]
    Client(#[from] grammers_client::InvocationError),

    /// Sign-in was rejected or aborted
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Interactive sign-in is needed but no terminal is available
    #[error("authentication required: run `telewaves auth` in an interactive terminal")]
    AuthRequired,
}

impl Error {
    /// Whether this failure is worth an extra credentials hint for the operator
    pub fn is_auth_shaped(&self) -> bool {
        match self {
            Error::Auth(_) | Error::AuthRequired => true,
            other => {
                let text = other.to_string().to_lowercase();
                text.contains("auth") || text.contains("phone")
            }
        }
    }
}
