use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(dayglance::config),
        help("Set the client ID, client secret and refresh token with `dayglance settings`")
    )]
    Configuration(String),

    #[error("Authentication error: {0}")]
    #[diagnostic(
        code(dayglance::auth),
        help("Run `get_refresh_token` to obtain a new refresh token")
    )]
    Authentication(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(dayglance::remote_fetch))]
    RemoteFetch(String),

    #[error(transparent)]
    #[diagnostic(code(dayglance::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(dayglance::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(dayglance::other))]
    Other(String),
}

// Implement From for TOML serialization errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type DayResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Configuration(message.to_string())
}

/// Helper to create authentication errors
pub fn auth_error(message: &str) -> Error {
    Error::Authentication(message.to_string())
}

/// Helper to create remote fetch errors
pub fn remote_error(message: &str) -> Error {
    Error::RemoteFetch(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
