//! Error types for the management client
//!
//! Failures are grouped by the stage that produced them: loading the
//! connection descriptor, misuse of the API, the HTTP round-trip itself, and
//! the realm discovery handshake that runs while a client is being built.
//!
//! An HTTP 500 carrying a JSON envelope is not represented here. The server
//! reports failed management operations that way and the client hands those
//! responses back unchanged.

use thiserror::Error;

/// Main error type for the management client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The caller asked for something the HTTP transport cannot do
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    /// HTTP communication errors with the management endpoint
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Realm discovery failed while building an authenticated client
    #[error("Failed to obtain management realm name: {0}")]
    Setup(#[from] SetupError),
}

/// Configuration error variants
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load configuration file
    #[error("Failed to load config from '{path}': {reason}")]
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    /// Configuration parsing error
    #[error("Failed to parse config: {reason}")]
    ParseError { reason: String },

    /// No server profile with this name was loaded
    #[error("Server profile '{name}' not found")]
    UnknownServer { name: String },
}

/// API misuse detected before any network call
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Operation has {count} attachment(s), which the HTTP transport does not support")]
    AttachmentsNotAllowed { count: usize },
}

/// HTTP communication error variants
#[derive(Debug, Error)]
pub enum HttpError {
    /// The underlying HTTP client could not be built
    #[error("Failed to create HTTP client: {reason}")]
    ClientBuild { reason: String },

    /// Connection to the management endpoint failed
    #[error("Connection to {url} failed: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// Connect or read timeout expired
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Server answered with a status other than 200 or 500
    #[error("Server responded {status}\nMessage:\n{body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Response body is not a JSON document
    #[error("Invalid response: {reason}")]
    InvalidResponse { reason: String },

    /// Operation could not be encoded as a request body
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Digest challenge could not be answered
    #[error("Authentication failed: {reason}")]
    Authentication { reason: String },
}

/// Realm discovery error variants
#[derive(Debug, Error)]
pub enum SetupError {
    /// The probe got HTTP 500 instead of a challenge
    #[error("Server responded 500 instead of 401. Isn't server authentication turned off while username and password are set? Content: {body}")]
    AuthenticationDisabled { body: String },

    /// The probe got neither 401 nor 500
    #[error("Server responded {status} instead of 401. Content: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// 401 without a challenge header
    #[error("Missing WWW-Authenticate header in server response")]
    MissingChallengeHeader,

    /// Challenge header without a digest realm
    #[error("Digest realm not found in WWW-Authenticate header")]
    RealmNotFound,
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl HttpError {
    /// Classify a failed `send()` as a timeout or a connection failure
    pub(crate) fn from_send(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Timeout {
                url: url.to_string(),
            }
        } else {
            HttpError::ConnectionFailed {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}
