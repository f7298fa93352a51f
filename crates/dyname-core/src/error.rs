//! Error types for dyname
//!
//! Every fallible operation returns [`Result`]. Nothing is recovered locally:
//! any error aborts the reconciliation run and is reported at the top level.

use thiserror::Error;

/// Result type alias for dyname operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for dyname
#[derive(Error, Debug)]
pub enum Error {
    /// The connection could not be made (DNS resolution failure, refused connection, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a status code >= 400
    #[error("HTTP error {status}: {message}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Human-readable description of the failed request
        message: String,
    },

    /// A JSON integer does not fit the target integer width
    #[error("Range error: field `{field}` value {value} cannot fit inside {target}")]
    Range {
        /// Name of the offending field
        field: String,
        /// The value as it appeared in the response
        value: String,
        /// Target integer type (e.g. "i32")
        target: &'static str,
    },

    /// A stored DNS answer is not a valid address for its declared type
    #[error(
        "Malformed {record_type} answer {answer:?} for record {host:?} (id {id}) in domain {domain}"
    )]
    MalformedAnswer {
        /// Parent domain of the record
        domain: String,
        /// Record host label
        host: String,
        /// Registrar-assigned record id
        id: i32,
        /// Declared record type
        record_type: String,
        /// The answer that failed to parse
        answer: String,
    },

    /// The registrar violated the pagination protocol
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A JSON value is present but has the wrong shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// An address lookup service returned something unusable
    #[error("IP source error: {0}")]
    IpSource(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an IP source error
    pub fn ip_source(msg: impl Into<String>) -> Self {
        Self::IpSource(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Map a failed HTTP status code to an [`Error::HttpStatus`]
    ///
    /// `context` names the request (method and URL) and is embedded in the message.
    pub fn from_status(status: u16, context: impl AsRef<str>) -> Self {
        let context = context.as_ref();
        let message = match status {
            401 | 403 => format!(
                "{}: authentication failed, check username and API key",
                context
            ),
            404 => format!("{}: not found", context),
            429 => format!("{}: rate limit exceeded", context),
            500..=599 => format!("{}: server error", context),
            _ => format!("{}: request failed", context),
        };
        Self::HttpStatus { status, message }
    }

    /// The HTTP status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
