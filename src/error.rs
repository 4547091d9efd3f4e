//! Error types for sorictl
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::network::SessionState;

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Unified error type for sorictl operations
#[derive(Debug, Error)]
pub enum ClientError {
    // -------------------------------------------------------------------------
    // Invocation Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Response is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Decoding error: {0}")]
    Decoding(String),

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection refused by {addr}")]
    ConnectionRefused { addr: String },

    #[error("Connection to {addr} timed out")]
    ConnectionTimeout { addr: String },

    #[error("Host unreachable: {addr}: {source}")]
    HostUnreachable {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Frame Errors
    // -------------------------------------------------------------------------
    #[error("Payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: u64, max: u64 },

    #[error("Connection closed after {received} of {expected} bytes")]
    ConnectionClosed { expected: u64, received: u64 },

    #[error("Timed out while {stage}")]
    Timeout { stage: &'static str },

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("Session is {actual:?}, expected {expected:?}")]
    InvalidState {
        expected: SessionState,
        actual: SessionState,
    },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// True for failures scoped to one exchange: connect, frame and timeout
    /// errors. Follow mode logs these and keeps polling.
    pub fn is_exchange_failure(&self) -> bool {
        matches!(
            self,
            ClientError::ConnectionRefused { .. }
                | ClientError::ConnectionTimeout { .. }
                | ClientError::HostUnreachable { .. }
                | ClientError::PayloadTooLarge { .. }
                | ClientError::ConnectionClosed { .. }
                | ClientError::Timeout { .. }
                | ClientError::InvalidUtf8(_)
                | ClientError::Decoding(_)
                | ClientError::Io(_)
        )
    }
}
