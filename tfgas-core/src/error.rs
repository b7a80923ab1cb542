//! Error types for tfgas-core

/// Result type alias for core protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Frame is too short to be valid
    #[error("Frame too short: expected at least {expected} bytes, got {actual} bytes")]
    FrameTooShort {
        expected: usize,
        actual: usize,
    },

    /// Declared frame length is outside the protocol bounds
    #[error("Invalid frame length: {declared} (must be between 8 and 80)")]
    InvalidLength {
        declared: u8,
    },

    /// Declared frame length does not match the received byte count
    #[error("Frame length mismatch: header declares {declared} bytes, received {actual} bytes")]
    LengthMismatch {
        declared: usize,
        actual: usize,
    },

    /// Unknown function ID
    #[error("Unknown function ID: {0}")]
    UnknownFunction(u8),

    /// UID string could not be decoded
    #[error("Invalid UID {uid:?}: {reason}")]
    InvalidUid {
        uid: String,
        reason: String,
    },

    /// Invalid session state
    #[error("Invalid session state: {0}")]
    InvalidSessionState(String),
}
