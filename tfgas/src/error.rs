//! High-level error types

use tfgas_core::{ErrorCode, Function};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] tfgas_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] tfgas_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] tfgas_types::Error),

    #[error("Device not connected")]
    NotConnected,

    #[error("Invalid response from device: {0}")]
    InvalidResponse(String),

    #[error("Device rejected {function}: {code}")]
    Device {
        function: Function,
        code: ErrorCode,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
