//! Transport layer for the TFP protocol
//!
//! Provides framed TCP communication with brickd.

pub mod error;
pub mod tcp;

pub use error::{Error, Result};
pub use tcp::TcpTransport;

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for brickd connections
#[async_trait]
pub trait Transport: Send + Sync {
    /// Connect to the daemon
    async fn connect(&mut self) -> Result<()>;

    /// Disconnect from the daemon
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Send raw bytes
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive one complete frame (with timeout)
    async fn receive_frame(&mut self, timeout_secs: u64) -> Result<BytesMut>;

    /// Get remote address
    fn remote_addr(&self) -> String;
}
