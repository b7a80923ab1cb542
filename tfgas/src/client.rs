//! Capability traits for the device session
//!
//! The calibration sequence is written against these two seams rather
//! than the concrete handle, so tests can substitute a fake backend.

use async_trait::async_trait;

use tfgas_types::CalibrationRecord;

use crate::error::Result;

/// Lifecycle of a session with the device-hosting daemon
#[async_trait]
pub trait Connection {
    /// Open the network connection; device calls are only valid afterwards
    async fn connect(&mut self) -> Result<()>;

    /// Close the connection, releasing the underlying socket
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;
}

/// Calibration surface of the Gas Bricklet
#[async_trait]
pub trait GasDevice {
    /// Read the device calibration record
    async fn get_calibration(&mut self) -> Result<CalibrationRecord>;

    /// Overwrite the device calibration record
    async fn set_calibration(&mut self, record: &CalibrationRecord) -> Result<()>;
}
