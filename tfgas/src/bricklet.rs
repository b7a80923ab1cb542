//! High-level device interface

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info, trace};

use tfgas_core::{Frame, Function, Session, base58};
use tfgas_transport::{TcpTransport, Transport};
use tfgas_types::{CalibrationRecord, CallbackConfig, GasValues, Identity};

use crate::client::{Connection, GasDevice};
use crate::error::{Error, Result};

/// Gas Bricklet handle
///
/// High-level interface to one Gas Bricklet behind a brickd instance.
/// Construction performs no I/O; the handle must be connected before any
/// device call.
///
/// # Examples
///
/// ```no_run
/// use tfgas::{Connection, GasBricklet, GasDevice};
///
/// #[tokio::main]
/// async fn main() -> tfgas::Result<()> {
///     let mut gas = GasBricklet::new("XYZ", "localhost", 4223)?;
///
///     gas.connect().await?;
///
///     let calibration = gas.get_calibration().await?;
///     println!("Calibration: {}", calibration);
///
///     gas.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct GasBricklet {
    transport: Box<dyn Transport>,
    session: Session,
    uid: u32,
    timeout: Duration,
}

impl GasBricklet {
    /// Create a new device handle (TCP transport)
    ///
    /// Decodes the base58 UID and prepares the transport; no I/O happens
    /// until [`Connection::connect`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID is not a valid base58 string.
    pub fn new(uid: &str, host: impl Into<String>, port: u16) -> Result<Self> {
        let uid = base58::decode(uid)?;

        Ok(Self {
            transport: Box::new(TcpTransport::new(host, port)),
            session: Session::new(),
            uid,
            timeout: Duration::from_secs(5),
        })
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Numeric UID the handle is bound to
    pub fn uid(&self) -> u32 {
        self.uid
    }

    /// Get current measured values
    pub async fn get_values(&mut self) -> Result<GasValues> {
        debug!("Getting values...");

        let response = self.call(Function::GetValues, Bytes::new()).await?;
        let values = GasValues::from_payload(&response.payload)?;

        debug!("Values: {}", values);

        Ok(values)
    }

    /// Get the raw ADC count behind the concentration measurement
    pub async fn get_adc_count(&mut self) -> Result<u32> {
        debug!("Getting ADC count...");

        let response = self.call(Function::GetAdcCount, Bytes::new()).await?;
        let payload = response.payload;

        if payload.len() != 4 {
            return Err(Error::InvalidResponse(format!(
                "ADC count payload has {} bytes, expected 4",
                payload.len()
            )));
        }

        Ok(u32::from_le_bytes([
            payload[0], payload[1], payload[2], payload[3],
        ]))
    }

    /// Configure the periodic values callback
    pub async fn set_values_callback_configuration(
        &mut self,
        config: CallbackConfig,
    ) -> Result<()> {
        debug!("Configuring values callback: {:?}", config);

        self.call(
            Function::SetValuesCallbackConfiguration,
            config.to_payload(),
        )
        .await?;

        Ok(())
    }

    /// Read the current values callback configuration
    pub async fn get_values_callback_configuration(&mut self) -> Result<CallbackConfig> {
        let response = self
            .call(Function::GetValuesCallbackConfiguration, Bytes::new())
            .await?;

        Ok(CallbackConfig::from_payload(&response.payload)?)
    }

    /// Get device identity
    ///
    /// Retrieves UID, position, hardware/firmware versions and the
    /// device identifier.
    pub async fn get_identity(&mut self) -> Result<Identity> {
        debug!("Getting identity...");

        let response = self.call(Function::GetIdentity, Bytes::new()).await?;
        let identity = Identity::from_payload(&response.payload)?;

        debug!("Identity: {}", identity);

        Ok(identity)
    }

    // Helper methods

    fn ensure_connected(&self) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        Ok(())
    }

    /// Issue one request and wait for the matching response
    async fn call(&mut self, function: Function, payload: Bytes) -> Result<Frame> {
        self.ensure_connected()?;

        let sequence = self.session.next_sequence();
        let frame = Frame::with_payload(self.uid, function, sequence, payload);

        self.send_frame(&frame).await?;
        self.receive_response(function, sequence).await
    }

    async fn send_frame(&mut self, frame: &Frame) -> Result<()> {
        trace!("Sending: {:?}", frame);

        let data = frame.encode();
        self.transport.send(&data).await?;

        Ok(())
    }

    async fn receive_response(&mut self, function: Function, sequence: u8) -> Result<Frame> {
        loop {
            let buf = self.transport.receive_frame(self.timeout.as_secs()).await?;
            let frame = Frame::decode(buf)?;

            trace!("Received: {:?}", frame);

            // Callbacks may arrive between a request and its response
            if frame.is_callback() {
                debug!("Skipping {} while waiting for a response", frame.function);
                continue;
            }

            if frame.function != function || frame.sequence != sequence {
                return Err(Error::InvalidResponse(format!(
                    "Expected response to {} (seq {}), got {} (seq {})",
                    function, sequence, frame.function, frame.sequence
                )));
            }

            if !frame.is_ok() {
                return Err(Error::Device {
                    function,
                    code: frame.error_code,
                });
            }

            return Ok(frame);
        }
    }
}

#[async_trait]
impl Connection for GasBricklet {
    /// Connect to brickd
    ///
    /// brickd performs no application-level handshake: once the TCP
    /// connection stands, the device can be called.
    async fn connect(&mut self) -> Result<()> {
        info!("Connecting to {}...", self.transport.remote_addr());

        self.transport.connect().await?;
        self.session.open()?;

        info!("Connected");

        Ok(())
    }

    /// Disconnect from brickd
    async fn disconnect(&mut self) -> Result<()> {
        if !self.is_connected() {
            return Ok(());
        }

        info!("Disconnecting from {}...", self.transport.remote_addr());

        self.transport.disconnect().await?;
        self.session.close();

        info!("Disconnected");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.session.is_connected() && self.transport.is_connected()
    }
}

#[async_trait]
impl GasDevice for GasBricklet {
    async fn get_calibration(&mut self) -> Result<CalibrationRecord> {
        debug!("Reading calibration...");

        let response = self.call(Function::GetCalibration, Bytes::new()).await?;
        let record = CalibrationRecord::from_payload(&response.payload)?;

        debug!("Calibration: {}", record);

        Ok(record)
    }

    async fn set_calibration(&mut self, record: &CalibrationRecord) -> Result<()> {
        debug!("Writing calibration: {}", record);

        self.call(Function::SetCalibration, record.to_payload())
            .await?;

        Ok(())
    }
}
