//! One-shot calibration cycle
//!
//! Reads the device calibration, writes the reference record, reads it
//! back and waits for the operator before disconnecting. Any failure
//! propagates immediately; later steps are not attempted.

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use tfgas_types::CalibrationRecord;

use crate::client::{Connection, GasDevice};
use crate::error::Result;

/// Where to find the device: daemon address plus device UID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationConfig {
    pub host: String,
    pub port: u16,
    pub uid: String,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: tfgas_core::DEFAULT_PORT,
            uid: "XYZ".to_string(),
        }
    }
}

/// Known-good reference calibration written on every run
pub const REFERENCE_CALIBRATION: CalibrationRecord = CalibrationRecord {
    adc_count_zero: 107_292,
    temperature_zero: 0,
    humidity_zero: 0,
    compensation_zero_low: 0,
    compensation_zero_high: 0,
    ppm_span: 0,
    adc_count_span: 0,
    temperature_span: 0,
    humidity_span: 0,
    compensation_span_low: 0,
    compensation_span_high: 0,
    temperature_offset: 0,
    gas_type: 0,
    sensitivity: 290,
};

/// Synchronization point with the human operator
#[async_trait]
pub trait OperatorPrompt {
    /// Block until the operator confirms
    async fn wait_for_confirmation(&mut self) -> Result<()>;
}

/// Prompt that waits for a line on the console
pub struct ConsolePrompt;

#[async_trait]
impl OperatorPrompt for ConsolePrompt {
    async fn wait_for_confirmation(&mut self) -> Result<()> {
        println!("Press enter to exit");

        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;

        Ok(())
    }
}

/// Run the calibration cycle against one device
///
/// Issues exactly connect, get, set, get, disconnect in that order,
/// printing both fetched records to `out` and pausing on `prompt`
/// before the disconnect. A failing step aborts the rest of the
/// sequence, so no disconnect is attempted after a failed connect.
pub async fn run<T, P, W>(
    target: &mut T,
    record: &CalibrationRecord,
    prompt: &mut P,
    out: &mut W,
) -> Result<()>
where
    T: Connection + GasDevice + Send,
    P: OperatorPrompt + Send,
    W: Write + Send,
{
    target.connect().await?;

    let before = target.get_calibration().await?;
    writeln!(out, "Calibration before: {before}")?;

    target.set_calibration(record).await?;

    let after = target.get_calibration().await?;
    writeln!(out, "Calibration after: {after}")?;

    prompt.wait_for_confirmation().await?;

    target.disconnect().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    /// Fake calibration target: records every call, enforces the
    /// connect-before-use ordering and answers get with whatever the
    /// last set stored.
    struct FakeTarget {
        log: CallLog,
        calibration: CalibrationRecord,
        set_args: Vec<CalibrationRecord>,
        connected: bool,
        fail_connect: bool,
        fail_get: bool,
    }

    impl FakeTarget {
        fn new(log: CallLog) -> Self {
            Self {
                log,
                calibration: CalibrationRecord::default(),
                set_args: Vec::new(),
                connected: false,
                fail_connect: false,
                fail_get: false,
            }
        }

        fn ensure_connected(&self) -> Result<()> {
            if !self.connected {
                return Err(Error::NotConnected);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Connection for FakeTarget {
        async fn connect(&mut self) -> Result<()> {
            self.log.lock().unwrap().push("connect");
            if self.fail_connect {
                return Err(Error::InvalidResponse("connection refused".into()));
            }
            self.connected = true;
            Ok(())
        }

        async fn disconnect(&mut self) -> Result<()> {
            self.log.lock().unwrap().push("disconnect");
            self.connected = false;
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.connected
        }
    }

    #[async_trait]
    impl GasDevice for FakeTarget {
        async fn get_calibration(&mut self) -> Result<CalibrationRecord> {
            self.log.lock().unwrap().push("get");
            self.ensure_connected()?;
            if self.fail_get {
                return Err(Error::InvalidResponse("request timed out".into()));
            }
            Ok(self.calibration)
        }

        async fn set_calibration(&mut self, record: &CalibrationRecord) -> Result<()> {
            self.log.lock().unwrap().push("set");
            self.ensure_connected()?;
            self.set_args.push(*record);
            self.calibration = *record;
            Ok(())
        }
    }

    struct FakePrompt {
        log: CallLog,
    }

    #[async_trait]
    impl OperatorPrompt for FakePrompt {
        async fn wait_for_confirmation(&mut self) -> Result<()> {
            self.log.lock().unwrap().push("confirm");
            Ok(())
        }
    }

    fn fixture() -> (CallLog, FakeTarget, FakePrompt, Vec<u8>) {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let target = FakeTarget::new(log.clone());
        let prompt = FakePrompt { log: log.clone() };
        (log, target, prompt, Vec::new())
    }

    #[tokio::test]
    async fn test_success_path_exact_call_sequence() {
        let (log, mut target, mut prompt, mut out) = fixture();

        run(&mut target, &REFERENCE_CALIBRATION, &mut prompt, &mut out)
            .await
            .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["connect", "get", "set", "get", "confirm", "disconnect"]
        );
        assert_eq!(target.set_args, vec![REFERENCE_CALIBRATION]);
        assert!(!target.is_connected());
    }

    #[tokio::test]
    async fn test_success_path_prints_both_records() {
        let (_log, mut target, mut prompt, mut out) = fixture();

        run(&mut target, &REFERENCE_CALIBRATION, &mut prompt, &mut out)
            .await
            .unwrap();

        let output = String::from_utf8(out).unwrap();
        assert_eq!(
            output,
            "Calibration before: (0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0)\n\
             Calibration after: (107292, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 290)\n"
        );
    }

    #[tokio::test]
    async fn test_round_trip_law_on_fake_backend() {
        let (_log, mut target, mut prompt, mut out) = fixture();

        run(&mut target, &REFERENCE_CALIBRATION, &mut prompt, &mut out)
            .await
            .unwrap();

        // The second get returned exactly what set wrote
        assert_eq!(target.calibration, REFERENCE_CALIBRATION);
    }

    #[tokio::test]
    async fn test_connect_failure_aborts_everything() {
        let (log, mut target, mut prompt, mut out) = fixture();
        target.fail_connect = true;

        let result = run(&mut target, &REFERENCE_CALIBRATION, &mut prompt, &mut out).await;

        assert!(result.is_err());
        // No device calls and in particular no disconnect attempt
        assert_eq!(*log.lock().unwrap(), vec!["connect"]);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_get_failure_skips_remaining_steps() {
        let (log, mut target, mut prompt, mut out) = fixture();
        target.fail_get = true;

        let result = run(&mut target, &REFERENCE_CALIBRATION, &mut prompt, &mut out).await;

        assert!(result.is_err());
        assert_eq!(*log.lock().unwrap(), vec!["connect", "get"]);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_fake_rejects_calls_before_connect() {
        let (_log, mut target, _prompt, _out) = fixture();

        let result = target.get_calibration().await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }

    #[test]
    fn test_default_config_points_at_local_brickd() {
        let config = CalibrationConfig::default();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 4223);
        assert_eq!(config.uid, "XYZ");
    }
}
