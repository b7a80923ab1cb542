//! # tfgas
//!
//! Client for the Tinkerforge Gas Bricklet, reached through brickd over TCP.
//!
//! ## Features
//!
//! - Type-safe TFP framing with request/response correlation
//! - Async/await API using Tokio
//! - Capability traits so the calibration sequence runs against fakes in tests
//!
//! ## Quick Start
//!
//! ```no_run
//! use tfgas::{Connection, GasBricklet, GasDevice};
//!
//! #[tokio::main]
//! async fn main() -> tfgas::Result<()> {
//!     // Bind a handle to the device behind the local brickd
//!     let mut gas = GasBricklet::new("XYZ", "localhost", 4223)?;
//!     gas.connect().await?;
//!
//!     let calibration = gas.get_calibration().await?;
//!     println!("Calibration: {}", calibration);
//!
//!     gas.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod bricklet;
pub mod calibrate;
pub mod client;
pub mod error;

// Re-exports
pub use bricklet::GasBricklet;
pub use calibrate::{CalibrationConfig, ConsolePrompt, OperatorPrompt};
pub use client::{Connection, GasDevice};
pub use error::{Error, Result};

// Re-export types
pub use tfgas_core::{Frame, Function, Session};
pub use tfgas_types::{CalibrationRecord, CallbackConfig, GasType, GasValues, Identity};
