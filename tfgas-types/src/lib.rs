//! Type definitions for tfgas

pub mod calibration;
pub mod error;
pub mod identity;
pub mod values;

pub use calibration::CalibrationRecord;
pub use error::{Error, Result};
pub use identity::Identity;
pub use values::{CallbackConfig, GasType, GasValues};
