//! Gas Bricklet function ID definitions

use std::fmt;

use crate::error::{Error, Result};

/// Function IDs understood by the Gas Bricklet firmware
///
/// IDs 1-6 are the device's own request functions, 7 is the unsolicited
/// values callback, and 255 is the `get_identity` call every Bricklet
/// answers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Function {
    GetValues = 1,
    GetAdcCount = 2,
    SetCalibration = 3,
    GetCalibration = 4,
    SetValuesCallbackConfiguration = 5,
    GetValuesCallbackConfiguration = 6,

    /// Periodic values callback (device to client only)
    CallbackValues = 7,

    GetIdentity = 255,
}

impl Function {
    /// Check if this function is only ever sent by the device
    pub fn is_callback(self) -> bool {
        matches!(self, Self::CallbackValues)
    }

    /// Get function name
    pub fn name(self) -> &'static str {
        match self {
            Self::GetValues => "FID_GET_VALUES",
            Self::GetAdcCount => "FID_GET_ADC_COUNT",
            Self::SetCalibration => "FID_SET_CALIBRATION",
            Self::GetCalibration => "FID_GET_CALIBRATION",
            Self::SetValuesCallbackConfiguration => "FID_SET_VALUES_CALLBACK_CONFIGURATION",
            Self::GetValuesCallbackConfiguration => "FID_GET_VALUES_CALLBACK_CONFIGURATION",
            Self::CallbackValues => "FID_CALLBACK_VALUES",
            Self::GetIdentity => "FID_GET_IDENTITY",
        }
    }
}

impl From<Function> for u8 {
    fn from(function: Function) -> u8 {
        function as u8
    }
}

impl TryFrom<u8> for Function {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::GetValues),
            2 => Ok(Self::GetAdcCount),
            3 => Ok(Self::SetCalibration),
            4 => Ok(Self::GetCalibration),
            5 => Ok(Self::SetValuesCallbackConfiguration),
            6 => Ok(Self::GetValuesCallbackConfiguration),
            7 => Ok(Self::CallbackValues),
            255 => Ok(Self::GetIdentity),
            _ => Err(Error::UnknownFunction(value)),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), *self as u8)
    }
}
