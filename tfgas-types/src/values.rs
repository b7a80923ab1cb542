//! Measured gas values and callback configuration

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;

use crate::error::{Error, Result};

/// Gas type detected by the sensor
///
/// Codes from the firmware; the sensor reports which electrochemical
/// cell is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GasType {
    Co = 0,
    EtOh = 1,
    H2s = 2,
    So2 = 3,
    No2 = 4,
    O3 = 5,
    Iaq = 6,
    Resp = 7,
    O3No2 = 8,
}

impl GasType {
    /// Get gas name
    pub fn name(self) -> &'static str {
        match self {
            Self::Co => "CO",
            Self::EtOh => "EtOH",
            Self::H2s => "H2S",
            Self::So2 => "SO2",
            Self::No2 => "NO2",
            Self::O3 => "O3",
            Self::Iaq => "IAQ",
            Self::Resp => "Resp",
            Self::O3No2 => "O3+NO2",
        }
    }
}

impl From<GasType> for u8 {
    fn from(gas_type: GasType) -> u8 {
        gas_type as u8
    }
}

impl TryFrom<u8> for GasType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Co),
            1 => Ok(Self::EtOh),
            2 => Ok(Self::H2s),
            3 => Ok(Self::So2),
            4 => Ok(Self::No2),
            5 => Ok(Self::O3),
            6 => Ok(Self::Iaq),
            7 => Ok(Self::Resp),
            8 => Ok(Self::O3No2),
            _ => Err(Error::InvalidGasType(value)),
        }
    }
}

impl fmt::Display for GasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One measurement reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasValues {
    /// Gas concentration in ppb
    pub gas_concentration: i32,

    /// Temperature in 1/100 °C
    pub temperature: i16,

    /// Relative humidity in 1/100 %RH
    pub humidity: u16,

    /// Which gas the concentration refers to
    pub gas_type: GasType,
}

impl GasValues {
    /// Wire size of a get_values response payload
    pub const PAYLOAD_SIZE: usize = 9;

    /// Decode a get_values response payload
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() != Self::PAYLOAD_SIZE {
            return Err(Error::PayloadLength {
                expected: Self::PAYLOAD_SIZE,
                actual: payload.len(),
            });
        }

        let mut buf = payload;

        Ok(Self {
            gas_concentration: buf.get_i32_le(),
            temperature: buf.get_i16_le(),
            humidity: buf.get_u16_le(),
            gas_type: GasType::try_from(buf.get_u8())?,
        })
    }
}

impl fmt::Display for GasValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ppb at {:.2} °C, {:.2} %RH",
            self.gas_type,
            self.gas_concentration,
            self.temperature as f64 / 100.0,
            self.humidity as f64 / 100.0
        )
    }
}

/// Configuration of the periodic values callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallbackConfig {
    /// Callback period in milliseconds (0 disables the callback)
    pub period: u32,

    /// Only fire when the values changed since the last callback
    pub value_has_to_change: bool,
}

impl CallbackConfig {
    /// Wire size of the configuration payload
    pub const PAYLOAD_SIZE: usize = 5;

    /// Encode as a set_values_callback_configuration payload
    pub fn to_payload(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::PAYLOAD_SIZE);

        buf.put_u32_le(self.period);
        buf.put_u8(self.value_has_to_change as u8);

        buf.freeze()
    }

    /// Decode a get_values_callback_configuration response payload
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() != Self::PAYLOAD_SIZE {
            return Err(Error::PayloadLength {
                expected: Self::PAYLOAD_SIZE,
                actual: payload.len(),
            });
        }

        let mut buf = payload;

        Ok(Self {
            period: buf.get_u32_le(),
            value_has_to_change: buf.get_u8() != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gas_type_conversion() {
        assert_eq!(u8::from(GasType::H2s), 2);
        assert_eq!(GasType::try_from(8).unwrap(), GasType::O3No2);
        assert!(GasType::try_from(9).is_err());
    }

    #[test]
    fn test_values_decode() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1_250i32.to_le_bytes());
        payload.extend_from_slice(&2_150i16.to_le_bytes());
        payload.extend_from_slice(&4_820u16.to_le_bytes());
        payload.push(0);

        let values = GasValues::from_payload(&payload).unwrap();

        assert_eq!(values.gas_concentration, 1_250);
        assert_eq!(values.temperature, 2_150);
        assert_eq!(values.humidity, 4_820);
        assert_eq!(values.gas_type, GasType::Co);
    }

    #[test]
    fn test_values_decode_bad_gas_type() {
        let mut payload = vec![0u8; 9];
        payload[8] = 200;

        assert!(matches!(
            GasValues::from_payload(&payload),
            Err(Error::InvalidGasType(200))
        ));
    }

    #[test]
    fn test_values_display() {
        let values = GasValues {
            gas_concentration: 1_250,
            temperature: 2_150,
            humidity: 4_820,
            gas_type: GasType::Co,
        };

        assert_eq!(values.to_string(), "CO 1250 ppb at 21.50 °C, 48.20 %RH");
    }

    #[test]
    fn test_callback_config_round_trip() {
        let config = CallbackConfig {
            period: 1_000,
            value_has_to_change: true,
        };

        let payload = config.to_payload();
        assert_eq!(payload.len(), CallbackConfig::PAYLOAD_SIZE);

        let decoded = CallbackConfig::from_payload(&payload).unwrap();
        assert_eq!(config, decoded);
    }

    #[test]
    fn test_callback_config_wrong_length() {
        assert!(CallbackConfig::from_payload(&[0u8; 4]).is_err());
    }
}
