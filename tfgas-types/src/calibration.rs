//! Calibration record structure

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;

use crate::error::{Error, Result};

/// Gas Bricklet calibration record
///
/// The 14 numeric fields mirror the firmware's calibration state: a zero
/// point, a span point, compensation polynomial halves for both, a
/// temperature offset, the gas type code and the sensor sensitivity.
/// Their semantics belong to the firmware; the client reads, displays
/// and writes the record as an inert value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalibrationRecord {
    pub adc_count_zero: u32,
    pub temperature_zero: i16,
    pub humidity_zero: i16,
    pub compensation_zero_low: i32,
    pub compensation_zero_high: i32,
    pub ppm_span: u32,
    pub adc_count_span: u32,
    pub temperature_span: i16,
    pub humidity_span: i16,
    pub compensation_span_low: i32,
    pub compensation_span_high: i32,
    pub temperature_offset: i16,
    pub gas_type: u8,
    pub sensitivity: i32,
}

impl CalibrationRecord {
    /// Wire size of the record, matching the firmware's packed struct
    pub const PAYLOAD_SIZE: usize = 43;

    /// Encode the record as a set_calibration payload
    pub fn to_payload(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::PAYLOAD_SIZE);

        buf.put_u32_le(self.adc_count_zero);
        buf.put_i16_le(self.temperature_zero);
        buf.put_i16_le(self.humidity_zero);
        buf.put_i32_le(self.compensation_zero_low);
        buf.put_i32_le(self.compensation_zero_high);
        buf.put_u32_le(self.ppm_span);
        buf.put_u32_le(self.adc_count_span);
        buf.put_i16_le(self.temperature_span);
        buf.put_i16_le(self.humidity_span);
        buf.put_i32_le(self.compensation_span_low);
        buf.put_i32_le(self.compensation_span_high);
        buf.put_i16_le(self.temperature_offset);
        buf.put_u8(self.gas_type);
        buf.put_i32_le(self.sensitivity);

        buf.freeze()
    }

    /// Decode a get_calibration response payload
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not exactly 43 bytes.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() != Self::PAYLOAD_SIZE {
            return Err(Error::PayloadLength {
                expected: Self::PAYLOAD_SIZE,
                actual: payload.len(),
            });
        }

        let mut buf = payload;

        Ok(Self {
            adc_count_zero: buf.get_u32_le(),
            temperature_zero: buf.get_i16_le(),
            humidity_zero: buf.get_i16_le(),
            compensation_zero_low: buf.get_i32_le(),
            compensation_zero_high: buf.get_i32_le(),
            ppm_span: buf.get_u32_le(),
            adc_count_span: buf.get_u32_le(),
            temperature_span: buf.get_i16_le(),
            humidity_span: buf.get_i16_le(),
            compensation_span_low: buf.get_i32_le(),
            compensation_span_high: buf.get_i32_le(),
            temperature_offset: buf.get_i16_le(),
            gas_type: buf.get_u8(),
            sensitivity: buf.get_i32_le(),
        })
    }
}

impl fmt::Display for CalibrationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {})",
            self.adc_count_zero,
            self.temperature_zero,
            self.humidity_zero,
            self.compensation_zero_low,
            self.compensation_zero_high,
            self.ppm_span,
            self.adc_count_span,
            self.temperature_span,
            self.humidity_span,
            self.compensation_span_low,
            self.compensation_span_high,
            self.temperature_offset,
            self.gas_type,
            self.sensitivity
        )
    }
}
