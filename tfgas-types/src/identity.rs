//! Device identity structure

use bytes::Buf;
use std::fmt;

use crate::error::{Error, Result};

/// Identity reported by every Bricklet through get_identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Device UID as printed on the Bricklet
    pub uid: String,

    /// UID of the Brick or Bricklet the device is connected to
    pub connected_uid: String,

    /// Port the device is plugged into ('a'..'h', or 'z' for the base)
    pub position: char,

    /// Hardware version (major, minor, revision)
    pub hardware_version: [u8; 3],

    /// Firmware version (major, minor, revision)
    pub firmware_version: [u8; 3],

    /// Numeric device type identifier
    pub device_identifier: u16,
}

impl Identity {
    /// Wire size of a get_identity response payload
    pub const PAYLOAD_SIZE: usize = 25;

    /// Decode a get_identity response payload
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() != Self::PAYLOAD_SIZE {
            return Err(Error::PayloadLength {
                expected: Self::PAYLOAD_SIZE,
                actual: payload.len(),
            });
        }

        let uid = fixed_str(&payload[0..8]);
        let connected_uid = fixed_str(&payload[8..16]);

        let mut buf = &payload[16..];
        let position = buf.get_u8() as char;

        let mut hardware_version = [0u8; 3];
        buf.copy_to_slice(&mut hardware_version);

        let mut firmware_version = [0u8; 3];
        buf.copy_to_slice(&mut firmware_version);

        let device_identifier = buf.get_u16_le();

        Ok(Self {
            uid,
            connected_uid,
            position,
            hardware_version,
            firmware_version,
            device_identifier,
        })
    }
}

/// Read a NUL-padded fixed-width string field
fn fixed_str(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Device[UID: {}, HW: {}.{}.{}, FW: {}.{}.{}]",
            self.uid,
            self.hardware_version[0],
            self.hardware_version[1],
            self.hardware_version[2],
            self.firmware_version[0],
            self.firmware_version[1],
            self.firmware_version[2]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_payload() -> Vec<u8> {
        let mut payload = Vec::with_capacity(Identity::PAYLOAD_SIZE);
        payload.extend_from_slice(b"XYZ\0\0\0\0\0");
        payload.extend_from_slice(b"6yLzab\0\0");
        payload.push(b'c');
        payload.extend_from_slice(&[1, 0, 0]);
        payload.extend_from_slice(&[2, 0, 3]);
        payload.extend_from_slice(&297u16.to_le_bytes());
        payload
    }

    #[test]
    fn test_identity_decode() {
        let identity = Identity::from_payload(&sample_payload()).unwrap();

        assert_eq!(identity.uid, "XYZ");
        assert_eq!(identity.connected_uid, "6yLzab");
        assert_eq!(identity.position, 'c');
        assert_eq!(identity.hardware_version, [1, 0, 0]);
        assert_eq!(identity.firmware_version, [2, 0, 3]);
        assert_eq!(identity.device_identifier, 297);
    }

    #[test]
    fn test_identity_wrong_length() {
        assert!(Identity::from_payload(&[0u8; 24]).is_err());
    }

    #[test]
    fn test_identity_display() {
        let identity = Identity::from_payload(&sample_payload()).unwrap();
        assert_eq!(identity.to_string(), "Device[UID: XYZ, HW: 1.0.0, FW: 2.0.3]");
    }
}
