//! TFP frame structure and encoding/decoding

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::trace;

use crate::{
    error::{Error, Result},
    function::Function,
};

/// Error code reported by the device in a response frame
///
/// Carried in the top two bits of the last header byte; the remaining
/// bits are reserved for future use.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    Ok,
    InvalidParameter,
    FunctionNotSupported,
    Unknown,
}

impl From<u8> for ErrorCode {
    fn from(value: u8) -> Self {
        match value & 0x03 {
            0 => Self::Ok,
            1 => Self::InvalidParameter,
            2 => Self::FunctionNotSupported,
            _ => Self::Unknown,
        }
    }
}

impl From<ErrorCode> for u8 {
    fn from(code: ErrorCode) -> u8 {
        match code {
            ErrorCode::Ok => 0,
            ErrorCode::InvalidParameter => 1,
            ErrorCode::FunctionNotSupported => 2,
            ErrorCode::Unknown => 3,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "ok",
            Self::InvalidParameter => "invalid parameter",
            Self::FunctionNotSupported => "function not supported",
            Self::Unknown => "unknown error",
        };
        write!(f, "{name}")
    }
}

/// TFP protocol frame
///
/// # Frame Structure
///
/// ```text
/// ┌─────────────┬──────────┬────────────┬──────────────┬──────────────┬─────────────┐
/// │     UID     │  Length  │ FunctionID │ SeqNum/Resp  │  ErrorCode   │   Payload   │
/// │   4 bytes   │  1 byte  │   1 byte   │    1 byte    │    1 byte    │   N bytes   │
/// │  (LE u32)   │  (u8)    │   (u8)     │ (bits 4..7 / │ (bits 6..7)  │   (bytes)   │
/// │             │          │            │    bit 3)    │              │             │
/// └─────────────┴──────────┴────────────┴──────────────┴──────────────┴─────────────┘
/// ```
///
/// The length byte counts the whole frame including the 8-byte header.
/// Sequence numbers run 1..=15; 0 marks an unsolicited callback frame.
///
/// # Examples
///
/// ```
/// use tfgas_core::{Frame, Function};
///
/// // Create a calibration request
/// let frame = Frame::new(188_325, Function::GetCalibration, 1);
/// let encoded = frame.encode();
///
/// // Decode it back
/// let decoded = Frame::decode(encoded).unwrap();
/// assert_eq!(frame.function, decoded.function);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Destination or source device UID
    pub uid: u32,

    /// Function ID
    pub function: Function,

    /// Sequence number (1..=15 for requests, 0 for callbacks)
    pub sequence: u8,

    /// Whether the peer is expected to answer this frame
    pub response_expected: bool,

    /// Error code (only meaningful in responses)
    pub error_code: ErrorCode,

    /// Frame payload (function-specific data)
    pub payload: Bytes,
}

impl Frame {
    /// Frame header size in bytes
    pub const HEADER_SIZE: usize = 8;

    /// Maximum total frame size
    pub const MAX_SIZE: usize = 80;

    /// Maximum payload size
    pub const MAX_PAYLOAD_SIZE: usize = Self::MAX_SIZE - Self::HEADER_SIZE;

    /// Sequence number used by callback frames
    pub const CALLBACK_SEQUENCE: u8 = 0;

    /// Create a new request frame with empty payload
    ///
    /// Requests created here always set the response-expected flag, so
    /// setters are acknowledged as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use tfgas_core::{Frame, Function};
    ///
    /// let frame = Frame::new(188_325, Function::GetCalibration, 1);
    /// assert_eq!(frame.payload.len(), 0);
    /// ```
    pub fn new(uid: u32, function: Function, sequence: u8) -> Self {
        Self {
            uid,
            function,
            sequence,
            response_expected: true,
            error_code: ErrorCode::Ok,
            payload: Bytes::new(),
        }
    }

    /// Create a request frame with payload
    ///
    /// # Examples
    ///
    /// ```
    /// use tfgas_core::{Frame, Function};
    ///
    /// let payload = vec![1, 2, 3, 4];
    /// let frame = Frame::with_payload(188_325, Function::SetCalibration, 2, payload);
    /// assert_eq!(frame.payload.len(), 4);
    /// ```
    pub fn with_payload(
        uid: u32,
        function: Function,
        sequence: u8,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            uid,
            function,
            sequence,
            response_expected: true,
            error_code: ErrorCode::Ok,
            payload: payload.into(),
        }
    }

    /// Encode frame to bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use tfgas_core::{Frame, Function};
    ///
    /// let frame = Frame::new(188_325, Function::GetCalibration, 1);
    /// let bytes = frame.encode();
    /// assert_eq!(bytes.len(), 8); // Header only
    /// ```
    pub fn encode(&self) -> BytesMut {
        let total_size = Self::HEADER_SIZE + self.payload.len();
        debug_assert!(total_size <= Self::MAX_SIZE);

        let mut buf = BytesMut::with_capacity(total_size);

        buf.put_u32_le(self.uid);
        buf.put_u8(total_size as u8);
        buf.put_u8(self.function.into());
        buf.put_u8((self.sequence & 0x0F) << 4 | (self.response_expected as u8) << 3);
        buf.put_u8(u8::from(self.error_code) << 6);

        buf.put_slice(&self.payload);

        buf
    }

    /// Decode frame from bytes
    ///
    /// The buffer must hold exactly one frame, as delivered by the
    /// transport layer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Buffer is too short (< 8 bytes)
    /// - The declared length is outside 8..=80 or disagrees with the buffer
    /// - The function ID is unknown
    pub fn decode(mut buf: BytesMut) -> Result<Self> {
        let actual = buf.len();
        if actual < Self::HEADER_SIZE {
            return Err(Error::FrameTooShort {
                expected: Self::HEADER_SIZE,
                actual,
            });
        }

        let uid = buf.get_u32_le();
        let declared = buf.get_u8();
        let function_raw = buf.get_u8();
        let sequence_byte = buf.get_u8();
        let error_byte = buf.get_u8();

        if (declared as usize) < Self::HEADER_SIZE || declared as usize > Self::MAX_SIZE {
            return Err(Error::InvalidLength { declared });
        }
        if declared as usize != actual {
            return Err(Error::LengthMismatch {
                declared: declared as usize,
                actual,
            });
        }

        let function = Function::try_from(function_raw)?;

        let frame = Self {
            uid,
            function,
            sequence: sequence_byte >> 4,
            response_expected: sequence_byte & 0x08 != 0,
            error_code: ErrorCode::from(error_byte >> 6),
            payload: buf.freeze(),
        };

        trace!(
            uid = frame.uid,
            function = %frame.function,
            sequence = frame.sequence,
            payload_len = frame.payload.len(),
            "Decoded frame"
        );

        Ok(frame)
    }

    /// Check if this is an unsolicited callback frame
    pub fn is_callback(&self) -> bool {
        self.sequence == Self::CALLBACK_SEQUENCE
    }

    /// Check if the device reported success
    pub fn is_ok(&self) -> bool {
        self.error_code == ErrorCode::Ok
    }

    /// Get total frame size
    pub fn size(&self) -> usize {
        Self::HEADER_SIZE + self.payload.len()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("uid", &format!("0x{:08X}", self.uid))
            .field("function", &self.function)
            .field("sequence", &self.sequence)
            .field("response_expected", &self.response_expected)
            .field("error_code", &self.error_code)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frame[{}](uid={}, seq={}, len={})",
            self.function,
            self.uid,
            self.sequence,
            self.size()
        )
    }
}
