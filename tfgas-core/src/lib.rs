//! # tfgas-core
//!
//! Core protocol implementation for the Tinkerforge Gas Bricklet.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame structure and encoding/decoding
//! - Function ID definitions
//! - Base58 UID decoding
//! - Session and sequence number state

pub mod base58;
pub mod error;
pub mod frame;
pub mod function;
pub mod session;

pub use error::{Error, Result};
pub use frame::{ErrorCode, Frame};
pub use function::Function;
pub use session::{Session, SessionState};

/// Protocol version information
pub const PROTOCOL_VERSION: &str = "2.0";

/// Default brickd port
pub const DEFAULT_PORT: u16 = 4223;

/// Maximum frame size (header + payload)
pub const MAX_FRAME_SIZE: usize = 80;

/// Frame header size
pub const HEADER_SIZE: usize = 8;
