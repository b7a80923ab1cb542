//! Session management for a brickd connection
//!
//! brickd performs no application-level handshake: a session opens when
//! the TCP connection is established and closes with it. The session
//! tracks:
//! - Connection state
//! - Sequence number allocation for request/response correlation

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::{Error, Result};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not connected
    Disconnected,

    /// Connected and ready for device calls
    Connected,
}

/// Session manager
///
/// Manages connection state and sequence number generation.
/// Thread-safe and can be cloned cheaply (Arc internally).
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    /// Last sequence number handed out (0 before the first request)
    sequence: AtomicU8,

    /// Current session state
    state: parking_lot::RwLock<SessionState>,
}

impl Session {
    /// Highest valid sequence number; the counter wraps back to 1 past it,
    /// 0 stays reserved for callback frames
    pub const MAX_SEQUENCE: u8 = 15;

    /// Create a new disconnected session
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                sequence: AtomicU8::new(0),
                state: parking_lot::RwLock::new(SessionState::Disconnected),
            }),
        }
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        *self.inner.state.read()
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        matches!(self.state(), SessionState::Connected)
    }

    /// Mark the session as open after the transport connected
    pub fn open(&self) -> Result<()> {
        let mut state = self.inner.state.write();

        if *state != SessionState::Disconnected {
            return Err(Error::InvalidSessionState(format!(
                "Cannot open from state: {:?}",
                *state
            )));
        }

        self.inner.sequence.store(0, Ordering::Release);
        *state = SessionState::Connected;

        Ok(())
    }

    /// Close session
    pub fn close(&self) {
        self.inner.sequence.store(0, Ordering::Release);
        *self.inner.state.write() = SessionState::Disconnected;
    }

    /// Get next sequence number
    ///
    /// Sequence numbers run 1..=15 and wrap back to 1.
    pub fn next_sequence(&self) -> u8 {
        let mut current = self.inner.sequence.load(Ordering::Acquire);
        loop {
            let next = current % Self::MAX_SEQUENCE + 1;
            match self.inner.sequence.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
