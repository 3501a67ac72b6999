//! Frame transport abstraction
//!
//! A transport delivers one complete frame per call. There is no framing,
//! retry or acknowledgement at this layer.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Sends complete frames to a display
///
/// Takes `&self` so a transport can be shared between threads.
pub trait Transport {
    /// Error type for transmit operations
    type Error;

    /// Send one frame
    ///
    /// Blocks until the frame has been handed to the network or an error
    /// occurs. Partial sends are reported as errors.
    fn transmit(&self, frame: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn transmit(&self, frame: &[u8]) -> Result<(), Self::Error> {
        (**self).transmit(frame)
    }
}

/// Transport configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransportConfig {
    /// Local address to bind; `None` binds an ephemeral port on the
    /// unspecified address of the display's address family
    pub bind_address: Option<SocketAddr>,
    /// Give up on a blocked send after this long
    pub write_timeout: Option<Duration>,
}

/// Transport that accepts and drops every frame
///
/// Counts what it drops so tests can check that something was sent.
#[derive(Debug, Default)]
pub struct DiscardTransport {
    frames: AtomicUsize,
    bytes: AtomicUsize,
}

impl DiscardTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames dropped so far
    pub fn frames_discarded(&self) -> usize {
        self.frames.load(Ordering::Relaxed)
    }

    /// Total size of all dropped frames
    pub fn bytes_discarded(&self) -> usize {
        self.bytes.load(Ordering::Relaxed)
    }
}

impl Transport for DiscardTransport {
    type Error = Infallible;

    fn transmit(&self, frame: &[u8]) -> Result<(), Self::Error> {
        self.frames.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(frame.len(), Ordering::Relaxed);
        Ok(())
    }
}
