//! Sending commands to a display
//!
//! Every send serializes the command first, so a fake connection fails on
//! exactly the commands a real one fails on.

use std::net::ToSocketAddrs;

use pixmatrix_core::PixelGrid;
use pixmatrix_hal::{DiscardTransport, Transport, TransportConfig, UdpTransport};
use pixmatrix_protocol::{Command, CompressionCode, Frame, ServicePointError};
use tracing::{debug, info, trace, warn};

use crate::config::DisplayConfig;

/// Where frames go
#[derive(Debug)]
enum Link {
    Udp(UdpTransport),
    Fake(DiscardTransport),
}

/// A connection to one display
#[derive(Debug)]
pub struct Connection {
    link: Link,
    compression: CompressionCode,
}

impl Connection {
    /// Open a UDP connection with default settings
    pub fn open(addr: impl ToSocketAddrs) -> Result<Self, ServicePointError> {
        let transport = UdpTransport::open(addr, &TransportConfig::default())?;
        info!("connected to display at {}", transport.peer_addr());
        Ok(Self {
            link: Link::Udp(transport),
            compression: CompressionCode::default(),
        })
    }

    /// Open the connection a configuration describes
    ///
    /// Invalid settings are reported as [`ServicePointError::IoError`].
    pub fn open_with(config: &DisplayConfig) -> Result<Self, ServicePointError> {
        if config.fake {
            debug!("configuration requests a fake connection");
            return Ok(Self {
                link: Link::Fake(DiscardTransport::new()),
                compression: config.compression,
            });
        }

        let transport_config =
            config
                .transport_config()
                .map_err(|err| ServicePointError::IoError {
                    message: err.to_string(),
                })?;
        let transport = UdpTransport::open(config.address.as_str(), &transport_config)?;
        info!(
            "connected to display at {} using {:?}",
            transport.peer_addr(),
            config.compression
        );
        Ok(Self {
            link: Link::Udp(transport),
            compression: config.compression,
        })
    }

    /// A connection that serializes commands and then drops them
    pub fn fake() -> Self {
        Self {
            link: Link::Fake(DiscardTransport::new()),
            compression: CompressionCode::default(),
        }
    }

    /// Whether frames are discarded instead of sent
    pub fn is_fake(&self) -> bool {
        matches!(self.link, Link::Fake(_))
    }

    /// Frames a fake connection has dropped, `None` for real connections
    pub fn discarded_frames(&self) -> Option<usize> {
        match &self.link {
            Link::Fake(transport) => Some(transport.frames_discarded()),
            Link::Udp(_) => None,
        }
    }

    /// Compression used by [`send_bitmap`](Self::send_bitmap)
    pub fn compression(&self) -> CompressionCode {
        self.compression
    }

    /// Serialize and send a command
    ///
    /// Encoding failures become [`ServicePointError::InvalidCommand`] and
    /// transport failures [`ServicePointError::IoError`]. Nothing is retried.
    pub fn send(&self, command: &Command) -> Result<(), ServicePointError> {
        let frame = command.to_frame().map_err(|err| {
            warn!("could not encode {:?}: {}", command.code(), err);
            ServicePointError::from(err)
        })?;
        self.send_frame(frame)
    }

    /// Send an already encoded frame
    pub fn send_frame(&self, frame: Frame) -> Result<(), ServicePointError> {
        let bytes = frame.encode_to_vec();
        trace!(
            "frame {:#06x} with {} payload bytes",
            frame.header.command_code,
            frame.payload.len()
        );

        match &self.link {
            Link::Udp(transport) => transport.transmit(&bytes).map_err(|err| {
                warn!("sending to {} failed: {}", transport.peer_addr(), err);
                ServicePointError::from(err)
            }),
            Link::Fake(transport) => match transport.transmit(&bytes) {
                Ok(()) => Ok(()),
                Err(never) => match never {},
            },
        }
    }

    /// Overwrite the window at `(x, y)` with `grid`, using this connection's compression
    pub fn send_bitmap(&self, x: usize, y: usize, grid: &PixelGrid) -> Result<(), ServicePointError> {
        self.send(&Command::bitmap_linear_win(x, y, grid, self.compression))
    }
}
