//! UDP transport
//!
//! One frame is one datagram. The socket is connected to the display so
//! datagrams from other peers are filtered by the OS.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use tracing::{debug, trace};

use crate::transport::{Transport, TransportConfig};

/// Transport sending frames as UDP datagrams
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpTransport {
    /// Open a socket for the display at `addr`
    ///
    /// Uses the first address `addr` resolves to.
    pub fn open(addr: impl ToSocketAddrs, config: &TransportConfig) -> io::Result<Self> {
        let peer = addr.to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")
        })?;

        let bind_address = config.bind_address.unwrap_or(match peer {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        });

        let socket = UdpSocket::bind(bind_address)?;
        socket.connect(peer)?;
        socket.set_write_timeout(config.write_timeout)?;

        debug!(
            "opened UDP transport {} -> {}",
            socket.local_addr()?,
            peer
        );
        Ok(Self { socket, peer })
    }

    /// Address of the display
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Address the socket is bound to
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl Transport for UdpTransport {
    type Error = io::Error;

    fn transmit(&self, frame: &[u8]) -> Result<(), Self::Error> {
        let sent = self.socket.send(frame)?;
        if sent != frame.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("sent {} of {} bytes", sent, frame.len()),
            ));
        }
        trace!("sent {} byte datagram to {}", sent, self.peer);
        Ok(())
    }
}
