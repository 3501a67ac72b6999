//! Pixmatrix frame transports
//!
//! This crate moves encoded frames to a display. It knows nothing about
//! commands; callers hand it complete datagrams.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Connection (pixmatrix-display)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pixmatrix-hal (this crate - Transport) │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ UdpTransport  │       │ Discard-      │
//! │               │       │ Transport     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - send one complete frame

#![deny(unsafe_code)]

pub mod transport;
pub mod udp;

pub use transport::{DiscardTransport, Transport, TransportConfig};
pub use udp::UdpTransport;
