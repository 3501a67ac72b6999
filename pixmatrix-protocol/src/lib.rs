//! Pixmatrix Display Protocol
//!
//! This crate defines the UDP protocol between a client and the pixel-matrix
//! display. Every datagram carries exactly one command:
//!
//! ```text
//! ┌──────────────┬──────┬──────┬──────┬──────┬──────────────────┐
//! │ COMMAND CODE │ A    │ B    │ C    │ D    │ PAYLOAD          │
//! │ u16 BE       │ u16  │ u16  │ u16  │ u16  │ 0..n bytes       │
//! └──────────────┴──────┴──────┴──────┴──────┴──────────────────┘
//! ```
//!
//! The meaning of `A`..`D` depends on the command (offsets, dimensions,
//! payload length, compression). Bitmap payloads may be compressed with
//! one of the codecs in [`compression`].

#![deny(unsafe_code)]

pub mod command;
pub mod command_code;
pub mod compression;
pub mod error;
pub mod frame;

pub use command::{Command, DecodeError, EncodeError, Origin};
pub use command_code::CommandCode;
pub use compression::{compress, decompress, decompress_bounded, CompressionCode, CompressionError};
pub use error::{ErrorCodecError, ServicePointError};
pub use frame::{Frame, FrameError, Header, HEADER_SIZE};
