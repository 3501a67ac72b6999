//! Client side of a Pixmatrix display
//!
//! This crate ties the grid model, the wire format and the transports
//! together:
//!
//! - [`Connection`] serializes commands and sends them to a display, or
//!   discards them when created with [`Connection::fake`]
//! - [`Handle`] guards an object that many threads use while any of them
//!   may dispose it
//! - [`shared`] wraps grids, commands and connections in such handles
//! - [`DisplayConfig`] reads connection settings from TOML
//! - [`init`] checks the build once before first use
//!
//! # Example
//!
//! ```no_run
//! use pixmatrix_display::{init, Connection};
//! use pixmatrix_display::pixmatrix_core::PixelGrid;
//! use pixmatrix_display::pixmatrix_protocol::Command;
//!
//! let capabilities = init()?;
//! let connection = Connection::open("172.23.42.29:2342")?;
//!
//! let mut pixels = PixelGrid::max_sized();
//! pixels.fill(true);
//! let compression = capabilities.best_compression();
//! connection.send(&Command::bitmap_linear_win(0, 0, &pixels, compression))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod connection;
pub mod handle;
pub mod init;
pub mod shared;

pub use config::{ConfigError, DisplayConfig};
pub use connection::Connection;
pub use handle::{Handle, HandleError};
pub use init::{init, Capabilities, InitError};
pub use shared::{
    SharedBitVec, SharedBrightnessGrid, SharedCommand, SharedConnection, SharedCp437Grid,
    SharedGrid, SharedPixelGrid,
};

pub use pixmatrix_core;
pub use pixmatrix_protocol;
pub use pixmatrix_protocol::ServicePointError;
