//! Grid data model for the Pixmatrix display
//!
//! This crate contains the display-independent data types that commands
//! carry to the device:
//!
//! - [`BitVec`] - fixed-length packed boolean sequence
//! - [`PixelGrid`] - 2D bit-packed pixel plane
//! - [`ByteGrid`] - 2D plane of one byte per cell, specialized as
//!   [`BrightnessGrid`] and [`Cp437Grid`]
//! - [`cp437`] - conversion between Unicode text and code page 437
//! - [`Brightness`] - range-checked brightness level
//! - Device geometry constants
//!
//! # Packing
//!
//! All boolean containers share one packing rule: bit `i` of the flattened
//! row-major sequence lives in byte `i / 8` at bit position `7 - (i % 8)`
//! (most significant bit first).
//!
//! ```text
//! index:  0 1 2 3 4 5 6 7 | 8 9 ...
//! byte:   [    byte 0     ] [ byte 1 ...
//! bit:    7 6 5 4 3 2 1 0 | 7 6 ...
//! ```

#![deny(unsafe_code)]

pub mod bit_vec;
pub mod brightness;
pub mod byte_grid;
pub mod constants;
pub mod cp437;
pub mod error;
pub mod pixel_grid;

pub use bit_vec::BitVec;
pub use brightness::Brightness;
pub use byte_grid::{BrightnessCells, BrightnessGrid, ByteGrid, CellKind, Cp437Cells, Cp437Grid};
pub use constants::*;
pub use cp437::{char_to_cp437, cp437_to_char, cp437_to_string, str_to_cp437};
pub use error::GridError;
pub use pixel_grid::PixelGrid;
