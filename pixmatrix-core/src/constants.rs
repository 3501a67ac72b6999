//! Device geometry
//!
//! The panel is built from square tiles of [`TILE_SIZE`] pixels. Character
//! and brightness planes address whole tiles, pixel planes address pixels.

use std::time::Duration;

/// Size of a single tile in one dimension (pixels)
pub const TILE_SIZE: usize = 8;

/// Tile count in the x-direction
pub const TILE_WIDTH: usize = 56;

/// Tile count in the y-direction
pub const TILE_HEIGHT: usize = 20;

/// Screen width in pixels
pub const PIXEL_WIDTH: usize = TILE_WIDTH * TILE_SIZE;

/// Screen height in pixels
pub const PIXEL_HEIGHT: usize = TILE_HEIGHT * TILE_SIZE;

/// Pixel count on the whole screen
pub const PIXEL_COUNT: usize = PIXEL_WIDTH * PIXEL_HEIGHT;

/// Minimum interval between full frames.
///
/// The panel needs around 28-29 ms per frame; sending faster drops packets.
pub const FRAME_PACING: Duration = Duration::from_millis(30);

/// UDP port the display listens on
pub const DEFAULT_PORT: u16 = 2342;
