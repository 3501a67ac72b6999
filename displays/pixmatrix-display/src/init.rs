//! One-time startup check
//!
//! Hosts call [`init`] once before talking to a display. It checks that the
//! geometry constants agree with each other and with the wire format, and
//! probes every compiled-in codec with a full-screen round trip. Nothing is
//! cached; calling it again repeats the checks.

use pixmatrix_core::{
    PixelGrid, PIXEL_COUNT, PIXEL_HEIGHT, PIXEL_WIDTH, TILE_HEIGHT, TILE_SIZE, TILE_WIDTH,
};
use pixmatrix_protocol::{compress, decompress, CompressionCode, CompressionError};
use thiserror::Error;
use tracing::{debug, info};

/// Errors found by [`init`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// Geometry constants contradict each other or the wire format
    #[error("inconsistent display geometry: {0}")]
    InconsistentGeometry(&'static str),
    /// A codec failed on the probe frame
    #[error("codec {code:?} failed its self test: {source}")]
    CodecFailed {
        code: CompressionCode,
        #[source]
        source: CompressionError,
    },
    /// A codec returned different bytes than it was given
    #[error("codec {0:?} did not reproduce the probe frame")]
    CodecMismatch(CompressionCode),
}

/// What this build supports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Codecs that passed the probe, in tag order
    pub compression: Vec<CompressionCode>,
    /// Screen size in pixels
    pub pixel_width: usize,
    pub pixel_height: usize,
    /// Screen size in tiles
    pub tile_width: usize,
    pub tile_height: usize,
}

impl Capabilities {
    /// Whether `code` can be used
    pub fn supports(&self, code: CompressionCode) -> bool {
        self.compression.contains(&code)
    }

    /// Codec to use when the caller has no preference
    ///
    /// Prefers the display's usual choice and falls back to sending raw bytes.
    pub fn best_compression(&self) -> CompressionCode {
        [
            CompressionCode::Lzma,
            CompressionCode::Zstd,
            CompressionCode::Zlib,
            CompressionCode::Bzip2,
        ]
        .into_iter()
        .find(|code| self.supports(*code))
        .unwrap_or(CompressionCode::Uncompressed)
    }
}

/// Validate the build
pub fn init() -> Result<Capabilities, InitError> {
    check_geometry()?;

    let probe = probe_frame();
    let mut compression = Vec::new();
    for code in CompressionCode::available() {
        let packed =
            compress(&probe, code).map_err(|source| InitError::CodecFailed { code, source })?;
        let unpacked =
            decompress(&packed, code).map_err(|source| InitError::CodecFailed { code, source })?;
        if unpacked != probe {
            return Err(InitError::CodecMismatch(code));
        }
        debug!("{:?}: {} -> {} bytes", code, probe.len(), packed.len());
        compression.push(code);
    }

    info!(
        "pixmatrix ready for {}x{} pixels, codecs {:?}",
        PIXEL_WIDTH, PIXEL_HEIGHT, compression
    );
    Ok(Capabilities {
        compression,
        pixel_width: PIXEL_WIDTH,
        pixel_height: PIXEL_HEIGHT,
        tile_width: TILE_WIDTH,
        tile_height: TILE_HEIGHT,
    })
}

fn check_geometry() -> Result<(), InitError> {
    if TILE_SIZE == 0 || TILE_SIZE % 8 != 0 {
        return Err(InitError::InconsistentGeometry(
            "tile size must be a whole number of bytes",
        ));
    }
    if PIXEL_WIDTH != TILE_WIDTH * TILE_SIZE || PIXEL_HEIGHT != TILE_HEIGHT * TILE_SIZE {
        return Err(InitError::InconsistentGeometry(
            "pixel size is not a whole number of tiles",
        ));
    }
    if PIXEL_COUNT != PIXEL_WIDTH * PIXEL_HEIGHT {
        return Err(InitError::InconsistentGeometry("pixel count does not match"));
    }
    // full-screen payload lengths go into 16-bit header fields
    if PixelGrid::max_sized().raw_len() > usize::from(u16::MAX) {
        return Err(InitError::InconsistentGeometry(
            "screen does not fit the 16-bit header fields",
        ));
    }
    Ok(())
}

/// A full screen with enough structure to catch codec bugs
fn probe_frame() -> Vec<u8> {
    let mut grid = PixelGrid::max_sized();
    for y in 0..PIXEL_HEIGHT {
        for x in (y % 3..PIXEL_WIDTH).step_by(5) {
            grid.set(x, y, true);
        }
    }
    grid.copy_raw()
}
