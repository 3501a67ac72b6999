//! Payload compression
//!
//! Bitmap payloads can be compressed before transmission. Which codecs are
//! available depends on the `compression_*` cargo features; a disabled codec
//! fails with [`CompressionError::Unsupported`] instead of silently sending
//! uncompressed data.

#[allow(unused_imports)]
use std::io::{Read, Write};

use thiserror::Error;
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Compression applied to a bitmap payload
///
/// The discriminant is the stable small-integer tag used outside the wire
/// header (configuration, error reports, foreign bindings).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CompressionCode {
    /// Payload is sent as-is
    #[default]
    Uncompressed = 1,
    /// zlib stream (deflate with zlib header)
    Zlib = 2,
    /// bzip2 stream
    Bzip2 = 3,
    /// xz container with an LZMA2 stream
    Lzma = 4,
    /// Zstandard frame
    Zstd = 5,
}

// Values the display expects in the header
const HEADER_UNCOMPRESSED: u16 = 0x0000;
const HEADER_ZLIB: u16 = 0x677a;
const HEADER_BZIP2: u16 = 0x627a;
const HEADER_LZMA: u16 = 0x6c7a;
const HEADER_ZSTD: u16 = 0x7a73;

/// Every code, in tag order
pub const ALL_CODES: [CompressionCode; 5] = [
    CompressionCode::Uncompressed,
    CompressionCode::Zlib,
    CompressionCode::Bzip2,
    CompressionCode::Lzma,
    CompressionCode::Zstd,
];

impl CompressionCode {
    /// Stable small-integer tag
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Parse a stable tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        ALL_CODES.into_iter().find(|code| code.tag() == tag)
    }

    /// Value of the header compression field for this code
    pub const fn header_value(self) -> u16 {
        match self {
            CompressionCode::Uncompressed => HEADER_UNCOMPRESSED,
            CompressionCode::Zlib => HEADER_ZLIB,
            CompressionCode::Bzip2 => HEADER_BZIP2,
            CompressionCode::Lzma => HEADER_LZMA,
            CompressionCode::Zstd => HEADER_ZSTD,
        }
    }

    /// Parse the header compression field
    pub fn from_header_value(value: u16) -> Option<Self> {
        ALL_CODES
            .into_iter()
            .find(|code| code.header_value() == value)
    }

    /// Whether this build can encode and decode the code
    pub const fn is_available(self) -> bool {
        match self {
            CompressionCode::Uncompressed => true,
            CompressionCode::Zlib => cfg!(feature = "compression_zlib"),
            CompressionCode::Bzip2 => cfg!(feature = "compression_bzip2"),
            CompressionCode::Lzma => cfg!(feature = "compression_lzma"),
            CompressionCode::Zstd => cfg!(feature = "compression_zstd"),
        }
    }

    /// All codes this build supports
    pub fn available() -> impl Iterator<Item = CompressionCode> {
        ALL_CODES.into_iter().filter(|code| code.is_available())
    }
}

/// Errors from the payload codecs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressionError {
    /// Codec disabled at build time
    #[error("compression {0:?} is not enabled in this build")]
    Unsupported(CompressionCode),
    /// Encoder failed
    #[error("could not compress payload with {code:?}: {message}")]
    CompressFailed {
        code: CompressionCode,
        message: String,
    },
    /// Input is not a valid stream for the codec
    #[error("could not decompress payload with {code:?}: {message}")]
    Corrupt {
        code: CompressionCode,
        message: String,
    },
}

/// Compress `payload` with `code`
pub fn compress(payload: &[u8], code: CompressionCode) -> Result<Vec<u8>, CompressionError> {
    let result: std::io::Result<Vec<u8>> = match code {
        CompressionCode::Uncompressed => return Ok(payload.to_vec()),
        #[cfg(feature = "compression_zlib")]
        CompressionCode::Zlib => {
            let mut encoder =
                flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
            encoder.write_all(payload).and_then(|()| encoder.finish())
        }
        #[cfg(feature = "compression_bzip2")]
        CompressionCode::Bzip2 => {
            let mut encoder =
                bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::fast());
            encoder.write_all(payload).and_then(|()| encoder.finish())
        }
        #[cfg(feature = "compression_lzma")]
        CompressionCode::Lzma => {
            let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
            encoder.write_all(payload).and_then(|()| encoder.finish())
        }
        #[cfg(feature = "compression_zstd")]
        CompressionCode::Zstd => zstd::stream::encode_all(payload, zstd::DEFAULT_COMPRESSION_LEVEL),
        #[allow(unreachable_patterns)]
        unsupported => return Err(CompressionError::Unsupported(unsupported)),
    };

    result.map_err(|err| {
        warn!("could not compress payload with {:?}: {}", code, err);
        CompressionError::CompressFailed {
            code,
            message: err.to_string(),
        }
    })
}

/// Decompress `payload` that was compressed with `code`
pub fn decompress(payload: &[u8], code: CompressionCode) -> Result<Vec<u8>, CompressionError> {
    inflate(payload, code, None)
}

/// Decompress at most `max_len + 1` bytes of `payload`
///
/// Frames declare the size of their payload, so a decoder needs no more
/// than one byte beyond that to tell an oversized stream apart. Output
/// longer than `max_len` is cut off at `max_len + 1` bytes.
pub fn decompress_bounded(
    payload: &[u8],
    code: CompressionCode,
    max_len: usize,
) -> Result<Vec<u8>, CompressionError> {
    inflate(payload, code, Some(max_len))
}

fn inflate(
    payload: &[u8],
    code: CompressionCode,
    max_len: Option<usize>,
) -> Result<Vec<u8>, CompressionError> {
    let mut decompressed = Vec::new();
    let result: std::io::Result<usize> = match code {
        CompressionCode::Uncompressed => return Ok(payload.to_vec()),
        #[cfg(feature = "compression_zlib")]
        CompressionCode::Zlib => read_limited(
            flate2::read::ZlibDecoder::new(payload),
            max_len,
            &mut decompressed,
        ),
        #[cfg(feature = "compression_bzip2")]
        CompressionCode::Bzip2 => read_limited(
            bzip2::read::BzDecoder::new(payload),
            max_len,
            &mut decompressed,
        ),
        #[cfg(feature = "compression_lzma")]
        CompressionCode::Lzma => read_limited(
            xz2::read::XzDecoder::new(payload),
            max_len,
            &mut decompressed,
        ),
        #[cfg(feature = "compression_zstd")]
        CompressionCode::Zstd => zstd::stream::read::Decoder::new(payload)
            .and_then(|decoder| read_limited(decoder, max_len, &mut decompressed)),
        #[allow(unreachable_patterns)]
        unsupported => return Err(CompressionError::Unsupported(unsupported)),
    };

    match result {
        Ok(_) => Ok(decompressed),
        Err(err) => {
            warn!("could not decompress payload with {:?}: {}", code, err);
            Err(CompressionError::Corrupt {
                code,
                message: err.to_string(),
            })
        }
    }
}

#[allow(dead_code)]
fn read_limited(
    reader: impl Read,
    max_len: Option<usize>,
    out: &mut Vec<u8>,
) -> std::io::Result<usize> {
    match max_len {
        Some(max_len) => reader.take(max_len as u64 + 1).read_to_end(out),
        None => {
            let mut reader = reader;
            reader.read_to_end(out)
        }
    }
}
