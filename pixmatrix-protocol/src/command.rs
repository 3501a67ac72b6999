//! Commands understood by the display
//!
//! A [`Command`] is immutable once constructed. Constructors that take a
//! grid copy it, so later changes to the caller's grid are never seen by
//! the command. Encoding into a [`Frame`] applies the command's compression;
//! decoding is the exact inverse and rejects anything it would have to
//! guess about.

use core::ops::Add;

use pixmatrix_core::{BitVec, Brightness, BrightnessGrid, Cp437Grid, GridError, PixelGrid, TILE_SIZE};
use thiserror::Error;

use crate::command_code::CommandCode;
use crate::compression::{compress, decompress_bounded, CompressionCode, CompressionError};
use crate::error::ServicePointError;
use crate::frame::{Frame, FrameError, Header};

/// Top-left position of a window on the display
///
/// Pixel windows count in pixels, character and brightness windows in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Origin {
    pub x: usize,
    pub y: usize,
}

impl Origin {
    /// The top-left corner
    pub const ZERO: Origin = Origin { x: 0, y: 0 };

    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl Add for Origin {
    type Output = Origin;

    fn add(self, rhs: Origin) -> Origin {
        Origin::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A command to send to the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Turn every pixel off
    Clear,
    /// Restart the display daemon; the device usually reboots
    HardReset,
    /// Slowly dim the display to off
    FadeOut,
    /// Set the brightness of the whole display
    Brightness(Brightness),
    /// Set the brightness of a window of tiles
    CharBrightness { origin: Origin, grid: BrightnessGrid },
    /// Show code page 437 text in a window of tiles
    Cp437Data { origin: Origin, grid: Cp437Grid },
    /// Overwrite pixels starting at a bit offset into the frame buffer
    ///
    /// The wire carries whole bytes, so the four linear bitmap commands are
    /// only encodable when `bits` is a multiple of 8 long.
    BitmapLinear {
        offset: usize,
        bits: BitVec,
        compression: CompressionCode,
    },
    /// AND pixels into the frame buffer starting at a bit offset
    BitmapLinearAnd {
        offset: usize,
        bits: BitVec,
        compression: CompressionCode,
    },
    /// OR pixels into the frame buffer starting at a bit offset
    BitmapLinearOr {
        offset: usize,
        bits: BitVec,
        compression: CompressionCode,
    },
    /// XOR pixels into the frame buffer starting at a bit offset
    BitmapLinearXor {
        offset: usize,
        bits: BitVec,
        compression: CompressionCode,
    },
    /// Overwrite a window of pixels
    ///
    /// The window's x position and width must be multiples of
    /// [`TILE_SIZE`] to be encodable.
    BitmapLinearWin {
        origin: Origin,
        grid: PixelGrid,
        compression: CompressionCode,
    },
}

/// Errors that prevent a command from being encoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Pixel windows are addressed in whole tiles horizontally
    #[error("window at x={x} with width {width} is not aligned to {TILE_SIZE} pixel tiles")]
    UnalignedWindow { x: usize, width: usize },
    /// Linear bitmaps are sent in whole bytes
    #[error("bit vector of length {len} is not a whole number of bytes")]
    UnalignedLength { len: usize },
    /// The payload codec failed
    #[error(transparent)]
    Compression(#[from] CompressionError),
}

/// Errors while turning a frame back into a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Datagram too short to hold a header
    #[error(transparent)]
    Frame(#[from] FrameError),
    /// Command code is not known
    #[error("the command code {0:#06x} is not known")]
    InvalidCommandCode(u16),
    /// Payload size differs from what the header or command requires
    ///
    /// For compressed payloads that are too large, `actual` is where
    /// decompression stopped rather than the full size of the stream.
    #[error("expected a payload of {expected} bytes, got {actual}")]
    UnexpectedPayloadSize { expected: usize, actual: usize },
    /// Header fields unused by the command are set
    #[error("header fields not used by the command are set")]
    ExtraneousHeaderValues,
    /// Compression field holds an unknown value
    #[error("the compression code {0:#06x} is not known")]
    InvalidCompressionCode(u16),
    /// The payload could not be decompressed
    #[error(transparent)]
    DecompressionFailed(#[from] CompressionError),
    /// The payload does not fit the declared grid
    #[error(transparent)]
    InvalidGrid(#[from] GridError),
    /// Brightness payload outside the supported range
    #[error("brightness {0} is out of range")]
    InvalidBrightness(u8),
}

impl Command {
    /// Set the display brightness, rejecting levels the display does not support
    pub fn brightness(value: u8) -> Result<Command, ServicePointError> {
        Brightness::try_from(value)
            .map(Command::Brightness)
            .map_err(|value| ServicePointError::InvalidBrightness { value })
    }

    /// Overwrite pixels with a copy of `bits`
    pub fn bitmap_linear(offset: usize, bits: &BitVec, compression: CompressionCode) -> Command {
        Command::BitmapLinear {
            offset,
            bits: bits.clone(),
            compression,
        }
    }

    /// AND a copy of `bits` into the frame buffer
    pub fn bitmap_linear_and(offset: usize, bits: &BitVec, compression: CompressionCode) -> Command {
        Command::BitmapLinearAnd {
            offset,
            bits: bits.clone(),
            compression,
        }
    }

    /// OR a copy of `bits` into the frame buffer
    pub fn bitmap_linear_or(offset: usize, bits: &BitVec, compression: CompressionCode) -> Command {
        Command::BitmapLinearOr {
            offset,
            bits: bits.clone(),
            compression,
        }
    }

    /// XOR a copy of `bits` into the frame buffer
    pub fn bitmap_linear_xor(offset: usize, bits: &BitVec, compression: CompressionCode) -> Command {
        Command::BitmapLinearXor {
            offset,
            bits: bits.clone(),
            compression,
        }
    }

    /// Overwrite the pixel window at `(x, y)` with a copy of `grid`
    pub fn bitmap_linear_win(
        x: usize,
        y: usize,
        grid: &PixelGrid,
        compression: CompressionCode,
    ) -> Command {
        Command::BitmapLinearWin {
            origin: Origin::new(x, y),
            grid: grid.clone(),
            compression,
        }
    }

    /// Set tile brightness from a copy of `grid`, placed at tile `(x, y)`
    pub fn char_brightness(x: usize, y: usize, grid: &BrightnessGrid) -> Command {
        Command::CharBrightness {
            origin: Origin::new(x, y),
            grid: grid.clone(),
        }
    }

    /// Show a copy of `grid` at tile `(x, y)`
    pub fn cp437_data(x: usize, y: usize, grid: &Cp437Grid) -> Command {
        Command::Cp437Data {
            origin: Origin::new(x, y),
            grid: grid.clone(),
        }
    }

    /// The command code this command is sent with
    pub fn code(&self) -> CommandCode {
        match self {
            Command::Clear => CommandCode::Clear,
            Command::HardReset => CommandCode::HardReset,
            Command::FadeOut => CommandCode::FadeOut,
            Command::Brightness(_) => CommandCode::Brightness,
            Command::CharBrightness { .. } => CommandCode::CharBrightness,
            Command::Cp437Data { .. } => CommandCode::Cp437Data,
            Command::BitmapLinear { .. } => CommandCode::BitmapLinear,
            Command::BitmapLinearAnd { .. } => CommandCode::BitmapLinearAnd,
            Command::BitmapLinearOr { .. } => CommandCode::BitmapLinearOr,
            Command::BitmapLinearXor { .. } => CommandCode::BitmapLinearXor,
            Command::BitmapLinearWin { compression, .. } => {
                CommandCode::BitmapLinearWin(*compression)
            }
        }
    }

    /// Encode this command into a frame
    ///
    /// # Panics
    ///
    /// When an offset, dimension or payload length does not fit a 16-bit
    /// header field.
    pub fn to_frame(&self) -> Result<Frame, EncodeError> {
        let code = self.code().to_u16();
        match self {
            Command::Clear | Command::HardReset | Command::FadeOut => Ok(Frame::empty(code)),
            Command::Brightness(brightness) => {
                Ok(Frame::new(Header::code_only(code), vec![brightness.value()]))
            }
            Command::CharBrightness { origin, grid } => Ok(window_frame(
                code,
                *origin,
                grid.width(),
                grid.height(),
                grid.copy_raw(),
            )),
            Command::Cp437Data { origin, grid } => Ok(window_frame(
                code,
                *origin,
                grid.width(),
                grid.height(),
                grid.copy_raw(),
            )),
            Command::BitmapLinear {
                offset,
                bits,
                compression,
            }
            | Command::BitmapLinearAnd {
                offset,
                bits,
                compression,
            }
            | Command::BitmapLinearOr {
                offset,
                bits,
                compression,
            }
            | Command::BitmapLinearXor {
                offset,
                bits,
                compression,
            } => {
                if bits.len() % 8 != 0 {
                    return Err(EncodeError::UnalignedLength { len: bits.len() });
                }
                let raw = bits.as_bytes();
                let header = Header {
                    command_code: code,
                    a: wire_u16(*offset, "bit offset"),
                    b: wire_u16(raw.len(), "payload length"),
                    c: compression.header_value(),
                    d: 0,
                };
                Ok(Frame::new(header, compress(raw, *compression)?))
            }
            Command::BitmapLinearWin {
                origin,
                grid,
                compression,
            } => {
                if origin.x % TILE_SIZE != 0 || grid.width() % TILE_SIZE != 0 {
                    return Err(EncodeError::UnalignedWindow {
                        x: origin.x,
                        width: grid.width(),
                    });
                }
                let header = Header {
                    command_code: code,
                    a: wire_u16(origin.x / TILE_SIZE, "tile x"),
                    b: wire_u16(origin.y, "pixel y"),
                    c: wire_u16(grid.width() / TILE_SIZE, "tile width"),
                    d: wire_u16(grid.height(), "pixel height"),
                };
                Ok(Frame::new(header, compress(grid.as_bytes(), *compression)?))
            }
        }
    }

    /// Encode this command into datagram bytes
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        self.to_frame().map(|frame| frame.encode_to_vec())
    }

    /// Interpret a frame as a command
    pub fn from_frame(frame: &Frame) -> Result<Command, DecodeError> {
        let Frame { header, payload } = frame;
        let code = CommandCode::from_u16(header.command_code)
            .ok_or(DecodeError::InvalidCommandCode(header.command_code))?;

        match code {
            CommandCode::Clear => check_code_only(frame).map(|()| Command::Clear),
            CommandCode::HardReset => check_code_only(frame).map(|()| Command::HardReset),
            CommandCode::FadeOut => check_code_only(frame).map(|()| Command::FadeOut),
            CommandCode::Brightness => {
                if payload.len() != 1 {
                    return Err(DecodeError::UnexpectedPayloadSize {
                        expected: 1,
                        actual: payload.len(),
                    });
                }
                if !header.fields_are_zero() {
                    return Err(DecodeError::ExtraneousHeaderValues);
                }
                Brightness::try_from(payload[0])
                    .map(Command::Brightness)
                    .map_err(DecodeError::InvalidBrightness)
            }
            CommandCode::CharBrightness => {
                if let Some(value) = payload.iter().find(|value| **value > Brightness::MAX.value()) {
                    return Err(DecodeError::InvalidBrightness(*value));
                }
                Ok(Command::CharBrightness {
                    origin: Origin::new(header.a.into(), header.b.into()),
                    grid: BrightnessGrid::load(header.c.into(), header.d.into(), payload)?,
                })
            }
            CommandCode::Cp437Data => Ok(Command::Cp437Data {
                origin: Origin::new(header.a.into(), header.b.into()),
                grid: Cp437Grid::load(header.c.into(), header.d.into(), payload)?,
            }),
            CommandCode::BitmapLinear => {
                let (bits, compression) = linear_payload(frame)?;
                Ok(Command::BitmapLinear {
                    offset: header.a.into(),
                    bits,
                    compression,
                })
            }
            CommandCode::BitmapLinearAnd => {
                let (bits, compression) = linear_payload(frame)?;
                Ok(Command::BitmapLinearAnd {
                    offset: header.a.into(),
                    bits,
                    compression,
                })
            }
            CommandCode::BitmapLinearOr => {
                let (bits, compression) = linear_payload(frame)?;
                Ok(Command::BitmapLinearOr {
                    offset: header.a.into(),
                    bits,
                    compression,
                })
            }
            CommandCode::BitmapLinearXor => {
                let (bits, compression) = linear_payload(frame)?;
                Ok(Command::BitmapLinearXor {
                    offset: header.a.into(),
                    bits,
                    compression,
                })
            }
            CommandCode::BitmapLinearWin(compression) => {
                let width = usize::from(header.c) * TILE_SIZE;
                let expected = usize::from(header.c) * usize::from(header.d);
                let raw = decompress_bounded(payload, compression, expected)?;
                if raw.len() > expected {
                    return Err(DecodeError::UnexpectedPayloadSize {
                        expected,
                        actual: raw.len(),
                    });
                }
                Ok(Command::BitmapLinearWin {
                    origin: Origin::new(usize::from(header.a) * TILE_SIZE, header.b.into()),
                    grid: PixelGrid::load(width, header.d.into(), &raw)?,
                    compression,
                })
            }
        }
    }

    /// Parse datagram bytes into a command
    pub fn decode(bytes: &[u8]) -> Result<Command, DecodeError> {
        let frame = Frame::try_from(bytes)?;
        Command::from_frame(&frame)
    }
}

impl TryFrom<&Command> for Frame {
    type Error = EncodeError;

    fn try_from(value: &Command) -> Result<Self, Self::Error> {
        value.to_frame()
    }
}

impl TryFrom<Command> for Frame {
    type Error = EncodeError;

    fn try_from(value: Command) -> Result<Self, Self::Error> {
        value.to_frame()
    }
}

impl TryFrom<Frame> for Command {
    type Error = DecodeError;

    fn try_from(value: Frame) -> Result<Self, Self::Error> {
        Command::from_frame(&value)
    }
}

/// Frame for a tile window carrying unpacked cells
fn window_frame(code: u16, origin: Origin, width: usize, height: usize, cells: Vec<u8>) -> Frame {
    let header = Header {
        command_code: code,
        a: wire_u16(origin.x, "tile x"),
        b: wire_u16(origin.y, "tile y"),
        c: wire_u16(width, "width"),
        d: wire_u16(height, "height"),
    };
    Frame::new(header, cells)
}

/// Narrow a value into a header field
///
/// Header fields are 16 bits; anything larger cannot be addressed on the
/// display at all and means the caller built a command for a different device.
fn wire_u16(value: usize, field: &'static str) -> u16 {
    match u16::try_from(value) {
        Ok(value) => value,
        Err(_) => panic!("{field} {value} does not fit a 16-bit header field"),
    }
}

fn check_code_only(frame: &Frame) -> Result<(), DecodeError> {
    if !frame.payload.is_empty() {
        Err(DecodeError::UnexpectedPayloadSize {
            expected: 0,
            actual: frame.payload.len(),
        })
    } else if !frame.header.fields_are_zero() {
        Err(DecodeError::ExtraneousHeaderValues)
    } else {
        Ok(())
    }
}

fn linear_payload(frame: &Frame) -> Result<(BitVec, CompressionCode), DecodeError> {
    let Header { b: length, c, d, .. } = frame.header;
    if d != 0 {
        return Err(DecodeError::ExtraneousHeaderValues);
    }
    let compression =
        CompressionCode::from_header_value(c).ok_or(DecodeError::InvalidCompressionCode(c))?;
    let raw = decompress_bounded(&frame.payload, compression, length.into())?;
    if raw.len() != usize::from(length) {
        return Err(DecodeError::UnexpectedPayloadSize {
            expected: length.into(),
            actual: raw.len(),
        });
    }
    Ok((BitVec::from_bytes(&raw), compression))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::HEADER_SIZE;

    fn round_trip(original: Command) {
        let frame = original.to_frame().unwrap();
        let bytes = frame.encode_to_vec();
        let copy = match Command::decode(&bytes) {
            Ok(command) => command,
            Err(err) => panic!("could not reload {original:?}: {err:?}"),
        };
        assert_eq!(copy, original);
    }

    fn linear_frame(compression: CompressionCode) -> Frame {
        Command::bitmap_linear(0, &BitVec::new(8), compression)
            .to_frame()
            .unwrap()
    }

    #[test]
    fn test_round_trip_simple_commands() {
        round_trip(Command::Clear);
        round_trip(Command::HardReset);
        round_trip(Command::FadeOut);
        round_trip(Command::brightness(6).unwrap());
    }

    #[test]
    fn test_round_trip_tile_windows() {
        let mut levels = BrightnessGrid::new(7, 5);
        levels.set(6, 4, 2);
        round_trip(Command::char_brightness(5, 2, &levels));

        let chars = Cp437Grid::load_ascii("hello\nworld", 5, false).unwrap();
        round_trip(Command::cp437_data(1, 3, &chars));
    }

    #[test]
    fn test_round_trip_bitmaps() {
        let mut bits = BitVec::new(40);
        bits.set(3, true);
        bits.set(39, true);
        let mut pixels = PixelGrid::max_sized();
        pixels.set(17, 100, true);
        for compression in CompressionCode::available() {
            round_trip(Command::bitmap_linear(23, &bits, compression));
            round_trip(Command::bitmap_linear_and(23, &bits, compression));
            round_trip(Command::bitmap_linear_or(23, &bits, compression));
            round_trip(Command::bitmap_linear_xor(23, &bits, compression));
            round_trip(Command::bitmap_linear_win(0, 0, &pixels, compression));
            round_trip(Command::bitmap_linear_win(16, 8, &PixelGrid::new(8, 8), compression));
        }
    }

    #[test]
    fn test_brightness_validation() {
        for value in 0..=11u8 {
            let command = Command::brightness(value).unwrap();
            assert_eq!(command, Command::Brightness(Brightness::try_from(value).unwrap()));
        }
        assert_eq!(
            Command::brightness(12),
            Err(ServicePointError::InvalidBrightness { value: 12 })
        );
        assert_eq!(
            Command::brightness(255),
            Err(ServicePointError::InvalidBrightness { value: 255 })
        );
    }

    #[test]
    fn test_constructor_copies_payload() {
        let mut grid = PixelGrid::new(8, 1);
        let command = Command::bitmap_linear_win(0, 0, &grid, CompressionCode::Uncompressed);
        grid.set(0, 0, true);
        let Command::BitmapLinearWin { grid: copied, .. } = &command else {
            panic!("unexpected command {command:?}");
        };
        assert!(!copied.get(0, 0));
    }

    #[test]
    fn test_structural_equality() {
        let bits = BitVec::new(16);
        let a = Command::bitmap_linear(4, &bits, CompressionCode::Uncompressed);
        let b = Command::bitmap_linear(4, &bits.clone(), CompressionCode::Uncompressed);
        assert_eq!(a, b);
        assert_ne!(a, Command::bitmap_linear_or(4, &bits, CompressionCode::Uncompressed));
        assert_ne!(a, Command::bitmap_linear(5, &bits, CompressionCode::Uncompressed));
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn test_brightness_bytes() {
        let bytes = Command::brightness(5).unwrap().encode().unwrap();
        assert_eq!(bytes, vec![0x00, 0x07, 0, 0, 0, 0, 0, 0, 0, 0, 5]);
    }

    #[test]
    fn test_bitmap_win_bytes() {
        let mut grid = PixelGrid::new(16, 2);
        grid.set(0, 0, true);
        grid.set(15, 1, true);
        let bytes = Command::bitmap_linear_win(8, 3, &grid, CompressionCode::Uncompressed)
            .encode()
            .unwrap();
        assert_eq!(
            bytes,
            vec![0x00, 0x13, 0x00, 0x01, 0x00, 0x03, 0x00, 0x02, 0x00, 0x02, 0x80, 0x00, 0x00, 0x01]
        );
    }

    #[test]
    fn test_bitmap_linear_header() {
        let frame = Command::bitmap_linear_xor(80, &BitVec::new(24), CompressionCode::Uncompressed)
            .to_frame()
            .unwrap();
        assert_eq!(
            frame.header,
            Header {
                command_code: 0x0016,
                a: 80,
                b: 3,
                c: 0,
                d: 0
            }
        );
        assert_eq!(frame.payload.len(), 3);
    }

    #[test]
    fn test_cp437_header() {
        let grid = Cp437Grid::new(3, 2);
        let frame = Command::cp437_data(4, 9, &grid).to_frame().unwrap();
        assert_eq!(
            frame.header,
            Header {
                command_code: 0x0003,
                a: 4,
                b: 9,
                c: 3,
                d: 2
            }
        );
        assert_eq!(frame.encoded_len(), HEADER_SIZE + 6);
    }

    #[test]
    fn test_unaligned_window_rejected() {
        let grid = PixelGrid::new(3, 1);
        let command = Command::bitmap_linear_win(0, 0, &grid, CompressionCode::Uncompressed);
        assert_eq!(
            command.to_frame(),
            Err(EncodeError::UnalignedWindow { x: 0, width: 3 })
        );
        let command = Command::bitmap_linear_win(4, 0, &PixelGrid::new(8, 1), CompressionCode::Uncompressed);
        assert_eq!(
            command.encode(),
            Err(EncodeError::UnalignedWindow { x: 4, width: 8 })
        );
    }

    #[test]
    #[should_panic(expected = "does not fit a 16-bit header field")]
    fn test_oversized_offset_panics() {
        let command = Command::bitmap_linear(70_000, &BitVec::new(8), CompressionCode::Uncompressed);
        let _ = command.to_frame();
    }

    #[test]
    fn test_error_invalid_command() {
        let frame = Frame::empty(0xFF);
        assert_eq!(
            Command::from_frame(&frame),
            Err(DecodeError::InvalidCommandCode(0xFF))
        );
    }

    #[test]
    fn test_error_extraneous_header_values() {
        let frame = Frame::new(
            Header {
                a: 0x05,
                ..Header::code_only(CommandCode::Clear.to_u16())
            },
            vec![],
        );
        assert_eq!(
            Command::from_frame(&frame),
            Err(DecodeError::ExtraneousHeaderValues)
        );

        let frame = Frame::new(
            Header {
                b: 0x13,
                c: 0x37,
                ..Header::code_only(CommandCode::Brightness.to_u16())
            },
            vec![5],
        );
        assert_eq!(
            Command::from_frame(&frame),
            Err(DecodeError::ExtraneousHeaderValues)
        );
    }

    #[test]
    fn test_error_unexpected_payload() {
        let frame = Frame::new(Header::code_only(CommandCode::FadeOut.to_u16()), vec![5, 7]);
        assert_eq!(
            Command::from_frame(&frame),
            Err(DecodeError::UnexpectedPayloadSize {
                expected: 0,
                actual: 2
            })
        );

        let frame = Frame::empty(CommandCode::Brightness.to_u16());
        assert_eq!(
            Command::from_frame(&frame),
            Err(DecodeError::UnexpectedPayloadSize {
                expected: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_error_brightness_out_of_range() {
        let frame = Frame::new(Header::code_only(CommandCode::Brightness.to_u16()), vec![42]);
        assert_eq!(
            Command::from_frame(&frame),
            Err(DecodeError::InvalidBrightness(42))
        );
    }

    #[test]
    fn test_error_reserved_used() {
        let Frame { header, payload } = linear_frame(CompressionCode::Uncompressed);
        let frame = Frame::new(Header { d: 69, ..header }, payload);
        assert_eq!(
            Command::from_frame(&frame),
            Err(DecodeError::ExtraneousHeaderValues)
        );
    }

    #[test]
    fn test_error_invalid_compression() {
        let Frame { header, payload } = linear_frame(CompressionCode::Uncompressed);
        let frame = Frame::new(Header { c: 42, ..header }, payload);
        assert_eq!(
            Command::from_frame(&frame),
            Err(DecodeError::InvalidCompressionCode(42))
        );
    }

    #[test]
    fn test_error_declared_length_mismatch() {
        for compression in CompressionCode::available() {
            let Frame { header, payload } = linear_frame(compression);
            let frame = Frame::new(Header { b: 420, ..header }, payload);
            assert_eq!(
                Command::from_frame(&frame),
                Err(DecodeError::UnexpectedPayloadSize {
                    expected: 420,
                    actual: 1
                })
            );
        }
    }

    #[test]
    fn test_error_window_length_mismatch() {
        let Frame { header, payload } =
            Command::bitmap_linear_win(0, 0, &PixelGrid::new(16, 4), CompressionCode::Uncompressed)
                .to_frame()
                .unwrap();
        let frame = Frame::new(Header { d: 5, ..header }, payload);
        assert_eq!(
            Command::from_frame(&frame),
            Err(DecodeError::InvalidGrid(GridError::LengthMismatch {
                expected: 10,
                actual: 8
            }))
        );
    }

    #[test]
    fn test_error_decompression_failed() {
        for compression in CompressionCode::available() {
            let Frame { header, mut payload } =
                Command::bitmap_linear_win(16, 8, &PixelGrid::new(8, 8), compression)
                    .to_frame()
                    .unwrap();

            // mangle it
            for byte in payload.iter_mut() {
                *byte -= *byte / 2;
            }

            let result = Command::from_frame(&Frame::new(header, payload));
            if compression == CompressionCode::Uncompressed {
                // raw bytes carry no integrity information
                assert!(result.is_ok());
            } else {
                assert!(
                    matches!(result, Err(DecodeError::DecompressionFailed(_))),
                    "{compression:?}: {result:?}"
                );
            }
        }
    }

    #[test]
    fn test_unaligned_bit_length_rejected() {
        let mut bits = BitVec::new(12);
        bits.set(11, true);
        for command in [
            Command::bitmap_linear(0, &bits, CompressionCode::Uncompressed),
            Command::bitmap_linear_and(0, &bits, CompressionCode::Uncompressed),
            Command::bitmap_linear_or(0, &bits, CompressionCode::Uncompressed),
            Command::bitmap_linear_xor(0, &bits, CompressionCode::Uncompressed),
        ] {
            assert_eq!(command.encode(), Err(EncodeError::UnalignedLength { len: 12 }));
        }
        round_trip(Command::bitmap_linear(0, &BitVec::new(0), CompressionCode::Uncompressed));
    }

    #[test]
    fn test_error_char_brightness_out_of_range() {
        let Frame { header, mut payload } =
            Command::char_brightness(0, 0, &BrightnessGrid::new(2, 2))
                .to_frame()
                .unwrap();
        payload[1] = 23;
        assert_eq!(
            Command::from_frame(&Frame::new(header, payload)),
            Err(DecodeError::InvalidBrightness(23))
        );
    }

    #[test]
    fn test_error_oversized_decompression() {
        let huge = vec![0u8; 1_000_000];
        for compression in CompressionCode::available() {
            if compression == CompressionCode::Uncompressed {
                continue;
            }
            let payload = compress(&huge, compression).unwrap();

            // one tile wide and eight rows high: 8 bytes
            let header = Header {
                command_code: CommandCode::BitmapLinearWin(compression).to_u16(),
                a: 0,
                b: 0,
                c: 1,
                d: 8,
            };
            assert_eq!(
                Command::from_frame(&Frame::new(header, payload.clone())),
                Err(DecodeError::UnexpectedPayloadSize {
                    expected: 8,
                    actual: 9
                }),
                "{compression:?}"
            );

            let header = Header {
                command_code: CommandCode::BitmapLinear.to_u16(),
                a: 0,
                b: 16,
                c: compression.header_value(),
                d: 0,
            };
            assert_eq!(
                Command::from_frame(&Frame::new(header, payload)),
                Err(DecodeError::UnexpectedPayloadSize {
                    expected: 16,
                    actual: 17
                }),
                "{compression:?}"
            );
        }
    }

    #[test]
    fn test_origin_add() {
        assert_eq!(Origin::new(4, 2), Origin::new(1, 0) + Origin::new(3, 2));
    }
}
