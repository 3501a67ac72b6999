//! Command codes carried in the first header field

use crate::compression::CompressionCode;

/// Command code values understood by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCode {
    Clear,
    Cp437Data,
    CharBrightness,
    Brightness,
    HardReset,
    FadeOut,
    BitmapLinear,
    BitmapLinearAnd,
    BitmapLinearOr,
    BitmapLinearXor,
    /// Windowed bitmap; the code also selects the payload compression
    BitmapLinearWin(CompressionCode),
}

// Wire format values
const CODE_CLEAR: u16 = 0x0002;
const CODE_CP437_DATA: u16 = 0x0003;
const CODE_CHAR_BRIGHTNESS: u16 = 0x0005;
const CODE_BRIGHTNESS: u16 = 0x0007;
const CODE_HARD_RESET: u16 = 0x000b;
const CODE_FADE_OUT: u16 = 0x000d;
const CODE_BITMAP_LINEAR: u16 = 0x0012;
const CODE_BITMAP_WIN_UNCOMPRESSED: u16 = 0x0013;
const CODE_BITMAP_LINEAR_AND: u16 = 0x0014;
const CODE_BITMAP_LINEAR_OR: u16 = 0x0015;
const CODE_BITMAP_LINEAR_XOR: u16 = 0x0016;
const CODE_BITMAP_WIN_ZLIB: u16 = 0x0017;
const CODE_BITMAP_WIN_BZIP2: u16 = 0x0018;
const CODE_BITMAP_WIN_LZMA: u16 = 0x0019;
const CODE_BITMAP_WIN_ZSTD: u16 = 0x001a;

impl CommandCode {
    /// Parse a command code from its wire value
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            CODE_CLEAR => Some(CommandCode::Clear),
            CODE_CP437_DATA => Some(CommandCode::Cp437Data),
            CODE_CHAR_BRIGHTNESS => Some(CommandCode::CharBrightness),
            CODE_BRIGHTNESS => Some(CommandCode::Brightness),
            CODE_HARD_RESET => Some(CommandCode::HardReset),
            CODE_FADE_OUT => Some(CommandCode::FadeOut),
            CODE_BITMAP_LINEAR => Some(CommandCode::BitmapLinear),
            CODE_BITMAP_LINEAR_AND => Some(CommandCode::BitmapLinearAnd),
            CODE_BITMAP_LINEAR_OR => Some(CommandCode::BitmapLinearOr),
            CODE_BITMAP_LINEAR_XOR => Some(CommandCode::BitmapLinearXor),
            CODE_BITMAP_WIN_UNCOMPRESSED => {
                Some(CommandCode::BitmapLinearWin(CompressionCode::Uncompressed))
            }
            CODE_BITMAP_WIN_ZLIB => Some(CommandCode::BitmapLinearWin(CompressionCode::Zlib)),
            CODE_BITMAP_WIN_BZIP2 => Some(CommandCode::BitmapLinearWin(CompressionCode::Bzip2)),
            CODE_BITMAP_WIN_LZMA => Some(CommandCode::BitmapLinearWin(CompressionCode::Lzma)),
            CODE_BITMAP_WIN_ZSTD => Some(CommandCode::BitmapLinearWin(CompressionCode::Zstd)),
            _ => None,
        }
    }

    /// Convert to wire value
    pub fn to_u16(self) -> u16 {
        match self {
            CommandCode::Clear => CODE_CLEAR,
            CommandCode::Cp437Data => CODE_CP437_DATA,
            CommandCode::CharBrightness => CODE_CHAR_BRIGHTNESS,
            CommandCode::Brightness => CODE_BRIGHTNESS,
            CommandCode::HardReset => CODE_HARD_RESET,
            CommandCode::FadeOut => CODE_FADE_OUT,
            CommandCode::BitmapLinear => CODE_BITMAP_LINEAR,
            CommandCode::BitmapLinearAnd => CODE_BITMAP_LINEAR_AND,
            CommandCode::BitmapLinearOr => CODE_BITMAP_LINEAR_OR,
            CommandCode::BitmapLinearXor => CODE_BITMAP_LINEAR_XOR,
            CommandCode::BitmapLinearWin(compression) => match compression {
                CompressionCode::Uncompressed => CODE_BITMAP_WIN_UNCOMPRESSED,
                CompressionCode::Zlib => CODE_BITMAP_WIN_ZLIB,
                CompressionCode::Bzip2 => CODE_BITMAP_WIN_BZIP2,
                CompressionCode::Lzma => CODE_BITMAP_WIN_LZMA,
                CompressionCode::Zstd => CODE_BITMAP_WIN_ZSTD,
            },
        }
    }

    /// Returns true if frames with this code carry a bitmap payload
    pub fn is_bitmap(&self) -> bool {
        matches!(
            self,
            CommandCode::BitmapLinear
                | CommandCode::BitmapLinearAnd
                | CommandCode::BitmapLinearOr
                | CommandCode::BitmapLinearXor
                | CommandCode::BitmapLinearWin(_)
        )
    }
}

impl From<CommandCode> for u16 {
    fn from(value: CommandCode) -> Self {
        value.to_u16()
    }
}
