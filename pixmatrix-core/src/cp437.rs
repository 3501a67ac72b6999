//! Conversion between Unicode text and code page 437
//!
//! The display renders CP437. Every CP437 code has a Unicode counterpart,
//! except that `0x0A` stays a line feed so text keeps its line breaks.
//! Unicode characters without a CP437 code become `?`.

use crate::byte_grid::Cp437Grid;
use crate::error::GridError;

/// CP437 code used for characters the code page lacks
pub const MISSING_CHAR: u8 = b'?';

#[rustfmt::skip]
const CP437_TO_UNICODE: [char; 256] = [
    /* 0x */ '\0', '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '\n', '♂', '♀', '♪', '♫', '☼',
    /* 1x */ '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼',
    /* 2x */ ' ', '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    /* 3x */ '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    /* 4x */ '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    /* 5x */ 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '[', '\\', ']', '^', '_',
    /* 6x */ '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    /* 7x */ 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '{', '|', '}', '~', '⌂',
    /* 8x */ 'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    /* 9x */ 'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    /* Ax */ 'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    /* Bx */ '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    /* Cx */ '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    /* Dx */ '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    /* Ex */ 'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    /* Fx */ '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}',
];

/// Unicode character for a CP437 code
pub fn cp437_to_char(code: u8) -> char {
    CP437_TO_UNICODE[usize::from(code)]
}

/// CP437 code for a Unicode character, or [`MISSING_CHAR`]
pub fn char_to_cp437(char: char) -> u8 {
    // the lower half is ASCII apart from the symbols in 0x01..=0x1F and 0x7F
    if char == '\0' || char == '\n' || (' '..='~').contains(&char) {
        return char as u8;
    }
    CP437_TO_UNICODE
        .iter()
        .position(|candidate| *candidate == char)
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(MISSING_CHAR)
}

/// Decode CP437 bytes into text
pub fn cp437_to_string(codes: &[u8]) -> String {
    codes.iter().copied().map(cp437_to_char).collect()
}

/// Encode text as CP437, replacing unmappable characters with `?`
pub fn str_to_cp437(text: &str) -> Vec<u8> {
    text.chars().map(char_to_cp437).collect()
}

impl Cp437Grid {
    /// Lay out Unicode text in a grid `width` cells wide
    ///
    /// Works like [`load_ascii`](Self::load_ascii) but accepts any text;
    /// characters outside the code page become `?`.
    pub fn load_utf8(text: &str, width: usize, wrap: bool) -> Result<Self, GridError> {
        if width == 0 {
            return Err(GridError::ZeroWidth);
        }
        Ok(Self::lay_out(text.chars().map(char_to_cp437), width, wrap))
    }

    /// Row `y` as Unicode text
    pub fn row_string(&self, y: usize) -> Option<String> {
        self.row(y).map(cp437_to_string)
    }

    /// The whole grid as Unicode text, one line per row
    pub fn to_utf8_string(&self) -> String {
        (0..self.height())
            .filter_map(|y| self.row_string(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
