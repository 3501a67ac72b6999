//! Frame encoding and decoding for the display protocol.
//!
//! Frame format:
//! - COMMAND CODE (2 bytes): which command this frame carries
//! - A, B, C, D (2 bytes each): command-specific header fields
//! - PAYLOAD (rest of the datagram): command-specific data
//!
//! All header fields are big-endian. There is no length prefix or checksum;
//! the datagram boundary delimits the frame.

use thiserror::Error;

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = 10;

/// Errors that can occur during frame parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Fewer bytes than a header needs
    #[error("frame of {0} bytes is shorter than the 10 byte header")]
    TooShort(usize),
}

/// The fixed header of a frame
///
/// Field meaning depends on the command, so the fields have no speaking names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    /// Which command this frame represents
    pub command_code: u16,
    /// First command-specific value
    pub a: u16,
    /// Second command-specific value
    pub b: u16,
    /// Third command-specific value
    pub c: u16,
    /// Fourth command-specific value
    pub d: u16,
}

impl Header {
    /// Header with only a command code set
    pub fn code_only(command_code: u16) -> Self {
        Self {
            command_code,
            ..Self::default()
        }
    }

    /// Whether all command-specific fields are zero
    pub fn fields_are_zero(&self) -> bool {
        self.a == 0 && self.b == 0 && self.c == 0 && self.d == 0
    }

    /// Encode into the 10 wire bytes
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buffer = [0u8; HEADER_SIZE];
        let fields = [self.command_code, self.a, self.b, self.c, self.d];
        for (chunk, field) in buffer.chunks_exact_mut(2).zip(fields) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }
        buffer
    }

    /// Decode from the first 10 bytes of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < HEADER_SIZE {
            return Err(FrameError::TooShort(bytes.len()));
        }
        let field = |index: usize| u16::from_be_bytes([bytes[index], bytes[index + 1]]);
        Ok(Self {
            command_code: field(0),
            a: field(2),
            b: field(4),
            c: field(6),
            d: field(8),
        })
    }
}

/// A complete frame: header plus payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Meta-information for the command
    pub header: Header,
    /// Command data, possibly compressed
    pub payload: Vec<u8>,
}

impl Frame {
    /// Create a frame from its parts
    pub fn new(header: Header, payload: Vec<u8>) -> Self {
        Self { header, payload }
    }

    /// Create a frame with no payload and only a command code
    pub fn empty(command_code: u16) -> Self {
        Self {
            header: Header::code_only(command_code),
            payload: Vec::new(),
        }
    }

    /// Total size on the wire
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }

    /// Encode this frame into datagram bytes
    pub fn encode_to_vec(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        bytes.extend_from_slice(&self.header.encode());
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = FrameError;

    /// Parse a received datagram
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let header = Header::decode(value)?;
        Ok(Self {
            header,
            payload: value[HEADER_SIZE..].to_vec(),
        })
    }
}

impl TryFrom<Vec<u8>> for Frame {
    type Error = FrameError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl From<Frame> for Vec<u8> {
    fn from(value: Frame) -> Self {
        value.encode_to_vec()
    }
}
