//! Errors reported to users of the display API
//!
//! [`ServicePointError`] is what fallible public operations return. It also
//! has a small binary encoding so errors can cross process or language
//! boundaries:
//!
//! ```text
//! IoError            : tag=1 u32 BE | len u32 BE | message UTF-8
//! InvalidBrightness  : tag=2 u32 BE | value u8
//! InvalidCommand     : tag=3 u32 BE | len u32 BE | message UTF-8
//! ```

use thiserror::Error;

use crate::command::EncodeError;

const TAG_IO_ERROR: u32 = 1;
const TAG_INVALID_BRIGHTNESS: u32 = 2;
const TAG_INVALID_COMMAND: u32 = 3;

/// Errors returned by command construction and sending
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServicePointError {
    /// The transport failed
    #[error("An IO error occurred: {message}")]
    IoError { message: String },
    /// Brightness outside the supported range
    #[error("The specified brightness value {value} is out of range")]
    InvalidBrightness { value: u8 },
    /// The command cannot be put on the wire
    #[error("The command could not be encoded: {message}")]
    InvalidCommand { message: String },
}

/// Errors while decoding an encoded [`ServicePointError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorCodecError {
    #[error("unknown error tag {0}")]
    UnknownTag(u32),
    #[error("encoded error is truncated")]
    Truncated,
    #[error("error message is not valid UTF-8")]
    InvalidUtf8,
    #[error("{0} trailing bytes after encoded error")]
    TrailingBytes(usize),
}

impl ServicePointError {
    /// Stable variant tag
    pub const fn tag(&self) -> u32 {
        match self {
            ServicePointError::IoError { .. } => TAG_IO_ERROR,
            ServicePointError::InvalidBrightness { .. } => TAG_INVALID_BRIGHTNESS,
            ServicePointError::InvalidCommand { .. } => TAG_INVALID_COMMAND,
        }
    }

    /// Encode into the tagged binary form
    ///
    /// # Panics
    ///
    /// When a message is 4 GiB or longer and its length does not fit the
    /// 32-bit prefix.
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = self.tag().to_be_bytes().to_vec();
        match self {
            ServicePointError::IoError { message }
            | ServicePointError::InvalidCommand { message } => {
                buffer.extend_from_slice(&message_len(message.len()).to_be_bytes());
                buffer.extend_from_slice(message.as_bytes());
            }
            ServicePointError::InvalidBrightness { value } => buffer.push(*value),
        }
        buffer
    }

    /// Decode the tagged binary form
    ///
    /// Unknown tags are rejected rather than mapped to a catch-all variant.
    pub fn decode(bytes: &[u8]) -> Result<Self, ErrorCodecError> {
        let mut reader = Reader { bytes };
        let tag = reader.u32()?;
        let error = match tag {
            TAG_IO_ERROR => ServicePointError::IoError {
                message: reader.string()?,
            },
            TAG_INVALID_BRIGHTNESS => ServicePointError::InvalidBrightness {
                value: reader.take(1)?[0],
            },
            TAG_INVALID_COMMAND => ServicePointError::InvalidCommand {
                message: reader.string()?,
            },
            unknown => return Err(ErrorCodecError::UnknownTag(unknown)),
        };
        match reader.bytes.len() {
            0 => Ok(error),
            trailing => Err(ErrorCodecError::TrailingBytes(trailing)),
        }
    }
}

impl From<std::io::Error> for ServicePointError {
    fn from(value: std::io::Error) -> Self {
        ServicePointError::IoError {
            message: value.to_string(),
        }
    }
}

impl From<EncodeError> for ServicePointError {
    fn from(value: EncodeError) -> Self {
        ServicePointError::InvalidCommand {
            message: value.to_string(),
        }
    }
}

/// Narrow a message length into its 32-bit prefix
fn message_len(len: usize) -> u32 {
    match u32::try_from(len) {
        Ok(len) => len,
        Err(_) => panic!("message length {len} does not fit a 32-bit length prefix"),
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, count: usize) -> Result<&'a [u8], ErrorCodecError> {
        if self.bytes.len() < count {
            return Err(ErrorCodecError::Truncated);
        }
        let (head, tail) = self.bytes.split_at(count);
        self.bytes = tail;
        Ok(head)
    }

    fn u32(&mut self) -> Result<u32, ErrorCodecError> {
        let raw = self.take(4)?;
        Ok(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    fn string(&mut self) -> Result<String, ErrorCodecError> {
        let len = self.u32()? as usize;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| ErrorCodecError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_tags() {
        let io = ServicePointError::IoError {
            message: String::new(),
        };
        assert_eq!(io.tag(), 1);
        assert_eq!(ServicePointError::InvalidBrightness { value: 0 }.tag(), 2);
    }

    #[test]
    fn test_encode_invalid_brightness() {
        let error = ServicePointError::InvalidBrightness { value: 42 };
        assert_eq!(error.encode(), vec![0, 0, 0, 2, 42]);
        assert_eq!(ServicePointError::decode(&error.encode()), Ok(error));
    }

    #[test]
    fn test_encode_io_error() {
        let error = ServicePointError::IoError {
            message: "no route".to_string(),
        };
        let bytes = error.encode();
        assert_eq!(&bytes[..8], &[0, 0, 0, 1, 0, 0, 0, 8]);
        assert_eq!(&bytes[8..], b"no route");
        assert_eq!(ServicePointError::decode(&bytes), Ok(error));
    }

    #[test]
    fn test_message_len_fits() {
        assert_eq!(message_len(0), 0);
        assert_eq!(message_len(u32::MAX as usize), u32::MAX);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "does not fit a 32-bit length prefix")]
    fn test_message_len_overflow_panics() {
        message_len(u32::MAX as usize + 1);
    }

    #[test]
    fn test_decode_rejects_unknown_tag() {
        assert_eq!(
            ServicePointError::decode(&[0, 0, 0, 9, 1]),
            Err(ErrorCodecError::UnknownTag(9))
        );
        assert_eq!(
            ServicePointError::decode(&[0, 0, 0, 0]),
            Err(ErrorCodecError::UnknownTag(0))
        );
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(ServicePointError::decode(&[0, 0]), Err(ErrorCodecError::Truncated));
        assert_eq!(
            ServicePointError::decode(&[0, 0, 0, 2]),
            Err(ErrorCodecError::Truncated)
        );
        assert_eq!(
            ServicePointError::decode(&[0, 0, 0, 1, 0, 0, 0, 5, b'a']),
            Err(ErrorCodecError::Truncated)
        );
        assert_eq!(
            ServicePointError::decode(&[0, 0, 0, 3, 0, 0, 0, 1, 0xFF]),
            Err(ErrorCodecError::InvalidUtf8)
        );
        assert_eq!(
            ServicePointError::decode(&[0, 0, 0, 2, 3, 4]),
            Err(ErrorCodecError::TrailingBytes(1))
        );
    }

    #[test]
    fn test_from_io_error() {
        let error: ServicePointError =
            io::Error::new(io::ErrorKind::ConnectionRefused, "refused").into();
        assert_eq!(
            error,
            ServicePointError::IoError {
                message: "refused".to_string()
            }
        );
    }

    #[test]
    fn test_from_encode_error() {
        let error: ServicePointError = EncodeError::UnalignedWindow { x: 3, width: 8 }.into();
        assert!(matches!(error, ServicePointError::InvalidCommand { ref message } if message.contains("x=3")));
        assert_eq!(error.tag(), 3);
    }
}
