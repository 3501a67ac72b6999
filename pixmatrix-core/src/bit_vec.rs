//! Packed boolean sequence
//!
//! Bits are stored most-significant-bit first, eight per byte. Bits past
//! `len` in the last byte are padding and always kept at zero, so two
//! vectors with the same logical content compare equal and copy out the
//! same raw bytes.

use crate::error::GridError;

/// Number of bytes needed to hold `bits` packed bits
pub const fn byte_len(bits: usize) -> usize {
    bits.div_ceil(8)
}

/// Mask selecting the bit for `index` within its byte
const fn bit_mask(index: usize) -> u8 {
    0x80 >> (index % 8)
}

/// Fixed-length packed boolean sequence
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitVec {
    len: usize,
    data: Vec<u8>,
}

impl BitVec {
    /// Create a vector of `len` bits, all cleared
    pub fn new(len: usize) -> Self {
        Self {
            len,
            data: vec![0; byte_len(len)],
        }
    }

    /// Load `len` bits from packed bytes
    ///
    /// `data` must be exactly `ceil(len / 8)` bytes long. Padding bits in the
    /// last byte are ignored.
    pub fn load(len: usize, data: &[u8]) -> Result<Self, GridError> {
        let expected = byte_len(len);
        if data.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        let mut vec = Self {
            len,
            data: data.to_vec(),
        };
        vec.clear_padding();
        Ok(vec)
    }

    /// Interpret every bit of `data` as part of the vector
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            len: data.len() * 8,
            data: data.to_vec(),
        }
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the vector holds no bits
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the bit at `index`
    ///
    /// # Panics
    ///
    /// When `index >= len`.
    pub fn get(&self, index: usize) -> bool {
        match self.try_get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Read the bit at `index`, failing when out of bounds
    pub fn try_get(&self, index: usize) -> Result<bool, GridError> {
        self.check_index(index)?;
        Ok(self.data[index / 8] & bit_mask(index) != 0)
    }

    /// Write the bit at `index`
    ///
    /// # Panics
    ///
    /// When `index >= len`.
    pub fn set(&mut self, index: usize, value: bool) {
        if let Err(err) = self.try_set(index, value) {
            panic!("{err}");
        }
    }

    /// Write the bit at `index`, failing when out of bounds
    pub fn try_set(&mut self, index: usize, value: bool) -> Result<(), GridError> {
        self.check_index(index)?;
        let byte = &mut self.data[index / 8];
        if value {
            *byte |= bit_mask(index);
        } else {
            *byte &= !bit_mask(index);
        }
        Ok(())
    }

    /// Set every bit to `value`
    pub fn fill(&mut self, value: bool) {
        self.data.fill(if value { 0xFF } else { 0x00 });
        self.clear_padding();
    }

    /// Copy of the packed bytes, independent of this vector
    pub fn copy_raw(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Borrow the packed bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Iterate over all bits in order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |index| self.data[index / 8] & bit_mask(index) != 0)
    }

    /// Count of set bits
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|byte| byte.count_ones() as usize).sum()
    }

    fn check_index(&self, index: usize) -> Result<(), GridError> {
        if index < self.len {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                index,
                size: self.len,
            })
        }
    }

    fn clear_padding(&mut self) {
        let used = self.len % 8;
        if used != 0 {
            if let Some(last) = self.data.last_mut() {
                *last &= 0xFF << (8 - used);
            }
        }
    }
}

impl From<BitVec> for Vec<u8> {
    fn from(value: BitVec) -> Self {
        value.data
    }
}

impl core::fmt::Debug for BitVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "BitVec[{}; ", self.len)?;
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        f.write_str("]")
    }
}
