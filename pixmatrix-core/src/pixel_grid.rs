//! Bit-packed pixel plane

use crate::bit_vec::{byte_len, BitVec};
use crate::constants::{PIXEL_HEIGHT, PIXEL_WIDTH};
use crate::error::GridError;

/// A plane of on/off pixels stored packed, row-major
///
/// Pixel `(x, y)` is bit `y * width + x` of the underlying [`BitVec`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    bits: BitVec,
}

impl PixelGrid {
    /// Create a grid with all pixels off
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: BitVec::new(width * height),
        }
    }

    /// Create a grid covering the whole screen
    pub fn max_sized() -> Self {
        Self::new(PIXEL_WIDTH, PIXEL_HEIGHT)
    }

    /// Load a grid from packed bytes
    ///
    /// `data` must be exactly `ceil(width * height / 8)` bytes long.
    pub fn load(width: usize, height: usize, data: &[u8]) -> Result<Self, GridError> {
        Ok(Self {
            width,
            height,
            bits: BitVec::load(width * height, data)?,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read a pixel
    ///
    /// # Panics
    ///
    /// When `x >= width` or `y >= height`.
    pub fn get(&self, x: usize, y: usize) -> bool {
        match self.try_get(x, y) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Read a pixel, failing when out of bounds
    pub fn try_get(&self, x: usize, y: usize) -> Result<bool, GridError> {
        let index = self.index(x, y)?;
        self.bits.try_get(index)
    }

    /// Write a pixel
    ///
    /// # Panics
    ///
    /// When `x >= width` or `y >= height`.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if let Err(err) = self.try_set(x, y, value) {
            panic!("{err}");
        }
    }

    /// Write a pixel, failing when out of bounds
    pub fn try_set(&mut self, x: usize, y: usize, value: bool) -> Result<(), GridError> {
        let index = self.index(x, y)?;
        self.bits.try_set(index, value)
    }

    /// Set every pixel to `value`
    pub fn fill(&mut self, value: bool) {
        self.bits.fill(value);
    }

    /// Copy of the packed bytes, independent of this grid
    pub fn copy_raw(&self) -> Vec<u8> {
        self.bits.copy_raw()
    }

    /// Borrow the packed bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    /// Length of the packed representation in bytes
    pub fn raw_len(&self) -> usize {
        byte_len(self.width * self.height)
    }

    /// Iterate over rows top to bottom, each row left to right
    pub fn iter_rows(&self) -> impl Iterator<Item = Vec<bool>> + '_ {
        (0..self.height).map(move |y| {
            (0..self.width)
                .map(|x| self.bits.get(y * self.width + x))
                .collect()
        })
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x < self.width && y < self.height {
            Ok(y * self.width + x)
        } else {
            Err(GridError::CoordinatesOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl From<PixelGrid> for Vec<u8> {
    fn from(value: PixelGrid) -> Self {
        value.bits.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PIXEL_COUNT;

    #[test]
    fn test_packing_three_wide() {
        let mut grid = PixelGrid::new(3, 1);
        grid.set(0, 0, true);
        grid.set(2, 0, true);
        assert_eq!(grid.copy_raw(), vec![0b1010_0000]);
    }

    #[test]
    fn test_row_major() {
        let mut grid = PixelGrid::new(8, 2);
        grid.set(1, 1, true);
        assert_eq!(grid.as_bytes(), &[0x00, 0x40]);
        assert!(grid.get(1, 1));
        assert!(!grid.get(1, 0));
    }

    #[test]
    fn test_max_sized() {
        let grid = PixelGrid::max_sized();
        assert_eq!(grid.width(), PIXEL_WIDTH);
        assert_eq!(grid.height(), PIXEL_HEIGHT);
        assert_eq!(grid.raw_len(), PIXEL_COUNT / 8);
    }

    #[test]
    fn test_fill_idempotent() {
        let mut once = PixelGrid::new(5, 3);
        once.fill(true);
        let mut twice = PixelGrid::new(5, 3);
        twice.fill(true);
        twice.fill(true);
        assert_eq!(once, twice);
        for y in 0..3 {
            for x in 0..5 {
                assert!(twice.get(x, y));
            }
        }
    }

    #[test]
    fn test_bounds() {
        let mut grid = PixelGrid::new(4, 2);
        assert!(grid.try_get(4, 0).is_err());
        assert!(grid.try_get(0, 2).is_err());
        assert_eq!(
            grid.try_set(4, 1, true),
            Err(GridError::CoordinatesOutOfBounds {
                x: 4,
                y: 1,
                width: 4,
                height: 2
            })
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_x_eq_width_panics() {
        PixelGrid::new(8, 1).get(8, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_y_eq_height_panics() {
        PixelGrid::new(8, 1).set(0, 1, true);
    }

    #[test]
    fn test_load_length_mismatch() {
        assert_eq!(
            PixelGrid::load(8, 2, &[0]),
            Err(GridError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_load_round_trip() {
        let mut grid = PixelGrid::new(11, 3);
        grid.set(10, 2, true);
        grid.set(3, 1, true);
        let loaded = PixelGrid::load(11, 3, &grid.copy_raw()).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_iter_rows() {
        let mut grid = PixelGrid::new(2, 2);
        grid.set(1, 0, true);
        let rows: Vec<_> = grid.iter_rows().collect();
        assert_eq!(rows, vec![vec![false, true], vec![false, false]]);
    }
}
