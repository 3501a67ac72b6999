//! Planes of one byte per cell
//!
//! Character and brightness planes share a layout: `width * height` bytes,
//! row-major, unpacked. The cell kind decides what a byte means and which
//! values a cell may hold.

use core::fmt;
use core::marker::PhantomData;

use crate::brightness::Brightness;
use crate::error::GridError;

/// Meaning of the bytes in a [`ByteGrid`]
pub trait CellKind {
    /// Value of every cell in a freshly created grid
    const DEFAULT: u8;

    /// Map an incoming byte onto a value the cell may hold
    fn normalize(value: u8) -> u8;
}

/// Cells hold brightness levels; values above [`Brightness::MAX`] saturate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrightnessCells;

impl CellKind for BrightnessCells {
    const DEFAULT: u8 = Brightness::MAX.value();

    fn normalize(value: u8) -> u8 {
        Brightness::saturating_from(value).value()
    }
}

/// Cells hold code page 437 character codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cp437Cells;

impl CellKind for Cp437Cells {
    const DEFAULT: u8 = 0;

    fn normalize(value: u8) -> u8 {
        value
    }
}

/// Per-tile brightness plane
pub type BrightnessGrid = ByteGrid<BrightnessCells>;

/// Per-tile character plane
pub type Cp437Grid = ByteGrid<Cp437Cells>;

/// A `width * height` plane of bytes
pub struct ByteGrid<K> {
    width: usize,
    height: usize,
    data: Vec<u8>,
    kind: PhantomData<K>,
}

impl<K: CellKind> ByteGrid<K> {
    /// Create a grid with every cell at the kind's default
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![K::DEFAULT; width * height],
            kind: PhantomData,
        }
    }

    /// Load a grid from raw cells
    ///
    /// `data` must be exactly `width * height` bytes long.
    pub fn load(width: usize, height: usize, data: &[u8]) -> Result<Self, GridError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data: data.iter().copied().map(K::normalize).collect(),
            kind: PhantomData,
        })
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read a cell
    ///
    /// # Panics
    ///
    /// When `x >= width` or `y >= height`.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        match self.try_get(x, y) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Read a cell, failing when out of bounds
    pub fn try_get(&self, x: usize, y: usize) -> Result<u8, GridError> {
        let index = self.index(x, y)?;
        Ok(self.data[index])
    }

    /// Write a cell
    ///
    /// # Panics
    ///
    /// When `x >= width` or `y >= height`.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if let Err(err) = self.try_set(x, y, value) {
            panic!("{err}");
        }
    }

    /// Write a cell, failing when out of bounds
    pub fn try_set(&mut self, x: usize, y: usize, value: u8) -> Result<(), GridError> {
        let index = self.index(x, y)?;
        self.data[index] = K::normalize(value);
        Ok(())
    }

    /// Set every cell to `value`
    pub fn fill(&mut self, value: u8) {
        self.data.fill(K::normalize(value));
    }

    /// Copy of the cells, independent of this grid
    pub fn copy_raw(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Borrow the cells
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Cells of row `y`
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y < self.height {
            let start = y * self.width;
            Some(&self.data[start..start + self.width])
        } else {
            None
        }
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

impl BrightnessGrid {
    /// Read a cell as a [`Brightness`]
    pub fn brightness(&self, x: usize, y: usize) -> Brightness {
        Brightness::saturating_from(self.get(x, y))
    }
}

impl Cp437Grid {
    /// Lay out ASCII text in a grid `width` cells wide
    ///
    /// A line feed starts a new row. With `wrap`, rows longer than `width`
    /// continue on the next row; without it they are cut off. The grid is as
    /// tall as the text needs.
    pub fn load_ascii(text: &str, width: usize, wrap: bool) -> Result<Self, GridError> {
        if width == 0 {
            return Err(GridError::ZeroWidth);
        }
        if let Some((index, char)) = text.chars().enumerate().find(|(_, c)| !c.is_ascii()) {
            return Err(GridError::NonAsciiChar { index, char });
        }

        Ok(Self::lay_out(text.bytes(), width, wrap))
    }

    /// Lay out character codes `width` cells wide, breaking rows at `0x0A`
    pub(crate) fn lay_out(cells: impl IntoIterator<Item = u8>, width: usize, wrap: bool) -> Self {
        let mut rows: Vec<Vec<u8>> = vec![Vec::new()];
        for byte in cells {
            if byte == b'\n' {
                rows.push(Vec::new());
                continue;
            }
            if wrap && rows.last().is_some_and(|row| row.len() == width) {
                rows.push(Vec::new());
            }
            if let Some(row) = rows.last_mut() {
                if row.len() < width {
                    row.push(byte);
                }
            }
        }

        let mut grid = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, byte) in row.iter().enumerate() {
                grid.data[y * width + x] = *byte;
            }
        }
        grid
    }
}

impl<K> Clone for ByteGrid<K> {
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.clone(),
            kind: PhantomData,
        }
    }
}

impl<K> PartialEq for ByteGrid<K> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.data == other.data
    }
}

impl<K> Eq for ByteGrid<K> {}

impl<K> fmt::Debug for ByteGrid<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data", &self.data)
            .finish()
    }
}

impl<K> From<ByteGrid<K>> for Vec<u8> {
    fn from(value: ByteGrid<K>) -> Self {
        value.data
    }
}
