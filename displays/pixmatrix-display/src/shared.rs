//! Grids, commands and connections behind shared handles
//!
//! Each shared object is a cheap-to-clone reference to one [`Handle`].
//! Clones refer to the same object; [`duplicate`](SharedGrid::duplicate)
//! makes an independent copy. Disposing through any clone disposes the
//! object for all of them.
//!
//! Grid mutation is serialized by a lock per grid, so concurrent `set`
//! calls on the same grid never tear a byte; the last writer wins.

use std::sync::{Arc, RwLock};

use pixmatrix_core::{
    BitVec, BrightnessGrid, ByteGrid, CellKind, Cp437Grid, GridError, PixelGrid,
};
use pixmatrix_protocol::{Command, CompressionCode, ServicePointError};

use crate::config::DisplayConfig;
use crate::connection::Connection;
use crate::handle::Handle;

/// Grid types that can be shared
pub trait Shareable: Clone + PartialEq + Send + Sync + 'static {
    /// Name used in errors and logs
    const NAME: &'static str;
}

impl Shareable for BitVec {
    const NAME: &'static str = "BitVec";
}

impl Shareable for PixelGrid {
    const NAME: &'static str = "PixelGrid";
}

impl Shareable for BrightnessGrid {
    const NAME: &'static str = "BrightnessGrid";
}

impl Shareable for Cp437Grid {
    const NAME: &'static str = "Cp437Grid";
}

/// A grid shared between threads
#[derive(Debug)]
pub struct SharedGrid<G> {
    handle: Arc<Handle<RwLock<G>>>,
}

pub type SharedBitVec = SharedGrid<BitVec>;
pub type SharedPixelGrid = SharedGrid<PixelGrid>;
pub type SharedBrightnessGrid = SharedGrid<BrightnessGrid>;
pub type SharedCp437Grid = SharedGrid<Cp437Grid>;

impl<G> Clone for SharedGrid<G> {
    fn clone(&self) -> Self {
        Self {
            handle: Arc::clone(&self.handle),
        }
    }
}

impl<G: Shareable> SharedGrid<G> {
    /// Share `grid`
    pub fn from_grid(grid: G) -> Self {
        Self {
            handle: Arc::new(Handle::new(G::NAME, RwLock::new(grid))),
        }
    }

    /// Run `f` with read access to the grid
    ///
    /// # Panics
    ///
    /// When the grid has been disposed.
    pub fn read<R>(&self, f: impl FnOnce(&G) -> R) -> R {
        self.handle.call(|lock| {
            // a panic inside another call cannot leave a grid half-written
            let grid = lock.read().unwrap_or_else(|poisoned| poisoned.into_inner());
            f(&grid)
        })
    }

    /// Run `f` with exclusive access to the grid
    ///
    /// # Panics
    ///
    /// When the grid has been disposed.
    pub fn write<R>(&self, f: impl FnOnce(&mut G) -> R) -> R {
        self.handle.call(|lock| {
            let mut grid = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            f(&mut grid)
        })
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> G {
        self.read(G::clone)
    }

    /// A new shared grid with a copy of the current contents
    pub fn duplicate(&self) -> Self {
        Self::from_grid(self.snapshot())
    }

    /// Compare contents
    pub fn equals(&self, other: &Self) -> bool {
        if self.same_object(other) {
            return true;
        }
        let mine = self.snapshot();
        other.read(|theirs| mine == *theirs)
    }

    /// Whether both refer to the same object
    pub fn same_object(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handle, &other.handle)
    }

    /// Dispose the grid for every clone; see [`Handle::dispose`]
    pub fn dispose(&self) -> bool {
        self.handle.dispose()
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.is_disposed()
    }
}

impl SharedBitVec {
    pub fn new(len: usize) -> Self {
        Self::from_grid(BitVec::new(len))
    }

    pub fn load(len: usize, data: &[u8]) -> Result<Self, GridError> {
        BitVec::load(len, data).map(Self::from_grid)
    }

    pub fn len(&self) -> usize {
        self.read(BitVec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read(BitVec::is_empty)
    }

    pub fn get(&self, index: usize) -> bool {
        self.read(|bits| bits.get(index))
    }

    pub fn set(&self, index: usize, value: bool) {
        self.write(|bits| bits.set(index, value))
    }

    pub fn fill(&self, value: bool) {
        self.write(|bits| bits.fill(value))
    }

    pub fn copy_raw(&self) -> Vec<u8> {
        self.read(BitVec::copy_raw)
    }
}

impl SharedPixelGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_grid(PixelGrid::new(width, height))
    }

    /// A grid covering the whole screen
    pub fn max_sized() -> Self {
        Self::from_grid(PixelGrid::max_sized())
    }

    pub fn load(width: usize, height: usize, data: &[u8]) -> Result<Self, GridError> {
        PixelGrid::load(width, height, data).map(Self::from_grid)
    }

    pub fn width(&self) -> usize {
        self.read(PixelGrid::width)
    }

    pub fn height(&self) -> usize {
        self.read(PixelGrid::height)
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.read(|grid| grid.get(x, y))
    }

    pub fn set(&self, x: usize, y: usize, value: bool) {
        self.write(|grid| grid.set(x, y, value))
    }

    pub fn fill(&self, value: bool) {
        self.write(|grid| grid.fill(value))
    }

    pub fn copy_raw(&self) -> Vec<u8> {
        self.read(PixelGrid::copy_raw)
    }
}

impl<K> SharedGrid<ByteGrid<K>>
where
    K: CellKind,
    ByteGrid<K>: Shareable,
{
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_grid(ByteGrid::new(width, height))
    }

    pub fn load(width: usize, height: usize, data: &[u8]) -> Result<Self, GridError> {
        ByteGrid::load(width, height, data).map(Self::from_grid)
    }

    pub fn width(&self) -> usize {
        self.read(ByteGrid::width)
    }

    pub fn height(&self) -> usize {
        self.read(ByteGrid::height)
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.read(|grid| grid.get(x, y))
    }

    pub fn set(&self, x: usize, y: usize, value: u8) {
        self.write(|grid| grid.set(x, y, value))
    }

    pub fn fill(&self, value: u8) {
        self.write(|grid| grid.fill(value))
    }

    pub fn copy_raw(&self) -> Vec<u8> {
        self.read(ByteGrid::copy_raw)
    }
}

/// A command shared between threads
#[derive(Debug, Clone)]
pub struct SharedCommand {
    handle: Arc<Handle<Command>>,
}

impl SharedCommand {
    /// Share `command`
    pub fn from_command(command: Command) -> Self {
        Self {
            handle: Arc::new(Handle::new("Command", command)),
        }
    }

    pub fn clear() -> Self {
        Self::from_command(Command::Clear)
    }

    pub fn hard_reset() -> Self {
        Self::from_command(Command::HardReset)
    }

    pub fn fade_out() -> Self {
        Self::from_command(Command::FadeOut)
    }

    pub fn brightness(value: u8) -> Result<Self, ServicePointError> {
        Command::brightness(value).map(Self::from_command)
    }

    pub fn bitmap_linear(offset: usize, bits: &SharedBitVec, compression: CompressionCode) -> Self {
        bits.read(|bits| Self::from_command(Command::bitmap_linear(offset, bits, compression)))
    }

    pub fn bitmap_linear_and(
        offset: usize,
        bits: &SharedBitVec,
        compression: CompressionCode,
    ) -> Self {
        bits.read(|bits| Self::from_command(Command::bitmap_linear_and(offset, bits, compression)))
    }

    pub fn bitmap_linear_or(
        offset: usize,
        bits: &SharedBitVec,
        compression: CompressionCode,
    ) -> Self {
        bits.read(|bits| Self::from_command(Command::bitmap_linear_or(offset, bits, compression)))
    }

    pub fn bitmap_linear_xor(
        offset: usize,
        bits: &SharedBitVec,
        compression: CompressionCode,
    ) -> Self {
        bits.read(|bits| Self::from_command(Command::bitmap_linear_xor(offset, bits, compression)))
    }

    pub fn bitmap_linear_win(
        x: usize,
        y: usize,
        grid: &SharedPixelGrid,
        compression: CompressionCode,
    ) -> Self {
        grid.read(|grid| Self::from_command(Command::bitmap_linear_win(x, y, grid, compression)))
    }

    pub fn char_brightness(x: usize, y: usize, grid: &SharedBrightnessGrid) -> Self {
        grid.read(|grid| Self::from_command(Command::char_brightness(x, y, grid)))
    }

    pub fn cp437_data(x: usize, y: usize, grid: &SharedCp437Grid) -> Self {
        grid.read(|grid| Self::from_command(Command::cp437_data(x, y, grid)))
    }

    /// Run `f` with the command
    ///
    /// # Panics
    ///
    /// When the command has been disposed.
    pub fn with<R>(&self, f: impl FnOnce(&Command) -> R) -> R {
        self.handle.call(f)
    }

    /// A new shared command with a deep copy of this one
    pub fn duplicate(&self) -> Self {
        Self::from_command(self.with(Command::clone))
    }

    /// Structural equality
    pub fn equals(&self, other: &Self) -> bool {
        self.with(|mine| other.with(|theirs| mine == theirs))
    }

    pub fn dispose(&self) -> bool {
        self.handle.dispose()
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.is_disposed()
    }
}

/// A connection shared between threads
#[derive(Debug, Clone)]
pub struct SharedConnection {
    handle: Arc<Handle<Connection>>,
}

impl SharedConnection {
    fn from_connection(connection: Connection) -> Self {
        Self {
            handle: Arc::new(Handle::new("Connection", connection)),
        }
    }

    /// Open a UDP connection to `host:port`
    pub fn open(addr: &str) -> Result<Self, ServicePointError> {
        Connection::open(addr).map(Self::from_connection)
    }

    pub fn open_with(config: &DisplayConfig) -> Result<Self, ServicePointError> {
        Connection::open_with(config).map(Self::from_connection)
    }

    pub fn fake() -> Self {
        Self::from_connection(Connection::fake())
    }

    /// Send a command
    ///
    /// # Panics
    ///
    /// When the connection or the command has been disposed.
    pub fn send(&self, command: &SharedCommand) -> Result<(), ServicePointError> {
        self.handle
            .call(|connection| command.with(|command| connection.send(command)))
    }

    /// Run `f` with the connection
    pub fn with<R>(&self, f: impl FnOnce(&Connection) -> R) -> R {
        self.handle.call(f)
    }

    pub fn dispose(&self) -> bool {
        self.handle.dispose()
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.is_disposed()
    }
}
