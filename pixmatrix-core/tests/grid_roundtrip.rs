//! Property tests: every grid type reloads from its own raw bytes

use pixmatrix_core::{BitVec, BrightnessGrid, Cp437Grid, PixelGrid};
use proptest::prelude::*;

fn dimensions() -> impl Strategy<Value = (usize, usize)> {
    (1usize..40, 1usize..12)
}

proptest! {
    #[test]
    fn pixel_grid_reloads((width, height) in dimensions(), seed in any::<u64>()) {
        let mut grid = PixelGrid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                grid.set(x, y, (seed >> ((x + y * 3) % 64)) & 1 == 1);
            }
        }
        let loaded = PixelGrid::load(width, height, &grid.copy_raw()).unwrap();
        prop_assert_eq!(loaded, grid);
    }

    #[test]
    fn bit_vec_reloads(bits in proptest::collection::vec(any::<bool>(), 0..200)) {
        let mut vec = BitVec::new(bits.len());
        for (index, bit) in bits.iter().enumerate() {
            vec.set(index, *bit);
        }
        let loaded = BitVec::load(bits.len(), &vec.copy_raw()).unwrap();
        prop_assert_eq!(loaded.iter().collect::<Vec<_>>(), bits);
        prop_assert_eq!(loaded, vec);
    }

    #[test]
    fn byte_grids_reload((width, height) in dimensions(), fill in any::<u8>(), cell in any::<u8>()) {
        let mut chars = Cp437Grid::new(width, height);
        chars.fill(fill);
        chars.set(width - 1, height - 1, cell);
        prop_assert_eq!(Cp437Grid::load(width, height, &chars.copy_raw()).unwrap(), chars);

        let mut levels = BrightnessGrid::new(width, height);
        levels.fill(fill);
        levels.set(0, 0, cell);
        prop_assert_eq!(BrightnessGrid::load(width, height, &levels.copy_raw()).unwrap(), levels);
    }

    #[test]
    fn fill_true_sets_every_pixel((width, height) in dimensions()) {
        let mut grid = PixelGrid::new(width, height);
        grid.fill(true);
        let once = grid.clone();
        grid.fill(true);
        prop_assert_eq!(&grid, &once);
        prop_assert!(grid.iter_rows().flatten().all(|pixel| pixel));
    }

    #[test]
    fn bounds_are_rejected((width, height) in dimensions()) {
        let pixels = PixelGrid::new(width, height);
        prop_assert!(pixels.try_get(width, 0).is_err());
        prop_assert!(pixels.try_get(0, height).is_err());
        let chars = Cp437Grid::new(width, height);
        prop_assert!(chars.try_get(width, 0).is_err());
        prop_assert!(chars.try_get(0, height).is_err());
        let levels = BrightnessGrid::new(width, height);
        prop_assert!(levels.try_get(width, 0).is_err());
        prop_assert!(levels.try_get(0, height).is_err());
        let bits = BitVec::new(width);
        prop_assert!(bits.try_get(width).is_err());
    }
}
