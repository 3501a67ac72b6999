//! Property tests: commands survive encoding and decoding unchanged

use pixmatrix_core::{BitVec, BrightnessGrid, Cp437Grid, PixelGrid, TILE_SIZE};
use pixmatrix_protocol::{
    Command, CompressionCode, DecodeError, EncodeError, Frame, ServicePointError,
};
use proptest::prelude::*;

fn compression() -> impl Strategy<Value = CompressionCode> {
    let available: Vec<_> = CompressionCode::available().collect();
    proptest::sample::select(available)
}

fn bits() -> impl Strategy<Value = BitVec> {
    proptest::collection::vec(any::<bool>(), 0..512).prop_map(|values| {
        let mut bits = BitVec::new(values.len());
        for (index, value) in values.into_iter().enumerate() {
            bits.set(index, value);
        }
        bits
    })
}

proptest! {
    #[test]
    fn bitmap_linear_reloads(offset in 0usize..u16::MAX as usize, bits in bits(), compression in compression()) {
        for command in [
            Command::bitmap_linear(offset, &bits, compression),
            Command::bitmap_linear_and(offset, &bits, compression),
            Command::bitmap_linear_or(offset, &bits, compression),
            Command::bitmap_linear_xor(offset, &bits, compression),
        ] {
            if bits.len() % 8 == 0 {
                let bytes = command.encode().unwrap();
                prop_assert_eq!(Command::decode(&bytes).unwrap(), command);
            } else {
                prop_assert_eq!(command.encode(), Err(EncodeError::UnalignedLength { len: bits.len() }));
            }
        }
    }

    #[test]
    fn bitmap_window_reloads(
        tile_x in 0usize..56,
        y in 0usize..160,
        tiles in 1usize..8,
        height in 1usize..20,
        seed in any::<u64>(),
        compression in compression(),
    ) {
        let width = tiles * TILE_SIZE;
        let mut grid = PixelGrid::new(width, height);
        for py in 0..height {
            for px in 0..width {
                grid.set(px, py, (seed >> ((px * 7 + py) % 64)) & 1 == 1);
            }
        }
        let command = Command::bitmap_linear_win(tile_x * TILE_SIZE, y, &grid, compression);
        let frame = command.to_frame().unwrap();
        prop_assert_eq!(Command::try_from(frame).unwrap(), command);
    }

    #[test]
    fn tile_windows_reload(x in 0usize..56, y in 0usize..20, width in 1usize..10, height in 1usize..10, cell in any::<u8>()) {
        let mut chars = Cp437Grid::new(width, height);
        chars.fill(cell);
        let command = Command::cp437_data(x, y, &chars);
        prop_assert_eq!(Command::decode(&command.encode().unwrap()).unwrap(), command);

        let mut levels = BrightnessGrid::new(width, height);
        levels.fill(cell);
        let command = Command::char_brightness(x, y, &levels);
        prop_assert_eq!(Command::decode(&command.encode().unwrap()).unwrap(), command);
    }

    #[test]
    fn brightness_range_is_enforced(value in any::<u8>()) {
        match Command::brightness(value) {
            Ok(command) => {
                prop_assert!(value <= 11);
                prop_assert_eq!(Command::decode(&command.encode().unwrap()).unwrap(), command);
            }
            Err(err) => {
                prop_assert!(value > 11);
                prop_assert_eq!(err, ServicePointError::InvalidBrightness { value });
            }
        }
    }

    #[test]
    fn short_datagrams_are_rejected(bytes in proptest::collection::vec(any::<u8>(), 0..10)) {
        prop_assert!(matches!(Command::decode(&bytes), Err(DecodeError::Frame(_))));
        prop_assert!(Frame::try_from(bytes.as_slice()).is_err());
    }

    #[test]
    fn arbitrary_datagrams_never_panic(bytes in proptest::collection::vec(any::<u8>(), 10..64)) {
        let _ = Command::decode(&bytes);
    }
}
