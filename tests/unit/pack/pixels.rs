use super::*;
use crate::foundation::core::Geometry;

#[test]
fn colour_table_masks_combine_losslessly() {
    for i in 0..16u8 {
        for j in 0..16u8 {
            let byte = (MODE2_COLOUR_TABLE[i as usize] & LEFT_PIXEL_MASK)
                | (MODE2_COLOUR_TABLE[j as usize] & RIGHT_PIXEL_MASK);
            assert_eq!(unpack_byte(byte), (i, j), "pair ({i}, {j})");
        }
    }
}

#[test]
fn row_start_interleaves_bands() {
    assert_eq!(row_start(0, 640), 0);
    assert_eq!(row_start(7, 640), 7);
    assert_eq!(row_start(8, 640), 640);
    assert_eq!(row_start(255, 640), 31 * 640 + 7);
}

#[test]
fn pack_pixels_places_pairs_in_shared_bytes() {
    let g = Geometry::new(4, 9).unwrap();
    let mut indices = vec![0u8; g.pixel_count()];
    indices[0] = 5; // (0, 0)
    indices[1] = 10; // (1, 0)
    indices[3] = 15; // (3, 0)
    indices[8 * 4 + 2] = 1; // (2, 8)
    let grid = IndexGrid::from_indices(g, indices).unwrap();

    let screen = pack_pixels(&grid);
    assert_eq!(screen.len(), g.pixel_block_len());
    assert_eq!(g.row_length(), 16);

    assert_eq!(unpack_byte(screen[0]), (5, 10));
    assert_eq!(unpack_byte(screen[8]), (0, 15));
    assert_eq!(unpack_byte(screen[16 + 8]), (1, 0));

    let occupied: Vec<usize> = screen
        .iter()
        .enumerate()
        .filter(|(_, b)| **b != 0)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(occupied, vec![0, 8, 24]);
}

#[test]
fn full_screen_uniform_index_fills_every_byte() {
    let g = Geometry::MODE2;
    let grid = IndexGrid::from_indices(g, vec![7; g.pixel_count()]).unwrap();
    let screen = pack_pixels(&grid);
    assert_eq!(screen.len(), 20480);
    assert!(screen.iter().all(|&b| b == MODE2_COLOUR_TABLE[7]));
}
