use crate::classify::index::IndexGrid;

/// Screen byte for a 4-bit palette index with both pixels of the byte set to that index.
///
/// Mode 2 stores two pixels per byte with their bits interleaved: the left pixel owns the
/// `0xAA` bits and the right pixel the `0x55` bits.
pub const MODE2_COLOUR_TABLE: [u8; 16] = [
    0x00, 0x03, 0x0C, 0x0F, //
    0x30, 0x33, 0x3C, 0x3F, //
    0xC0, 0xC3, 0xCC, 0xCF, //
    0xF0, 0xF3, 0xFC, 0xFF, //
];

/// Bits of a screen byte owned by the left (even x) pixel.
pub const LEFT_PIXEL_MASK: u8 = 0xAA;

/// Bits of a screen byte owned by the right (odd x) pixel.
pub const RIGHT_PIXEL_MASK: u8 = 0x55;

/// Byte offset of the first byte of row `y` in screen memory.
///
/// Screen memory is organised as 8-row character bands; consecutive bytes within a band step
/// down one row before moving across.
pub fn row_start(y: u32, row_length: usize) -> usize {
    (y as usize / 8) * row_length + (y as usize % 8)
}

/// Lay out an index grid as Mode 2 screen memory.
pub fn pack_pixels(grid: &IndexGrid) -> Vec<u8> {
    let geometry = grid.geometry();
    let row_length = geometry.row_length();
    let mut screen = vec![0u8; geometry.pixel_block_len()];

    for y in 0..geometry.height() {
        let start = row_start(y, row_length);
        for x in 0..geometry.width() {
            let index = grid.get(x, y) & 0x0F;
            let mask = if x.is_multiple_of(2) {
                LEFT_PIXEL_MASK
            } else {
                RIGHT_PIXEL_MASK
            };
            screen[start + (x as usize / 2) * 8] |= MODE2_COLOUR_TABLE[index as usize] & mask;
        }
    }

    screen
}

/// Recover the left and right palette indices from one screen byte.
pub fn unpack_byte(byte: u8) -> (u8, u8) {
    let find = |bits: u8, mask: u8| {
        MODE2_COLOUR_TABLE
            .iter()
            .position(|&c| c & mask == bits)
            .unwrap_or_default() as u8
    };
    (
        find(byte & LEFT_PIXEL_MASK, LEFT_PIXEL_MASK),
        find(byte & RIGHT_PIXEL_MASK, RIGHT_PIXEL_MASK),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/pack/pixels.rs"]
mod tests;
