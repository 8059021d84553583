use crate::{
    classify::{
        cycle::classify,
        index::{ColourIndexTable, IndexGrid},
    },
    foundation::{
        core::{Geometry, SourceFrame},
        error::Mode2Result,
    },
    pack::{
        palette::{PALETTE_BLOCK_LEN, pack_palette},
        pixels::pack_pixels,
    },
    quantize::colour::QuantizedFrames,
};

/// Size of every artifact produced for a full Mode 2 screen.
pub const ARTIFACT_LEN: usize = PALETTE_BLOCK_LEN + Geometry::MODE2.pixel_block_len();

/// Counts describing an encoded animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct EncodeStats {
    pub frame_count: usize,
    pub static_cycles: usize,
    pub dynamic_cycles: usize,
}

/// Palette block and screen memory for one animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedAnimation {
    pub palette: [u8; PALETTE_BLOCK_LEN],
    pub pixels: Vec<u8>,
    pub stats: EncodeStats,
}

impl EncodedAnimation {
    /// The artifact bytes: palette block followed by screen memory.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.palette.len() + self.pixels.len());
        out.extend_from_slice(&self.palette);
        out.extend_from_slice(&self.pixels);
        out
    }
}

/// Encode a decoded animation for a full Mode 2 screen.
///
/// Pipeline:
/// 1. quantize every 4x2 source block to a 3-bit hardware colour
/// 2. classify per-pixel colour histories into static and dynamic cycles
/// 3. assign palette slots and pack the screen and palette blocks
pub fn encode_animation(frames: &[SourceFrame]) -> Mode2Result<EncodedAnimation> {
    encode_animation_with(Geometry::MODE2, frames)
}

/// [`encode_animation`] for an arbitrary output geometry.
#[tracing::instrument(skip(frames), fields(frame_count = frames.len()))]
pub fn encode_animation_with(
    geometry: Geometry,
    frames: &[SourceFrame],
) -> Mode2Result<EncodedAnimation> {
    let geometry = Geometry::new(geometry.width(), geometry.height())?;
    let quantized = QuantizedFrames::from_frames(geometry, frames)?;
    let cycles = classify(&quantized)?;
    let table = ColourIndexTable::from_cycles(&cycles)?;
    let grid = IndexGrid::build(&quantized, &table)?;

    let delays: Vec<u32> = frames.iter().map(|f| f.delay_cs).collect();
    let palette = pack_palette(&cycles, &delays)?;
    let pixels = pack_pixels(&grid);

    let stats = EncodeStats {
        frame_count: frames.len(),
        static_cycles: cycles.static_count(),
        dynamic_cycles: cycles.dynamic_count(),
    };
    tracing::debug!(?stats, "encoded animation");

    Ok(EncodedAnimation {
        palette,
        pixels,
        stats,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/convert/pipeline.rs"]
mod tests;
