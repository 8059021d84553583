//! mode2anim turns animated GIFs into palette-cycling Mode 2 screens.
//!
//! Mode 2 shows 16 logical colours at 2 bits per physical pixel. Instead of storing one bitmap
//! per frame, the encoder draws a single screen and lets the playback program reprogram palette
//! registers between frames, so each screen pixel "cycles" through its colour history.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: GIF → [`SourceFrame`]s (640x512 RGB, 4x2 oversampled, plus a delay per frame)
//! 2. **Quantize**: every 4x2 block → a 3-bit hardware colour ([`quantize`], [`QuantizedFrames`])
//! 3. **Classify**: per-pixel colour histories → static and dynamic cycles ([`classify`],
//!    [`CycleSet`]) → palette slots ([`ColourIndexTable`], [`IndexGrid`])
//! 4. **Pack**: 256-byte palette block ([`pack_palette`]) + 20480-byte screen ([`pack_pixels`])
//!
//! [`encode_animation`] runs steps 2–4 in memory; [`convert_file`] and [`convert_dir`] add GIF
//! decoding and artifact IO around it.
//!
//! The hard limits are 10 frames and 16 distinct colour cycles; anything beyond that is
//! rejected with a [`Mode2Error`].
#![forbid(unsafe_code)]

mod assets;
mod classify;
mod convert;
mod foundation;
mod pack;
mod quantize;

pub use assets::decode::{decode_gif, decode_gif_file, decode_gif_reader, delay_to_centiseconds};
pub use classify::cycle::{CycleSet, CycleVector, classify};
pub use classify::index::{ColourIndexTable, IndexGrid};
pub use convert::batch::{BatchOpts, BatchReport, FailedFile, convert_dir, list_sources};
pub use convert::file::{
    ArtifactInfo, ConvertOutcome, artifact_path, convert_file, inspect_artifact,
    inspect_artifact_file,
};
pub use convert::pipeline::{
    ARTIFACT_LEN, EncodeStats, EncodedAnimation, encode_animation, encode_animation_with,
};
pub use foundation::core::{
    BRIGHTNESS_THRESHOLD, FRAME_DELAY_LIMIT, Geometry, MAX_CYCLES, MAX_FRAMES, MIN_FRAME_DELAY,
    OVERSAMPLE_X, OVERSAMPLE_Y, SourceFrame,
};
pub use foundation::error::{Mode2Error, Mode2Result};
pub use pack::palette::{
    FramePalette, PALETTE_BLOCK_LEN, PaletteHeader, SIGNATURE, check_delay, pack_palette,
};
pub use pack::pixels::{
    LEFT_PIXEL_MASK, MODE2_COLOUR_TABLE, RIGHT_PIXEL_MASK, pack_pixels, row_start, unpack_byte,
};
pub use quantize::colour::{QuantizedFrames, quantize};
