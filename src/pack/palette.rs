use crate::{
    classify::cycle::CycleSet,
    foundation::{
        core::{FRAME_DELAY_LIMIT, MAX_CYCLES, MAX_FRAMES, MIN_FRAME_DELAY},
        error::{Mode2Error, Mode2Result},
    },
};

/// ASCII tag at the start of every palette block.
pub const SIGNATURE: &[u8; 15] = b"Mode2 Animation";

/// The palette block always occupies this many bytes, zero padded.
pub const PALETTE_BLOCK_LEN: usize = 256;

/// Offset of the frame count byte; the signature's zero terminator sits just before it.
const HEADER_LEN: usize = SIGNATURE.len() + 1;

/// Build the palette-cycle block read by the playback program.
///
/// Layout: signature, `0`, frame count, static count, dynamic count, one colour code per
/// static cycle, then per frame the dynamic cycles' codes for that frame followed by the
/// frame's delay in centiseconds.
pub fn pack_palette(cycles: &CycleSet, delays_cs: &[u32]) -> Mode2Result<[u8; PALETTE_BLOCK_LEN]> {
    let frame_count = cycles.frame_count();
    if delays_cs.len() != frame_count {
        return Err(Mode2Error::internal(format!(
            "{} frame delays for a {frame_count}-frame animation",
            delays_cs.len()
        )));
    }
    for (frame, &delay) in delays_cs.iter().enumerate() {
        check_delay(frame, delay)?;
    }
    cycles.check_capacity()?;

    let mut block = [0u8; PALETTE_BLOCK_LEN];
    block[..SIGNATURE.len()].copy_from_slice(SIGNATURE);

    let mut at = HEADER_LEN;
    let mut push = |b: u8| {
        block[at] = b;
        at += 1;
    };

    push(frame_count as u8);
    push(cycles.static_count() as u8);
    push(cycles.dynamic_count() as u8);
    for vector in cycles.static_cycles() {
        push(vector.last_code());
    }
    for (frame, &delay) in delays_cs.iter().enumerate() {
        for vector in cycles.dynamic_cycles() {
            push(vector.code_at(frame, frame_count));
        }
        push(delay as u8);
    }

    Ok(block)
}

/// The playback program subtracts 2cs of its own overhead from every delay and needs a
/// positive remainder; the delay must also fit one byte.
pub fn check_delay(frame: usize, delay_cs: u32) -> Mode2Result<()> {
    if !(MIN_FRAME_DELAY..FRAME_DELAY_LIMIT).contains(&delay_cs) {
        return Err(Mode2Error::FrameDelay {
            frame,
            delay: delay_cs,
        });
    }
    Ok(())
}

/// Palette state for one frame of a parsed block.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FramePalette {
    /// Colour code for each dynamic slot, in slot order.
    pub dynamic_codes: Vec<u8>,
    pub delay_cs: u8,
}

/// Decoded contents of a palette block.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PaletteHeader {
    pub frame_count: u8,
    /// Colour code for each static slot, in slot order.
    pub static_codes: Vec<u8>,
    pub frames: Vec<FramePalette>,
}

impl PaletteHeader {
    /// Parse the first [`PALETTE_BLOCK_LEN`] bytes of `bytes`.
    pub fn parse(bytes: &[u8]) -> Mode2Result<Self> {
        if bytes.len() < PALETTE_BLOCK_LEN {
            return Err(Mode2Error::validation(format!(
                "palette block is {} bytes, expected {PALETTE_BLOCK_LEN}",
                bytes.len()
            )));
        }
        if &bytes[..SIGNATURE.len()] != SIGNATURE || bytes[SIGNATURE.len()] != 0 {
            return Err(Mode2Error::validation("missing \"Mode2 Animation\" signature"));
        }

        let frame_count = bytes[HEADER_LEN];
        let static_count = bytes[HEADER_LEN + 1] as usize;
        let dynamic_count = bytes[HEADER_LEN + 2] as usize;
        if frame_count == 0 || frame_count as usize > MAX_FRAMES {
            return Err(Mode2Error::validation(format!(
                "frame count {frame_count} is out of range 1..={MAX_FRAMES}"
            )));
        }
        if static_count + dynamic_count > MAX_CYCLES {
            return Err(Mode2Error::validation(format!(
                "{} colour cycles exceed the {MAX_CYCLES} palette slots",
                static_count + dynamic_count
            )));
        }

        let mut at = HEADER_LEN + 3;
        let static_codes = bytes[at..at + static_count].to_vec();
        at += static_count;

        let mut frames = Vec::with_capacity(frame_count as usize);
        for _ in 0..frame_count {
            let dynamic_codes = bytes[at..at + dynamic_count].to_vec();
            at += dynamic_count;
            frames.push(FramePalette {
                dynamic_codes,
                delay_cs: bytes[at],
            });
            at += 1;
        }

        Ok(Self {
            frame_count,
            static_codes,
            frames,
        })
    }

    pub fn static_count(&self) -> usize {
        self.static_codes.len()
    }

    pub fn dynamic_count(&self) -> usize {
        self.frames.first().map_or(0, |f| f.dynamic_codes.len())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pack/palette.rs"]
mod tests;
