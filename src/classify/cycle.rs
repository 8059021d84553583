use std::collections::BTreeSet;

use crate::{
    foundation::{
        core::{MAX_CYCLES, MAX_FRAMES},
        error::{Mode2Error, Mode2Result},
    },
    quantize::colour::QuantizedFrames,
};

/// One output pixel's colour history packed 3 bits per frame.
///
/// Frame 0 sits in the most significant occupied chunk and the last frame in bits 0..3, so for
/// `n` frames frame `f` is found at bit offset `3 * (n - f - 1)`. Ten frames use 30 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleVector(pub u32);

impl CycleVector {
    /// Pack colour codes given in frame order.
    pub fn from_codes(codes: impl IntoIterator<Item = u8>) -> Self {
        let v = codes
            .into_iter()
            .fold(0u32, |v, c| (v << 3) | u32::from(c & 0x07));
        Self(v)
    }

    /// Colour code shown on `frame` of a `frame_count`-frame animation.
    pub fn code_at(self, frame: usize, frame_count: usize) -> u8 {
        let shift = 3 * (frame_count - frame - 1);
        ((self.0 >> shift) & 0x07) as u8
    }

    /// Colour code of the last frame; for a static cycle, the only colour it has.
    pub fn last_code(self) -> u8 {
        (self.0 & 0x07) as u8
    }
}

/// Distinct colour histories seen in an animation, split by whether they ever change.
///
/// Both sets iterate in ascending numeric order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleSet {
    frame_count: usize,
    static_cycles: BTreeSet<CycleVector>,
    dynamic_cycles: BTreeSet<CycleVector>,
}

impl CycleSet {
    pub fn new(frame_count: usize) -> Mode2Result<Self> {
        if frame_count == 0 {
            return Err(Mode2Error::validation("the source image has no frames"));
        }
        if frame_count > MAX_FRAMES {
            return Err(Mode2Error::TooManyFrames {
                count: frame_count,
                max: MAX_FRAMES,
            });
        }
        Ok(Self {
            frame_count,
            ..Self::default()
        })
    }

    /// Record one pixel's colour history (one code per frame, in frame order).
    pub fn insert(&mut self, history: &[u8]) -> Mode2Result<CycleVector> {
        if history.len() != self.frame_count {
            return Err(Mode2Error::internal(format!(
                "colour history has {} entries for a {}-frame animation",
                history.len(),
                self.frame_count
            )));
        }
        let vector = CycleVector::from_codes(history.iter().copied());
        let is_static = history.iter().all(|&c| c == history[0]);
        if is_static {
            self.static_cycles.insert(vector);
        } else {
            self.dynamic_cycles.insert(vector);
        }
        Ok(vector)
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn static_cycles(&self) -> impl ExactSizeIterator<Item = CycleVector> + '_ {
        self.static_cycles.iter().copied()
    }

    pub fn dynamic_cycles(&self) -> impl ExactSizeIterator<Item = CycleVector> + '_ {
        self.dynamic_cycles.iter().copied()
    }

    pub fn static_count(&self) -> usize {
        self.static_cycles.len()
    }

    pub fn dynamic_count(&self) -> usize {
        self.dynamic_cycles.len()
    }

    pub fn len(&self) -> usize {
        self.static_count() + self.dynamic_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail if the set needs more palette slots than the hardware provides.
    pub fn check_capacity(&self) -> Mode2Result<()> {
        if self.len() > MAX_CYCLES {
            return Err(Mode2Error::TooManyColours {
                count: self.len(),
                max: MAX_CYCLES,
            });
        }
        Ok(())
    }
}

/// Collect every distinct colour history in `frames`.
///
/// The palette limit is checked once all pixels have been seen, so the error reports the
/// full number of cycles the animation would need.
#[tracing::instrument(skip(frames), fields(frame_count = frames.frame_count()))]
pub fn classify(frames: &QuantizedFrames) -> Mode2Result<CycleSet> {
    let geometry = frames.geometry();
    let mut set = CycleSet::new(frames.frame_count())?;
    let mut history = Vec::with_capacity(frames.frame_count());

    for y in 0..geometry.height() {
        for x in 0..geometry.width() {
            history.clear();
            history.extend(frames.history(x, y));
            set.insert(&history)?;
        }
    }

    tracing::debug!(
        static_cycles = set.static_count(),
        dynamic_cycles = set.dynamic_count(),
        "classified colour cycles"
    );
    set.check_capacity()?;
    Ok(set)
}

#[cfg(test)]
#[path = "../../tests/unit/classify/cycle.rs"]
mod tests;
