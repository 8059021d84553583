use crate::foundation::{
    core::{BRIGHTNESS_THRESHOLD, Geometry, MAX_FRAMES, OVERSAMPLE_X, OVERSAMPLE_Y, SourceFrame},
    error::{Mode2Error, Mode2Result},
};

/// Map an RGB sample to a 3-bit hardware colour: bit 0 red, bit 1 green, bit 2 blue.
///
/// A channel contributes its bit when it is strictly greater than `threshold`.
pub fn quantize(threshold: u8, r: u8, g: u8, b: u8) -> u8 {
    let mut c = 0;
    if r > threshold {
        c |= 1;
    }
    if g > threshold {
        c |= 2;
    }
    if b > threshold {
        c |= 4;
    }
    c
}

/// Hardware colour codes for every output pixel of every frame.
///
/// Stored as one flat buffer: frame-major, then row, then column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantizedFrames {
    geometry: Geometry,
    frame_count: usize,
    codes: Vec<u8>,
}

impl QuantizedFrames {
    /// Validate and quantize a decoded animation.
    ///
    /// Each frame must be exactly the oversampled size of `geometry`, and every 4x2 source block
    /// must be a single colour.
    pub fn from_frames(geometry: Geometry, frames: &[SourceFrame]) -> Mode2Result<Self> {
        check_frame_count(frames.len())?;

        let mut codes = Vec::with_capacity(frames.len() * geometry.pixel_count());
        for (frame_idx, frame) in frames.iter().enumerate() {
            check_frame_size(geometry, frame_idx, frame)?;
            for y in 0..geometry.height() {
                for x in 0..geometry.width() {
                    let [r, g, b] = uniform_block(frame, frame_idx, x, y)?;
                    codes.push(quantize(BRIGHTNESS_THRESHOLD, r, g, b));
                }
            }
        }

        Ok(Self {
            geometry,
            frame_count: frames.len(),
            codes,
        })
    }

    /// Build directly from colour codes, laid out frame-major then row-major.
    pub fn from_codes(geometry: Geometry, frame_count: usize, codes: Vec<u8>) -> Mode2Result<Self> {
        check_frame_count(frame_count)?;
        if codes.len() != frame_count * geometry.pixel_count() {
            return Err(Mode2Error::validation(format!(
                "colour code count mismatch: got {}, expected {}",
                codes.len(),
                frame_count * geometry.pixel_count()
            )));
        }
        if let Some(bad) = codes.iter().find(|&&c| c > 7) {
            return Err(Mode2Error::validation(format!(
                "colour code {bad} is out of range 0..=7"
            )));
        }
        Ok(Self {
            geometry,
            frame_count,
            codes,
        })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn code(&self, frame: usize, x: u32, y: u32) -> u8 {
        let plane = self.geometry.pixel_count();
        self.codes[frame * plane + y as usize * self.geometry.width() as usize + x as usize]
    }

    /// Colour codes of one output pixel, in frame order.
    pub fn history(&self, x: u32, y: u32) -> impl Iterator<Item = u8> + '_ {
        (0..self.frame_count).map(move |f| self.code(f, x, y))
    }
}

fn check_frame_count(count: usize) -> Mode2Result<()> {
    if count == 0 {
        return Err(Mode2Error::validation("the source image has no frames"));
    }
    if count > MAX_FRAMES {
        return Err(Mode2Error::TooManyFrames {
            count,
            max: MAX_FRAMES,
        });
    }
    Ok(())
}

fn check_frame_size(geometry: Geometry, frame_idx: usize, frame: &SourceFrame) -> Mode2Result<()> {
    if frame.width() != geometry.source_width() {
        return Err(Mode2Error::FrameSize {
            frame: frame_idx,
            axis: "wide",
            expected: geometry.source_width(),
            actual: frame.width(),
        });
    }
    if frame.height() != geometry.source_height() {
        return Err(Mode2Error::FrameSize {
            frame: frame_idx,
            axis: "high",
            expected: geometry.source_height(),
            actual: frame.height(),
        });
    }
    let expected = geometry.source_width() as usize * geometry.source_height() as usize * 3;
    if frame.as_rgb8().len() != expected {
        return Err(Mode2Error::validation(format!(
            "frame {frame_idx} holds {} bytes of RGB8, expected {expected}",
            frame.as_rgb8().len()
        )));
    }
    Ok(())
}

fn uniform_block(frame: &SourceFrame, frame_idx: usize, x: u32, y: u32) -> Mode2Result<[u8; 3]> {
    let xs = x * OVERSAMPLE_X;
    let ys = y * OVERSAMPLE_Y;
    let first = frame.pixel(xs, ys);
    for y0 in 0..OVERSAMPLE_Y {
        for x0 in 0..OVERSAMPLE_X {
            if frame.pixel(xs + x0, ys + y0) != first {
                return Err(Mode2Error::NonUniformBlock {
                    frame: frame_idx,
                    x,
                    y,
                });
            }
        }
    }
    Ok(first)
}

#[cfg(test)]
#[path = "../../tests/unit/quantize/colour.rs"]
mod tests;
