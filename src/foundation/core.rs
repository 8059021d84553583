use crate::foundation::error::{Mode2Error, Mode2Result};

/// Largest number of frames a colour-cycle vector can hold (3 bits each in a `u32`).
pub const MAX_FRAMES: usize = 10;

/// Number of hardware palette slots available for colour cycles.
pub const MAX_CYCLES: usize = 16;

/// Channel value a component must exceed to switch its hardware colour bit on.
pub const BRIGHTNESS_THRESHOLD: u8 = 128;

/// Source pixels per output pixel, horizontally.
pub const OVERSAMPLE_X: u32 = 4;

/// Source pixels per output pixel, vertically.
pub const OVERSAMPLE_Y: u32 = 2;

/// Shortest frame delay (centiseconds) the playback program accepts.
pub const MIN_FRAME_DELAY: u32 = 3;

/// First frame delay (centiseconds) the playback program rejects.
pub const FRAME_DELAY_LIMIT: u32 = 255;

/// Output resolution in logical Mode 2 pixels.
///
/// The artifact format is fixed to [`Geometry::MODE2`]; other geometries exist so the
/// classifier and packers can be exercised on small grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    width: u32,
    height: u32,
}

impl Geometry {
    /// Full Mode 2 screen: 160x256 logical pixels.
    pub const MODE2: Geometry = Geometry {
        width: 160,
        height: 256,
    };

    pub fn new(width: u32, height: u32) -> Mode2Result<Self> {
        if width == 0 || height == 0 {
            return Err(Mode2Error::validation("geometry width/height must be non-zero"));
        }
        if !width.is_multiple_of(2) {
            // Two logical pixels share each screen byte.
            return Err(Mode2Error::validation("geometry width must be even"));
        }
        Ok(Self { width, height })
    }

    pub const fn width(self) -> u32 {
        self.width
    }

    pub const fn height(self) -> u32 {
        self.height
    }

    pub fn source_width(self) -> u32 {
        self.width * OVERSAMPLE_X
    }

    pub fn source_height(self) -> u32 {
        self.height * OVERSAMPLE_Y
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per 8-row character band.
    pub const fn row_length(self) -> usize {
        (self.width as usize / 2) * 8
    }

    pub const fn band_count(self) -> usize {
        (self.height as usize).div_ceil(8)
    }

    pub const fn pixel_block_len(self) -> usize {
        self.row_length() * self.band_count()
    }
}

/// One decoded animation frame: packed RGB8 samples plus its display time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFrame {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    /// Display duration in centiseconds.
    pub delay_cs: u32,
}

impl SourceFrame {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>, delay_cs: u32) -> Mode2Result<Self> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(Mode2Error::validation(format!(
                "frame data size mismatch: got {} bytes, expected {expected} for {width}x{height} RGB8",
                rgb.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgb,
            delay_cs,
        })
    }

    /// A frame where every sample is `rgb`.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3], delay_cs: u32) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            rgb: rgb.repeat(n),
            delay_cs,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at `(x, y)`. Callers must stay in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        self.rgb[i..i + 3].copy_from_slice(&rgb);
    }

    pub fn as_rgb8(&self) -> &[u8] {
        &self.rgb
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
