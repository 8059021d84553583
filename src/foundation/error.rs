/// Convenience result type used across the crate.
pub type Mode2Result<T> = Result<T, Mode2Error>;

/// Every way a single conversion can fail.
///
/// All variants are fatal to the conversion that produced them; nothing is written on failure.
#[derive(thiserror::Error, Debug)]
pub enum Mode2Error {
    /// Malformed input that does not fit any of the more specific variants.
    #[error("validation error: {0}")]
    Validation(String),

    /// The animation has more frames than a packed colour-cycle vector can hold.
    #[error("the source image has more than {max} frames (found {count})")]
    TooManyFrames {
        /// Observed frame count; the GIF decoder stops at the first frame past `max`.
        count: usize,
        /// Largest supported frame count.
        max: usize,
    },

    /// A frame is not the oversampled source resolution.
    #[error("frame {frame}: the source image is not {expected} pixels {axis} (found {actual})")]
    FrameSize {
        /// Zero-based frame index.
        frame: usize,
        /// `"wide"` or `"high"`.
        axis: &'static str,
        /// Required size along `axis`.
        expected: u32,
        /// Actual size along `axis`.
        actual: u32,
    },

    /// A 4x2 block of source pixels behind one output pixel is not a single colour.
    #[error("frame {frame}: source block for output pixel ({x}, {y}) is not a uniform colour")]
    NonUniformBlock {
        /// Zero-based frame index.
        frame: usize,
        /// Output pixel column.
        x: u32,
        /// Output pixel row.
        y: u32,
    },

    /// The animation needs more palette slots than the hardware has.
    #[error("the animation requires more than {max} colours (found {count} colour cycles)")]
    TooManyColours {
        /// Distinct colour-cycle patterns observed.
        count: usize,
        /// Hardware palette size.
        max: usize,
    },

    /// A frame delay the playback program cannot honour.
    #[error("frame {frame}: the frame delay of {delay}cs is too short (or too long!), expected 3..=254")]
    FrameDelay {
        /// Zero-based frame index.
        frame: usize,
        /// Delay in centiseconds as read from the source.
        delay: u32,
    },

    /// A broken invariant inside the encoder.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Mode2Error {
    /// Build a [`Mode2Error::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`Mode2Error::Internal`] value.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
