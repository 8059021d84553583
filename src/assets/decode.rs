use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor, Seek},
    path::Path,
};

use anyhow::Context;
use image::{AnimationDecoder, Delay, codecs::gif::GifDecoder};

use crate::foundation::{
    core::{MAX_FRAMES, SourceFrame},
    error::{Mode2Error, Mode2Result},
};

/// Decode an animated GIF held in memory.
pub fn decode_gif(bytes: &[u8]) -> Mode2Result<Vec<SourceFrame>> {
    decode_gif_reader(Cursor::new(bytes))
}

/// Decode an animated GIF from disk.
pub fn decode_gif_file(path: &Path) -> Mode2Result<Vec<SourceFrame>> {
    let f = File::open(path).with_context(|| format!("open gif '{}'", path.display()))?;
    decode_gif_reader(BufReader::new(f))
        .map_err(|e| match e {
            Mode2Error::Other(inner) => {
                Mode2Error::Other(inner.context(format!("decode gif '{}'", path.display())))
            }
            other => other,
        })
}

/// Decode every frame as a full composited canvas; alpha is dropped.
pub fn decode_gif_reader<R: BufRead + Seek>(reader: R) -> Mode2Result<Vec<SourceFrame>> {
    let decoder = GifDecoder::new(reader).context("read gif header")?;

    let mut frames = Vec::new();
    for (idx, frame) in decoder.into_frames().enumerate() {
        if idx == MAX_FRAMES {
            // The rest of the stream is left unread.
            return Err(Mode2Error::TooManyFrames {
                count: idx + 1,
                max: MAX_FRAMES,
            });
        }
        let frame = frame.with_context(|| format!("decode gif frame {idx}"))?;

        let delay_cs = delay_to_centiseconds(frame.delay());
        let buffer = frame.into_buffer();
        let (width, height) = buffer.dimensions();
        let rgb: Vec<u8> = buffer
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();
        frames.push(SourceFrame::new(width, height, rgb, delay_cs)?);
    }

    tracing::debug!(frames = frames.len(), "decoded gif");
    Ok(frames)
}

/// GIF stores delays in centiseconds; `image` hands them back as a millisecond ratio.
pub fn delay_to_centiseconds(delay: Delay) -> u32 {
    let (numer, denom) = delay.numer_denom_ms();
    let denom = u64::from(denom.max(1)) * 10;
    ((u64::from(numer) + denom / 2) / denom)
        .try_into()
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
