use std::{
    fs::{File, OpenOptions},
    io::{ErrorKind, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    assets::decode::decode_gif_file,
    convert::pipeline::{ARTIFACT_LEN, EncodeStats, encode_animation},
    foundation::error::{Mode2Error, Mode2Result},
    pack::{
        palette::{PALETTE_BLOCK_LEN, PaletteHeader},
        pixels::unpack_byte,
    },
};

/// What [`convert_file`] did with one source.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConvertOutcome {
    Written { path: PathBuf, stats: EncodeStats },
    /// An artifact was already present; it was left untouched.
    Skipped { path: PathBuf },
}

impl ConvertOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Written { path, .. } | Self::Skipped { path } => path,
        }
    }
}

/// Artifact location for `source`: its file stem, without extension, inside `out_dir`.
pub fn artifact_path(source: &Path, out_dir: &Path) -> Mode2Result<PathBuf> {
    let stem = source.file_stem().ok_or_else(|| {
        Mode2Error::validation(format!("source '{}' has no file name", source.display()))
    })?;
    Ok(out_dir.join(stem))
}

/// Convert one GIF into a Mode 2 artifact under `out_dir`.
///
/// Existing artifacts are never overwritten. Everything is validated and encoded before the
/// artifact is created, so a failed conversion leaves nothing behind. The artifact takes the
/// source's modification time.
#[tracing::instrument(skip_all, fields(source = %source.display()))]
pub fn convert_file(source: &Path, out_dir: &Path) -> Mode2Result<ConvertOutcome> {
    let path = artifact_path(source, out_dir)?;
    if path.exists() {
        tracing::debug!(path = %path.display(), "artifact exists, skipping");
        return Ok(ConvertOutcome::Skipped { path });
    }

    let modified = std::fs::metadata(source)
        .and_then(|m| m.modified())
        .with_context(|| format!("read modification time of '{}'", source.display()))?;

    let frames = decode_gif_file(source)?;
    let encoded = encode_animation(&frames)?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            tracing::debug!(path = %path.display(), "artifact appeared concurrently, skipping");
            return Ok(ConvertOutcome::Skipped { path });
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("create artifact '{}'", path.display()))
                .into());
        }
    };

    fill_or_remove(&path, file, |f| {
        write_artifact(f, &encoded.palette, &encoded.pixels)?;
        f.set_modified(modified)
    })
    .with_context(|| format!("write artifact '{}'", path.display()))?;

    tracing::info!(path = %path.display(), stats = ?encoded.stats, "wrote artifact");
    Ok(ConvertOutcome::Written {
        path,
        stats: encoded.stats,
    })
}

/// Run `fill` on a freshly created artifact, deleting the file if it fails.
fn fill_or_remove(
    path: &Path,
    mut file: File,
    fill: impl FnOnce(&mut File) -> std::io::Result<()>,
) -> std::io::Result<()> {
    let res = fill(&mut file);
    if res.is_err() {
        drop(file);
        let _ = std::fs::remove_file(path);
    }
    res
}

fn write_artifact(file: &mut File, palette: &[u8], pixels: &[u8]) -> std::io::Result<()> {
    file.write_all(palette)?;
    file.write_all(pixels)?;
    file.sync_all()
}

/// Summary of an existing artifact.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ArtifactInfo {
    pub header: PaletteHeader,
    /// Number of screen pixels using each palette slot.
    pub slot_usage: [u32; 16],
}

/// Parse an artifact's palette block and count how often each slot is drawn.
pub fn inspect_artifact(bytes: &[u8]) -> Mode2Result<ArtifactInfo> {
    if bytes.len() != ARTIFACT_LEN {
        return Err(Mode2Error::validation(format!(
            "artifact is {} bytes, expected {ARTIFACT_LEN}",
            bytes.len()
        )));
    }
    let header = PaletteHeader::parse(bytes)?;

    let mut slot_usage = [0u32; 16];
    for &byte in &bytes[PALETTE_BLOCK_LEN..] {
        let (left, right) = unpack_byte(byte);
        slot_usage[left as usize] += 1;
        slot_usage[right as usize] += 1;
    }

    let slots = header.static_count() + header.dynamic_count();
    if let Some(bad) = slot_usage[slots.max(1)..].iter().position(|&n| n > 0) {
        return Err(Mode2Error::validation(format!(
            "screen uses palette slot {} but only {slots} are defined",
            bad + slots.max(1)
        )));
    }

    Ok(ArtifactInfo { header, slot_usage })
}

/// [`inspect_artifact`] on a file.
pub fn inspect_artifact_file(path: &Path) -> Mode2Result<ArtifactInfo> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read artifact '{}'", path.display()))?;
    inspect_artifact(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/convert/file.rs"]
mod tests;
