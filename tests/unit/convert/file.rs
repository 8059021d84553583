use std::{io::Write as _, path::PathBuf};

use super::*;
use crate::foundation::core::SourceFrame;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_convert_file").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn artifact_path_drops_extension() {
    let p = artifact_path(Path::new("gifs/wave.gif"), Path::new("mode2")).unwrap();
    assert_eq!(p, PathBuf::from("mode2").join("wave"));
    assert!(artifact_path(Path::new(""), Path::new("mode2")).is_err());
}

#[test]
fn existing_artifact_is_skipped_without_reading_source() {
    let dir = scratch_dir("skip");
    let existing = dir.join("missing");
    std::fs::write(&existing, b"keep me").unwrap();

    let outcome = convert_file(&dir.join("missing.gif"), &dir).unwrap();
    assert_eq!(outcome, ConvertOutcome::Skipped { path: existing.clone() });
    assert_eq!(outcome.path(), existing.as_path());
    assert_eq!(std::fs::read(&existing).unwrap(), b"keep me");
}

#[test]
fn missing_source_fails_without_output() {
    let dir = scratch_dir("missing_source");
    let err = convert_file(&dir.join("nope.gif"), &dir.join("out")).unwrap_err();
    assert!(matches!(err, Mode2Error::Other(_)));
    assert!(!dir.join("out").join("nope").exists());
}

#[test]
fn inspect_reports_header_and_slot_usage() {
    let mut a = SourceFrame::solid(640, 512, [0, 0, 0], 8);
    let b = SourceFrame::solid(640, 512, [0, 0, 0], 9);
    // one output pixel flashes red on the first frame
    for y in 0..2 {
        for x in 0..4 {
            a.set_pixel(x, y, [255, 0, 0]);
        }
    }
    let enc = encode_animation(&[a, b]).unwrap();
    let info = inspect_artifact(&enc.to_bytes()).unwrap();

    assert_eq!(info.header.frame_count, 2);
    assert_eq!(info.header.static_codes, vec![0]);
    assert_eq!(info.header.frames[0].dynamic_codes, vec![1]);
    assert_eq!(info.header.frames[1].dynamic_codes, vec![0]);
    assert_eq!(info.header.frames[1].delay_cs, 9);
    assert_eq!(info.slot_usage[1], 1);
    assert_eq!(info.slot_usage[0], 160 * 256 - 1);
    assert!(info.slot_usage[2..].iter().all(|&n| n == 0));
}

#[test]
fn inspect_rejects_truncated_or_inconsistent_artifacts() {
    assert!(inspect_artifact(&[0u8; 300]).is_err());

    let enc = encode_animation(&[SourceFrame::solid(640, 512, [0, 0, 0], 8)]).unwrap();
    let mut bytes = enc.to_bytes();
    // draw with slot 3 while only slot 0 exists
    bytes[PALETTE_BLOCK_LEN] = 0x0F;
    assert!(inspect_artifact(&bytes).is_err());
}

#[test]
fn failed_fill_removes_partial_artifact() {
    let dir = scratch_dir("fill_fails");
    let path = dir.join("partial");
    let file = File::create(&path).unwrap();

    let err = fill_or_remove(&path, file, |f| {
        f.write_all(b"half a palette")?;
        Err(std::io::Error::other("disk full"))
    })
    .unwrap_err();
    assert_eq!(err.to_string(), "disk full");
    assert!(!path.exists());
}

#[test]
fn successful_fill_keeps_artifact() {
    let dir = scratch_dir("fill_ok");
    let path = dir.join("whole");
    let file = File::create(&path).unwrap();

    fill_or_remove(&path, file, |f| write_artifact(f, &[1, 2], &[3])).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
}
