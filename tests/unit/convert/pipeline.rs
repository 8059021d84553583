use super::*;
use crate::{foundation::error::Mode2Error, pack::pixels::unpack_byte};

const RED: [u8; 3] = [255, 0, 0];
const BLUE: [u8; 3] = [0, 0, 255];

fn mode2_frame(rgb: [u8; 3], delay_cs: u32) -> SourceFrame {
    SourceFrame::solid(640, 512, rgb, delay_cs)
}

#[test]
fn red_to_blue_is_one_dynamic_cycle() {
    let frames = [mode2_frame(RED, 10), mode2_frame(BLUE, 20)];
    let enc = encode_animation(&frames).unwrap();

    assert_eq!(
        enc.stats,
        EncodeStats {
            frame_count: 2,
            static_cycles: 0,
            dynamic_cycles: 1,
        }
    );
    assert_eq!(&enc.palette[16..19], &[2, 0, 1]);
    // frame 0: red code then delay, frame 1: blue code then delay
    assert_eq!(&enc.palette[19..23], &[1, 10, 4, 20]);
    assert!(enc.pixels.iter().all(|&b| b == 0));

    let bytes = enc.to_bytes();
    assert_eq!(bytes.len(), ARTIFACT_LEN);
    assert_eq!(bytes.len(), 20736);
}

#[test]
fn encoding_is_deterministic() {
    let g = Geometry::new(4, 2).unwrap();
    let mut a = SourceFrame::solid(16, 4, [0, 0, 0], 5);
    let mut b = SourceFrame::solid(16, 4, [0, 0, 0], 5);
    for y in 0..2 {
        for x in 4..8 {
            a.set_pixel(x, y, [255, 255, 0]);
            b.set_pixel(x, y, [0, 255, 255]);
        }
    }
    for y in 2..4 {
        for x in 12..16 {
            a.set_pixel(x, y, [255, 255, 255]);
            b.set_pixel(x, y, [255, 255, 255]);
        }
    }
    let frames = [a, b];
    let first = encode_animation_with(g, &frames).unwrap();
    let second = encode_animation_with(g, &frames).unwrap();
    assert_eq!(first, second);

    // statics: black -> 0, white -> 1; dynamic: yellow->cyan -> 2
    assert_eq!(first.stats.static_cycles, 2);
    assert_eq!(first.stats.dynamic_cycles, 1);
    assert_eq!(unpack_byte(first.pixels[0]), (0, 2));
    assert_eq!(unpack_byte(first.pixels[8 + 1]), (0, 1));
}

#[test]
fn single_frame_animation_is_all_static() {
    let enc = encode_animation(&[mode2_frame([200, 200, 200], 50)]).unwrap();
    assert_eq!(enc.stats.static_cycles, 1);
    assert_eq!(enc.stats.dynamic_cycles, 0);
    assert_eq!(&enc.palette[16..21], &[1, 1, 0, 7, 50]);
}

#[test]
fn frame_and_delay_limits_propagate() {
    let eleven: Vec<_> = (0..11).map(|_| mode2_frame(RED, 5)).collect();
    assert!(matches!(
        encode_animation(&eleven),
        Err(Mode2Error::TooManyFrames { count: 11, .. })
    ));

    let ten: Vec<_> = (0..10).map(|_| mode2_frame(RED, 5)).collect();
    assert_eq!(encode_animation(&ten).unwrap().stats.frame_count, 10);

    for (delay, ok) in [(2, false), (3, true), (254, true), (255, false)] {
        let res = encode_animation(&[mode2_frame(RED, 5), mode2_frame(BLUE, delay)]);
        assert_eq!(res.is_ok(), ok, "delay {delay}");
    }
}

#[test]
fn wrong_size_frame_is_rejected() {
    let err = encode_animation(&[SourceFrame::solid(320, 512, RED, 5)]).unwrap_err();
    assert!(err.to_string().contains("640 pixels wide"));
}
