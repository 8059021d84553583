use image::{Frame, Rgba, RgbaImage, codecs::gif::GifEncoder};

use super::*;

fn gif_bytes(frames: &[([u8; 3], u32)], width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut enc = GifEncoder::new(&mut buf);
        for &(rgb, delay_cs) in frames {
            let img = RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]));
            let delay = Delay::from_numer_denom_ms(delay_cs * 10, 1);
            enc.encode_frame(Frame::from_parts(img, 0, 0, delay))
                .unwrap();
        }
    }
    buf
}

#[test]
fn decode_gif_frames_and_delays() {
    let bytes = gif_bytes(&[([255, 0, 0], 7), ([0, 0, 255], 12)], 8, 2);
    let frames = decode_gif(&bytes).unwrap();

    assert_eq!(frames.len(), 2);
    assert_eq!((frames[0].width(), frames[0].height()), (8, 2));
    assert_eq!(frames[0].delay_cs, 7);
    assert_eq!(frames[1].delay_cs, 12);
    assert_eq!(frames[0].pixel(3, 1), [255, 0, 0]);
    assert_eq!(frames[1].pixel(0, 0), [0, 0, 255]);
}

#[test]
fn decode_gif_rejects_more_than_ten_frames() {
    let frames: Vec<_> = (0..11).map(|i| ([i as u8 * 20, 0, 0], 5)).collect();
    let bytes = gif_bytes(&frames, 4, 2);
    let err = decode_gif(&bytes).unwrap_err();
    assert!(matches!(err, Mode2Error::TooManyFrames { count: 11, max: 10 }));
}

#[test]
fn decode_gif_stops_reading_past_the_frame_limit() {
    let frames: Vec<_> = (0..11).map(|i| ([i as u8 * 20, 0, 0], 5)).collect();
    let mut bytes = gif_bytes(&frames, 4, 2);
    assert_eq!(bytes.pop(), Some(0x3B));
    // a truncated twelfth image descriptor in place of the trailer
    bytes.extend_from_slice(&[0x2C, 0x00]);

    let err = decode_gif(&bytes).unwrap_err();
    assert!(matches!(err, Mode2Error::TooManyFrames { count: 11, max: 10 }));
}

#[test]
fn decode_gif_rejects_garbage() {
    let err = decode_gif(b"not a gif").unwrap_err();
    assert!(matches!(err, Mode2Error::Other(_)));
}

#[test]
fn delay_conversion_rounds_to_centiseconds() {
    assert_eq!(delay_to_centiseconds(Delay::from_numer_denom_ms(30, 1)), 3);
    assert_eq!(delay_to_centiseconds(Delay::from_numer_denom_ms(2540, 1)), 254);
    assert_eq!(delay_to_centiseconds(Delay::from_numer_denom_ms(100, 3)), 3);
    assert_eq!(delay_to_centiseconds(Delay::from_numer_denom_ms(0, 1)), 0);
}
