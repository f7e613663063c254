use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgba, RgbaImage};

use tools::ToolsError;
use tools::loader::frame::{DATA_URI_PREFIX, decode_frame, upscale};
use tools::model::session::SessionLog;

fn png_payload(color: [u8; 4]) -> String {
    let img = RgbaImage::from_pixel(1, 1, Rgba(color));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png).unwrap();
    format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(bytes.into_inner()))
}

#[test]
fn numeric_keys_are_ordered_and_metadata_is_split_off() {
    let log = SessionLog::parse(
        r#"{"2": "a", "0": "b", "level": "x", "1": "c", "deaths": 3, "note": true}"#,
    )
    .unwrap();

    let order: Vec<(u32, &str)> = log.frames().collect();
    assert_eq!(order, vec![(0, "b"), (1, "c"), (2, "a")]);
    assert_eq!(log.frame_count(), 3);
    assert_eq!(log.metadata.level, Some(serde_json::json!("x")));
    assert_eq!(log.metadata.deaths, Some(serde_json::json!(3)));
    assert_eq!(
        log.metadata.extra.get("note"),
        Some(&serde_json::json!(true))
    );
}

#[test]
fn a_log_with_only_metadata_has_no_frames() {
    let log = SessionLog::parse(r#"{"level": 2, "deaths": 14}"#).unwrap();
    assert!(log.is_empty());
}

#[test]
fn numeric_key_with_non_string_value_is_fatal() {
    let err = SessionLog::parse(r#"{"0": 17}"#).unwrap_err();
    assert!(matches!(err, ToolsError::Session(_)));
}

#[test]
fn frame_payloads_decode_with_and_without_prefix() {
    let payload = png_payload([255, 0, 0, 255]);
    let frame = decode_frame(0, &payload).unwrap();
    assert_eq!(frame.dimensions(), (1, 1));
    assert_eq!(frame.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));

    let bare = payload.strip_prefix(DATA_URI_PREFIX).unwrap();
    assert_eq!(decode_frame(0, bare).unwrap(), frame);
}

#[test]
fn malformed_base64_is_fatal_and_names_the_frame() {
    let err = decode_frame(4, "data:image/png;base64,@@@not-base64@@@").unwrap_err();
    assert!(matches!(err, ToolsError::Frame(_)));
    assert!(err.to_string().contains("frame 4"));
}

#[test]
fn valid_base64_that_is_not_png_is_fatal() {
    let payload = format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(b"plainly not a png"));
    let err = decode_frame(9, &payload).unwrap_err();
    assert!(matches!(err, ToolsError::Frame(_)));
}

#[test]
fn upscale_turns_one_pixel_into_a_uniform_block() {
    let frame = RgbaImage::from_pixel(1, 1, Rgba([12, 200, 99, 255]));
    let scaled = upscale(&frame, 2);
    assert_eq!(scaled.dimensions(), (2, 2));
    for (_, _, pixel) in scaled.enumerate_pixels() {
        assert_eq!(pixel, &Rgba([12, 200, 99, 255]));
    }
}

#[test]
fn upscale_factor_one_is_identity() {
    let mut frame = RgbaImage::new(2, 1);
    frame.put_pixel(0, 0, Rgba([1, 2, 3, 255]));
    frame.put_pixel(1, 0, Rgba([4, 5, 6, 255]));
    assert_eq!(upscale(&frame, 1), frame);
}
