use super::*;

fn frame(width: u32, height: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied: true,
    }
}

#[test]
fn default_format_is_jpeg_90() {
    assert_eq!(OutputFormat::default(), OutputFormat::Jpeg { quality: 90 });
    assert_eq!(OutputFormat::default().mime_type(), "image/jpeg");
    assert_eq!(OutputFormat::Png.file_extension(), "png");
}

#[test]
fn format_serializes_with_a_tag() {
    let json = serde_json::to_string(&OutputFormat::Jpeg { quality: 80 }).unwrap();
    assert_eq!(json, r#"{"format":"jpeg","quality":80}"#);
    let png: OutputFormat = serde_json::from_str(r#"{"format":"png"}"#).unwrap();
    assert_eq!(png, OutputFormat::Png);
}

#[test]
fn out_of_range_quality_is_rejected() {
    for quality in [0, 101] {
        let err = encode_frame(&frame(2, 2, [0, 0, 0, 255]), OutputFormat::Jpeg { quality })
            .unwrap_err();
        assert!(matches!(err, AdframeError::Validation(_)));
    }
}

#[test]
fn jpeg_decodes_back_to_frame_size() {
    let encoded = encode_frame(&frame(24, 16, [200, 30, 30, 255]), OutputFormat::default()).unwrap();
    assert_eq!((encoded.width, encoded.height), (24, 16));
    assert_eq!(&encoded.bytes[..2], &[0xFF, 0xD8]);

    let decoded = image::load_from_memory(&encoded.bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (24, 16));
    let px = decoded.get_pixel(12, 8);
    assert!(px[0] > 180 && px[1] < 60, "{px:?}");
}

#[test]
fn png_keeps_straight_alpha() {
    let encoded = encode_frame(&frame(2, 2, [64, 0, 0, 128]), OutputFormat::Png).unwrap();
    let decoded = image::load_from_memory(&encoded.bytes).unwrap().to_rgba8();
    let px = decoded.get_pixel(0, 0);
    assert_eq!(px[3], 128);
    assert!((i32::from(px[0]) - 128).abs() <= 1);
}

#[test]
fn data_uri_carries_mime_and_payload() {
    let encoded = encode_frame(&frame(1, 1, [0, 0, 0, 255]), OutputFormat::Png).unwrap();
    let uri = encoded.to_data_uri();
    assert!(uri.starts_with("data:image/png;base64,iVBOR"));
}

#[test]
fn write_to_creates_parent_directories() {
    let dir = std::env::temp_dir().join(format!("adframe-encode-{}", std::process::id()));
    let path = dir.join("nested").join("out.png");
    let encoded = encode_frame(&frame(1, 1, [0, 0, 0, 255]), OutputFormat::Png).unwrap();
    encoded.write_to(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), encoded.bytes);
    let _ = std::fs::remove_dir_all(&dir);
}
