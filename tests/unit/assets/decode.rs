use std::io::Cursor;

use base64::Engine;

use super::*;

fn png_bytes(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let img = SourceImage::decode(&png_bytes(3, 2, [100, 50, 200, 128])).unwrap();
    assert_eq!((img.width(), img.height()), (3, 2));
    assert_eq!(img.rgba8_premul().len(), 3 * 2 * 4);
    assert_eq!(
        &img.rgba8_premul()[..4],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_bytes_are_a_decode_error_with_cause() {
    let err = SourceImage::decode(b"not an image").unwrap_err();
    assert!(matches!(err, AdframeError::ImageDecode { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn missing_file_is_a_decode_error() {
    let err = SourceImage::open("tests/data/does-not-exist.png").unwrap_err();
    assert!(err.to_string().contains("does-not-exist.png"));
}

#[test]
fn data_uri_round_trips_through_base64() {
    let payload = base64::prelude::BASE64_STANDARD.encode(png_bytes(4, 4, [1, 2, 3, 255]));
    let uri = format!("data:image/png;base64,{payload}");
    let img = SourceImage::from_data_uri(&uri).unwrap();
    assert_eq!(img.width(), 4);
    assert_eq!(&img.rgba8_premul()[..4], &[1, 2, 3, 255]);
}

#[test]
fn malformed_data_uris_are_rejected() {
    for uri in [
        "image/png;base64,AAAA",
        "data:image/png;base64",
        "data:image/png,rawbytes",
        "data:image/png;base64,@@@@",
    ] {
        let err = SourceImage::from_data_uri(uri).unwrap_err();
        assert!(matches!(err, AdframeError::Validation(_)), "{uri}: {err}");
    }
}

#[test]
fn from_rgba8_validates_shape() {
    assert!(matches!(
        SourceImage::from_rgba8(0, 1, Vec::new()),
        Err(AdframeError::InvalidGeometry(_))
    ));
    assert!(matches!(
        SourceImage::from_rgba8(2, 2, vec![0; 12]),
        Err(AdframeError::InvalidGeometry(_))
    ));
    let img = SourceImage::from_rgba8(1, 1, vec![200, 100, 0, 0]).unwrap();
    assert_eq!(img.rgba8_premul(), &[0, 0, 0, 0]);
}

#[test]
fn bounded_keeps_small_images_and_shrinks_large_ones() {
    let small = SourceImage::from_rgba8(3, 2, vec![255; 24]).unwrap();
    let same = small.bounded(4).unwrap();
    assert!(Arc::ptr_eq(&small.rgba8_premul, &same.rgba8_premul));

    let wide = SourceImage::from_rgba8(10, 2, [40, 80, 120, 255].repeat(20)).unwrap();
    let shrunk = wide.bounded(4).unwrap();
    assert_eq!((shrunk.width(), shrunk.height()), (4, 1));
    assert_eq!(shrunk.rgba8_premul().len(), 4 * 4);
    assert_eq!(&shrunk.rgba8_premul()[..4], &[40, 80, 120, 255]);
}
