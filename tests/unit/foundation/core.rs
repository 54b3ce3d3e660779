use super::*;

#[test]
fn canvas_rejects_empty_dimensions() {
    assert!(matches!(
        Canvas::new(0, 10),
        Err(AdframeError::InvalidGeometry(_))
    ));
    assert!(matches!(
        Canvas::new(10, 0),
        Err(AdframeError::InvalidGeometry(_))
    ));
    let c = Canvas::new(1080, 1920).unwrap();
    assert_eq!(c.pixel_count(), 1080 * 1920);
    assert_eq!(c.center(), Point::new(540.0, 960.0));
}

#[test]
fn rgba_alpha_fraction_rounds_and_clamps() {
    assert_eq!(Rgba8::BLACK.with_alpha(0.6).a, 153);
    assert_eq!(Rgba8::WHITE.with_alpha(2.0).a, 255);
    assert_eq!(Rgba8::WHITE.with_alpha(-1.0).a, 0);
}

#[test]
fn rgba_from_hex_splits_channels() {
    assert_eq!(Rgba8::from_hex(0x06B6D4), Rgba8::new(0x06, 0xB6, 0xD4, 255));
}
