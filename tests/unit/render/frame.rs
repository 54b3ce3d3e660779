use super::*;

fn red_square(ctx: &mut vello_cpu::RenderContext) -> AdframeResult<()> {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 0, 0, 255));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(4.0, 4.0, 12.0, 12.0));
    Ok(())
}

#[test]
fn acquire_rejects_surfaces_over_the_pixel_limit() {
    let canvas = Canvas::new(100, 100).unwrap();
    let err = Frame::acquire(canvas, 9_999).err().unwrap();
    assert!(matches!(err, AdframeError::SurfaceUnavailable(_)));
    assert!(Frame::acquire(canvas, 10_000).is_ok());
}

#[test]
fn acquire_rejects_dimensions_beyond_u16() {
    let canvas = Canvas::new(70_000, 1).unwrap();
    let err = Frame::acquire(canvas, u64::MAX).err().unwrap();
    assert!(err.to_string().starts_with("surface unavailable:"));
}

#[test]
fn paint_composites_pass_over_existing_pixels() {
    let canvas = Canvas::new(16, 16).unwrap();
    let mut frame = Frame::acquire(canvas, u64::MAX).unwrap();
    frame.clear([0, 0, 0, 255]);
    frame.paint(red_square).unwrap();

    let out = frame.readback();
    assert_eq!(out.width, 16);
    assert!(out.premultiplied);
    assert_eq!(out.pixel(8, 8), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(1, 1), Some([0, 0, 0, 255]));
    assert_eq!(out.pixel(16, 0), None);
    assert_eq!(frame.pass_count(), 1);
}

#[test]
fn failing_pass_leaves_frame_untouched() {
    let canvas = Canvas::new(8, 8).unwrap();
    let mut frame = Frame::acquire(canvas, u64::MAX).unwrap();
    frame.clear([0, 0, 0, 255]);
    let err = frame
        .paint(|_| Err(AdframeError::validation("boom")))
        .unwrap_err();
    assert!(matches!(err, AdframeError::Validation(_)));
    assert_eq!(frame.pass_count(), 0);
    assert!(frame.readback().data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn blurred_pass_softens_edges() {
    let canvas = Canvas::new(16, 16).unwrap();
    let mut sharp = Frame::acquire(canvas, u64::MAX).unwrap();
    sharp.paint(red_square).unwrap();
    let mut soft = Frame::acquire(canvas, u64::MAX).unwrap();
    soft.paint_blurred(Rect::new(4.0, 4.0, 12.0, 12.0), 2.0, red_square)
        .unwrap();

    let (sharp, soft) = (sharp.readback(), soft.readback());
    assert_eq!(sharp.pixel(2, 8).unwrap()[3], 0);
    assert!(soft.pixel(2, 8).unwrap()[3] > 0);
    assert!(soft.pixel(4, 8).unwrap()[3] < 255);
}

#[test]
fn straight_and_flattened_views() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    let straight = frame.to_straight_rgba8();
    assert_eq!(straight[3], 128);
    assert!((i32::from(straight[0]) - 128).abs() <= 1);
    assert_eq!(frame.to_rgb8_over_black(), vec![64, 0, 0]);
}
