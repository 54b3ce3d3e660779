use super::*;

#[test]
fn over_transparent_src_keeps_dst() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn over_opaque_src_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
}

#[test]
fn over_half_black_darkens_white_by_half() {
    // rgba(0,0,0,0.6) plate over opaque white.
    let out = over([255, 255, 255, 255], [0, 0, 0, 153]);
    assert_eq!(out, [102, 102, 102, 255]);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    let err = over_in_place(&mut dst, &[0u8; 4]).unwrap_err();
    assert!(matches!(err, AdframeError::InvalidGeometry(_)));
}

#[test]
fn shadow_kernel_maps_blur_to_three_sigma() {
    assert_eq!(shadow_kernel(0.0), (0, 0.0));
    assert_eq!(shadow_kernel(f64::NAN).0, 0);
    let (radius, sigma) = shadow_kernel(8.0);
    assert_eq!(radius, 12);
    assert!((sigma - 4.0).abs() < 1e-6);
}

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let src = [10u8, 20, 30, 40].repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 3, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    assert!(out.chunks_exact(4).filter(|px| px[3] != 0).count() > 1);
    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn region_blur_leaves_outside_pixels_untouched() {
    let (w, h) = (8u32, 8u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    // Opaque pixel inside the region, another outside it.
    let at = |x: u32, y: u32| ((y * w + x) * 4) as usize;
    buf[at(2, 2)..at(2, 2) + 4].copy_from_slice(&[255, 255, 255, 255]);
    buf[at(7, 7)..at(7, 7) + 4].copy_from_slice(&[255, 255, 255, 255]);

    blur_region_in_place(&mut buf, w, h, [0, 0, 5, 5], 2, 1.0).unwrap();

    assert_eq!(&buf[at(7, 7)..at(7, 7) + 4], &[255, 255, 255, 255]);
    assert_eq!(&buf[at(6, 2)..at(6, 2) + 4], &[0, 0, 0, 0]);
    assert!(buf[at(2, 2) + 3] < 255);
    assert!(buf[at(3, 2) + 3] > 0);
}

#[test]
fn region_blur_clamps_to_buffer_and_ignores_empty_regions() {
    let mut buf = vec![7u8; 4 * 4 * 4];
    let before = buf.clone();
    blur_region_in_place(&mut buf, 4, 4, [3, 3, 3, 9], 2, 1.0).unwrap();
    assert_eq!(buf, before);
    blur_region_in_place(&mut buf, 4, 4, [0, 0, 100, 100], 2, 1.0).unwrap();
    assert_eq!(buf, before);
}
