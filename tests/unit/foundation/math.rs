use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premultiply_then_unpremultiply_is_close() {
    let mut px = vec![100u8, 50, 200, 128, 9, 9, 9, 0, 10, 20, 30, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[10, 20, 30, 255]);

    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([100u8, 50, 200]) {
        assert!((i16::from(*got) - i16::from(want)).abs() <= 1);
    }
}
