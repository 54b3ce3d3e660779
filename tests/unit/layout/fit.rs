use super::*;

const EPS: f64 = 1e-9;

fn assert_covers(fit: &CoverFit, sw: f64, sh: f64, cw: f64, ch: f64) {
    assert!(fit.draw_width >= cw - EPS, "{fit:?}");
    assert!(fit.draw_height >= ch - EPS, "{fit:?}");
    let w_eq = (fit.draw_width - cw).abs() < EPS;
    let h_eq = (fit.draw_height - ch).abs() < EPS;
    assert!(w_eq || h_eq, "one axis must match exactly: {fit:?}");

    let ratio = fit.draw_width / fit.draw_height;
    assert!((ratio - sw / sh).abs() < 1e-6 * (sw / sh), "{fit:?}");

    let r = fit.rect();
    assert!(r.x0 <= EPS && r.y0 <= EPS);
    assert!(r.x1 >= cw - EPS && r.y1 >= ch - EPS);
    assert!((r.x0 + r.x1 - cw).abs() < 1e-6, "centered horizontally");
    assert!((r.y0 + r.y1 - ch).abs() < 1e-6, "centered vertically");
}

#[test]
fn wider_source_overflows_left_and_right() {
    let fit = fit_cover(800.0, 600.0, 1080.0, 1080.0).unwrap();
    assert_eq!(fit.draw_height, 1080.0);
    assert!((fit.draw_width - 1440.0).abs() < EPS);
    assert!((fit.offset_x + 180.0).abs() < EPS);
    assert_eq!(fit.offset_y, 0.0);
}

#[test]
fn taller_source_overflows_top_and_bottom() {
    let fit = fit_cover(600.0, 800.0, 1080.0, 608.0).unwrap();
    assert_eq!(fit.draw_width, 1080.0);
    assert!((fit.draw_height - 1440.0).abs() < EPS);
    assert!(fit.offset_y < 0.0);
    assert_eq!(fit.offset_x, 0.0);
}

#[test]
fn cover_invariant_holds_over_a_grid() {
    let sizes = [1.0, 3.0, 17.0, 600.0, 799.0, 1024.0, 4096.0];
    let canvases = [(1080.0, 1080.0), (1080.0, 1440.0), (1080.0, 1920.0), (1080.0, 608.0)];
    for &sw in &sizes {
        for &sh in &sizes {
            for &(cw, ch) in &canvases {
                let fit = fit_cover(sw, sh, cw, ch).unwrap();
                assert_covers(&fit, sw, sh, cw, ch);
            }
        }
    }
}

#[test]
fn degenerate_dimensions_are_invalid_geometry() {
    for args in [
        (0.0, 10.0, 10.0, 10.0),
        (10.0, -1.0, 10.0, 10.0),
        (10.0, 10.0, 0.0, 10.0),
        (10.0, 10.0, 10.0, f64::NAN),
    ] {
        let err = fit_cover(args.0, args.1, args.2, args.3).unwrap_err();
        assert!(matches!(err, AdframeError::InvalidGeometry(_)), "{args:?}");
    }
}

#[test]
fn affine_maps_source_corners_onto_fit_rect() {
    let fit = fit_cover(800.0, 600.0, 1080.0, 1080.0).unwrap();
    let a = fit.to_affine(800.0, 600.0);
    let p0 = a * kurbo::Point::new(0.0, 0.0);
    let p1 = a * kurbo::Point::new(800.0, 600.0);
    let r = fit.rect();
    assert!((p0.x - r.x0).abs() < EPS && (p0.y - r.y0).abs() < EPS);
    assert!((p1.x - r.x1).abs() < 1e-6 && (p1.y - r.y1).abs() < 1e-6);
}

#[test]
fn rotation_overscan_keeps_canvas_corners_inside_image() {
    let (cw, ch) = (1080.0, 1920.0);
    let fit = fit_cover(1920.0, 1080.0, cw, ch).unwrap();
    let angle = 0.01;
    let grown = fit.covering_rotation(cw, ch, angle);
    assert!(grown.draw_height > fit.draw_height);

    // Canvas corners, pulled back into the un-rotated image frame, must land inside it.
    let center = kurbo::Point::new(cw / 2.0, ch / 2.0);
    let inverse_rotation = Affine::rotate_about(-angle, center);
    let r = grown.rect();
    for corner in [(0.0, 0.0), (cw, 0.0), (0.0, ch), (cw, ch)] {
        let p = inverse_rotation * kurbo::Point::new(corner.0, corner.1);
        assert!(r.x0 - 1e-6 <= p.x && p.x <= r.x1 + 1e-6, "{p:?} in {r:?}");
        assert!(r.y0 - 1e-6 <= p.y && p.y <= r.y1 + 1e-6, "{p:?} in {r:?}");
    }

    assert_eq!(fit.covering_rotation(cw, ch, 0.0), fit);
}
