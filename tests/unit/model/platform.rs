use super::*;

#[test]
fn canvas_height_derives_from_ratio_only() {
    let cases = [
        (AspectRatio::SQUARE, 1080),
        (AspectRatio::PORTRAIT_3_4, 1440),
        (AspectRatio::VERTICAL_9_16, 1920),
        (AspectRatio::LANDSCAPE_16_9, 608),
    ];
    for (ratio, height) in cases {
        let c = ratio.canvas(CANONICAL_WIDTH).unwrap();
        assert_eq!((c.width, c.height), (1080, height), "{ratio}");
    }
}

#[test]
fn parse_and_display_round_trip() {
    let r: AspectRatio = " 9 : 16 ".parse().unwrap();
    assert_eq!(r, AspectRatio::VERTICAL_9_16);
    assert_eq!(r.to_string(), "9:16");

    assert!(matches!(
        "0:16".parse::<AspectRatio>(),
        Err(AdframeError::InvalidGeometry(_))
    ));
    assert!(matches!(
        "wide".parse::<AspectRatio>(),
        Err(AdframeError::Validation(_))
    ));
}

#[test]
fn serde_uses_ratio_string() {
    let r: AspectRatio = serde_json::from_str("\"3:4\"").unwrap();
    assert_eq!(r, AspectRatio::PORTRAIT_3_4);
    assert_eq!(serde_json::to_string(&r).unwrap(), "\"3:4\"");
    assert!(serde_json::from_str::<AspectRatio>("\"3x4\"").is_err());
}

#[test]
fn platform_profiles_resolve() {
    assert_eq!(
        platform_by_id("tiktok").unwrap().aspect_ratio,
        AspectRatio::VERTICAL_9_16
    );
    assert_eq!(
        platform_by_id("Instagram_Post").unwrap().aspect_ratio,
        AspectRatio::SQUARE
    );
    let landscape = platform_by_id("google_ad_landscape").unwrap();
    assert_eq!(landscape.aspect_ratio, AspectRatio::LANDSCAPE_16_9);
    assert_eq!(landscape.resolution, Resolution::P720);
    assert!(platform_by_id("myspace").is_err());
}
