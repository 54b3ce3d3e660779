use std::error::Error as _;

use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AdframeError::invalid_geometry("x")
            .to_string()
            .contains("invalid geometry:")
    );
    assert!(
        AdframeError::surface_unavailable("x")
            .to_string()
            .contains("surface unavailable:")
    );
    assert!(AdframeError::font("x").to_string().contains("font error:"));
    assert!(
        AdframeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        AdframeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn decode_and_encode_preserve_cause() {
    let io = std::io::Error::other("disk gone");
    let err = AdframeError::decode("read source", image::ImageError::IoError(io));
    assert!(err.to_string().contains("image decode failure: read source"));
    let cause = err.source().expect("decode error keeps its cause");
    assert!(cause.to_string().contains("disk gone"));

    let io = std::io::Error::other("pipe closed");
    let err = AdframeError::encode("write jpeg", image::ImageError::IoError(io));
    assert!(err.to_string().contains("encode failure: write jpeg"));
    assert!(err.source().is_some());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AdframeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
