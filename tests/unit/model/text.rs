use super::*;

#[test]
fn json_uses_camel_case_and_defaults_missing_fields() {
    let t: TextTriple = serde_json::from_str(r#"{"hook":"Big Sale","keyMessages":"A\\nB"}"#)
        .unwrap();
    assert_eq!(t.hook, "Big Sale");
    assert_eq!(t.key_messages, "A\\nB");
    assert_eq!(t.cta, "");

    let json = serde_json::to_string(&TextTriple::new("h", "k", "c")).unwrap();
    assert!(json.contains("\"keyMessages\":\"k\""));
}

#[test]
fn blank_detection_ignores_whitespace_and_break_markers() {
    let t = TextTriple::new("  ", "\\n\n", "Shop Now");
    assert!(t.is_blank(TextField::Hook));
    assert!(t.is_blank(TextField::KeyMessages));
    assert!(!t.is_blank(TextField::Cta));
    assert_eq!(t.field(TextField::Cta), "Shop Now");
}
