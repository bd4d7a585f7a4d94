use super::*;

#[test]
fn rgba8_serializes_as_array() {
    let json = serde_json::to_string(&Rgba8::new(1, 2, 3, 4)).unwrap();
    assert_eq!(json, "[1,2,3,4]");

    let back: Rgba8 = serde_json::from_str("[255,255,255,255]").unwrap();
    assert_eq!(back, Rgba8::WHITE);
}

#[test]
fn u16_dims_reject_overflow() {
    assert_eq!(to_u16_dim(434, "width").unwrap(), 434);
    assert!(to_u16_dim(70_000, "width").unwrap_err().contains("width"));
}
