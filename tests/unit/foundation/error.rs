use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DiceError::InvalidDieType(7)
            .to_string()
            .contains("invalid die type")
    );
    assert!(
        DiceError::InvalidRollCount(0)
            .to_string()
            .contains("invalid roll count")
    );
    assert!(
        DiceError::asset_not_found("x")
            .to_string()
            .contains("asset not found:")
    );
    assert!(
        DiceError::asset_corrupt("x")
            .to_string()
            .contains("asset corrupt:")
    );
    assert!(
        DiceError::font_unavailable("x")
            .to_string()
            .contains("font unavailable:")
    );
    assert!(
        DiceError::serialization("x")
            .to_string()
            .contains("serialization failure:")
    );
    assert!(
        DiceError::config("x")
            .to_string()
            .contains("configuration error:")
    );
}

#[test]
fn die_type_is_named_in_messages() {
    let err = DiceError::InvalidDieType(7);
    assert!(err.to_string().contains("D7"));

    let err = DiceError::RollOutOfRange {
        die: DieType::D6,
        value: 9,
    };
    let msg = err.to_string();
    assert!(msg.contains('9'));
    assert!(msg.contains("D6"));
}

#[test]
fn request_kinds_are_classified() {
    assert!(DiceError::InvalidDieType(3).is_invalid_request());
    assert!(DiceError::InvalidRollCount(5).is_invalid_request());
    assert!(!DiceError::asset_not_found("D6_1.png").is_invalid_request());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DiceError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
