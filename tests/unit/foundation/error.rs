use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CagrError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(CagrError::render("x").to_string().contains("render error:"));
    assert!(
        CagrError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CagrError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_invalid_input());
}

#[test]
fn json_errors_map_to_serde() {
    let bad = serde_json::from_str::<u32>("nope").unwrap_err();
    let err = CagrError::from(bad);
    assert!(matches!(err, CagrError::Serde(_)));
}
