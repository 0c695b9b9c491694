use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GraphfoldError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        GraphfoldError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        GraphfoldError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GraphfoldError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
