use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FourcutError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FourcutError::surface_allocation("x")
            .to_string()
            .contains("render surface allocation failed:")
    );
    assert!(FourcutError::decode("x").to_string().contains("decode error:"));
    assert!(FourcutError::font("x").to_string().contains("font error:"));
}

#[test]
fn slot_and_render_errors_carry_their_counts() {
    assert!(FourcutError::InvalidSlotIndex(7).to_string().contains('7'));
    let err = FourcutError::PrematureRender { provided: 3 };
    assert!(err.to_string().contains("3 of 4"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FourcutError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
