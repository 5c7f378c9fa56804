use super::*;

#[test]
fn offset_range_rejects_inverted_bounds() {
    assert!(OffsetRange::new(5, 4).is_err());
    let r = OffsetRange::new(1, 1).unwrap();
    assert!(r.contains(1));
    assert!(!r.contains(0));
}

#[test]
fn offset_range_clamps_both_sides() {
    let r = OffsetRange::new(1, 109).unwrap();
    assert_eq!(r.clamp(0), 1);
    assert_eq!(r.clamp(3), 3);
    assert_eq!(r.clamp(500), 109);
}

#[test]
fn rgb8_expands_to_opaque_rgba() {
    assert_eq!(Rgb8::new(0, 255, 0).to_rgba(), [0, 255, 0, 255]);
}
