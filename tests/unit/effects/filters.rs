use super::*;

fn gray(w: u32, h: u32, v: u8) -> Frame {
    Frame::filled(w, h, [v, v, v, 255]).unwrap()
}

#[test]
fn invert_flips_rgb_and_keeps_alpha() {
    let f = Frame::new(1, 1, vec![0, 100, 255, 77]).unwrap();
    let out = invert(&f).unwrap();
    assert_eq!(out.pixel(0, 0), Some([255, 155, 0, 77]));
    assert_eq!(invert(&out).unwrap(), f);
}

#[test]
fn add_weighted_saturates() {
    let a = gray(2, 2, 200);
    let b = gray(2, 2, 100);
    let out = add_weighted(&a, 1.0, &b, 1.0, 0.0).unwrap();
    assert_eq!(out.pixel(1, 1), Some([255, 255, 255, 255]));

    let out = add_weighted(&a, 0.5, &b, 0.0, -150.0).unwrap();
    assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 255]));

    let out = add_weighted(&a, 0.25, &b, 0.5, 0.0).unwrap();
    assert_eq!(out.pixel(0, 1), Some([100, 100, 100, 255]));
}

#[test]
fn add_weighted_rejects_size_mismatch_and_bad_weights() {
    assert!(add_weighted(&gray(2, 2, 1), 0.5, &gray(2, 1, 1), 0.5, 0.0).is_err());
    assert!(add_weighted(&gray(1, 1, 1), f32::NAN, &gray(1, 1, 1), 0.5, 0.0).is_err());

    let broken = Frame {
        width: 2,
        height: 2,
        data: vec![0; 4],
    };
    assert!(add_weighted(&broken, 0.5, &broken, 0.5, 0.0).is_err());
}

#[test]
fn blend_endpoints_select_inputs() {
    let a = gray(3, 1, 10);
    let b = gray(3, 1, 250);
    assert_eq!(blend(&a, &b, 1.0).unwrap(), a);
    assert_eq!(blend(&a, &b, 0.0).unwrap(), b);
    assert!(blend(&a, &b, 1.5).is_err());
}

#[test]
fn emboss_keeps_flat_regions() {
    let f = gray(4, 3, 90);
    assert_eq!(emboss(&f).unwrap(), f);
}

#[test]
fn emboss_highlights_edges() {
    // Left column dark, right column bright.
    let mut data = Vec::new();
    for _ in 0..3 {
        data.extend_from_slice(&[0, 0, 0, 255, 20, 20, 20, 255]);
    }
    let f = Frame::new(2, 3, data).unwrap();
    let out = emboss(&f).unwrap();
    // x = 0 sees the bright column through the positive right-hand weights.
    assert_eq!(out.pixel(0, 1), Some([60, 60, 60, 255]));
    // x = 1 reflects onto itself on the right and sees the dark column on the left.
    assert_eq!(out.pixel(1, 1), Some([80, 80, 80, 255]));
}

#[test]
fn emboss_single_pixel_reflects_onto_itself() {
    let f = Frame::new(1, 1, vec![10, 20, 30, 255]).unwrap();
    assert_eq!(emboss(&f).unwrap(), f);
    assert!(emboss(&Frame::empty()).unwrap().is_empty());
}
