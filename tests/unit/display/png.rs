use super::*;
use crate::foundation::core::Rgb8;

fn hud() -> HudStatus {
    HudStatus {
        fps: 0.0,
        delay: 1,
        frozen: false,
        color: Rgb8::new(0, 255, 0),
    }
}

#[test]
fn writes_numbered_pngs() {
    let dir = PathBuf::from("target").join("unit_png_sink");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = PngSequenceSink::create(&dir).unwrap();
    let f = Frame::filled(3, 2, [5, 6, 7, 255]).unwrap();
    sink.show(&f, &hud()).unwrap();
    sink.show(&f, &hud()).unwrap();
    assert_eq!(sink.written(), 2);

    let back = image::open(dir.join("frame_000001.png")).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (3, 2));
    assert_eq!(back.get_pixel(2, 1).0, [5, 6, 7, 255]);
}

#[test]
fn empty_frame_is_a_display_error() {
    let dir = PathBuf::from("target").join("unit_png_sink_empty");
    let mut sink = PngSequenceSink::create(&dir).unwrap();
    let err = sink.show(&Frame::empty(), &hud()).unwrap_err();
    assert!(matches!(err, TrailError::Display(_)));
}

#[test]
fn malformed_frame_is_not_written() {
    let dir = PathBuf::from("target").join("unit_png_sink_malformed");
    let _ = std::fs::remove_dir_all(&dir);
    let mut sink = PngSequenceSink::create(&dir).unwrap();
    let broken = Frame {
        width: 4,
        height: 4,
        data: vec![0; 8],
    };
    let err = sink.show(&broken, &hud()).unwrap_err();
    assert!(matches!(err, TrailError::Validation(_)));
    assert_eq!(sink.written(), 0);
    assert!(!sink.frame_path(0).exists());
}
