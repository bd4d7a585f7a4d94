use super::*;
use crate::foundation::core::{PixelPoint, Rgba8};

fn half_red_canvas() -> Canvas {
    let mut canvas = Canvas::new(2, 1).unwrap();
    canvas.fill_rect(PixelPoint::new(0, 0), 1, 1, Rgba8::new(255, 0, 0, 128));
    canvas
}

#[test]
fn png_bytes_decode_to_straight_alpha() {
    let bytes = serialize(half_red_canvas(), OutputFormat::Png).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 0]);
}

#[test]
fn bmp_and_tiff_are_complete_files() {
    let bmp = serialize(half_red_canvas(), OutputFormat::Bmp).unwrap();
    assert_eq!(&bmp[..2], b"BM");

    let tiff = serialize(half_red_canvas(), OutputFormat::Tiff).unwrap();
    assert!(tiff.starts_with(b"II*\0") || tiff.starts_with(b"MM\0*"));
    let img = image::load_from_memory(&tiff).unwrap();
    assert_eq!((img.width(), img.height()), (2, 1));
}

#[test]
fn parse_is_case_insensitive() {
    assert_eq!(OutputFormat::parse("PNG").unwrap(), OutputFormat::Png);
    assert_eq!(OutputFormat::parse(" bmp ").unwrap(), OutputFormat::Bmp);
    assert_eq!(OutputFormat::parse("Tif").unwrap(), OutputFormat::Tiff);
    assert_eq!(OutputFormat::default(), OutputFormat::Png);
}

#[test]
fn lossy_and_unknown_formats_are_rejected() {
    for name in ["jpeg", "JPG", "webp", "svg", ""] {
        let err = OutputFormat::parse(name).unwrap_err();
        assert!(
            matches!(err, DiceError::SerializationFailure(_)),
            "{name}: {err}"
        );
    }
}

#[test]
fn serde_uses_lowercase_names() {
    assert_eq!(
        serde_json::to_string(&OutputFormat::Tiff).unwrap(),
        "\"tiff\""
    );
    let fmt: OutputFormat = serde_json::from_str("\"bmp\"").unwrap();
    assert_eq!(fmt, OutputFormat::Bmp);
}
