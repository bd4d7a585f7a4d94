use super::*;

#[test]
fn metrics_scale_with_character_count() {
    let face = BlockTypeface::default();
    let m = face.measure("Roll 3D6").unwrap();
    assert_eq!(m.width, 8 * 16);
    assert_eq!(m.height, 32);
    assert_eq!(m.baseline_offset, 24);
    assert_eq!(face.measure("").unwrap().height, 0);
}

#[test]
fn draws_boxes_for_visible_characters_only() {
    let face = BlockTypeface {
        advance: 4,
        line_height: 6,
        ascent: 5,
    };
    let mut canvas = Canvas::new(12, 6).unwrap();
    face.draw(&mut canvas, "a b", PixelPoint::new(0, 0), Rgba8::WHITE)
        .unwrap();

    // 'a' covers x = 1..3, the space leaves x = 4..8 empty, 'b' covers x = 9..11.
    assert_eq!(canvas.pixel(1, 0), [255, 255, 255, 255]);
    assert_eq!(canvas.pixel(5, 0), [0, 0, 0, 0]);
    assert_eq!(canvas.pixel(9, 4), [255, 255, 255, 255]);
    assert_eq!(canvas.pixel(9, 5), [0, 0, 0, 0]);
}

#[test]
fn drawing_off_canvas_clips() {
    let face = BlockTypeface::default();
    let mut canvas = Canvas::new(8, 8).unwrap();
    face.draw(&mut canvas, "XYZ", PixelPoint::new(-20, -10), Rgba8::WHITE)
        .unwrap();
    face.draw(&mut canvas, "XYZ", PixelPoint::new(100, 100), Rgba8::WHITE)
        .unwrap();
}
