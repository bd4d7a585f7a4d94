use std::sync::Arc;

use super::*;
use crate::{
    assets::store::{AssetResolver, AssetSource, DieFaceAsset, FaceKey},
    dice::request::{footer_text, validate},
};

struct SizedSource {
    size: fn(u32) -> (u32, u32),
}

impl AssetSource for SizedSource {
    fn open(&self, key: &FaceKey) -> DiceResult<DieFaceAsset> {
        let (width, height) = (self.size)(key.face);
        Ok(DieFaceAsset {
            key: *key,
            width,
            height,
            rgba8_premul: Arc::new(vec![255; (width * height * 4) as usize]),
        })
    }
}

fn square_100() -> SizedSource {
    SizedSource {
        size: |_| (100, 100),
    }
}

fn ten_px_per_char(text: &str) -> DiceResult<TextMetrics> {
    Ok(TextMetrics {
        width: text.chars().count() as u32 * 10,
        height: 30,
        baseline_offset: 24,
    })
}

fn solve(policy: &LayoutPolicy, source: &SizedSource, die: i64, rolls: &[u32]) -> Layout {
    let request = validate(die, rolls.len() as i64).unwrap();
    let assets = AssetResolver::new(source)
        .resolve(request.die(), rolls)
        .unwrap();
    compute_layout(
        policy,
        &request,
        rolls,
        &assets,
        &request.header_text(),
        &footer_text(rolls),
        &ten_px_per_char,
    )
    .unwrap()
}

#[test]
fn dynamic_three_dice_row() {
    let layout = solve(&LayoutPolicy::default(), &square_100(), 6, &[1, 4, 6]);
    assert_eq!(
        layout,
        Layout {
            header_origin: PixelPoint::new(130, 10),
            footer_origin: PixelPoint::new(125, 160),
            asset_origins: vec![
                PixelPoint::new(10, 50),
                PixelPoint::new(120, 50),
                PixelPoint::new(230, 50),
            ],
            canvas_width: 340,
            canvas_height: 200,
        }
    );
}

#[test]
fn dynamic_single_die_is_left_anchored() {
    let layout = solve(&LayoutPolicy::default(), &square_100(), 20, &[20]);
    assert_eq!(layout.asset_origins, vec![PixelPoint::new(10, 50)]);
    assert_eq!(layout.canvas_width, 120);
    assert_eq!(layout.header_origin, PixelPoint::new(15, 10));
    assert_eq!(layout.footer_origin, PixelPoint::new(15, 160));
}

#[test]
fn dynamic_canvas_widens_for_text() {
    let small = SizedSource {
        size: |_| (20, 20),
    };
    let layout = solve(&LayoutPolicy::default(), &small, 20, &[7]);

    // "Roll 1D20" is 90 px wide, wider than the 40 px dice row.
    assert_eq!(layout.canvas_width, 110);
    assert_eq!(layout.header_origin, PixelPoint::new(10, 10));
    assert_eq!(layout.asset_origins, vec![PixelPoint::new(10, 50)]);
    assert_eq!(layout.footer_origin.y, 80);
    assert_eq!(layout.canvas_height, 120);
}

#[test]
fn dynamic_mixed_sizes_follow_roll_order_and_tallest_asset() {
    let growing = SizedSource {
        size: |face| (10 * face + 20, 20 * face + 20),
    };
    let layout = solve(
        &LayoutPolicy::Dynamic { margin_px: 10 },
        &growing,
        2,
        &[2, 1],
    );
    assert_eq!(
        layout.asset_origins,
        vec![PixelPoint::new(10, 50), PixelPoint::new(60, 50)]
    );
    assert_eq!(layout.canvas_width, 100);
    assert_eq!(layout.footer_origin, PixelPoint::new(10, 120));
    assert_eq!(layout.canvas_height, 160);
}

#[test]
fn fixed_card_uses_slots_and_centers_text() {
    let policy = LayoutPolicy::Fixed(FixedCanvas::default());
    let layout = solve(&policy, &square_100(), 6, &[1, 4, 6]);
    assert_eq!(
        layout,
        Layout {
            header_origin: PixelPoint::new(177, 5),
            footer_origin: PixelPoint::new(172, 160),
            asset_origins: vec![
                PixelPoint::new(10, 54),
                PixelPoint::new(116, 54),
                PixelPoint::new(222, 54),
            ],
            canvas_width: 434,
            canvas_height: 204,
        }
    );
}

#[test]
fn fixed_card_centering_floors_when_text_overflows() {
    let request = validate(6, 1).unwrap();
    let source = square_100();
    let assets = AssetResolver::new(&source)
        .resolve(request.die(), &[3])
        .unwrap();
    let wide = |_: &str| -> DiceResult<TextMetrics> {
        Ok(TextMetrics {
            width: 501,
            height: 30,
            baseline_offset: 24,
        })
    };
    let layout = compute_layout(
        &LayoutPolicy::Fixed(FixedCanvas::default()),
        &request,
        &[3],
        &assets,
        "header",
        "footer",
        &wide,
    )
    .unwrap();
    assert_eq!(layout.header_origin.x, -34);
    assert_eq!(layout.canvas_width, 434);
}

#[test]
fn fixed_card_with_too_few_slots_is_a_config_error() {
    let policy = LayoutPolicy::Fixed(FixedCanvas {
        slots: vec![PixelPoint::new(0, 0)],
        ..FixedCanvas::default()
    });
    let request = validate(6, 2).unwrap();
    let source = square_100();
    let assets = AssetResolver::new(&source)
        .resolve(request.die(), &[1, 2])
        .unwrap();
    let err = compute_layout(
        &policy,
        &request,
        &[1, 2],
        &assets,
        "h",
        "f",
        &ten_px_per_char,
    )
    .unwrap_err();
    assert!(matches!(err, DiceError::Config(_)));
}

#[test]
fn unresolved_face_is_reported() {
    let request = validate(6, 2).unwrap();
    let source = square_100();
    let assets = AssetResolver::new(&source)
        .resolve(request.die(), &[1])
        .unwrap();
    let err = compute_layout(
        &LayoutPolicy::default(),
        &request,
        &[1, 2],
        &assets,
        "h",
        "f",
        &ten_px_per_char,
    )
    .unwrap_err();
    assert!(matches!(err, DiceError::AssetNotFound(_)));
}

#[test]
fn roll_count_must_match_request() {
    let request = validate(6, 3).unwrap();
    let source = square_100();
    let assets = AssetResolver::new(&source)
        .resolve(request.die(), &[1, 2])
        .unwrap();
    assert!(
        compute_layout(
            &LayoutPolicy::default(),
            &request,
            &[1, 2],
            &assets,
            "h",
            "f",
            &ten_px_per_char,
        )
        .is_err()
    );
}

#[test]
fn layout_is_deterministic() {
    let a = solve(&LayoutPolicy::default(), &square_100(), 12, &[12, 1, 12, 5]);
    let b = solve(&LayoutPolicy::default(), &square_100(), 12, &[12, 1, 12, 5]);
    assert_eq!(a, b);
    assert_eq!(a.asset_origins.len(), 4);
}

#[test]
fn policy_json_shapes() {
    let fixed: LayoutPolicy = serde_json::from_str(r#"{"policy":"fixed"}"#).unwrap();
    assert_eq!(fixed, LayoutPolicy::Fixed(FixedCanvas::default()));

    let dynamic: LayoutPolicy = serde_json::from_str(r#"{"policy":"dynamic"}"#).unwrap();
    assert_eq!(dynamic, LayoutPolicy::default());

    let wide: LayoutPolicy =
        serde_json::from_str(r#"{"policy":"dynamic","margin_px":24}"#).unwrap();
    assert_eq!(wide, LayoutPolicy::Dynamic { margin_px: 24 });

    let json = serde_json::to_string(&LayoutPolicy::default()).unwrap();
    assert_eq!(json, r#"{"policy":"dynamic","margin_px":10}"#);
}
