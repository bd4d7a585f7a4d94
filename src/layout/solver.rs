use crate::{
    assets::store::ResolvedAssets,
    dice::request::RollRequest,
    foundation::core::PixelPoint,
    foundation::error::{DiceError, DiceResult},
    text::font::TextMetrics,
};

/// Space around and between the header, the dice row and the footer in the dynamic policy.
pub const DEFAULT_MARGIN_PX: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
/// How the canvas is sized and where its parts go.
pub enum LayoutPolicy {
    /// Canvas grows to fit the text and the dice row.
    Dynamic {
        #[serde(default = "default_margin_px")]
        margin_px: u32,
    },
    /// Constant canvas with one preset slot per die.
    Fixed(FixedCanvas),
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self::Dynamic {
            margin_px: DEFAULT_MARGIN_PX,
        }
    }
}

fn default_margin_px() -> u32 {
    DEFAULT_MARGIN_PX
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Fixed-size card: text rows at set heights, dice at set slots.
pub struct FixedCanvas {
    pub width: u32,
    pub height: u32,
    pub header_y: i32,
    pub footer_y: i32,
    /// Top-left corner of each die, in roll order.
    pub slots: Vec<PixelPoint>,
}

impl Default for FixedCanvas {
    fn default() -> Self {
        Self {
            width: 434,
            height: 204,
            header_y: 5,
            footer_y: 160,
            slots: vec![
                PixelPoint::new(10, 54),
                PixelPoint::new(116, 54),
                PixelPoint::new(222, 54),
                PixelPoint::new(328, 54),
            ],
        }
    }
}

/// Where everything goes on the canvas for one roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Top-left of the header line box.
    pub header_origin: PixelPoint,
    /// Top-left of the footer line box.
    pub footer_origin: PixelPoint,
    /// Top-left of each die face, one per roll, in roll order.
    pub asset_origins: Vec<PixelPoint>,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

/// Place the header, every die face and the footer.
///
/// `measure` supplies text extents; `assets` must hold a face for every value in `rolls`.
pub fn compute_layout(
    policy: &LayoutPolicy,
    request: &RollRequest,
    rolls: &[u32],
    assets: &ResolvedAssets<'_>,
    header: &str,
    footer: &str,
    measure: &dyn Fn(&str) -> DiceResult<TextMetrics>,
) -> DiceResult<Layout> {
    if rolls.len() != usize::from(request.count()) {
        return Err(DiceError::Other(anyhow::anyhow!(
            "{} rolls supplied for a request of {}",
            rolls.len(),
            request.count()
        )));
    }
    if assets.die() != request.die() {
        return Err(DiceError::Other(anyhow::anyhow!(
            "assets resolved for {} but the request rolls {}",
            assets.die(),
            request.die()
        )));
    }

    let mut sizes = Vec::with_capacity(rolls.len());
    for &face in rolls {
        let asset = assets.require(face)?;
        sizes.push((i64::from(asset.width), i64::from(asset.height)));
    }
    let header_m = measure(header)?;
    let footer_m = measure(footer)?;

    let layout = match policy {
        LayoutPolicy::Dynamic { margin_px } => {
            dynamic_layout(i64::from(*margin_px), &sizes, header_m, footer_m)?
        }
        LayoutPolicy::Fixed(card) => fixed_layout(card, rolls.len(), header_m, footer_m)?,
    };
    tracing::debug!(
        width = layout.canvas_width,
        height = layout.canvas_height,
        dice = layout.asset_origins.len(),
        "computed layout"
    );
    Ok(layout)
}

fn dynamic_layout(
    margin: i64,
    sizes: &[(i64, i64)],
    header: TextMetrics,
    footer: TextMetrics,
) -> DiceResult<Layout> {
    let header_w = i64::from(header.width);
    let footer_w = i64::from(footer.width);

    let row_width = margin + sizes.iter().map(|(w, _)| w + margin).sum::<i64>();
    // Wider of the dice row and either text line, so a lone narrow die never clips its header.
    let canvas_w = row_width
        .max(header_w + 2 * margin)
        .max(footer_w + 2 * margin);

    let header_origin = (center(canvas_w, header_w), margin);
    let row_y = header_origin.1 + i64::from(header.height) + margin;

    let mut asset_origins = Vec::with_capacity(sizes.len());
    let mut x = margin;
    for &(w, _) in sizes {
        asset_origins.push(point(x, row_y)?);
        x += w + margin;
    }

    let tallest = sizes.iter().map(|&(_, h)| h).max().unwrap_or(0);
    let footer_origin = (center(canvas_w, footer_w), row_y + tallest + margin);
    let canvas_h = footer_origin.1 + i64::from(footer.height) + margin;

    Ok(Layout {
        header_origin: point(header_origin.0, header_origin.1)?,
        footer_origin: point(footer_origin.0, footer_origin.1)?,
        asset_origins,
        canvas_width: extent(canvas_w)?,
        canvas_height: extent(canvas_h)?,
    })
}

fn fixed_layout(
    card: &FixedCanvas,
    dice: usize,
    header: TextMetrics,
    footer: TextMetrics,
) -> DiceResult<Layout> {
    if dice > card.slots.len() {
        return Err(DiceError::config(format!(
            "fixed layout has {} slots but {dice} dice were rolled",
            card.slots.len()
        )));
    }
    let canvas_w = i64::from(card.width);
    Ok(Layout {
        header_origin: point(
            center(canvas_w, i64::from(header.width)),
            i64::from(card.header_y),
        )?,
        footer_origin: point(
            center(canvas_w, i64::from(footer.width)),
            i64::from(card.footer_y),
        )?,
        asset_origins: card.slots[..dice].to_vec(),
        canvas_width: card.width,
        canvas_height: card.height,
    })
}

/// Left edge that centers `inner` within `outer`, rounding toward negative infinity.
fn center(outer: i64, inner: i64) -> i64 {
    (outer - inner).div_euclid(2)
}

fn point(x: i64, y: i64) -> DiceResult<PixelPoint> {
    let x = i32::try_from(x).map_err(|_| anyhow::anyhow!("layout x {x} out of range"))?;
    let y = i32::try_from(y).map_err(|_| anyhow::anyhow!("layout y {y} out of range"))?;
    Ok(PixelPoint::new(x, y))
}

fn extent(v: i64) -> DiceResult<u32> {
    Ok(u32::try_from(v).map_err(|_| anyhow::anyhow!("canvas extent {v} out of range"))?)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
