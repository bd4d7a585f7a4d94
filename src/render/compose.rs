use crate::{
    assets::store::ResolvedAssets,
    foundation::core::Rgba8,
    foundation::error::{DiceError, DiceResult},
    layout::solver::Layout,
    render::canvas::Canvas,
    text::font::Typeface,
};

/// Paint one roll: header, then each die face in roll order, then footer.
///
/// Faces replace the pixels under them; text is blended over whatever is already there.
#[tracing::instrument(skip_all, fields(width = layout.canvas_width, height = layout.canvas_height))]
pub fn compose(
    layout: &Layout,
    assets: &ResolvedAssets<'_>,
    rolls: &[u32],
    header: &str,
    footer: &str,
    typeface: &dyn Typeface,
    color: Rgba8,
) -> DiceResult<Canvas> {
    if layout.asset_origins.len() != rolls.len() {
        return Err(DiceError::Other(anyhow::anyhow!(
            "layout places {} dice but {} were rolled",
            layout.asset_origins.len(),
            rolls.len()
        )));
    }

    let mut canvas = Canvas::new(layout.canvas_width, layout.canvas_height)?;
    typeface.draw(&mut canvas, header, layout.header_origin, color)?;
    for (&face, &origin) in rolls.iter().zip(&layout.asset_origins) {
        canvas.paste(assets.require(face)?, origin);
    }
    typeface.draw(&mut canvas, footer, layout.footer_origin, color)?;
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
