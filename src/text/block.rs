use crate::{
    foundation::core::{PixelPoint, Rgba8},
    foundation::error::DiceResult,
    render::canvas::Canvas,
    text::font::{TextMetrics, Typeface},
};

/// Fixed-metric typeface that draws every visible character as a solid box.
///
/// Needs no font file, so renders stay reproducible in headless environments and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockTypeface {
    /// Horizontal advance per character.
    pub advance: u32,
    /// Line-box height.
    pub line_height: u32,
    /// Top of the line box to the baseline.
    pub ascent: u32,
}

impl Default for BlockTypeface {
    fn default() -> Self {
        Self {
            advance: 16,
            line_height: 32,
            ascent: 24,
        }
    }
}

impl Typeface for BlockTypeface {
    fn measure(&self, text: &str) -> DiceResult<TextMetrics> {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        Ok(TextMetrics {
            width: chars.saturating_mul(self.advance),
            height: if text.is_empty() { 0 } else { self.line_height },
            baseline_offset: self.ascent.min(self.line_height),
        })
    }

    fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        origin: PixelPoint,
        color: Rgba8,
    ) -> DiceResult<()> {
        let glyph_w = self.advance.saturating_sub(2).max(1);
        let glyph_h = self.ascent.min(self.line_height);
        let mut x = origin.x;
        for ch in text.chars() {
            if !ch.is_whitespace() {
                canvas.fill_rect(PixelPoint::new(x + 1, origin.y), glyph_w, glyph_h, color);
            }
            x = x.saturating_add(i32::try_from(self.advance).unwrap_or(i32::MAX));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/block.rs"]
mod tests;
