use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    foundation::core::{PixelPoint, Rgba8},
    foundation::error::{DiceError, DiceResult},
    render::canvas::Canvas,
};

/// Point size the header and footer are rendered at unless configured otherwise.
pub const DEFAULT_FONT_SIZE_PX: f32 = 32.0;

/// Pixel extent of one rendered string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextMetrics {
    /// Advance width of the widest line.
    pub width: u32,
    /// Total line-box height.
    pub height: u32,
    /// Distance from the top of the line box to the first baseline.
    pub baseline_offset: u32,
}

/// Text measuring and drawing capability used by the layout engine and the compositor.
///
/// Implementations are immutable after construction so one instance can serve concurrent
/// renders.
pub trait Typeface: Send + Sync {
    fn measure(&self, text: &str) -> DiceResult<TextMetrics>;

    /// Draw `text` with its line box's top-left corner at `origin`, clipped to the canvas.
    fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        origin: PixelPoint,
        color: Rgba8,
    ) -> DiceResult<()>;
}

/// A scalable font file at a fixed size, shaped with Parley and rasterized with `vello_cpu`.
#[derive(Clone)]
pub struct FontResource {
    font_bytes: Arc<Vec<u8>>,
    blob: parley::fontique::Blob<u8>,
    family: String,
    size_px: f32,
    font_data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontResource")
            .field("font_bytes_len", &self.font_bytes.len())
            .field("family", &self.family)
            .field("size_px", &self.size_px)
            .finish()
    }
}

impl FontResource {
    /// Read and register the font at `path`.
    pub fn load(path: &Path, size_px: f32) -> DiceResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font from '{}'", path.display()))
            .map_err(|e| DiceError::font_unavailable(format!("{e:#}")))?;
        let font = Self::from_bytes(bytes, size_px)?;
        tracing::debug!(path = %path.display(), family = %font.family, size_px, "loaded font");
        Ok(font)
    }

    pub fn from_bytes(bytes: Vec<u8>, size_px: f32) -> DiceResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(DiceError::font_unavailable(
                "font size must be finite and > 0",
            ));
        }
        let font_bytes = Arc::new(bytes);
        let shared: Arc<dyn AsRef<[u8]> + Send + Sync> = font_bytes.clone();
        let blob = parley::fontique::Blob::new(shared.clone());
        let family = TextLayoutEngine::new().register(&blob)?;
        let font_data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::new(shared), 0);
        Ok(Self {
            font_bytes,
            blob,
            family,
            size_px,
            font_data,
        })
    }

    /// Primary family name found in the font data.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Fresh layout contexts per call over the shared font blob and the family found at load.
    fn layout(&self, text: &str, brush: Rgba8) -> DiceResult<parley::Layout<Rgba8>> {
        let mut engine = TextLayoutEngine::new();
        engine.register(&self.blob)?;
        engine.layout_plain(text, &self.family, self.size_px, brush)
    }
}

impl Typeface for FontResource {
    fn measure(&self, text: &str) -> DiceResult<TextMetrics> {
        let layout = self.layout(text, Rgba8::WHITE)?;
        let mut width = 0.0f32;
        let mut height = 0.0f32;
        let mut baseline = None;
        for line in layout.lines() {
            let m = line.metrics();
            width = width.max(m.advance);
            height += m.ascent + m.descent + m.leading;
            baseline.get_or_insert(m.ascent + m.leading * 0.5);
        }
        Ok(TextMetrics {
            width: width.ceil() as u32,
            height: height.ceil() as u32,
            baseline_offset: baseline.unwrap_or(0.0).ceil() as u32,
        })
    }

    fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        origin: PixelPoint,
        color: Rgba8,
    ) -> DiceResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layout = self.layout(text, color)?;
        let (w, h) = canvas.dims_u16()?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(origin.x),
            f64::from(origin.y),
        )));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut layer);
        canvas.over(layer.data_as_u8_slice())
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register a font blob and return its primary family name. The blob's bytes are shared.
    pub fn register(&mut self, font: &parley::fontique::Blob<u8>) -> DiceResult<String> {
        let families = self.font_ctx.collection.register_fonts(font.clone(), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            DiceError::font_unavailable("no font families registered from font bytes")
        })?;

        Ok(self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| DiceError::font_unavailable("registered font family has no name"))?
            .to_string())
    }

    /// Shape and lay out a single unwrapped run of plain text in an already registered
    /// `family`.
    pub fn layout_plain(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        brush: Rgba8,
    ) -> DiceResult<parley::Layout<Rgba8>> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
