use crate::{
    assets::store::DieFaceAsset,
    foundation::core::{PixelPoint, Rgba8, to_u16_dim},
    foundation::error::{DiceError, DiceResult},
    render::composite::{over, over_in_place, premul_rgba8},
};

/// Premultiplied RGBA8 raster the compositor draws into.
///
/// Dimensions are bounded by `u16::MAX` per side, the limit of the CPU rasterizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn new(width: u32, height: u32) -> DiceResult<Self> {
        if width == 0 || height == 0 {
            return Err(DiceError::Other(anyhow::anyhow!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        to_u16_dim(width, "canvas width").map_err(|e| DiceError::Other(anyhow::anyhow!(e)))?;
        to_u16_dim(height, "canvas height").map_err(|e| DiceError::Other(anyhow::anyhow!(e)))?;
        Ok(Self {
            width,
            height,
            rgba8_premul: vec![0; width as usize * height as usize * 4],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn dims_u16(&self) -> DiceResult<(u16, u16)> {
        let w = to_u16_dim(self.width, "canvas width")
            .map_err(|e| DiceError::Other(anyhow::anyhow!(e)))?;
        let h = to_u16_dim(self.height, "canvas height")
            .map_err(|e| DiceError::Other(anyhow::anyhow!(e)))?;
        Ok((w, h))
    }

    /// Row-major premultiplied pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`; transparent outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        [px[0], px[1], px[2], px[3]]
    }

    /// Copy `asset` with its top-left at `at`, replacing every covered pixel. Parts that fall
    /// outside the canvas are dropped.
    pub fn paste(&mut self, asset: &DieFaceAsset, at: PixelPoint) {
        let Some(span) = self.clip(at, asset.width, asset.height) else {
            return;
        };
        let src_stride = asset.width as usize * 4;
        let dst_stride = self.width as usize * 4;
        let run = span.w * 4;
        for row in 0..span.h {
            let src = (span.src_y + row) * src_stride + span.src_x * 4;
            let dst = (span.dst_y + row) * dst_stride + span.dst_x * 4;
            self.rgba8_premul[dst..dst + run].copy_from_slice(&asset.rgba8_premul[src..src + run]);
        }
    }

    /// Source-over fill of a `width x height` rectangle with a straight color.
    pub fn fill_rect(&mut self, at: PixelPoint, width: u32, height: u32, color: Rgba8) {
        let Some(span) = self.clip(at, width, height) else {
            return;
        };
        let src = premul_rgba8(color.r, color.g, color.b, color.a);
        let stride = self.width as usize * 4;
        for row in 0..span.h {
            let start = (span.dst_y + row) * stride + span.dst_x * 4;
            for px in self.rgba8_premul[start..start + span.w * 4].chunks_exact_mut(4) {
                let out = over([px[0], px[1], px[2], px[3]], src);
                px.copy_from_slice(&out);
            }
        }
    }

    /// Composite an equal-sized premultiplied layer over the canvas.
    pub fn over(&mut self, layer: &[u8]) -> DiceResult<()> {
        over_in_place(&mut self.rgba8_premul, layer)
    }

    fn clip(&self, at: PixelPoint, width: u32, height: u32) -> Option<Span> {
        let x0 = i64::from(at.x).max(0);
        let y0 = i64::from(at.y).max(0);
        let x1 = (i64::from(at.x) + i64::from(width)).min(i64::from(self.width));
        let y1 = (i64::from(at.y) + i64::from(height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Span {
            src_x: (x0 - i64::from(at.x)) as usize,
            src_y: (y0 - i64::from(at.y)) as usize,
            dst_x: x0 as usize,
            dst_y: y0 as usize,
            w: (x1 - x0) as usize,
            h: (y1 - y0) as usize,
        })
    }
}

/// Visible part of a rectangle: where it starts in the source and on the canvas.
struct Span {
    src_x: usize,
    src_y: usize,
    dst_x: usize,
    dst_y: usize,
    w: usize,
    h: usize,
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
