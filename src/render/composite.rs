//! Premultiplied RGBA8 pixel operations.

use crate::foundation::error::{DiceError, DiceResult};

pub type PremulRgba8 = [u8; 4];

/// Source-over: `src` drawn on top of `dst`, both premultiplied.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite an equal-sized premultiplied layer onto `dst` with source-over.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> DiceResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(DiceError::Other(anyhow::anyhow!(
            "over_in_place expects equal-length rgba8 buffers ({} vs {})",
            dst.len(),
            src.len()
        )));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Premultiply a straight color.
pub fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> PremulRgba8 {
    let a16 = u16::from(a);
    [
        mul_div255(u16::from(r), a16),
        mul_div255(u16::from(g), a16),
        mul_div255(u16::from(b), a16),
        a,
    ]
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
