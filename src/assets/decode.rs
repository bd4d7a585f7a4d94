use std::sync::Arc;

use crate::{
    assets::store::{DieFaceAsset, FaceKey},
    foundation::error::{DiceError, DiceResult},
};

/// Decode encoded die-face bytes and convert them to premultiplied RGBA8.
pub fn decode_face(key: FaceKey, bytes: &[u8]) -> DiceResult<DieFaceAsset> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| DiceError::asset_corrupt(format!("{}: {e}", key.file_name())))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DiceError::asset_corrupt(format!(
            "{}: image has no pixels",
            key.file_name()
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DieFaceAsset {
        key,
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Inverse of [`premultiply_rgba8_in_place`], used before handing pixels to an encoder.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
