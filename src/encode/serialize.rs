use std::{fmt, io::Cursor};

use crate::{
    assets::decode::unpremultiply_rgba8_in_place,
    foundation::error::{DiceError, DiceResult},
    render::canvas::Canvas,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Lossless container the finished canvas is written as.
pub enum OutputFormat {
    #[default]
    Png,
    Bmp,
    Tiff,
}

impl OutputFormat {
    /// Case-insensitive lookup by name or extension (`png`, `BMP`, `tif`).
    pub fn parse(name: &str) -> DiceResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            "tif" | "tiff" => Ok(Self::Tiff),
            "jpg" | "jpeg" | "webp" | "gif" => Err(DiceError::serialization(format!(
                "{name} is lossy or palette-based; use png, bmp or tiff"
            ))),
            _ => Err(DiceError::serialization(format!(
                "unknown output format '{name}'"
            ))),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Bmp => image::ImageFormat::Bmp,
            Self::Tiff => image::ImageFormat::Tiff,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encode `canvas` as a complete file in `format`. The canvas is consumed.
pub fn serialize(canvas: Canvas, format: OutputFormat) -> DiceResult<Vec<u8>> {
    let (width, height) = (canvas.width(), canvas.height());
    let mut rgba = canvas.into_raw();
    unpremultiply_rgba8_in_place(&mut rgba);

    let img = image::RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
        DiceError::serialization(format!("pixel buffer does not match {width}x{height}"))
    })?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format.image_format())
        .map_err(|e| DiceError::serialization(format!("encode {format}: {e}")))?;
    tracing::debug!(%format, width, height, bytes = bytes.len(), "encoded canvas");
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/serialize.rs"]
mod tests;
