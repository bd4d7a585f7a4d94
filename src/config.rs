use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    encode::serialize::OutputFormat,
    foundation::core::Rgba8,
    foundation::error::{DiceError, DiceResult},
    layout::solver::LayoutPolicy,
    text::font::DEFAULT_FONT_SIZE_PX,
};

/// Overrides [`RenderConfig::asset_root`].
pub const ENV_ASSET_ROOT: &str = "DICEROLL_ASSET_ROOT";
/// Overrides [`RenderConfig::font_path`].
pub const ENV_FONT: &str = "DICEROLL_FONT";
/// Overrides [`RenderConfig::font_size_px`].
pub const ENV_FONT_SIZE: &str = "DICEROLL_FONT_SIZE";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Everything a [`crate::DiceRenderer`] needs to know about its environment.
pub struct RenderConfig {
    /// Directory holding the `D{sides}_{face}.png` files.
    pub asset_root: PathBuf,
    /// Scalable font used for the header and footer.
    pub font_path: PathBuf,
    pub font_size_px: f32,
    /// Straight RGBA color of the header and footer.
    pub text_rgba: Rgba8,
    pub layout: LayoutPolicy,
    pub format: OutputFormat,
    /// Worker count for batch renders; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("./Assets"),
            font_path: PathBuf::from("./Fonts/Mitr/Mitr-Regular.ttf"),
            font_size_px: DEFAULT_FONT_SIZE_PX,
            text_rgba: Rgba8::WHITE,
            layout: LayoutPolicy::default(),
            format: OutputFormat::Png,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> DiceResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))
            .map_err(|e| DiceError::config(format!("{e:#}")))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| DiceError::config(format!("parse '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `DICEROLL_*` environment variables on top of the current values.
    pub fn apply_env_overrides(&mut self) -> DiceResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Same as [`RenderConfig::apply_env_overrides`] with an explicit variable lookup.
    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> DiceResult<()> {
        if let Some(root) = lookup(ENV_ASSET_ROOT) {
            self.asset_root = PathBuf::from(root);
        }
        if let Some(font) = lookup(ENV_FONT) {
            self.font_path = PathBuf::from(font);
        }
        if let Some(size) = lookup(ENV_FONT_SIZE) {
            self.font_size_px = size
                .trim()
                .parse()
                .map_err(|e| DiceError::config(format!("{ENV_FONT_SIZE}='{size}': {e}")))?;
        }
        self.validate()
    }

    pub fn validate(&self) -> DiceResult<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(DiceError::config(format!(
                "font_size_px must be finite and > 0, got {}",
                self.font_size_px
            )));
        }
        if self.threads == Some(0) {
            return Err(DiceError::config("threads must be > 0 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
