//! Diceroll turns a dice request such as `3D6` into an image of the roll.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: `(die_type, roll_count) -> RollRequest`
//! 2. **Roll**: `RollRequest + RollSource -> Vec<u32>`
//! 3. **Resolve**: open the die-face image for every distinct value (`AssetResolver`)
//! 4. **Layout**: place header, dice row and footer from asset and text metrics
//! 5. **Compose**: paint onto a premultiplied RGBA8 [`Canvas`]
//! 6. **Serialize**: encode the canvas as PNG (or BMP/TIFF)
//!
//! [`DiceRenderer`] runs all six steps per call. Calls share nothing mutable; each one opens
//! its own assets and releases them before returning, on success and on error.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod dice;
mod encode;
mod foundation;
mod layout;
mod pipeline;
mod render;
mod text;

pub use assets::store::{
    ASSET_EXTENSION, AssetAudit, AssetLease, AssetResolver, AssetSource, DieFaceAsset, FaceKey,
    FsAssetSource, ResolvedAssets, audit_asset_root,
};
pub use assets::decode::decode_face;
pub use config::{ENV_ASSET_ROOT, ENV_FONT, ENV_FONT_SIZE, RenderConfig};
pub use dice::request::{
    DieType, MAX_ROLL_COUNT, RollRequest, footer_text, parse_notation, total, validate,
};
pub use dice::roller::{FixedRolls, RngRollSource, RollSource, generate};
pub use encode::serialize::{OutputFormat, serialize};
pub use foundation::core::{PixelPoint, Rgba8};
pub use foundation::error::{DiceError, DiceResult};
pub use layout::solver::{
    DEFAULT_MARGIN_PX, FixedCanvas, Layout, LayoutPolicy, compute_layout,
};
pub use pipeline::{DiceRenderer, RenderedRoll};
pub use render::canvas::Canvas;
pub use render::compose::compose;
pub use render::composite::{PremulRgba8, over, over_in_place, premul_rgba8};
pub use text::block::BlockTypeface;
pub use text::font::{
    DEFAULT_FONT_SIZE_PX, FontResource, TextLayoutEngine, TextMetrics, Typeface,
};
