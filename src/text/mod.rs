//! Text measurement and drawing for the header and footer lines.

/// Fixed-metric box typeface.
pub mod block;
/// Font-file typeface and the Parley layout helper.
pub mod font;
