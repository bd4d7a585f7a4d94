use crate::dice::request::DieType;

/// Convenience result type used across the compositor.
pub type DiceResult<T> = Result<T, DiceError>;

/// Error taxonomy shared by every stage of the roll pipeline.
#[derive(thiserror::Error, Debug)]
pub enum DiceError {
    /// Requested die type is not one of 2, 4, 6, 8, 10, 12, 20.
    #[error("invalid die type: D{0} is not one of D2, D4, D6, D8, D10, D12, D20")]
    InvalidDieType(i64),

    /// Requested roll count is outside `1..=4`.
    #[error("invalid roll count: {0} (between 1 and 4 dice may be rolled)")]
    InvalidRollCount(i64),

    /// A roll source produced a value outside `1..=sides`.
    #[error("roll out of range: {value} cannot be rolled on a {die}")]
    RollOutOfRange {
        /// Die the value was drawn for.
        die: DieType,
        /// Offending value.
        value: u32,
    },

    /// A required die-face asset is missing or unreadable.
    #[error("asset not found: {0}")]
    AssetNotFound(String),

    /// A die-face asset exists but could not be decoded.
    #[error("asset corrupt: {0}")]
    AssetCorrupt(String),

    /// The font resource could not be loaded, measured with, or drawn with.
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// The composed canvas could not be encoded.
    #[error("serialization failure: {0}")]
    SerializationFailure(String),

    /// Invalid renderer configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DiceError {
    /// Build a [`DiceError::AssetNotFound`] value.
    pub fn asset_not_found(msg: impl Into<String>) -> Self {
        Self::AssetNotFound(msg.into())
    }

    /// Build a [`DiceError::AssetCorrupt`] value.
    pub fn asset_corrupt(msg: impl Into<String>) -> Self {
        Self::AssetCorrupt(msg.into())
    }

    /// Build a [`DiceError::FontUnavailable`] value.
    pub fn font_unavailable(msg: impl Into<String>) -> Self {
        Self::FontUnavailable(msg.into())
    }

    /// Build a [`DiceError::SerializationFailure`] value.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationFailure(msg.into())
    }

    /// Build a [`DiceError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for the two request-validation kinds, which are caused by caller input rather
    /// than by the environment.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidDieType(_) | Self::InvalidRollCount(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
