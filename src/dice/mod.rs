//! Roll requests: validation of the raw die type and count, and drawing the roll values.

/// Die types, validated requests, and the header/footer strings derived from them.
pub mod request;
/// Injectable randomness and the roll generator.
pub mod roller;
