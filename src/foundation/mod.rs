//! Shared foundations: the error taxonomy and pixel geometry used by every stage.

pub mod core;
pub mod error;
