//! Turning a finished canvas into file bytes.

pub mod serialize;
