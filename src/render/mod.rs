//! CPU raster target and the compositing steps that fill it.

pub mod canvas;
pub mod compose;
pub mod composite;
