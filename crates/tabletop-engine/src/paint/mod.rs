//! Colour model shared between the scene and renderers.

pub mod color;

pub use color::Color;
