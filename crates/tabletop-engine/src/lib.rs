//! Tabletop engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the scene binary:
//! window/event loop, input tracking, frame timing, the transform stack used for
//! hierarchical scene composition, and the textured mesh renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
