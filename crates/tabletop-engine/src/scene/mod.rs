//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - compose nested object placements with a [`TransformStack`]
//! - record renderer-agnostic mesh draws in traversal order
//!
//! Scene code never touches wgpu; renderers under `render` consume the [`DrawList`].

mod cmd;
mod list;
mod transform_stack;

pub use cmd::{MeshDraw, MeshId, TextureId};
pub use list::DrawList;
pub use transform_stack::{EmptyStackError, TransformStack};
