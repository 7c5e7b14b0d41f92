//! GPU rendering subsystem.
//!
//! Renderers consume the `scene` draw stream and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers, textures).
//!
//! Convention:
//! - right-handed world space, +Y up, camera looking down -Z in view space
//! - projection maps depth to wgpu's `[0, 1]` range
//! - texture coordinates follow the GL convention (v = 0 at the bottom of the
//!   image); images are flipped on upload to match

mod ctx;
pub mod mesh;
pub mod texture;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{MeshData, MeshRenderer, Vertex};
pub use texture::{TextureData, TextureError};
