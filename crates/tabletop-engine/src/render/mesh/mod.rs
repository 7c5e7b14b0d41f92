//! Textured indexed meshes.
//!
//! `MeshData` is CPU-side geometry; `MeshRenderer` owns the GPU copies and draws
//! a `scene::DrawList` against them.

mod geometry;
mod renderer;

pub use renderer::MeshRenderer;

use bytemuck::{Pod, Zeroable};

/// Vertex layout shared by every mesh: position + texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x2  // uv
    ];

    #[inline]
    pub const fn new(pos: [f32; 3], uv: [f32; 2]) -> Self {
        Self { pos, uv }
    }

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// CPU-side indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub label: &'static str,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Axis-aligned cube centred on the origin with edge length 2.
    ///
    /// Each face has its own four vertices so texture coordinates do not bleed
    /// across edges.
    pub fn cube() -> Self {
        geometry::cube()
    }

    /// Square on the XZ plane at y = 0, spanning `[-half_extent, half_extent]`.
    ///
    /// Texture coordinates run from 0 to `uv_repeat`, so the sampler's wrap mode
    /// decides how the image tiles.
    pub fn floor(half_extent: f32, uv_repeat: f32) -> Self {
        geometry::floor(half_extent, uv_repeat)
    }

    /// Returns true if every index refers to an existing vertex and the list is
    /// made of whole triangles.
    pub fn is_well_formed(&self) -> bool {
        self.indices.len() % 3 == 0
            && self
                .indices
                .iter()
                .all(|&i| (i as usize) < self.vertices.len())
    }
}
