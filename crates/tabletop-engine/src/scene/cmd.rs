use glam::Mat4;

/// Handle to a mesh uploaded to a renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MeshId(pub u32);

/// Handle to a texture uploaded to a renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

/// One indexed mesh draw with its bound texture and model-view transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshDraw {
    pub mesh: MeshId,
    pub texture: TextureId,
    /// Object-to-view transform, captured from the transform stack at record time.
    pub model_view: Mat4,
}
