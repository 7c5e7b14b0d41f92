use glam::Mat4;

use super::{MeshDraw, MeshId, TextureId, TransformStack};

/// Recorded draw stream for a frame.
///
/// Draws are kept in insertion order; the depth buffer resolves visibility, so no
/// sorting is needed.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<MeshDraw>,
    projection: Mat4,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded draws and sets the projection for the next frame.
    /// Keeps allocated capacity for reuse.
    #[inline]
    pub fn begin(&mut self, projection: Mat4) {
        self.items.clear();
        self.projection = projection;
    }

    /// Drops recorded draws, keeping the projection.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn items(&self) -> &[MeshDraw] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records `mesh` with `texture` at the stack's current transform.
    #[inline]
    pub fn push(&mut self, stack: &TransformStack, mesh: MeshId, texture: TextureId) {
        self.items.push(MeshDraw {
            mesh,
            texture,
            model_view: stack.current(),
        });
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn push_captures_current_transform() {
        let mut list = DrawList::new();
        let mut stack = TransformStack::new();

        list.begin(Mat4::IDENTITY);
        list.push(&stack, MeshId(0), TextureId(1));
        stack.translate(Vec3::Y);
        list.push(&stack, MeshId(0), TextureId(2));

        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[0].model_view, Mat4::IDENTITY);
        assert_eq!(list.items()[1].model_view, Mat4::from_translation(Vec3::Y));
        assert_eq!(list.items()[1].texture, TextureId(2));
    }

    #[test]
    fn begin_clears_previous_frame() {
        let mut list = DrawList::new();
        let stack = TransformStack::new();
        list.begin(Mat4::IDENTITY);
        list.push(&stack, MeshId(3), TextureId(0));

        let proj = Mat4::perspective_rh(1.0, 1.5, 1.0, 100.0);
        list.begin(proj);
        assert!(list.is_empty());
        assert_eq!(list.projection(), proj);
    }

    #[test]
    fn clear_keeps_projection() {
        let mut list = DrawList::new();
        let stack = TransformStack::new();
        let proj = Mat4::perspective_rh(1.0, 1.5, 1.0, 100.0);
        list.begin(proj);
        list.push(&stack, MeshId(0), TextureId(0));

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.projection(), proj);
    }
}
