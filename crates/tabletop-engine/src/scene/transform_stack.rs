use glam::{Mat4, Vec3};

/// Returned by [`TransformStack::restore`] when nothing has been saved.
///
/// This is a contract violation (unbalanced save/restore) in the traversal code,
/// not a recoverable runtime state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("transform stack restore() called with no saved transform")]
pub struct EmptyStackError;

/// Current 4x4 transform plus a LIFO of saved copies.
///
/// Used to compose nested placements during depth-first scene traversal:
///
/// ```ignore
/// stack.save();
/// stack.translate(Vec3::new(0.0, 1.0, 0.0));
/// // ... draw children relative to the translated frame ...
/// stack.restore()?;
/// ```
///
/// Elementary operations post-multiply (`current = current * T`), so each one is
/// applied in the local frame established by the previous operations.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl TransformStack {
    #[inline]
    pub fn new() -> Self {
        Self::with_base(Mat4::IDENTITY)
    }

    /// Creates a stack whose current transform is `base` (typically the camera view).
    #[inline]
    pub fn with_base(base: Mat4) -> Self {
        Self {
            current: base,
            saved: Vec::new(),
        }
    }

    /// Starts a new traversal from `base`. Keeps allocated capacity for reuse.
    pub fn reset(&mut self, base: Mat4) {
        if !self.is_balanced() {
            log::warn!("transform stack reset with {} unrestored entries", self.depth());
        }
        self.saved.clear();
        self.current = base;
    }

    /// Pushes a copy of the current transform.
    #[inline]
    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pops the most recently saved transform into `current`.
    pub fn restore(&mut self) -> Result<(), EmptyStackError> {
        self.current = self.saved.pop().ok_or(EmptyStackError)?;
        Ok(())
    }

    /// Runs `f` between a `save()` and its matching `restore()`.
    ///
    /// The restore pops the entry saved here; `f` must leave the stack balanced
    /// itself, which it reports through its own result.
    pub fn scoped<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<EmptyStackError>,
    {
        self.save();
        let out = f(self)?;
        self.restore()?;
        Ok(out)
    }

    #[inline]
    pub fn translate(&mut self, offset: Vec3) {
        self.current *= Mat4::from_translation(offset);
    }

    #[inline]
    pub fn scale(&mut self, factors: Vec3) {
        self.current *= Mat4::from_scale(factors);
    }

    /// Rotates by `angle` radians around `axis`. A zero axis leaves the transform unchanged.
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        let Some(axis) = axis.try_normalize() else { return };
        self.current *= Mat4::from_axis_angle(axis, angle);
    }

    /// Returns a copy of the active transform.
    #[inline]
    pub fn current(&self) -> Mat4 {
        self.current
    }

    /// Number of saved entries.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.saved.is_empty()
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, 1e-6)
    }

    // ── save / restore ────────────────────────────────────────────────────

    #[test]
    fn restore_on_empty_stack_fails() {
        let mut s = TransformStack::new();
        assert_eq!(s.restore(), Err(EmptyStackError));
        assert_eq!(s.current(), Mat4::IDENTITY);
    }

    #[test]
    fn balanced_sequence_round_trips() {
        let mut s = TransformStack::with_base(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        let before = s.current();

        for i in 0..5 {
            s.save();
            s.translate(Vec3::splat(i as f32));
            s.rotate(0.3, Vec3::Y);
        }
        for _ in 0..5 {
            s.restore().unwrap();
        }

        assert_eq!(s.current(), before);
        assert!(s.is_balanced());
    }

    #[test]
    fn translate_is_isolated_by_save_boundary() {
        let mut s = TransformStack::new();
        s.save();
        s.translate(Vec3::new(5.0, 0.0, 0.0));
        assert_ne!(s.current(), Mat4::IDENTITY);
        s.restore().unwrap();
        assert_eq!(s.current(), Mat4::IDENTITY);
    }

    #[test]
    fn table_top_placement_then_restore() {
        let mut s = TransformStack::new();
        s.save();
        s.translate(Vec3::new(0.0, 1.0, 0.0));
        s.scale(Vec3::new(2.0, 0.1, 2.0));
        let t1 = s.current();
        s.restore().unwrap();

        let expected = Mat4::from_translation(Vec3::Y) * Mat4::from_scale(Vec3::new(2.0, 0.1, 2.0));
        assert!(approx(t1, expected));
        assert_eq!(s.current(), Mat4::IDENTITY);
    }

    #[test]
    fn four_legs_leave_parent_unchanged() {
        let parent = Mat4::from_translation(Vec3::new(0.0, 1.1, 0.0));
        let mut s = TransformStack::with_base(parent);

        let mut legs = Vec::new();
        for i in [-1.0f32, 1.0] {
            for j in [-1.0f32, 1.0] {
                s.save();
                s.translate(Vec3::new(i * 1.9, -0.1, j * 1.9));
                s.scale(Vec3::new(0.1, 1.0, 0.1));
                legs.push(s.current());
                s.restore().unwrap();
            }
        }

        assert_eq!(s.current(), parent);
        assert_eq!(s.depth(), 0);
        // Every leg landed somewhere different.
        for a in 0..legs.len() {
            for b in (a + 1)..legs.len() {
                assert_ne!(legs[a], legs[b]);
            }
        }
    }

    #[test]
    fn saved_copy_is_not_aliased() {
        let mut s = TransformStack::new();
        s.save();
        s.scale(Vec3::splat(3.0));
        s.save();
        s.translate(Vec3::X);
        s.restore().unwrap();
        assert!(approx(s.current(), Mat4::from_scale(Vec3::splat(3.0))));
        s.restore().unwrap();
        assert_eq!(s.current(), Mat4::IDENTITY);
    }

    // ── composition order ─────────────────────────────────────────────────

    #[test]
    fn operations_apply_in_local_frame() {
        let mut s = TransformStack::new();
        s.scale(Vec3::splat(2.0));
        s.translate(Vec3::X);
        // Translation is scaled because it happens inside the scaled frame.
        let p = s.current().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn rotate_quarter_turn_about_y() {
        let mut s = TransformStack::new();
        s.rotate(std::f32::consts::FRAC_PI_2, Vec3::Y);
        let p = s.current().transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn rotate_about_zero_axis_is_ignored() {
        let mut s = TransformStack::new();
        s.rotate(1.0, Vec3::ZERO);
        assert_eq!(s.current(), Mat4::IDENTITY);
    }

    // ── helpers ───────────────────────────────────────────────────────────

    #[test]
    fn scoped_restores_after_closure() {
        let mut s = TransformStack::new();
        let inner: Result<Mat4, EmptyStackError> = s.scoped(|s| {
            s.translate(Vec3::Z);
            Ok(s.current())
        });
        assert!(approx(inner.unwrap(), Mat4::from_translation(Vec3::Z)));
        assert_eq!(s.current(), Mat4::IDENTITY);
        assert!(s.is_balanced());
    }

    #[test]
    fn scoped_reports_unbalanced_closure() {
        let mut s = TransformStack::new();
        // The closure pops the scope's own entry, so the scope's restore finds nothing.
        let r: Result<(), EmptyStackError> = s.scoped(|s| s.restore());
        assert_eq!(r, Err(EmptyStackError));
    }

    #[test]
    fn reset_clears_saved_entries() {
        let mut s = TransformStack::new();
        s.save();
        s.save();
        let base = Mat4::from_translation(Vec3::NEG_Z);
        s.reset(base);
        assert_eq!(s.current(), base);
        assert!(s.is_balanced());
    }
}
