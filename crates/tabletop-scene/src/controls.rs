use tabletop_engine::input::{InputState, Key};

/// Keyboard control of the orbit radius.
///
/// Holding `ArrowUp` grows the radius by `step` every frame; holding `ArrowDown`
/// shrinks it, never below zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    radius: f32,
    step: f32,
}

impl OrbitControls {
    pub fn new(radius: f32, step: f32) -> Self {
        Self {
            radius: radius.max(0.0),
            step,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Applies one frame of held-key input and returns the new radius.
    pub fn update(&mut self, input: &InputState) -> f32 {
        if input.key_down(Key::ArrowUp) {
            self.radius += self.step;
        }
        if input.key_down(Key::ArrowDown) {
            self.radius = (self.radius - self.step).max(0.0);
        }
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use tabletop_engine::input::{InputEvent, KeyState, Modifiers};

    use super::*;

    fn key(input: &mut InputState, key: Key, state: KeyState) {
        input.apply_event(&InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        });
    }

    #[test]
    fn idle_keeps_radius() {
        let mut c = OrbitControls::new(4.0, 0.1);
        assert_eq!(c.update(&InputState::default()), 4.0);
    }

    #[test]
    fn held_up_grows_every_frame() {
        let mut input = InputState::default();
        key(&mut input, Key::ArrowUp, KeyState::Pressed);

        let mut c = OrbitControls::new(4.0, 0.1);
        for _ in 0..3 {
            c.update(&input);
        }
        assert!((c.radius() - 4.3).abs() < 1e-5);

        key(&mut input, Key::ArrowUp, KeyState::Released);
        c.update(&input);
        assert!((c.radius() - 4.3).abs() < 1e-5);
    }

    #[test]
    fn held_down_clamps_at_zero() {
        let mut input = InputState::default();
        key(&mut input, Key::ArrowDown, KeyState::Pressed);

        let mut c = OrbitControls::new(0.25, 0.1);
        for _ in 0..10 {
            c.update(&input);
        }
        assert_eq!(c.radius(), 0.0);
    }

    #[test]
    fn focus_loss_stops_growth() {
        let mut input = InputState::default();
        key(&mut input, Key::ArrowUp, KeyState::Pressed);
        input.apply_event(&InputEvent::Focused(false));

        let mut c = OrbitControls::new(1.0, 0.1);
        assert_eq!(c.update(&input), 1.0);
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut input = InputState::default();
        key(&mut input, Key::ArrowLeft, KeyState::Pressed);
        let mut c = OrbitControls::new(2.0, 0.1);
        assert_eq!(c.update(&input), 2.0);
    }
}
