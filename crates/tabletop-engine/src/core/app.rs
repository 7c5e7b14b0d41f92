use crate::input::InputEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
///
/// `Exit` is the only way an app ends the event loop; closing the window is
/// handled by the runtime.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the scene layer.
///
/// The runtime owns the app and calls it from the event loop thread only.
pub trait App {
    /// Called for every translated input event, before it is folded into `InputState`.
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per presented frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
