//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per window (or per render loop)
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - feed `FrameTime::now` into an `AnimationClock` / `FpsCounter`

mod animation_clock;
mod fps;
mod frame_clock;

pub use animation_clock::AnimationClock;
pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
