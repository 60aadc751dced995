//! Single-threaded frame runtime shared by the tandem scroll crates.
//!
//! Everything in the scroll stack runs on one logical UI thread. Work that has
//! to happen "on the next frame" (fling steps, smooth scroll steps) is queued
//! as a frame callback, and work that has to happen "after the current layout
//! settles" (layout consistency checks) is posted as a task. Hosts pump both
//! queues from their event loop; tests pump them by hand.

mod frame_clock;
mod geometry;
mod liveness;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use geometry::{Point, Rect};
pub use liveness::LivenessToken;
pub use runtime::{PostedTaskId, Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;

/// Nanoseconds in one 60Hz frame, handy for hosts and tests stepping frames.
pub const FRAME_NANOS_60HZ: u64 = 16_666_667;

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
