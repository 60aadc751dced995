//! Default gesture thresholds, in logical pixels.
//!
//! These only seed [`GestureConfig`](crate::GestureConfig); hosts with a
//! platform view configuration should inject their own values.

/// Movement from the press position before a touch becomes a drag.
///
/// Matches the common platform touch slop (Android uses 8dp).
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum fling velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Release velocities below this (px/sec) do not start a fling.
pub const MIN_FLING_VELOCITY: f32 = 1.0;
