use crate::gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};

/// Thresholds used by [`GestureTracker`](crate::GestureTracker).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Pixels a pointer must travel before a press turns into a drag.
    pub touch_slop: i32,
    /// Release velocities are clamped to `±max_fling_velocity` px/sec.
    pub max_fling_velocity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: DRAG_THRESHOLD as i32,
            max_fling_velocity: MAX_FLING_VELOCITY,
        }
    }
}

impl GestureConfig {
    pub fn with_touch_slop(mut self, touch_slop: i32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_max_fling_velocity(mut self, max_fling_velocity: f32) -> Self {
        self.max_fling_velocity = max_fling_velocity;
        self
    }
}
