use crate::error::{CoordinatorError, Result};
use tandem_animation::{AnimationSpec, Easing, FlingCalculator};
use tandem_foundation::gesture_constants::MIN_FLING_VELOCITY;
use tandem_foundation::GestureConfig;

/// Physics of momentum scrolling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlingConfig {
    /// Display density relative to 160dpi.
    pub density: f32,
    pub friction: f32,
    /// Release velocities (px/sec) below this do not fling.
    pub min_velocity: f32,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: FlingCalculator::DEFAULT_FRICTION,
            min_velocity: MIN_FLING_VELOCITY,
        }
    }
}

impl FlingConfig {
    pub fn calculator(&self) -> FlingCalculator {
        FlingCalculator::new(self.friction, self.density)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollConfig {
    pub gesture: GestureConfig,
    pub fling: FlingConfig,
    /// Used by `smooth_scroll_by` when called with a zero duration.
    pub smooth_scroll_duration_ms: u64,
    pub smooth_scroll_easing: Easing,
    /// When the seam is partially collapsed at layout check time, keep the
    /// bottom region where it is instead of handing the collapse back to the
    /// top region.
    pub keep_bottom_stable_on_check_layout: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            fling: FlingConfig::default(),
            smooth_scroll_duration_ms: AnimationSpec::DEFAULT_DURATION_MILLIS,
            smooth_scroll_easing: Easing::FastOutSlowIn,
            keep_bottom_stable_on_check_layout: false,
        }
    }
}

impl ScrollConfig {
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| {
            Err(CoordinatorError::InvalidConfig {
                reason: reason.to_string(),
            })
        };
        if self.gesture.touch_slop < 0 {
            return invalid("touch slop must not be negative");
        }
        if !self.gesture.max_fling_velocity.is_finite() || self.gesture.max_fling_velocity <= 0.0 {
            return invalid("max fling velocity must be finite and positive");
        }
        if !self.fling.density.is_finite() || self.fling.density <= 0.0 {
            return invalid("density must be finite and positive");
        }
        if !self.fling.friction.is_finite() || self.fling.friction <= 0.0 {
            return invalid("friction must be finite and positive");
        }
        if !self.fling.min_velocity.is_finite() || self.fling.min_velocity < 0.0 {
            return invalid("min fling velocity must be finite and not negative");
        }
        Ok(())
    }

    /// Tween used for a smooth scroll of `duration_ms` (zero picks the default).
    pub fn smooth_scroll_spec(&self, duration_ms: u64) -> AnimationSpec {
        let duration = if duration_ms == 0 {
            self.smooth_scroll_duration_ms
        } else {
            duration_ms
        };
        AnimationSpec::tween(duration, self.smooth_scroll_easing)
    }
}
