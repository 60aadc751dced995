//! Momentum scrolling after a drag is released.

use crate::config::FlingConfig;
use crate::motion::{MotionCurve, MotionDriver, MotionEnd};
use std::cell::Cell;
use std::rc::Rc;
use tandem_animation::{DecaySpec, SplineDecay};
use tandem_core::RuntimeHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlingState {
    Stopped,
    Running,
}

struct DecayCurve {
    decay: SplineDecay,
    velocity: f32,
    duration_nanos: i64,
}

impl MotionCurve for DecayCurve {
    fn sample(&self, elapsed_nanos: u64) -> (i32, bool) {
        let elapsed = i64::try_from(elapsed_nanos).unwrap_or(i64::MAX);
        let value = self.decay.value_at_nanos(elapsed, 0.0, self.velocity);
        let finished = elapsed >= self.duration_nanos
            || self.decay.velocity_at_nanos(elapsed, self.velocity).abs()
                < self.decay.abs_velocity_threshold();
        (value.round() as i32, finished)
    }
}

/// Drives a spline decay on a scroll target, one integer delta per frame.
///
/// Starting a fling cancels the previous one; at most one is ever running per
/// instance.
#[derive(Clone)]
pub struct FlingAnimation {
    driver: Rc<MotionDriver>,
    config: Rc<Cell<FlingConfig>>,
}

impl FlingAnimation {
    pub fn new(runtime: RuntimeHandle, config: FlingConfig) -> Self {
        Self {
            driver: Rc::new(MotionDriver::new(runtime)),
            config: Rc::new(Cell::new(config)),
        }
    }

    pub fn set_config(&self, config: FlingConfig) {
        self.config.set(config);
    }

    /// Starts a fling at `velocity` px/sec, positive moving content up.
    ///
    /// `on_step` receives each frame's delta and returns how much of it was
    /// consumed anywhere along the chain; the fling stops once a frame is
    /// refused entirely. `on_end` runs when the fling stops on its own, not
    /// when it is cancelled.
    ///
    /// Returns `false`, without scheduling anything, when the velocity is too
    /// small to move.
    pub fn start(
        &self,
        velocity: f32,
        on_step: impl Fn(i32) -> i32 + 'static,
        on_end: impl FnOnce(MotionEnd) + 'static,
    ) -> bool {
        self.cancel();
        let config = self.config.get();
        if !velocity.is_finite() || velocity.abs() < config.min_velocity.max(f32::MIN_POSITIVE) {
            log::debug!("fling skipped, velocity {} below minimum", velocity);
            return false;
        }
        let decay = SplineDecay::new(config.calculator());
        let duration_nanos = decay.duration_nanos(velocity);
        if duration_nanos <= 0 {
            return false;
        }
        log::debug!(
            "fling start velocity={} duration={}ms target={}",
            velocity,
            duration_nanos / 1_000_000,
            decay.target_value(0.0, velocity)
        );
        self.driver.start(
            DecayCurve {
                decay,
                velocity,
                duration_nanos,
            },
            on_step,
            on_end,
        )
    }

    /// Returns whether a fling was running.
    pub fn cancel(&self) -> bool {
        let cancelled = self.driver.cancel();
        if cancelled {
            log::debug!("fling cancelled");
        }
        cancelled
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn state(&self) -> FlingState {
        if self.is_running() {
            FlingState::Running
        } else {
            FlingState::Stopped
        }
    }
}
