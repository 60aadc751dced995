use crate::motion::{MotionCurve, MotionDriver, MotionEnd};
use std::rc::Rc;
use tandem_animation::AnimationSpec;
use tandem_core::RuntimeHandle;

struct TweenCurve {
    spec: AnimationSpec,
    distance: i32,
}

impl MotionCurve for TweenCurve {
    fn sample(&self, elapsed_nanos: u64) -> (i32, bool) {
        let elapsed_millis = elapsed_nanos / 1_000_000;
        if self.spec.is_finished(elapsed_millis) {
            // Land exactly; rounding along the way never leaks into the total.
            return (self.distance, true);
        }
        let fraction = self.spec.fraction_at(elapsed_millis);
        ((self.distance as f32 * fraction).round() as i32, false)
    }
}

/// Eased scroll over a fixed distance and duration.
#[derive(Clone)]
pub struct SmoothScroll {
    driver: Rc<MotionDriver>,
}

impl SmoothScroll {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            driver: Rc::new(MotionDriver::new(runtime)),
        }
    }

    /// Same step/end contract as [`FlingAnimation::start`](crate::FlingAnimation::start).
    /// A zero distance schedules nothing and returns `false`.
    pub fn start(
        &self,
        distance: i32,
        spec: AnimationSpec,
        on_step: impl Fn(i32) -> i32 + 'static,
        on_end: impl FnOnce(MotionEnd) + 'static,
    ) -> bool {
        self.cancel();
        if distance == 0 {
            return false;
        }
        log::debug!(
            "smooth scroll {}px over {}ms",
            distance,
            spec.duration_millis
        );
        self.driver
            .start(TweenCurve { spec, distance }, on_step, on_end)
    }

    pub fn cancel(&self) -> bool {
        self.driver.cancel()
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }
}
