//! Spline fling decay.
//!
//! Follows the deceleration model of `android.widget.Scroller`: the distance
//! and duration of a fling are derived from the release velocity, a friction
//! coefficient and the display density, and progress along the fling follows a
//! precomputed tension spline.

use std::sync::LazyLock;

const INFLECTION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLECTION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLECTION);

const SAMPLE_COUNT: usize = 100;

const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
/// `ln(0.78) / ln(0.9)`
const DECELERATION_RATE: f64 = 2.358_201_6;
/// Fraction of gravity the physical coefficient is tuned to.
const PHYSICAL_FRICTION_SCALE: f32 = 0.84;

/// Solves `bezier(t) = alpha` by bisection for the tension curve described by
/// `(a, b)` and returns `(t, 3t(1-t))`.
fn solve_tension(alpha: f32, mut lo: f32, a: f32, b: f32) -> (f32, f32) {
    let mut hi = 1.0f32;
    loop {
        let mid = lo + (hi - lo) / 2.0;
        let coef = 3.0 * mid * (1.0 - mid);
        let value = coef * ((1.0 - mid) * a + mid * b) + mid * mid * mid;
        if (value - alpha).abs() < 1e-5 {
            return (mid, coef);
        }
        if value > alpha {
            hi = mid;
        } else {
            lo = mid;
        }
    }
}

/// Normalised distance travelled at each of the evenly spaced time samples.
static SPLINE_POSITIONS: LazyLock<[f32; SAMPLE_COUNT + 1]> = LazyLock::new(|| {
    let mut positions = [0.0f32; SAMPLE_COUNT + 1];
    let mut x_lo = 0.0f32;
    for (i, slot) in positions.iter_mut().take(SAMPLE_COUNT).enumerate() {
        let alpha = i as f32 / SAMPLE_COUNT as f32;
        let (x, coef) = solve_tension(alpha, x_lo, P1, P2);
        x_lo = x;
        *slot = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
    }
    positions[SAMPLE_COUNT] = 1.0;
    positions
});

/// Distance and velocity coefficients of the spline at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSample {
    /// Fraction of the total fling distance covered, `0.0..=1.0`.
    pub distance: f32,
    /// Slope of the distance curve at this point.
    pub velocity: f32,
}

impl SplineSample {
    /// Samples the spline at normalised time `t` (clamped to `0.0..=1.0`).
    pub fn at(t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let index = (SAMPLE_COUNT as f32 * t) as usize;
        if index >= SAMPLE_COUNT {
            return Self {
                distance: 1.0,
                velocity: 0.0,
            };
        }
        let positions = &*SPLINE_POSITIONS;
        let t_lo = index as f32 / SAMPLE_COUNT as f32;
        let t_hi = (index + 1) as f32 / SAMPLE_COUNT as f32;
        let slope = (positions[index + 1] - positions[index]) / (t_hi - t_lo);
        Self {
            distance: positions[index] + (t - t_lo) * slope,
            velocity: slope,
        }
    }
}

/// A fully resolved fling: how far and for how long a given release velocity
/// carries the content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCurve {
    pub initial_velocity: f32,
    /// Unsigned total travel in pixels.
    pub distance: f32,
    pub duration_ms: i64,
}

impl FlingCurve {
    fn progress(&self, elapsed_ms: i64) -> f32 {
        if self.duration_ms > 0 {
            elapsed_ms as f32 / self.duration_ms as f32
        } else {
            1.0
        }
    }

    /// Signed offset from the fling origin after `elapsed_ms`.
    pub fn offset_at(&self, elapsed_ms: i64) -> f32 {
        self.distance
            * self.initial_velocity.signum()
            * SplineSample::at(self.progress(elapsed_ms)).distance
    }

    /// Signed velocity in px/sec after `elapsed_ms`.
    pub fn velocity_at(&self, elapsed_ms: i64) -> f32 {
        if self.duration_ms <= 0 {
            return 0.0;
        }
        SplineSample::at(self.progress(elapsed_ms)).velocity
            * self.initial_velocity.signum()
            * self.distance
            / self.duration_ms as f32
            * 1000.0
    }

    pub fn is_finished(&self, elapsed_ms: i64) -> bool {
        elapsed_ms >= self.duration_ms
    }

    /// Signed offset at which the fling comes to rest.
    pub fn final_offset(&self) -> f32 {
        self.distance * self.initial_velocity.signum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    physical_coefficient: f32,
}

impl FlingCalculator {
    pub const DEFAULT_FRICTION: f32 = 0.015;

    /// `density` is the display density relative to a 160dpi baseline.
    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: GRAVITY_EARTH
                * INCHES_PER_METER
                * density
                * 160.0
                * PHYSICAL_FRICTION_SCALE,
        }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    fn spline_deceleration(&self, velocity: f32) -> f64 {
        (INFLECTION as f64 * velocity.abs() as f64
            / (self.friction * self.physical_coefficient) as f64)
            .ln()
    }

    pub fn duration_ms(&self, velocity: f32) -> i64 {
        if velocity == 0.0 {
            return 0;
        }
        let decel = self.spline_deceleration(velocity);
        (1000.0 * (decel / (DECELERATION_RATE - 1.0)).exp()) as i64
    }

    pub fn distance(&self, velocity: f32) -> f32 {
        if velocity == 0.0 {
            return 0.0;
        }
        let decel = self.spline_deceleration(velocity);
        let scale = (DECELERATION_RATE / (DECELERATION_RATE - 1.0) * decel).exp();
        self.friction * self.physical_coefficient * scale as f32
    }

    pub fn curve(&self, velocity: f32) -> FlingCurve {
        FlingCurve {
            initial_velocity: velocity,
            distance: self.distance(velocity),
            duration_ms: self.duration_ms(velocity),
        }
    }
}

/// A decay animation: it has no fixed target, only an initial velocity that
/// bleeds off over time.
pub trait DecaySpec {
    /// Velocity below which the animation counts as finished.
    fn abs_velocity_threshold(&self) -> f32;

    fn value_at_nanos(&self, play_time_nanos: i64, initial_value: f32, initial_velocity: f32)
        -> f32;

    fn velocity_at_nanos(&self, play_time_nanos: i64, initial_velocity: f32) -> f32;

    fn duration_nanos(&self, initial_velocity: f32) -> i64;

    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineDecay {
    calculator: FlingCalculator,
}

impl SplineDecay {
    pub fn new(calculator: FlingCalculator) -> Self {
        Self { calculator }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(FlingCalculator::with_density(density))
    }

    pub fn calculator(&self) -> FlingCalculator {
        self.calculator
    }
}

impl DecaySpec for SplineDecay {
    fn abs_velocity_threshold(&self) -> f32 {
        0.0
    }

    fn value_at_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let curve = self.calculator.curve(initial_velocity);
        initial_value + curve.offset_at(play_time_nanos / 1_000_000)
    }

    fn velocity_at_nanos(&self, play_time_nanos: i64, initial_velocity: f32) -> f32 {
        self.calculator
            .curve(initial_velocity)
            .velocity_at(play_time_nanos / 1_000_000)
    }

    fn duration_nanos(&self, initial_velocity: f32) -> i64 {
        self.calculator.duration_ms(initial_velocity) * 1_000_000
    }

    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        initial_value + self.calculator.curve(initial_velocity).final_offset()
    }
}
