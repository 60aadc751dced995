/// Easing curves for time-bounded offset transitions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    /// Material standard curve, `cubic-bezier(0.4, 0.0, 0.2, 1.0)`.
    #[default]
    FastOutSlowIn,
    LinearOutSlowIn,
    FastOutLinearIn,
    /// `(t - 1)^5 + 1`, the curve list views use for programmatic smooth
    /// scrolling.
    Quintic,
}

impl Easing {
    /// Maps a linear fraction in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => fraction,
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearIn => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
            Easing::Quintic => {
                let t = fraction - 1.0;
                t * t * t * t * t + 1.0
            }
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let curve = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |t: f32| (3.0 * ax * t + 2.0 * bx) * t + cx;

    // Newton-Raphson on x(t) = fraction, bisection if it stalls.
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let error = curve(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = slope(t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - error / dx).clamp(0.0, 1.0);
    }

    if !converged {
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = fraction;
        for _ in 0..16 {
            let error = curve(ax, bx, cx, t) - fraction;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    curve(ay, by, cy, t)
}

/// A tween: fixed duration, eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
}

impl AnimationSpec {
    pub const DEFAULT_DURATION_MILLIS: u64 = 250;

    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    /// Eased progress after `elapsed_millis`; a zero duration completes
    /// immediately.
    pub fn fraction_at(&self, elapsed_millis: u64) -> f32 {
        if self.duration_millis == 0 {
            return 1.0;
        }
        let linear = elapsed_millis as f32 / self.duration_millis as f32;
        self.easing.transform(linear)
    }

    pub fn is_finished(&self, elapsed_millis: u64) -> bool {
        elapsed_millis >= self.duration_millis
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(Self::DEFAULT_DURATION_MILLIS, Easing::FastOutSlowIn)
    }
}
