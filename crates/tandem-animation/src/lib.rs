//! One-dimensional motion curves for the tandem scroll stack.
//!
//! Two kinds of curve are provided: the Android spline fling decay used for
//! momentum after a drag is released, and time-bounded eased tweens used for
//! programmatic smooth scrolling.

mod decay;
mod easing;

pub use decay::{DecaySpec, FlingCalculator, FlingCurve, SplineDecay, SplineSample};
pub use easing::{AnimationSpec, Easing};

#[cfg(test)]
#[path = "tests/decay_tests.rs"]
mod decay_tests;

#[cfg(test)]
#[path = "tests/easing_tests.rs"]
mod easing_tests;
