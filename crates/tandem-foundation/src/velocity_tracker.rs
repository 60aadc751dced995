//! Release velocity estimation.
//!
//! Implements the impulse strategy: each pair of consecutive samples imparts
//! kinetic energy to a unit mass, and the velocity is the one that mass ends up
//! with. It is far less sensitive to a single noisy sample than a least squares
//! fit.

const HISTORY_SIZE: usize = 20;

/// Samples older than this, relative to the newest one, are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Tracks a single axis of absolute pointer positions.
#[derive(Clone)]
pub struct VelocityTracker1D {
    ring: [Option<Sample>; HISTORY_SIZE],
    head: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            ring: [None; HISTORY_SIZE],
            head: 0,
        }
    }

    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.ring[self.head] = Some(Sample { time_ms, position });
    }

    /// Velocity in units per second, `0.0` with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.ring[self.head] else {
            return 0.0;
        };

        // Newest first: positions and their (non-positive) age.
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut cursor = self.head;

        while let Some(sample) = self.ring[cursor] {
            // Absolute samples are measured against the newest one, so the
            // gap to it doubles as the stop detector.
            let age = newest.time_ms - sample.time_ms;
            if age > HORIZON_MS || age > ASSUME_STOPPED_MS {
                break;
            }
            positions[count] = sample.position;
            times[count] = -(age as f32);
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            cursor = (cursor + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// [`calculate_velocity`](Self::calculate_velocity) clamped to
    /// `±max_velocity`; a non-positive or non-finite cap yields `0.0`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.ring = [None; HISTORY_SIZE];
        self.head = 0;
    }
}

/// `positions`/`times` are newest first; returns units per millisecond.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;
    for i in (1..=oldest).rev() {
        let (t_curr, t_next) = (times[i], times[i - 1]);
        if t_curr == t_next {
            continue;
        }
        let v_curr = (positions[i] - positions[i - 1]) / (t_curr - t_next);
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

/// `E = v^2 / 2` for a unit mass, sign preserved.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
