//! Release velocity estimation for drag gestures.
//!
//! Uses the impulse strategy: each segment between consecutive samples adds
//! the kinetic energy needed to change the pointer's speed, and the final
//! energy is converted back to a velocity. This is robust against a single
//! noisy sample right before release.

use smallvec::SmallVec;

/// Ring buffer size for samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window before the newest one contribute.
const HORIZON_MS: i64 = 100;

/// A pause longer than this between samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// One-dimensional velocity tracker over absolute positions.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    /// Slot of the newest sample.
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
            samples: [None; HISTORY_SIZE],
            head: 0,
        }
    }

    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.samples[self.head] = Some(Sample { time_ms, position });
    }

    /// Velocity in units per second; 0.0 with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        // Newest first.
        let mut recent: SmallVec<[Sample; HISTORY_SIZE]> = SmallVec::new();
        let mut slot = self.head;
        while let Some(sample) = self.samples[slot] {
            if let Some(newer) = recent.last() {
                let age = recent[0].time_ms - sample.time_ms;
                let gap = newer.time_ms - sample.time_ms;
                if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                    break;
                }
            }
            recent.push(sample);
            if recent.len() == HISTORY_SIZE {
                break;
            }
            slot = (slot + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if recent.len() < 2 {
            return 0.0;
        }
        impulse_velocity(recent.iter().rev()) * 1000.0
    }

    /// Velocity capped to `±max_velocity`. Non-finite results report 0.0.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if !velocity.is_finite() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.head = 0;
    }
}

/// Velocity per millisecond over samples in chronological order.
fn impulse_velocity<'a>(samples: impl Iterator<Item = &'a Sample>) -> f32 {
    let mut work = 0.0f32;
    let mut previous: Option<&Sample> = None;
    let mut first_segment = true;
    for sample in samples {
        let Some(prev) = previous.replace(sample) else {
            continue;
        };
        let dt = (sample.time_ms - prev.time_ms) as f32;
        if dt == 0.0 {
            continue;
        }
        let v_curr = (sample.position - prev.position) / dt;
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if first_segment {
            work *= 0.5;
            first_segment = false;
        }
    }
    kinetic_energy_to_velocity(work)
}

/// E = ½·v² with unit mass.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
