#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from f64 to f32 since offsets are small screen distances
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since the cycle index is never negative
    clippy::cast_sign_loss
)]

use std::f32::consts::{PI, TAU};
use std::time::Duration;

use serde::{Deserialize, Serialize};

const ELASTIC_PERIOD: f32 = 0.45;

/// Easing curve applied to each half of an oscillation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    QuadraticInOut,
    ElasticInOut,
    SineInOut,
}

impl Easing {
    /// Maps normalized time `t` in `[0, 1]` to progress. Both ends are fixed points.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::ElasticInOut => {
                if t <= 0.0 || t >= 1.0 {
                    return t;
                }
                let shift = ELASTIC_PERIOD / 4.0;
                let scaled = t * 2.0 - 1.0;
                let wave = ((scaled - shift) * TAU / ELASTIC_PERIOD).sin();
                if scaled < 0.0 {
                    -0.5 * 2f32.powf(10.0 * scaled) * wave
                } else {
                    2f32.powf(-10.0 * scaled) * wave * 0.5 + 1.0
                }
            }
        }
    }
}

/// An endlessly repeating yoyo oscillation around an anchor.
///
/// The offset travels from 0 to `amplitude` during one half period and back
/// to 0 during the next.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalMotion {
    amplitude: f32,
    half_period: Duration,
    easing: Easing,
    elapsed: Duration,
}

impl VerticalMotion {
    #[must_use]
    pub fn new(amplitude: f32, half_period: Duration, easing: Easing) -> Self {
        Self {
            amplitude,
            half_period,
            easing,
            elapsed: Duration::ZERO,
        }
    }

    pub fn tick(&mut self, delta: Duration) {
        self.elapsed += delta;
    }

    #[must_use]
    pub fn offset(&self) -> f32 {
        if self.half_period.is_zero() {
            return 0.0;
        }

        let phase = self.elapsed.as_secs_f64() / self.half_period.as_secs_f64();
        let cycle = phase.floor() as u64;
        let t = (phase - phase.floor()) as f32;
        let progress = self.easing.apply(t);

        if cycle % 2 == 0 {
            progress * self.amplitude
        } else {
            (1.0 - progress) * self.amplitude
        }
    }

    #[must_use]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    #[must_use]
    pub fn half_period(&self) -> Duration {
        self.half_period
    }

    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }
}
