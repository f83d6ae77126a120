#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow sign loss when going from signed to unsigned types since bounds are validated before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as weights are small
    clippy::cast_possible_wrap
)]

/// Source of randomness for the obstacle pool.
///
/// The pool only needs uniform ranges and a bounded integer draw; weighted
/// selection is built on top of [`RandomSource::below`] by [`weighted_pick`].
pub trait RandomSource: Send + Sync {
    /// Uniform integer in the closed range `[min, max]`. Returns `min` when `max < min`.
    fn integer_in_range(&mut self, min: i32, max: i32) -> i32;

    /// Uniform real in `[min, max)`. Returns `min` when `max <= min`.
    fn real_in_range(&mut self, min: f32, max: f32) -> f32;

    /// Uniform integer in `[0, bound)`. Returns 0 when `bound` is 0.
    fn below(&mut self, bound: u32) -> u32;
}

impl RandomSource for fastrand::Rng {
    fn integer_in_range(&mut self, min: i32, max: i32) -> i32 {
        if max < min {
            return min;
        }
        self.i32(min..=max)
    }

    fn real_in_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.f32() * (max - min)
    }

    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.u32(0..bound)
    }
}

/// Picks an entry with probability `weight / total_weight`.
///
/// Tables are written most-likely first. Returns `None` for an empty table or
/// one whose weights sum to zero.
pub fn weighted_pick<T: Copy>(rng: &mut dyn RandomSource, entries: &[(T, u32)]) -> Option<T> {
    let total: u32 = entries.iter().map(|(_, weight)| *weight).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.below(total);
    for (value, weight) in entries {
        if roll < *weight {
            return Some(*value);
        }
        roll -= weight;
    }

    None
}

/// Returns `-1.0` or `1.0` with equal probability.
pub fn pick_sign(rng: &mut dyn RandomSource) -> f32 {
    if rng.below(2) == 0 { -1.0 } else { 1.0 }
}
