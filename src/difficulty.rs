#![warn(clippy::all, clippy::pedantic)]

use serde::{Deserialize, Serialize};

use crate::motion::Easing;
use crate::pipes::ColorTier;

/// Outcome of the per-recycle "does this unit move" roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionRoll {
    Static,
    Moving,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Insane,
}

/// Fixed tuning table for one difficulty.
///
/// Weighted tables are ordered most-likely first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub decrement_step: f32,
    pub motion_weights: &'static [(MotionRoll, u32)],
    pub color_pool: &'static [(ColorTier, u32)],
    pub easing: Easing,
    pub scroll_speed: f32,
    pub final_spacing: f32,
    pub starting_spacing: f32,
    pub vertical_gap: f32,
}

const EASY: DifficultyProfile = DifficultyProfile {
    decrement_step: 5.0,
    motion_weights: &[(MotionRoll::Static, 2), (MotionRoll::Moving, 1)],
    color_pool: &[(ColorTier::LightGreen, 5), (ColorTier::Orange, 2)],
    easing: Easing::QuadraticInOut,
    scroll_speed: 170.0,
    final_spacing: 200.0,
    starting_spacing: 400.0,
    vertical_gap: 220.0,
};

const MEDIUM: DifficultyProfile = DifficultyProfile {
    decrement_step: 10.0,
    motion_weights: &[(MotionRoll::Static, 1), (MotionRoll::Moving, 1)],
    color_pool: &[
        (ColorTier::LightGreen, 3),
        (ColorTier::Orange, 2),
        (ColorTier::Red, 1),
    ],
    easing: Easing::QuadraticInOut,
    scroll_speed: 200.0,
    final_spacing: 250.0,
    starting_spacing: 450.0,
    vertical_gap: 190.0,
};

const HARD: DifficultyProfile = DifficultyProfile {
    decrement_step: 15.0,
    motion_weights: &[(MotionRoll::Moving, 2), (MotionRoll::Static, 1)],
    color_pool: &[(ColorTier::Orange, 2), (ColorTier::Red, 1)],
    easing: Easing::ElasticInOut,
    scroll_speed: 200.0,
    final_spacing: 300.0,
    starting_spacing: 350.0,
    vertical_gap: 180.0,
};

const INSANE: DifficultyProfile = DifficultyProfile {
    decrement_step: 20.0,
    motion_weights: &[(MotionRoll::Moving, 1)],
    color_pool: &[(ColorTier::Purple, 1)],
    easing: Easing::SineInOut,
    scroll_speed: 300.0,
    final_spacing: 270.0,
    starting_spacing: 300.0,
    vertical_gap: 200.0,
};

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Insane,
    ];

    #[must_use]
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => EASY,
            Difficulty::Medium => MEDIUM,
            Difficulty::Hard => HARD,
            Difficulty::Insane => INSANE,
        }
    }

    /// Cycles easy -> medium -> hard -> insane -> easy
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Insane,
            Difficulty::Insane => Difficulty::Easy,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Insane => "Insane",
        }
    }
}
