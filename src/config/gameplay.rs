use serde::{Deserialize, Serialize};

use crate::game::{FIELD_HEIGHT, FIELD_WIDTH, FLOOR_HEIGHT, RECYCLE_POLL_INTERVAL};

// Size of the play field in world units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    pub floor_height: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            floor_height: FLOOR_HEIGHT,
        }
    }
}

// Optional overrides on top of the difficulty table. Absent values keep the table's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeOverrides {
    pub pipe_count: Option<usize>,
    pub starting_spacing: Option<f32>,
    pub final_spacing: Option<f32>,
    pub decrement_step: Option<f32>,
    pub vertical_gap: Option<f32>,
    pub scroll_speed: Option<f32>,
    pub seed: Option<u64>,
}

// Loop timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub render_tick_ms: u64,
    pub game_tick_ms: u64,
    pub recycle_poll_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            render_tick_ms: 33, // ~30 FPS
            game_tick_ms: 16,
            recycle_poll_ms: u64::try_from(RECYCLE_POLL_INTERVAL.as_millis()).unwrap_or(100),
        }
    }
}
