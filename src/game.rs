#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

// Play field dimensions (world units, the renderer scales these to the terminal)
pub const FIELD_WIDTH: f32 = 1600.0;
pub const FIELD_HEIGHT: f32 = 900.0;
pub const FLOOR_HEIGHT: f32 = 100.0;

// Obstacle unit geometry
pub const PIPE_WIDTH: f32 = 80.0;
pub const CHECKPOINT_WIDTH: f32 = 10.0;

// Obstacle pool
pub const POOL_MARGIN: usize = 2; // Extra units so the field stays tiled if a recycle lags a poll
pub const RECYCLE_POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const SPAWN_BAND_ABOVE: f32 = 200.0; // Recycled units land in [mid - 200, mid + 150]
pub const SPAWN_BAND_BELOW: f32 = 150.0;

// Vertical oscillation
pub const MOTION_AMPLITUDE_MIN: f32 = 100.0;
pub const MOTION_AMPLITUDE_MAX: f32 = 150.0;

// Escalation weights for re-rolled color tiers
pub const ESCALATION_NEXT_TIER_WEIGHT: u32 = 3;
pub const ESCALATION_OTHER_TIER_WEIGHT: u32 = 1;

// Bird
pub const BIRD_START_X: f32 = 416.0;
pub const BIRD_START_Y: f32 = 400.0;
pub const BIRD_SIZE: f32 = 64.0;
pub const BIRD_FLAP_VELOCITY: f32 = -800.0;
pub const BIRD_GRAVITY: f32 = 2800.0;
pub const BIRD_MAX_FALL_SPEED: f32 = 700.0;

// Session flow
pub const DEATH_RESTART_DELAY: f32 = 1.0; // Seconds spent dead before the field resets
