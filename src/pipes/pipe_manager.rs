#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from f32 to i32 since field coordinates are small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since the pool size is validated positive
    clippy::cast_sign_loss,
    // Allow precision loss when casting between numeric types since exact precision isn't critical for positions
    clippy::cast_precision_loss
)]

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use bevy_ecs::prelude::*;
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::components::{Rect, Vec2};
use crate::difficulty::{Difficulty, DifficultyProfile, MotionRoll};
use crate::game::{POOL_MARGIN, RECYCLE_POLL_INTERVAL, SPAWN_BAND_ABOVE, SPAWN_BAND_BELOW};
use crate::pipes::PipeGroup;
use crate::random::{RandomSource, weighted_pick};
use crate::scoring::CheckpointSink;

/// Lifecycle of the obstacle pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PoolState {
    /// Units are laid out but not advancing
    #[default]
    Idle,
    Running,
    Paused,
}

/// Everything needed to build an obstacle pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeConfig {
    pub difficulty: Difficulty,
    /// Explicit unit count. When absent it is derived from the field width and final spacing.
    pub pipe_count: Option<usize>,
    pub field_width: f32,
    pub field_height: f32,
    pub starting_spacing: f32,
    pub final_spacing: f32,
    pub decrement_step: f32,
    pub vertical_gap: f32,
    /// Anchor x of the first unit. Defaults to the right edge of the field.
    pub starting_x: Option<f32>,
    /// Horizontal velocity applied while running; negative scrolls left
    pub velocity_x: f32,
}

impl PipeConfig {
    /// Builds a config from the difficulty table for a field of the given size
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty, field_width: f32, field_height: f32) -> Self {
        let profile = difficulty.profile();
        Self {
            difficulty,
            pipe_count: None,
            field_width,
            field_height,
            starting_spacing: profile.starting_spacing,
            final_spacing: profile.final_spacing,
            decrement_step: profile.decrement_step,
            vertical_gap: profile.vertical_gap,
            starting_x: None,
            velocity_x: -profile.scroll_speed,
        }
    }

    /// Smallest count that tiles the field at the tightest spacing, plus the safety margin
    #[must_use]
    pub fn derived_pipe_count(field_width: f32, final_spacing: f32) -> usize {
        (field_width / final_spacing).ceil() as usize + POOL_MARGIN
    }

    #[must_use]
    pub fn resolved_pipe_count(&self) -> usize {
        self.pipe_count
            .unwrap_or_else(|| Self::derived_pipe_count(self.field_width, self.final_spacing))
    }

    /// Rejects configurations that would produce an empty or inconsistent field
    pub fn validate(&self) -> Result<(), PipeConfigError> {
        let values = [
            self.field_width,
            self.field_height,
            self.starting_spacing,
            self.final_spacing,
            self.decrement_step,
            self.vertical_gap,
            self.velocity_x,
            self.starting_x.unwrap_or(0.0),
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(PipeConfigError::NonFinite);
        }
        if self.pipe_count == Some(0) {
            return Err(PipeConfigError::EmptyPool);
        }
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(PipeConfigError::InvalidField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.final_spacing <= 0.0 {
            return Err(PipeConfigError::NonPositiveSpacing(self.final_spacing));
        }
        if self.starting_spacing < self.final_spacing {
            return Err(PipeConfigError::SpacingBelowFloor {
                starting: self.starting_spacing,
                final_spacing: self.final_spacing,
            });
        }
        if self.decrement_step < 0.0 {
            return Err(PipeConfigError::NegativeDecrement(self.decrement_step));
        }
        if self.vertical_gap <= 0.0 {
            return Err(PipeConfigError::NonPositiveGap(self.vertical_gap));
        }
        Ok(())
    }
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self::for_difficulty(
            Difficulty::default(),
            crate::game::FIELD_WIDTH,
            crate::game::FIELD_HEIGHT,
        )
    }
}

// Invalid pool configuration, reported before any unit is built
#[derive(Debug, Clone, PartialEq)]
pub enum PipeConfigError {
    EmptyPool,
    InvalidField { width: f32, height: f32 },
    NonPositiveSpacing(f32),
    SpacingBelowFloor { starting: f32, final_spacing: f32 },
    NegativeDecrement(f32),
    NonPositiveGap(f32),
    NonFinite,
}

impl fmt::Display for PipeConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipeConfigError::EmptyPool => write!(f, "pipe count must be at least 1"),
            PipeConfigError::InvalidField { width, height } => {
                write!(f, "field size {width}x{height} must be positive")
            }
            PipeConfigError::NonPositiveSpacing(spacing) => {
                write!(f, "final spacing {spacing} must be positive")
            }
            PipeConfigError::SpacingBelowFloor {
                starting,
                final_spacing,
            } => write!(
                f,
                "starting spacing {starting} is below the final spacing {final_spacing}"
            ),
            PipeConfigError::NegativeDecrement(step) => {
                write!(f, "spacing decrement {step} must not be negative")
            }
            PipeConfigError::NonPositiveGap(gap) => {
                write!(f, "vertical gap {gap} must be positive")
            }
            PipeConfigError::NonFinite => write!(f, "pipe configuration contains a non-finite value"),
        }
    }
}

impl std::error::Error for PipeConfigError {}

/// Fixed-size recycling queue of obstacle units.
///
/// Units are kept in left-to-right order. When the front unit leaves the
/// field it is moved behind the tail, one spacing step further along, and the
/// spacing tightens toward its floor.
#[derive(Resource)]
pub struct PipeManager {
    pipes: VecDeque<PipeGroup>,
    config: PipeConfig,
    profile: DifficultyProfile,
    pipe_count: usize,
    current_spacing: f32,
    starting_x: f32,
    velocity_x: f32,
    state: PoolState,
    since_last_poll: Duration,
    poll_interval: Duration,
    recycled: u64,
    // Layout untouched since it was last built or reset
    pristine: bool,
    rng: Box<dyn RandomSource>,
}

impl PipeManager {
    pub fn new(config: PipeConfig) -> Result<Self, PipeConfigError> {
        Self::with_rng(config, Box::new(fastrand::Rng::new()))
    }

    pub fn with_rng(config: PipeConfig, rng: Box<dyn RandomSource>) -> Result<Self, PipeConfigError> {
        config.validate()?;

        let mut manager = Self {
            pipes: VecDeque::new(),
            profile: config.difficulty.profile(),
            pipe_count: 0,
            current_spacing: config.starting_spacing,
            starting_x: 0.0,
            velocity_x: config.velocity_x,
            state: PoolState::Idle,
            since_last_poll: Duration::ZERO,
            poll_interval: RECYCLE_POLL_INTERVAL,
            recycled: 0,
            pristine: false,
            rng,
            config,
        };
        manager.rebuild();

        Ok(manager)
    }

    /// Tears every unit down and rebuilds the pool for `config`.
    ///
    /// An invalid config is rejected and the current pool is left as it was.
    pub fn set_config(&mut self, config: PipeConfig) -> Result<(), PipeConfigError> {
        config.validate()?;

        self.profile = config.difficulty.profile();
        self.velocity_x = config.velocity_x;
        self.config = config;
        self.rebuild();

        Ok(())
    }

    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.poll_interval = interval;
    }

    fn rebuild(&mut self) {
        self.pipes.clear();
        self.pipe_count = self.config.resolved_pipe_count();
        self.starting_x = self.config.starting_x.unwrap_or(self.config.field_width);
        self.current_spacing = self.config.starting_spacing;
        self.state = PoolState::Idle;
        self.since_last_poll = Duration::ZERO;
        self.recycled = 0;

        let derived = PipeConfig::derived_pipe_count(self.config.field_width, self.config.final_spacing);
        if self.pipe_count < derived {
            warn!(
                "Pool of {} pipes cannot tile a {} wide field at spacing {} (needs {derived})",
                self.pipe_count, self.config.field_width, self.config.final_spacing
            );
        }

        let anchor = Vec2::new(self.starting_x, self.config.field_height / 2.0);
        for id in 0..self.pipe_count {
            self.pipes.push_back(PipeGroup::new(
                id,
                anchor,
                self.config.vertical_gap,
                self.config.field_height,
                self.config.difficulty,
            ));
        }
        self.layout();
        self.pristine = true;

        info!(
            "Pipe pool built: {} pipes, difficulty {:?}, spacing {} -> {}",
            self.pipe_count,
            self.config.difficulty,
            self.config.starting_spacing,
            self.config.final_spacing
        );
    }

    /// Lays every unit out from the starting x at the current spacing
    fn layout(&mut self) {
        let mut previous_x: Option<f32> = None;
        for index in 0..self.pipes.len() {
            let x = previous_x.map_or(self.starting_x, |prev| prev + self.current_spacing);
            let y = self.random_y();
            self.roll_motion(index);
            self.pipes[index].clear_checkpoint();
            self.pipes[index].set_position(x, y);
            previous_x = Some(x);
        }
    }

    fn random_y(&mut self) -> f32 {
        let mid = self.config.field_height / 2.0;
        let min = (mid - SPAWN_BAND_ABOVE).round() as i32;
        let max = (mid + SPAWN_BAND_BELOW).round() as i32;
        self.rng.integer_in_range(min, max) as f32
    }

    fn roll_motion(&mut self, index: usize) {
        if weighted_pick(self.rng.as_mut(), self.profile.motion_weights) == Some(MotionRoll::Moving) {
            let pipe = &mut self.pipes[index];
            pipe.start_vertical_motion(self.rng.as_mut());
        }
    }

    /// Advances every unit, then runs the throttled recycling pass while running
    pub fn update(&mut self, delta: Duration) {
        for pipe in &mut self.pipes {
            pipe.advance(delta);
        }

        if self.state != PoolState::Running {
            return;
        }

        self.since_last_poll += delta;
        if self.since_last_poll > self.poll_interval {
            self.since_last_poll = Duration::ZERO;
            self.recycle_exited();
        }
    }

    /// Moves every unit that has fully left the field behind the tail.
    ///
    /// Returns the number of units recycled. Each unit is recycled at most
    /// once per pass.
    pub fn recycle_exited(&mut self) -> usize {
        let mut recycled = 0;
        while recycled < self.pipes.len() {
            let exited = self.pipes.front().is_some_and(|pipe| pipe.right_edge() <= 0.0);
            if !exited {
                break;
            }
            self.recycle_front();
            recycled += 1;
        }
        recycled
    }

    fn recycle_front(&mut self) {
        let Some(mut pipe) = self.pipes.pop_front() else {
            return;
        };

        self.current_spacing =
            (self.current_spacing - self.config.decrement_step).max(self.config.final_spacing);

        let tail_x = self
            .pipes
            .back()
            .map_or(self.starting_x - self.current_spacing, |tail| tail.position().x);
        let x = tail_x + self.current_spacing;
        let y = self.random_y();

        pipe.set_position(x, y);
        pipe.clear_checkpoint();
        self.pipes.push_back(pipe);
        self.pristine = false;

        let index = self.pipes.len() - 1;
        self.roll_motion(index);
        self.recycled += 1;

        trace!(
            "Recycled pipe {} to ({x}, {y}), spacing now {}",
            self.pipes[index].id(),
            self.current_spacing
        );
    }

    /// Idle or Paused -> Running. Running is left untouched.
    pub fn start(&mut self) -> PoolState {
        if self.state != PoolState::Running {
            debug!("Pipe pool {:?} -> Running", self.state);
            self.state = PoolState::Running;
            self.pristine = false;
            for pipe in &mut self.pipes {
                pipe.set_velocity_x(self.velocity_x);
            }
        }
        self.state
    }

    /// Running -> Paused, halting every unit before returning. No-op otherwise.
    pub fn stop(&mut self) -> PoolState {
        if self.state == PoolState::Running {
            debug!("Pipe pool Running -> Paused");
            self.state = PoolState::Paused;
            for pipe in &mut self.pipes {
                pipe.set_velocity_x(0.0);
            }
        }
        self.state
    }

    /// Any state -> Idle with the starting layout and spacing restored.
    /// A pool that has not moved since its last layout is left as it is.
    pub fn reset(&mut self) -> PoolState {
        if self.state == PoolState::Idle && self.pristine {
            return self.state;
        }

        debug!("Pipe pool {:?} -> Idle", self.state);
        self.state = PoolState::Idle;
        self.current_spacing = self.config.starting_spacing;
        self.since_last_poll = Duration::ZERO;
        for pipe in &mut self.pipes {
            pipe.reset();
        }
        self.layout();
        self.pristine = true;
        self.state
    }

    /// Sets the scroll velocity; running units pick it up immediately
    pub fn set_velocity_x(&mut self, velocity_x: f32) {
        self.velocity_x = velocity_x;
        if self.state == PoolState::Running {
            for pipe in &mut self.pipes {
                pipe.set_velocity_x(velocity_x);
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> PoolState {
        self.state
    }

    pub fn pipes(&self) -> impl Iterator<Item = &PipeGroup> {
        self.pipes.iter()
    }

    #[cfg(test)]
    pub(crate) fn pipes_mut(&mut self) -> impl Iterator<Item = &mut PipeGroup> {
        self.pristine = false;
        self.pipes.iter_mut()
    }

    /// Marks every unit whose checkpoint zone overlaps `bird`.
    ///
    /// Returns how many units reported a checkpoint to `sink` on this call.
    pub fn mark_checkpoints(&mut self, bird: &Rect, sink: &mut dyn CheckpointSink) -> usize {
        let mut marked = 0;
        for pipe in &mut self.pipes {
            if pipe.checkpoint_zone().intersects(bird) && pipe.mark_checkpoint(sink) {
                marked += 1;
            }
        }
        marked
    }

    /// Unit ids in queue order, front first
    #[must_use]
    pub fn pipe_ids(&self) -> Vec<usize> {
        self.pipes.iter().map(PipeGroup::id).collect()
    }

    #[must_use]
    pub fn pipe_count(&self) -> usize {
        self.pipe_count
    }

    #[must_use]
    pub fn current_spacing(&self) -> f32 {
        self.current_spacing
    }

    #[must_use]
    pub fn starting_spacing(&self) -> f32 {
        self.config.starting_spacing
    }

    #[must_use]
    pub fn final_spacing(&self) -> f32 {
        self.config.final_spacing
    }

    #[must_use]
    pub fn velocity_x(&self) -> f32 {
        self.velocity_x
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    #[must_use]
    pub fn recycled_count(&self) -> u64 {
        self.recycled
    }

    #[must_use]
    pub fn config(&self) -> &PipeConfig {
        &self.config
    }
}
