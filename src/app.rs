use std::time::Duration;

use anyhow::{Context, Result};
use bevy_ecs::prelude::*;
use log::info;

use crate::Time;
use crate::components::{Bird, GameState, Input};
use crate::config::Config;
use crate::difficulty::Difficulty;
use crate::pipes::PipeManager;
use crate::scoring::ScoreEvents;
use crate::systems::{self, FloorLine};

// Longest step a single tick may simulate, so a stalled terminal doesn't teleport the pipes
const MAX_TICK_SECONDS: f32 = 0.1;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub difficulty: Difficulty,
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        config.validate().context("invalid configuration")?;
        let difficulty = config.difficulty;
        let pipes = build_pipe_manager(&config, difficulty)?;

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Input::default());
        world.insert_resource(GameState::default());
        world.insert_resource(Bird::default());
        world.insert_resource(ScoreEvents::new());
        world.insert_resource(FloorLine(config.field.height - config.field.floor_height));
        world.insert_resource(pipes);

        Ok(Self {
            world,
            should_quit: false,
            difficulty,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rebuilds the obstacle pool for `difficulty` and restarts the session
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        let pipe_config = self.config.pipe_config(difficulty);
        self.world
            .resource_mut::<PipeManager>()
            .set_config(pipe_config)
            .with_context(|| format!("invalid pipe configuration for {difficulty:?}"))?;
        self.difficulty = difficulty;
        systems::restart_session(&mut self.world);
        info!("Difficulty set to {}", difficulty.label());
        Ok(())
    }

    /// Swaps in a new configuration, rebuilding the pool at the current difficulty
    pub fn apply_config(&mut self, config: Config) -> Result<()> {
        config.validate().context("invalid configuration")?;
        let pipes = build_pipe_manager(&config, self.difficulty)?;
        self.world
            .insert_resource(FloorLine(config.field.height - config.field.floor_height));
        self.world.insert_resource(pipes);
        self.config = config;
        systems::restart_session(&mut self.world);
        info!("Configuration applied");
        Ok(())
    }

    /// Runs one game tick using the wall-clock time since the previous one
    pub fn on_tick(&mut self) {
        let delta_seconds = {
            let mut time = self.world.resource_mut::<Time>();
            time.update();
            time.delta_seconds().min(MAX_TICK_SECONDS)
        };
        self.step(delta_seconds);
    }

    /// Runs one game tick with an explicit time step
    pub fn step(&mut self, delta_seconds: f32) {
        systems::game_tick_system(&mut self.world, delta_seconds);
    }
}

fn build_pipe_manager(config: &Config, difficulty: Difficulty) -> Result<PipeManager> {
    let pipe_config = config.pipe_config(difficulty);
    let mut pipes = match config.pipes.seed {
        Some(seed) => PipeManager::with_rng(pipe_config, Box::new(fastrand::Rng::with_seed(seed))),
        None => PipeManager::new(pipe_config),
    }
    .with_context(|| format!("invalid pipe configuration for {difficulty:?}"))?;
    pipes.set_poll_interval(Duration::from_millis(config.timing.recycle_poll_ms));
    Ok(pipes)
}
