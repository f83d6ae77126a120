use crate::app::App;
use crate::config::Config;
use crate::difficulty::Difficulty;
use crate::pipes::{PipeConfig, PipeManager};
use crate::random::RandomSource;
use crate::scoring::{Checkpoint, CheckpointSink};

/// Deterministic random source.
///
/// `below` always answers `choice` (clamped to the bound), so weighted picks
/// land on the first entry for `choice == 0` and on the last entry for a
/// large `choice`. Ranges answer their lower bound unless `pick_max` is set.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    pub choice: u32,
    pub pick_max: bool,
}

impl ScriptedRandom {
    pub fn first() -> Self {
        Self::default()
    }

    pub fn last() -> Self {
        Self {
            choice: u32::MAX,
            pick_max: true,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn integer_in_range(&mut self, min: i32, max: i32) -> i32 {
        if self.pick_max && max >= min { max } else { min }
    }

    fn real_in_range(&mut self, min: f32, max: f32) -> f32 {
        if self.pick_max && max > min { max } else { min }
    }

    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.choice.min(bound - 1)
    }
}

/// Records every checkpoint it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub checkpoints: Vec<Checkpoint>,
}

impl CheckpointSink for RecordingSink {
    fn checkpoint_passed(&mut self, checkpoint: Checkpoint) {
        self.checkpoints.push(checkpoint);
    }
}

/// Config for a pool whose units never start moving vertically
#[must_use]
pub fn static_pipe_config() -> PipeConfig {
    // Medium rolls "static" first, so the scripted source never starts motion
    PipeConfig::for_difficulty(Difficulty::Medium, 1600.0, 900.0)
}

#[must_use]
pub fn scripted_manager(config: PipeConfig) -> PipeManager {
    PipeManager::with_rng(config, Box::new(ScriptedRandom::first())).expect("valid pipe config")
}

/// Moves the front unit of the queue fully past the left edge
pub fn push_front_off_field(manager: &mut PipeManager) {
    if let Some(front) = manager.pipes_mut().next() {
        let y = front.position().y;
        front.set_position(-1000.0, y);
    }
}

// Helper function to create a test app with a fixed seed
#[must_use]
pub fn create_test_app() -> App {
    let mut config = Config::default();
    config.pipes.seed = Some(7);
    App::new(config).expect("default config is valid")
}
