#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::warn;

/// A unit's scoring zone was passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub pipe_id: usize,
}

/// Receives checkpoint notifications from obstacle units
pub trait CheckpointSink {
    fn checkpoint_passed(&mut self, checkpoint: Checkpoint);
}

impl CheckpointSink for Sender<Checkpoint> {
    fn checkpoint_passed(&mut self, checkpoint: Checkpoint) {
        if self.send(checkpoint).is_err() {
            warn!("Checkpoint for pipe {} dropped, score receiver is gone", checkpoint.pipe_id);
        }
    }
}

/// Score channel owned by the session
#[derive(Resource)]
pub struct ScoreEvents {
    sender: Sender<Checkpoint>,
    receiver: Receiver<Checkpoint>,
}

impl ScoreEvents {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    #[must_use]
    pub fn sender(&self) -> Sender<Checkpoint> {
        self.sender.clone()
    }

    /// Consumes every pending checkpoint and returns how many there were
    pub fn drain(&self) -> u32 {
        let mut count = 0;
        while self.receiver.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}

impl Default for ScoreEvents {
    fn default() -> Self {
        Self::new()
    }
}
