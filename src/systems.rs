use std::time::Duration;

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::{Bird, GamePhase, GameState, Input};
use crate::pipes::PipeManager;
use crate::scoring::ScoreEvents;

/// Height of the floor surface in world coordinates
#[derive(Resource, Debug, Clone, Copy)]
pub struct FloorLine(pub f32);

pub fn input_system(world: &mut World) {
    let input = world.resource::<Input>().clone();
    *world.resource_mut::<Input>() = Input::default();

    if input.reset {
        restart_session(world);
        return;
    }

    if !input.flap {
        return;
    }

    let phase = world.resource::<GameState>().phase;
    match phase {
        GamePhase::Idle => {
            info!("Run started");
            world.resource_mut::<GameState>().phase = GamePhase::Running;
            world.resource_mut::<PipeManager>().start();
            world.resource_mut::<Bird>().flap();
        }
        GamePhase::Running => world.resource_mut::<Bird>().flap(),
        GamePhase::Dead => {}
    }
}

pub fn bird_system(world: &mut World, delta_seconds: f32) {
    let floor_y = world.resource::<FloorLine>().0;
    world.resource_mut::<Bird>().step(delta_seconds, floor_y);
}

/// Advances the pool; the pool itself throttles its recycling pass
pub fn pipe_system(world: &mut World, delta_seconds: f32) {
    world
        .resource_mut::<PipeManager>()
        .update(Duration::from_secs_f32(delta_seconds.max(0.0)));
}

pub fn checkpoint_system(world: &mut World) {
    if world.resource::<GameState>().phase != GamePhase::Running {
        return;
    }

    let bird = world.resource::<Bird>().bounds();
    let mut sink = world.resource::<ScoreEvents>().sender();
    world
        .resource_mut::<PipeManager>()
        .mark_checkpoints(&bird, &mut sink);
}

pub fn score_system(world: &mut World) {
    let points = world.resource::<ScoreEvents>().drain();
    if points > 0 {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.add_points(points);
        debug!("Score {}", game_state.score);
    }
}

pub fn collision_system(world: &mut World) {
    if world.resource::<GameState>().phase != GamePhase::Running {
        return;
    }

    let floor_y = world.resource::<FloorLine>().0;
    let (bounds, grounded) = {
        let bird = world.resource::<Bird>();
        (bird.bounds(), bird.is_on_floor(floor_y))
    };
    let hit_pipe = world
        .resource::<PipeManager>()
        .pipes()
        .any(|pipe| pipe.collides_with(&bounds));

    if hit_pipe || grounded {
        info!(
            "Bird died ({}) with score {}",
            if hit_pipe { "pipe" } else { "floor" },
            world.resource::<GameState>().score
        );
        {
            let mut game_state = world.resource_mut::<GameState>();
            game_state.phase = GamePhase::Dead;
            game_state.death_timer = 0.0;
        }
        world.resource_mut::<PipeManager>().stop();
    }
}

pub fn restart_system(world: &mut World, delta_seconds: f32) {
    let should_restart = {
        let mut game_state = world.resource_mut::<GameState>();
        if game_state.phase != GamePhase::Dead {
            return;
        }
        game_state.death_timer += delta_seconds;
        game_state.death_timer >= crate::game::DEATH_RESTART_DELAY
    };

    if should_restart {
        restart_session(world);
    }
}

/// Puts the bird, the pool and the run back to their starting state
pub fn restart_session(world: &mut World) {
    world.resource_mut::<GameState>().reset();
    world.resource_mut::<Bird>().reset();
    world.resource_mut::<PipeManager>().reset();
    world.resource::<ScoreEvents>().drain();
    debug!("Session restarted");
}

/// Runs one game tick. Pipes move before anything reads their positions.
pub fn game_tick_system(world: &mut World, delta_seconds: f32) {
    input_system(world);
    bird_system(world, delta_seconds);
    pipe_system(world, delta_seconds);
    checkpoint_system(world);
    score_system(world);
    collision_system(world);
    restart_system(world, delta_seconds);
}
