#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;

use crate::game::{
    BIRD_FLAP_VELOCITY, BIRD_GRAVITY, BIRD_MAX_FALL_SPEED, BIRD_SIZE, BIRD_START_X, BIRD_START_Y,
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle described by its center and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Strict overlap; rectangles that only share an edge do not intersect
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    #[must_use]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left() && x < self.right()
    }
}

#[derive(Debug, Clone, Resource)]
pub struct Bird {
    pub position: Vec2,
    pub velocity_y: f32,
    pub size: f32,
    pub gravity_enabled: bool,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            position: Vec2::new(BIRD_START_X, BIRD_START_Y),
            velocity_y: 0.0,
            size: BIRD_SIZE,
            gravity_enabled: false,
        }
    }
}

impl Bird {
    pub fn flap(&mut self) {
        self.gravity_enabled = true;
        self.velocity_y = BIRD_FLAP_VELOCITY;
    }

    /// Integrates gravity and clamps the bird between the ceiling and `floor_y`
    pub fn step(&mut self, delta_seconds: f32, floor_y: f32) {
        if !self.gravity_enabled {
            return;
        }

        self.velocity_y = (self.velocity_y + BIRD_GRAVITY * delta_seconds).min(BIRD_MAX_FALL_SPEED);
        self.position.y += self.velocity_y * delta_seconds;

        let half = self.size / 2.0;
        if self.position.y - half < 0.0 {
            self.position.y = half;
            self.velocity_y = 0.0;
        }
        if self.position.y + half > floor_y {
            self.position.y = floor_y - half;
            self.velocity_y = 0.0;
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size, self.size)
    }

    #[must_use]
    pub fn is_on_floor(&self, floor_y: f32) -> bool {
        self.position.y + self.size / 2.0 >= floor_y
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    Dead,
}

#[derive(Debug, Clone, Resource, Default)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub death_timer: f32,
}

impl GameState {
    /// Clears the current run while keeping the high score
    pub fn reset(&mut self) {
        *self = Self {
            high_score: self.high_score,
            ..Self::default()
        };
    }

    pub fn add_points(&mut self, points: u32) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
    }
}

// Input state for keyboard controls
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pub flap: bool,
    pub reset: bool,
}
