#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow potential wrapping when casting between types as tier durations are small
    clippy::cast_possible_wrap
)]

use std::time::Duration;

use log::trace;

use crate::components::{Rect, Vec2};
use crate::difficulty::Difficulty;
use crate::game::{
    CHECKPOINT_WIDTH, ESCALATION_NEXT_TIER_WEIGHT, ESCALATION_OTHER_TIER_WEIGHT,
    MOTION_AMPLITUDE_MAX, MOTION_AMPLITUDE_MIN, PIPE_WIDTH,
};
use crate::motion::{Easing, VerticalMotion};
use crate::pipes::ColorTier;
use crate::random::{RandomSource, pick_sign, weighted_pick};
use crate::scoring::{Checkpoint, CheckpointSink};

/// One top/bottom obstacle pair plus its scoring zone.
///
/// The anchor is the horizontal center of the pair and the vertical center
/// of the gap between the two pipes. All pipe rectangles are derived from
/// the anchor, the current gap and the active oscillation, so they can never
/// disagree with the unit's tier or motion state.
#[derive(Debug, Clone)]
pub struct PipeGroup {
    id: usize,
    position: Vec2,
    width: f32,
    field_height: f32,
    base_gap: f32,
    gap: f32,
    velocity_x: f32,
    color: ColorTier,
    color_pool: &'static [(ColorTier, u32)],
    easing: Easing,
    checkpoint_triggered: bool,
    motion: Option<VerticalMotion>,
    escalations: u32,
}

impl PipeGroup {
    #[must_use]
    pub fn new(id: usize, position: Vec2, gap: f32, field_height: f32, difficulty: Difficulty) -> Self {
        let profile = difficulty.profile();
        Self {
            id,
            position,
            width: PIPE_WIDTH,
            field_height,
            base_gap: gap,
            gap,
            velocity_x: 0.0,
            color: ColorTier::Base,
            color_pool: profile.color_pool,
            easing: profile.easing,
            checkpoint_triggered: false,
            motion: None,
            escalations: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn gap(&self) -> f32 {
        self.gap
    }

    #[must_use]
    pub fn base_gap(&self) -> f32 {
        self.base_gap
    }

    #[must_use]
    pub fn color(&self) -> ColorTier {
        self.color
    }

    #[must_use]
    pub fn velocity_x(&self) -> f32 {
        self.velocity_x
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    #[must_use]
    pub fn motion(&self) -> Option<&VerticalMotion> {
        self.motion.as_ref()
    }

    #[must_use]
    pub fn checkpoint_triggered(&self) -> bool {
        self.checkpoint_triggered
    }

    /// Right edge of the pair, used by the pool to decide when it has left the field
    #[must_use]
    pub fn right_edge(&self) -> f32 {
        self.position.x + self.width / 2.0
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    pub fn set_color(&mut self, color: ColorTier) {
        self.color = color;
    }

    /// Changes the current gap around the cached anchor. The base gap is untouched.
    pub fn set_gap(&mut self, gap: f32) {
        self.gap = gap;
        let Vec2 { x, y } = self.position;
        self.set_position(x, y);
    }

    pub fn set_velocity_x(&mut self, velocity_x: f32) {
        self.velocity_x = velocity_x;
    }

    /// Moves the anchor by the current velocity and ticks the oscillation
    pub fn advance(&mut self, delta: Duration) {
        self.position.x += self.velocity_x * delta.as_secs_f32();
        if let Some(motion) = self.motion.as_mut() {
            motion.tick(delta);
        }
    }

    /// Starts an oscillation, or escalates the running one to a harder tier.
    ///
    /// Returns the tier the unit ended up with.
    pub fn start_vertical_motion(&mut self, rng: &mut dyn RandomSource) -> ColorTier {
        let tier = if self.motion.is_none() {
            weighted_pick(rng, self.color_pool).unwrap_or(self.color)
        } else {
            let candidates = self.escalation_candidates();
            self.escalations += 1;
            self.stop_vertical_motion();
            weighted_pick(rng, &candidates).unwrap_or(self.color)
        };

        self.set_color(tier);
        self.set_gap(self.base_gap + tier.gap_bonus());

        let (min_ms, max_ms) = tier.duration_range_ms();
        let half_period = rng.integer_in_range(min_ms as i32, max_ms as i32);
        let amplitude = rng.real_in_range(MOTION_AMPLITUDE_MIN, MOTION_AMPLITUDE_MAX) * pick_sign(rng);

        self.motion = Some(VerticalMotion::new(
            amplitude,
            Duration::from_millis(u64::from(half_period.unsigned_abs())),
            self.easing,
        ));

        trace!(
            "Pipe {} oscillating as {:?} (amplitude {amplitude}, half period {half_period}ms)",
            self.id, tier
        );

        tier
    }

    /// Tiers strictly harder than the current one, next-harder first.
    /// Falls back to the current tier when nothing harder is reachable.
    fn escalation_candidates(&self) -> Vec<(ColorTier, u32)> {
        let mut harder: Vec<ColorTier> = self
            .color_pool
            .iter()
            .map(|(tier, _)| *tier)
            .filter(|tier| tier.rank() > self.color.rank())
            .collect();
        harder.sort_unstable();
        harder.dedup();

        if harder.is_empty() {
            return vec![(self.color, 1)];
        }

        let last = harder.len() - 1;
        harder
            .iter()
            .enumerate()
            .map(|(index, tier)| {
                let mut weight = if index == 0 {
                    ESCALATION_NEXT_TIER_WEIGHT
                } else {
                    ESCALATION_OTHER_TIER_WEIGHT
                };
                if index == last {
                    weight += self.escalations;
                }
                (*tier, weight)
            })
            .collect()
    }

    pub fn stop_vertical_motion(&mut self) {
        self.motion = None;
    }

    /// Returns the unit to its resting state: no velocity, no motion, base look
    pub fn reset(&mut self) {
        self.checkpoint_triggered = false;
        self.escalations = 0;
        self.set_velocity_x(0.0);
        self.stop_vertical_motion();
        self.set_color(ColorTier::Base);
        self.set_gap(self.base_gap);
    }

    pub fn clear_checkpoint(&mut self) {
        self.checkpoint_triggered = false;
    }

    /// Notifies `sink` the first time it is called after a reset; later calls are ignored.
    pub fn mark_checkpoint(&mut self, sink: &mut dyn CheckpointSink) -> bool {
        if self.checkpoint_triggered {
            return false;
        }
        self.checkpoint_triggered = true;
        sink.checkpoint_passed(Checkpoint { pipe_id: self.id });
        true
    }

    fn vertical_offset(&self) -> f32 {
        self.motion.as_ref().map_or(0.0, VerticalMotion::offset)
    }

    #[must_use]
    pub fn top_pipe(&self) -> Rect {
        let y = self.position.y + self.vertical_offset() - self.field_height / 2.0 - self.gap / 2.0;
        Rect::new(self.position.x, y, self.width, self.field_height)
    }

    #[must_use]
    pub fn bottom_pipe(&self) -> Rect {
        let y = self.position.y + self.vertical_offset() + self.field_height / 2.0 + self.gap / 2.0;
        Rect::new(self.position.x, y, self.width, self.field_height)
    }

    /// Full-height trigger strip at the center of the pair. It does not oscillate.
    #[must_use]
    pub fn checkpoint_zone(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.field_height / 2.0,
            CHECKPOINT_WIDTH,
            self.field_height,
        )
    }

    #[must_use]
    pub fn collides_with(&self, rect: &Rect) -> bool {
        self.top_pipe().intersects(rect) || self.bottom_pipe().intersects(rect)
    }
}
