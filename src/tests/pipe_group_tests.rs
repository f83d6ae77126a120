#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::{Rect, Vec2};
    use crate::difficulty::Difficulty;
    use crate::game::{CHECKPOINT_WIDTH, PIPE_WIDTH};
    use crate::pipes::{ColorTier, PipeGroup};
    use crate::scoring::Checkpoint;
    use crate::tests::test_utils::{RecordingSink, ScriptedRandom};
    use std::time::Duration;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn create_pipe(difficulty: Difficulty) -> PipeGroup {
        PipeGroup::new(3, Vec2::new(500.0, 450.0), 200.0, 900.0, difficulty)
    }

    #[test]
    fn test_new_pipe_is_at_rest() {
        let pipe = create_pipe(Difficulty::Medium);
        assert_eq!(pipe.id(), 3);
        assert_eq!(pipe.color(), ColorTier::Base);
        assert!(!pipe.is_moving());
        assert!(!pipe.checkpoint_triggered());
        assert!(approx(pipe.velocity_x(), 0.0));
        assert!(approx(pipe.width(), PIPE_WIDTH));
        assert!(approx(pipe.right_edge(), 540.0));
    }

    #[test]
    fn test_pipe_geometry() {
        let pipe = create_pipe(Difficulty::Medium);
        let top = pipe.top_pipe();
        let bottom = pipe.bottom_pipe();

        // The gap is centered on the anchor
        assert!(approx(top.bottom(), 350.0));
        assert!(approx(bottom.top(), 550.0));
        assert!(approx(bottom.top() - top.bottom(), pipe.gap()));

        let zone = pipe.checkpoint_zone();
        assert!(approx(zone.width, CHECKPOINT_WIDTH));
        assert!(approx(zone.x, 500.0));
        assert!(approx(zone.top(), 0.0));
        assert!(approx(zone.bottom(), 900.0));
    }

    #[test]
    fn test_collision() {
        let pipe = create_pipe(Difficulty::Medium);
        assert!(!pipe.collides_with(&Rect::new(500.0, 450.0, 64.0, 64.0)));
        assert!(pipe.collides_with(&Rect::new(500.0, 200.0, 64.0, 64.0)));
        assert!(pipe.collides_with(&Rect::new(500.0, 700.0, 64.0, 64.0)));
        assert!(!pipe.collides_with(&Rect::new(300.0, 200.0, 64.0, 64.0)));
    }

    #[test]
    fn test_set_gap_keeps_anchor() {
        let mut pipe = create_pipe(Difficulty::Medium);
        pipe.set_gap(260.0);
        assert!(approx(pipe.top_pipe().bottom(), 320.0));
        assert!(approx(pipe.bottom_pipe().top(), 580.0));
        assert!(approx(pipe.base_gap(), 200.0));
    }

    #[test]
    fn test_advance_moves_by_velocity() {
        let mut pipe = create_pipe(Difficulty::Medium);
        pipe.set_velocity_x(-200.0);
        pipe.advance(Duration::from_millis(500));
        assert!(approx(pipe.position().x, 400.0));
        assert!(approx(pipe.position().y, 450.0));
    }

    #[test]
    fn test_start_vertical_motion_applies_tier() {
        let mut pipe = create_pipe(Difficulty::Medium);
        let tier = pipe.start_vertical_motion(&mut ScriptedRandom::first());

        assert_eq!(tier, ColorTier::LightGreen);
        assert_eq!(pipe.color(), ColorTier::LightGreen);
        assert!(approx(pipe.gap(), 230.0));

        let motion = pipe.motion().expect("pipe should be moving");
        assert_eq!(motion.half_period(), Duration::from_millis(1300));
        assert!(approx(motion.amplitude(), -100.0));
    }

    #[test]
    fn test_oscillation_moves_both_pipes() {
        let mut pipe = PipeGroup::new(0, Vec2::new(500.0, 450.0), 200.0, 900.0, Difficulty::Insane);
        pipe.start_vertical_motion(&mut ScriptedRandom::first());
        let before = pipe.top_pipe().bottom();

        pipe.advance(Duration::from_millis(200));
        let shift = pipe.top_pipe().bottom() - before;
        assert!(shift < 0.0);
        assert!(approx(pipe.bottom_pipe().top() - pipe.top_pipe().bottom(), pipe.gap()));

        // The checkpoint zone stays put
        assert!(approx(pipe.checkpoint_zone().y, 450.0));
    }

    #[test]
    fn test_escalation_order() {
        let mut pipe = create_pipe(Difficulty::Medium);
        let mut rng = ScriptedRandom::first();

        assert_eq!(pipe.start_vertical_motion(&mut rng), ColorTier::LightGreen);
        assert_eq!(pipe.start_vertical_motion(&mut rng), ColorTier::Orange);
        assert!(approx(pipe.gap(), 225.0));
        assert_eq!(pipe.start_vertical_motion(&mut rng), ColorTier::Red);
        assert!(approx(pipe.gap(), 220.0));

        // Nothing harder is reachable, so the oscillation restarts at the same tier
        assert_eq!(pipe.start_vertical_motion(&mut rng), ColorTier::Red);
        assert!(pipe.is_moving());
    }

    #[test]
    fn test_escalation_never_downgrades() {
        for seed in 0..200 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut pipe = create_pipe(Difficulty::Medium);
            let mut previous = pipe.start_vertical_motion(&mut rng);
            for _ in 0..6 {
                let next = pipe.start_vertical_motion(&mut rng);
                assert!(next.rank() >= previous.rank(), "seed {seed}: {previous:?} -> {next:?}");
                previous = next;
            }
        }
    }

    #[test]
    fn test_stop_vertical_motion_is_idempotent() {
        let mut pipe = create_pipe(Difficulty::Hard);
        pipe.start_vertical_motion(&mut ScriptedRandom::first());
        assert!(pipe.is_moving());

        pipe.stop_vertical_motion();
        pipe.stop_vertical_motion();
        assert!(!pipe.is_moving());

        let top = pipe.top_pipe().bottom();
        pipe.advance(Duration::from_millis(300));
        assert!(approx(pipe.top_pipe().bottom(), top));
    }

    #[test]
    fn test_mark_checkpoint_once() {
        let mut pipe = create_pipe(Difficulty::Medium);
        let mut sink = RecordingSink::default();

        assert!(pipe.mark_checkpoint(&mut sink));
        assert!(!pipe.mark_checkpoint(&mut sink));
        assert_eq!(sink.checkpoints, vec![Checkpoint { pipe_id: 3 }]);

        pipe.reset();
        assert!(pipe.mark_checkpoint(&mut sink));
        assert_eq!(sink.checkpoints.len(), 2);

        pipe.clear_checkpoint();
        assert!(pipe.mark_checkpoint(&mut sink));
        assert_eq!(sink.checkpoints.len(), 3);
    }

    #[test]
    fn test_reset_restores_base_state() {
        let mut pipe = create_pipe(Difficulty::Medium);
        let mut rng = ScriptedRandom::first();
        pipe.start_vertical_motion(&mut rng);
        pipe.start_vertical_motion(&mut rng);
        pipe.set_velocity_x(-200.0);
        pipe.mark_checkpoint(&mut RecordingSink::default());

        pipe.reset();

        assert_eq!(pipe.color(), ColorTier::Base);
        assert!(approx(pipe.gap(), 200.0));
        assert!(!pipe.is_moving());
        assert!(!pipe.checkpoint_triggered());
        assert!(approx(pipe.velocity_x(), 0.0));

        // Escalation history is gone too
        assert_eq!(pipe.start_vertical_motion(&mut rng), ColorTier::LightGreen);
    }

    #[test]
    fn test_tier_table() {
        assert!(ColorTier::Base < ColorTier::LightGreen);
        assert!(ColorTier::Red < ColorTier::Purple);
        assert_eq!(ColorTier::Orange.rank(), 2);
        assert_eq!(ColorTier::LightGreen.duration_range_ms(), (1300, 2000));
        assert!(approx(ColorTier::Base.gap_bonus(), 0.0));
        assert_eq!(ColorTier::Base.texture_key(), "pipe");
        assert_eq!(ColorTier::LightGreen.texture_key(), "light-green-pipe");
        assert_eq!(ColorTier::Purple.cap_texture_key(), "purple-cap");
    }

    #[test]
    fn test_amplitude_drawn_from_range() {
        for seed in 0..100 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut pipe = create_pipe(Difficulty::Hard);
            pipe.start_vertical_motion(&mut rng);
            let amplitude = pipe.motion().unwrap().amplitude().abs();
            assert!((100.0..150.0).contains(&amplitude), "seed {seed}: {amplitude}");
        }

        let mut pipe = create_pipe(Difficulty::Hard);
        pipe.start_vertical_motion(&mut ScriptedRandom::last());
        assert!(approx(pipe.motion().unwrap().amplitude(), 150.0));
    }
}
