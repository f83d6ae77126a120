#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::components::{GamePhase, GameState, Input};
    use crate::config::Config;
    use crate::difficulty::Difficulty;
    use crate::pipes::{PipeManager, PoolState};
    use crate::systems::FloorLine;
    use crate::tests::test_utils::create_test_app;

    #[test]
    fn test_app_new() {
        let app = create_test_app();
        assert!(!app.should_quit);
        assert_eq!(app.difficulty, Difficulty::Medium);
        assert_eq!(app.world.resource::<GameState>().phase, GamePhase::Idle);
        assert_eq!(app.world.resource::<PipeManager>().pipe_count(), 9);
        assert!((app.world.resource::<FloorLine>().0 - 800.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_app_rejects_invalid_config() {
        let mut config = Config::default();
        config.pipes.pipe_count = Some(0);
        assert!(App::new(config).is_err());
    }

    #[test]
    fn test_set_difficulty() {
        let mut app = create_test_app();
        app.world.resource_mut::<Input>().flap = true;
        app.step(0.016);
        assert_eq!(app.world.resource::<PipeManager>().state(), PoolState::Running);

        app.set_difficulty(Difficulty::Insane).expect("insane is valid");
        assert_eq!(app.difficulty, Difficulty::Insane);
        let pipes = app.world.resource::<PipeManager>();
        assert_eq!(pipes.difficulty(), Difficulty::Insane);
        assert_eq!(pipes.state(), PoolState::Idle);
        assert!(pipes.pipes().all(crate::pipes::PipeGroup::is_moving));
        assert_eq!(app.world.resource::<GameState>().phase, GamePhase::Idle);
    }

    #[test]
    fn test_apply_config() {
        let mut app = create_test_app();
        let mut config = app.config().clone();
        config.pipes.pipe_count = Some(14);
        config.field.floor_height = 50.0;

        app.apply_config(config.clone()).expect("config is valid");
        assert_eq!(app.config(), &config);
        assert_eq!(app.world.resource::<PipeManager>().pipe_count(), 14);
        assert!((app.world.resource::<FloorLine>().0 - 850.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_apply_invalid_config_keeps_old_one() {
        let mut app = create_test_app();
        let previous = app.config().clone();
        let mut config = previous.clone();
        config.pipes.final_spacing = Some(-1.0);

        assert!(app.apply_config(config).is_err());
        assert_eq!(app.config(), &previous);
        assert_eq!(app.world.resource::<PipeManager>().pipe_count(), 9);
    }

    #[test]
    fn test_on_tick() {
        let mut app = create_test_app();
        app.world.resource_mut::<Input>().flap = true;
        app.on_tick();
        assert_eq!(app.world.resource::<GameState>().phase, GamePhase::Running);
    }

    #[test]
    fn test_seeded_apps_match() {
        let first = create_test_app();
        let second = create_test_app();
        let ys = |app: &App| -> Vec<f32> {
            app.world
                .resource::<PipeManager>()
                .pipes()
                .map(|pipe| pipe.position().y)
                .collect()
        };
        assert_eq!(ys(&first), ys(&second));
    }

    #[test]
    fn test_overrides_checked_for_every_difficulty() {
        // Fine for medium, but below hard's and insane's starting spacing
        let mut config = Config::default();
        config.pipes.final_spacing = Some(380.0);
        assert!(App::new(config.clone()).is_err());

        let mut app = create_test_app();
        assert!(app.apply_config(config).is_err());
        assert_eq!(app.config().pipes.final_spacing, None);

        // The running session keeps its config and every difficulty stays selectable
        for difficulty in Difficulty::ALL {
            app.set_difficulty(difficulty).expect("difficulty should be selectable");
            assert_eq!(app.world.resource::<PipeManager>().difficulty(), difficulty);
        }
    }

    #[test]
    fn test_cycle_difficulties_with_overrides() {
        let mut config = Config::default();
        config.pipes.seed = Some(5);
        config.pipes.final_spacing = Some(280.0);
        let mut app = App::new(config).expect("override fits every difficulty");

        let mut difficulty = app.difficulty;
        for _ in 0..Difficulty::ALL.len() {
            difficulty = difficulty.next();
            app.set_difficulty(difficulty).expect("difficulty should be selectable");
            let pipes = app.world.resource::<PipeManager>();
            assert!((pipes.final_spacing() - 280.0).abs() < f32::EPSILON);
        }
        assert_eq!(app.difficulty, Difficulty::Medium);
    }
}
