#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::game::{
        FIELD_HEIGHT, FIELD_WIDTH, FLOOR_HEIGHT, PIPE_WIDTH, POOL_MARGIN, RECYCLE_POLL_INTERVAL,
        SPAWN_BAND_ABOVE, SPAWN_BAND_BELOW,
    };
    use std::time::Duration;

    #[test]
    fn test_field_constants() {
        assert!(FIELD_WIDTH > 0.0);
        assert!(FLOOR_HEIGHT < FIELD_HEIGHT);
        assert!((PIPE_WIDTH - 80.0).abs() < f32::EPSILON);
        assert_eq!(POOL_MARGIN, 2);
    }

    #[test]
    fn test_recycle_poll_interval() {
        assert_eq!(RECYCLE_POLL_INTERVAL, Duration::from_millis(100));
    }

    #[test]
    fn test_spawn_band_inside_field() {
        let mid = FIELD_HEIGHT / 2.0;
        assert!(mid - SPAWN_BAND_ABOVE > 0.0);
        assert!(mid + SPAWN_BAND_BELOW < FIELD_HEIGHT - FLOOR_HEIGHT);
    }
}
