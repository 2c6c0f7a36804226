//! Demo mode: steer the paddle under the most urgent falling object

use super::state::GameSession;
use super::tick::TickInput;

/// Compute the input a simple player would give this tick
pub fn autopilot_input(session: &GameSession) -> TickInput {
    let paddle = &session.paddle;

    // Most urgent = closest to the paddle while still above it
    let Some(target) = session
        .field
        .objects
        .iter()
        .filter(|o| o.pos.y + o.size <= paddle.pos.y + paddle.height)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    else {
        return TickInput::default();
    };

    let target_x = target.pos.x + target.size / 2.0;

    // Distance covered while damping down from the current speed
    let braking = if paddle.damping < 1.0 {
        paddle.speed / (1.0 - paddle.damping)
    } else {
        0.0
    };
    let predicted = paddle.center_x() + braking;
    let delta = target_x - predicted;
    let deadzone = paddle.width * 0.15;

    TickInput {
        left: delta < -deadzone,
        right: delta > deadzone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::tick;
    use crate::tuning::Tuning;

    fn session() -> GameSession {
        GameSession::new(Viewport::new(800.0, 600.0), &Tuning::default(), 5)
    }

    #[test]
    fn test_idle_without_objects() {
        assert_eq!(autopilot_input(&session()), TickInput::default());
    }

    #[test]
    fn test_steers_toward_target() {
        let mut state = session();
        state.field.spawn_at(700.0, 4.0, 0.0);
        assert_eq!(
            autopilot_input(&state),
            TickInput {
                left: false,
                right: true
            }
        );

        let mut state = session();
        state.field.spawn_at(10.0, 4.0, 0.0);
        assert!(autopilot_input(&state).left);
    }

    #[test]
    fn test_autopilot_catches_a_slow_object() {
        let mut state = session();
        state.field.spawn_at(60.0, 4.0, 0.0);
        for _ in 0..200 {
            let input = autopilot_input(&state);
            tick(&mut state, &input);
        }
        assert_eq!(state.progression.score, 5);
        assert_eq!(state.progression.misses, 0);
    }
}
