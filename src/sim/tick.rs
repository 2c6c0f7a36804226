//! Fixed timestep simulation tick

use super::state::GameSession;

/// Directional intent for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the session by one fixed timestep: paddle first, then objects
pub fn tick(session: &mut GameSession, input: &TickInput) {
    if session.is_over() {
        return;
    }

    session.time_ticks += 1;

    session.paddle.apply_input(input);
    session.paddle.advance(session.viewport.width);

    session.field.advance_all(
        &mut session.paddle,
        &mut session.progression,
        session.viewport.height,
        &mut session.events,
    );
}
