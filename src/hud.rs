//! HUD text shown above the playfield

use crate::sim::GameSession;

/// Format seconds as `m:ss`
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// The three HUD strings for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudText {
    /// Top right
    pub score: String,
    /// Top left
    pub time: String,
    /// Top center, styled separately
    pub level: String,
}

impl HudText {
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            score: format!("Score: {}", session.progression.score),
            time: format!("Time: {}", format_time(session.clock.elapsed_secs())),
            level: format!("Level: {}", session.progression.level()),
        }
    }
}
