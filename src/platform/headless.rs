//! Headless platform: a simulated display clock and spawn timer
//!
//! Executes the game's effects without a browser so whole sessions can run
//! natively (balance checks, tests).

use std::time::Duration;

use crate::game::{Cue, Effect, Game, Phase};

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub score: u64,
    pub level: u64,
    pub elapsed_secs: f64,
    pub frames: u64,
    pub spawned: u64,
    pub catches: u64,
    pub game_over: bool,
}

/// Drives a `Game` with a fixed frame interval
pub struct HeadlessRunner {
    pub game: Game,
    /// Current simulated time (ms)
    pub now_ms: f64,
    frame_interval_ms: f64,
    frame_loop: bool,
    next_spawn_ms: Option<f64>,
    frames: u64,
    spawned: u64,
    catches: u64,
}

impl HeadlessRunner {
    pub fn new(game: Game, refresh_hz: f64) -> Self {
        Self {
            game,
            now_ms: 0.0,
            frame_interval_ms: 1000.0 / refresh_hz,
            frame_loop: false,
            next_spawn_ms: None,
            frames: 0,
            spawned: 0,
            catches: 0,
        }
    }

    fn apply_effects(&mut self) {
        for effect in self.game.take_effects() {
            match effect {
                Effect::StartFrameLoop => self.frame_loop = true,
                Effect::StopFrameLoop => self.frame_loop = false,
                Effect::ScheduleSpawn(delay) => {
                    self.spawned += 1;
                    self.next_spawn_ms = Some(self.now_ms + duration_ms(delay));
                }
                Effect::CancelSpawn => self.next_spawn_ms = None,
                Effect::Play(Cue::Catch) => self.catches += 1,
                Effect::Play(cue) => log::debug!("cue {cue:?}"),
                Effect::ShowSummary { score } => log::info!("Summary shown, final score {score}"),
                Effect::StartMusic
                | Effect::StopMusic
                | Effect::HideSummary
                | Effect::ResizeSurfaces(_)
                | Effect::SettingsChanged(_) => {}
            }
        }
    }

    /// Run until game over or until `limit` of simulated time has passed
    pub fn run(&mut self, limit: Duration) -> RunReport {
        if self.game.phase() == Phase::Idle {
            self.game.dispatch(crate::game::Action::Start);
        }
        self.apply_effects();

        let end_ms = self.now_ms + duration_ms(limit);
        while self.frame_loop && self.now_ms < end_ms {
            // Timers due before the next refresh fire first
            let next_frame = self.now_ms + self.frame_interval_ms;
            while let Some(at) = self.next_spawn_ms.filter(|at| *at <= next_frame) {
                self.now_ms = self.now_ms.max(at);
                self.next_spawn_ms = None;
                self.game.spawn_due();
                self.apply_effects();
            }

            self.now_ms = next_frame;
            self.game.frame(self.now_ms);
            self.frames += 1;
            self.apply_effects();
        }

        let session = self.game.session();
        RunReport {
            score: session.progression.score,
            level: session.progression.level(),
            elapsed_secs: session.clock.elapsed_secs(),
            frames: self.frames,
            spawned: self.spawned,
            catches: self.catches,
            game_over: self.game.phase() == Phase::GameOver,
        }
    }
}

fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
