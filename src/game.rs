//! Game lifecycle state machine
//!
//! Owns the current session and the background, advances them in fixed
//! steps, and turns lifecycle transitions into `Effect`s that the platform
//! shell executes (timers, audio, overlay). Nothing here touches the DOM.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Viewport;
use crate::background::Background;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::hud::HudText;
use crate::platform::input::{Control, InputSource, InputState};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSession, autopilot_input, tick};
use crate::tuning::Tuning;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, not yet started
    Idle,
    /// Frame loop and spawn timer active
    Running,
    /// Run ended, summary visible
    GameOver,
}

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Initial load
    Start,
    /// Restart button
    Restart,
    /// Accept key; restarts only while the summary is visible
    Accept,
    Resize(Viewport),
    Press(Control, InputSource),
    Release(Control, InputSource),
    /// Window lost focus
    Blur,
    ToggleDemo,
    ToggleBackground,
    ToggleMute,
}

/// Fire-and-forget sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Catch,
    GameOver,
    Click,
}

/// Side effects requested from the platform
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Request frames until stopped
    StartFrameLoop,
    /// Cancel any pending frame callback
    StopFrameLoop,
    /// Call `Game::spawn_due` after the delay
    ScheduleSpawn(Duration),
    /// Cancel any pending spawn timer
    CancelSpawn,
    Play(Cue),
    StartMusic,
    StopMusic,
    ShowSummary { score: u64 },
    HideSummary,
    ResizeSurfaces(Viewport),
    /// Persist and apply changed preferences
    SettingsChanged(Settings),
}

/// The orchestrator
pub struct Game {
    tuning: Tuning,
    settings: Settings,
    phase: Phase,
    viewport: Viewport,
    session: GameSession,
    background: Background,
    input: InputState,
    demo: bool,
    accumulator: f32,
    last_time: Option<f64>,
    seeds: Pcg32,
    effects: Vec<Effect>,
}

impl Game {
    pub fn new(viewport: Viewport, tuning: Tuning, settings: Settings, seed: u64) -> Self {
        let mut seeds = Pcg32::seed_from_u64(seed);
        let background = Background::new(&mut seeds, viewport, &tuning);
        let session = GameSession::new(viewport, &tuning, seeds.random());
        Self {
            tuning,
            settings,
            phase: Phase::Idle,
            viewport,
            session,
            background,
            input: InputState::default(),
            demo: false,
            accumulator: 0.0,
            last_time: None,
            seeds,
            effects: Vec::new(),
        }
    }

    /// Feed an action into the state machine
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Start => {
                if self.phase == Phase::Idle {
                    self.begin(false);
                }
            }
            Action::Restart => self.begin(true),
            Action::Accept => {
                if self.phase == Phase::GameOver {
                    self.begin(true);
                }
            }
            Action::Resize(viewport) => self.resize(viewport),
            Action::Press(control, source) => self.input.press(control, source),
            Action::Release(control, source) => self.input.release(control, source),
            Action::Blur => self.input.clear(),
            Action::ToggleDemo => {
                self.demo = !self.demo;
                log::info!("Demo mode: {}", self.demo);
            }
            Action::ToggleBackground => {
                self.settings.show_background = !self.settings.show_background;
                self.effects.push(Effect::SettingsChanged(self.settings.clone()));
            }
            Action::ToggleMute => {
                self.settings.muted = !self.settings.muted;
                self.effects.push(Effect::SettingsChanged(self.settings.clone()));
            }
        }
    }

    /// Enter Running with a fresh session
    fn begin(&mut self, with_click: bool) {
        let seed = self.seeds.random();
        self.session = GameSession::new(self.viewport, &self.tuning, seed);
        self.background.set_running(true);
        self.input.clear();
        self.accumulator = 0.0;
        self.last_time = None;
        self.phase = Phase::Running;

        self.effects.push(Effect::CancelSpawn);
        self.effects.push(Effect::StopFrameLoop);
        self.effects.push(Effect::HideSummary);
        if with_click {
            self.effects.push(Effect::Play(Cue::Click));
        }
        self.effects.push(Effect::StartMusic);
        self.effects.push(Effect::StartFrameLoop);

        log::info!(
            "Game started ({}x{}, seed {})",
            self.viewport.width,
            self.viewport.height,
            seed
        );

        // First object right away, then the timer takes over
        self.spawn_due();
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.background.resize(viewport);
        self.effects.push(Effect::ResizeSurfaces(viewport));

        match self.phase {
            Phase::Running => {
                log::info!("Viewport resized, restarting");
                self.begin(false);
            }
            Phase::Idle => {
                let seed = self.seeds.random();
                self.session = GameSession::new(viewport, &self.tuning, seed);
            }
            // Keep the summary up; the next restart picks up the new size
            Phase::GameOver => {}
        }
    }

    /// Transition to GameOver; idempotent
    fn end_game(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.phase = Phase::GameOver;
        self.background.set_running(false);

        let score = self.session.progression.score;
        self.effects.push(Effect::StopFrameLoop);
        self.effects.push(Effect::CancelSpawn);
        self.effects.push(Effect::StopMusic);
        self.effects.push(Effect::Play(Cue::GameOver));
        self.effects.push(Effect::ShowSummary { score });

        log::info!(
            "Game over: score {}, time {:.1}s",
            score,
            self.session.clock.elapsed_secs()
        );
    }

    /// Run one display frame; returns the number of simulation steps taken
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        if self.phase != Phase::Running {
            return 0;
        }

        self.session.clock.observe(time_ms);

        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(time_ms);
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            steps += 1;
            if self.phase != Phase::Running {
                break;
            }
        }
        // Time the substep cap could not cover is dropped, not carried over
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// One fixed step: background, paddle, falling objects
    fn step(&mut self) {
        // A hidden background holds its state and resumes where it stopped
        if self.settings.show_background {
            self.background.update();
        }

        let input = if self.demo {
            autopilot_input(&self.session)
        } else {
            self.input.tick_input()
        };
        tick(&mut self.session, &input);

        let events: Vec<GameEvent> = self.session.drain_events().collect();
        for event in events {
            match event {
                GameEvent::Caught { id, score } => {
                    log::debug!("Caught object {id}, score {score}");
                    self.effects.push(Effect::Play(Cue::Catch));
                }
                GameEvent::Missed { id, misses } => {
                    log::debug!("Missed object {id} ({misses} misses)");
                }
                GameEvent::Milestone { level, fall_speed } => {
                    log::info!("Level {level}, fall speed {fall_speed:.2}");
                }
                GameEvent::GameOver { .. } => self.end_game(),
            }
        }
    }

    /// Spawn timer fired: add an object and schedule the next one
    pub fn spawn_due(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.session.spawn();
        let delay = self.session.next_spawn_delay();
        self.effects.push(Effect::ScheduleSpawn(delay));
    }

    /// Drain pending effects in the order they were requested
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn hud(&self) -> HudText {
        HudText::from_session(&self.session)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Mutable session access for scripted scenarios
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }
}
