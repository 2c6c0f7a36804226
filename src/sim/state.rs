//! Session state: everything that is rebuilt on restart

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::falling::FallingField;
use super::paddle::Paddle;
use super::progression::Progression;
use crate::Viewport;
use crate::tuning::Tuning;

/// Things that happened during a tick, drained by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Caught { id: u32, score: u64 },
    Missed { id: u32, misses: u32 },
    Milestone { level: u64, fall_speed: f32 },
    GameOver { score: u64 },
}

/// Wall-clock survival time; zero is the first frame after a (re)start
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionClock {
    start_ms: Option<f64>,
    elapsed_secs: f64,
}

impl SessionClock {
    /// Record a frame timestamp (ms) and return elapsed seconds
    pub fn observe(&mut self, now_ms: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        self.elapsed_secs = ((now_ms - start) / 1000.0).max(0.0);
        self.elapsed_secs
    }

    pub fn is_started(&self) -> bool {
        self.start_ms.is_some()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }
}

/// One run of the game, from (re)start to game over
#[derive(Debug, Clone)]
pub struct GameSession {
    pub seed: u64,
    pub viewport: Viewport,
    pub paddle: Paddle,
    pub field: FallingField,
    pub progression: Progression,
    pub clock: SessionClock,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    spawn_jitter_ms: f64,
}

impl GameSession {
    pub fn new(viewport: Viewport, tuning: &Tuning, seed: u64) -> Self {
        let field = FallingField::new(
            tuning.object_size(viewport),
            tuning.rotation_speed_range,
            tuning.glow_step,
        );
        Self {
            seed,
            viewport,
            paddle: Paddle::new(viewport, tuning),
            field,
            progression: Progression::new(tuning),
            clock: SessionClock::default(),
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            spawn_jitter_ms: tuning.spawn_jitter_ms,
        }
    }

    /// Spawn one object at the current fall speed
    pub fn spawn(&mut self) -> u32 {
        let speed = self.progression.fall_speed;
        self.field.spawn(&mut self.rng, self.viewport.width, speed)
    }

    /// Delay until the next spawn: progression interval plus random jitter
    pub fn next_spawn_delay(&mut self) -> Duration {
        let jitter_ms = if self.spawn_jitter_ms > 0.0 {
            self.rng.random::<f64>() * self.spawn_jitter_ms
        } else {
            0.0
        };
        self.progression.spawn_interval() + Duration::from_micros((jitter_ms * 1000.0) as u64)
    }

    pub fn is_over(&self) -> bool {
        self.progression.is_over()
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session() {
        let session = GameSession::new(Viewport::new(800.0, 600.0), &Tuning::default(), 1);
        assert_eq!(session.progression.score, 0);
        assert_eq!(session.progression.misses, 0);
        assert_eq!(session.progression.milestones, 0);
        assert!(session.field.is_empty());
        assert!(!session.clock.is_started());
        assert!((session.paddle.center_x() - 400.0).abs() < 1e-4);
    }

    #[test]
    fn test_clock_zero_is_first_observation() {
        let mut clock = SessionClock::default();
        assert_eq!(clock.observe(5000.0), 0.0);
        assert_eq!(clock.observe(7500.0), 2.5);
        assert_eq!(clock.elapsed_secs(), 2.5);
    }

    #[test]
    fn test_spawn_delay_within_jitter() {
        let mut session = GameSession::new(Viewport::new(800.0, 600.0), &Tuning::default(), 3);
        for _ in 0..100 {
            let delay = session.next_spawn_delay();
            assert!(delay >= Duration::from_millis(1200));
            assert!(delay < Duration::from_millis(1500));
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let tuning = Tuning::default();
        let mut a = GameSession::new(Viewport::new(800.0, 600.0), &tuning, 42);
        let mut b = GameSession::new(Viewport::new(800.0, 600.0), &tuning, 42);
        for _ in 0..10 {
            a.spawn();
            b.spawn();
        }
        let xs_a: Vec<f32> = a.field.objects.iter().map(|o| o.pos.x).collect();
        let xs_b: Vec<f32> = b.field.objects.iter().map(|o| o.pos.x).collect();
        assert_eq!(xs_a, xs_b);
    }
}
