//! Score, misses and difficulty escalation

use std::time::Duration;

use crate::tuning::Tuning;

/// Score-driven difficulty state
#[derive(Debug, Clone)]
pub struct Progression {
    pub score: u64,
    pub misses: u32,
    /// Number of milestones crossed; always `score / milestone_points`
    pub milestones: u32,
    /// Fall speed handed to newly spawned objects (pixels per tick)
    pub fall_speed: f32,
    catch_points: u64,
    milestone_points: u64,
    max_misses: u32,
    speed_factor: f32,
    spawn_base_ms: f64,
    spawn_decrement_ms: f64,
    spawn_floor_ms: f64,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            misses: 0,
            milestones: 0,
            fall_speed: tuning.base_fall_speed,
            catch_points: tuning.catch_points,
            milestone_points: tuning.milestone_points,
            max_misses: tuning.max_misses,
            speed_factor: tuning.milestone_speed_factor,
            spawn_base_ms: tuning.spawn_base_ms,
            spawn_decrement_ms: tuning.spawn_decrement_ms,
            spawn_floor_ms: tuning.spawn_floor_ms,
        }
    }

    /// Credit a catch. Returns true when a milestone was crossed.
    pub fn record_catch(&mut self) -> bool {
        self.score += self.catch_points;
        let next_threshold = (u64::from(self.milestones) + 1) * self.milestone_points;
        if self.score >= next_threshold {
            self.fall_speed *= self.speed_factor;
            self.milestones += 1;
            true
        } else {
            false
        }
    }

    /// Record a miss. Returns true when this miss ended the game.
    pub fn record_miss(&mut self) -> bool {
        self.misses += 1;
        self.misses == self.max_misses
    }

    pub fn is_over(&self) -> bool {
        self.misses >= self.max_misses
    }

    /// 1-based level shown in the HUD
    pub fn level(&self) -> u64 {
        self.score / self.milestone_points + 1
    }

    /// Base delay before the next spawn, tightening per milestone down to a floor
    pub fn spawn_interval(&self) -> Duration {
        let ms = (self.spawn_base_ms - f64::from(self.milestones) * self.spawn_decrement_ms)
            .max(self.spawn_floor_ms);
        Duration::from_micros((ms * 1000.0).round() as u64)
    }
}
