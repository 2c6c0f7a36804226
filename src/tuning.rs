//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can retune the game
//! without a rebuild. Missing fields fall back to the defaults.

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

use crate::Viewport;

/// Gameplay tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Paddle ===
    /// Paddle width as a fraction of viewport width
    pub paddle_width_ratio: f32,
    pub paddle_min_width: f32,
    pub paddle_max_width: f32,
    /// Paddle height as a fraction of paddle width
    pub paddle_aspect: f32,
    /// Distance from the bottom edge to the paddle's top edge
    pub paddle_bottom_margin: f32,
    /// Pixels per tick
    pub paddle_max_speed: f32,
    pub paddle_acceleration: f32,
    /// Multiplicative speed damping when no single direction is held
    pub paddle_damping: f32,
    /// Speeds below this snap to zero while damping
    pub paddle_stop_threshold: f32,
    pub bounce_impulse: f32,
    pub bounce_decay: f32,

    // === Falling objects ===
    /// Object size as a fraction of viewport width
    pub object_size_ratio: f32,
    pub object_min_size: f32,
    pub object_max_size: f32,
    /// Rotation speed is drawn from [-range, range) radians per tick
    pub rotation_speed_range: f32,
    pub glow_step: f32,

    // === Progression ===
    pub catch_points: u64,
    pub milestone_points: u64,
    pub max_misses: u32,
    /// Initial fall speed in pixels per tick
    pub base_fall_speed: f32,
    /// Fall speed multiplier applied at each milestone
    pub milestone_speed_factor: f32,
    pub spawn_base_ms: f64,
    pub spawn_decrement_ms: f64,
    pub spawn_floor_ms: f64,
    /// Uniform random delay added on top of the spawn interval
    pub spawn_jitter_ms: f64,

    // === Background ===
    pub star_count: usize,
    pub hue_base: f32,
    pub hue_max: f32,
    pub hue_step: f32,
    pub star_alpha_min: f32,
    pub star_alpha_max: f32,
    pub grid_spacing: f32,
    pub grid_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_width_ratio: 0.12,
            paddle_min_width: 70.0,
            paddle_max_width: 160.0,
            paddle_aspect: 0.31,
            paddle_bottom_margin: 50.0,
            paddle_max_speed: 9.0,
            paddle_acceleration: 0.8,
            paddle_damping: 0.92,
            paddle_stop_threshold: 0.2,
            bounce_impulse: 0.18,
            bounce_decay: 0.012,

            object_size_ratio: 0.03,
            object_min_size: 18.0,
            object_max_size: 32.0,
            rotation_speed_range: 0.06,
            glow_step: 0.06,

            catch_points: 5,
            milestone_points: 50,
            max_misses: 1,
            base_fall_speed: 4.0,
            milestone_speed_factor: 1.3,
            spawn_base_ms: 1200.0,
            spawn_decrement_ms: 100.0,
            spawn_floor_ms: 450.0,
            spawn_jitter_ms: 300.0,

            star_count: 120,
            hue_base: 290.0,
            hue_max: 360.0,
            hue_step: 0.8,
            star_alpha_min: 0.3,
            star_alpha_max: 1.0,
            grid_spacing: 60.0,
            grid_speed: 0.9,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("invalid tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.paddle_max_speed > 0.0, "paddle_max_speed must be positive");
        ensure!(
            (0.0..1.0).contains(&self.paddle_damping),
            "paddle_damping must be in [0, 1)"
        );
        ensure!(
            self.paddle_min_width <= self.paddle_max_width,
            "paddle_min_width exceeds paddle_max_width"
        );
        ensure!(
            self.object_min_size <= self.object_max_size,
            "object_min_size exceeds object_max_size"
        );
        ensure!(self.bounce_decay > 0.0, "bounce_decay must be positive");
        ensure!(self.milestone_points > 0, "milestone_points must be positive");
        ensure!(self.max_misses > 0, "max_misses must be at least 1");
        ensure!(
            self.milestone_speed_factor >= 1.0,
            "milestone_speed_factor must not slow objects down"
        );
        ensure!(
            self.spawn_floor_ms > 0.0 && self.spawn_floor_ms <= self.spawn_base_ms,
            "spawn_floor_ms must be in (0, spawn_base_ms]"
        );
        ensure!(self.spawn_jitter_ms >= 0.0, "spawn_jitter_ms must not be negative");
        ensure!(
            self.hue_base < self.hue_max,
            "hue_base must be below hue_max"
        );
        ensure!(
            self.star_alpha_min < self.star_alpha_max,
            "star_alpha_min must be below star_alpha_max"
        );
        ensure!(self.grid_spacing > 0.0, "grid_spacing must be positive");
        Ok(())
    }

    /// Paddle (width, height) for a viewport
    pub fn paddle_size(&self, viewport: Viewport) -> (f32, f32) {
        let width = (viewport.width * self.paddle_width_ratio)
            .clamp(self.paddle_min_width, self.paddle_max_width);
        (width, width * self.paddle_aspect)
    }

    /// Falling object edge length for a viewport
    pub fn object_size(&self, viewport: Viewport) -> f32 {
        (viewport.width * self.object_size_ratio).clamp(self.object_min_size, self.object_max_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "milestone_speed_factor": 1.2 }"#).unwrap();
        assert_eq!(tuning.milestone_speed_factor, 1.2);
        assert_eq!(tuning.catch_points, 5);
        assert_eq!(tuning.max_misses, 1);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Tuning::from_json(r#"{ "max_misses": 0 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "paddle_damping": 1.5 }"#).is_err());
        assert!(Tuning::from_json("not json").is_err());
    }

    #[test]
    fn test_sizes_scale_with_viewport() {
        let tuning = Tuning::default();
        let (small_w, small_h) = tuning.paddle_size(Viewport::new(320.0, 480.0));
        let (large_w, _) = tuning.paddle_size(Viewport::new(1000.0, 800.0));
        assert_eq!(small_w, tuning.paddle_min_width);
        assert!((large_w - 120.0).abs() < 1e-4);
        assert!((small_h - small_w * tuning.paddle_aspect).abs() < 1e-4);

        assert_eq!(tuning.object_size(Viewport::new(320.0, 480.0)), 18.0);
        assert!((tuning.object_size(Viewport::new(800.0, 600.0)) - 24.0).abs() < 1e-4);
        assert_eq!(tuning.object_size(Viewport::new(4000.0, 2000.0)), 32.0);
    }
}
