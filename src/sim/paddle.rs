//! Player paddle: damped horizontal actuator with a cosmetic bounce

use glam::Vec2;

use super::collision::Rect;
use super::tick::TickInput;
use crate::Viewport;
use crate::tuning::Tuning;

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Signed horizontal speed (pixels per tick)
    pub speed: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub damping: f32,
    pub stop_threshold: f32,
    pub moving_left: bool,
    pub moving_right: bool,
    /// Horizontal draw scale, 1.0 at rest
    pub bounce_scale: f32,
    pub bounce_velocity: f32,
    bounce_impulse: f32,
    bounce_decay: f32,
}

impl Paddle {
    /// Paddle centered horizontally near the bottom of the viewport
    pub fn new(viewport: Viewport, tuning: &Tuning) -> Self {
        let (width, height) = tuning.paddle_size(viewport);
        let x = (viewport.width / 2.0 - width / 2.0).max(0.0);
        let y = viewport.height - tuning.paddle_bottom_margin;
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
            speed: 0.0,
            max_speed: tuning.paddle_max_speed,
            acceleration: tuning.paddle_acceleration,
            damping: tuning.paddle_damping,
            stop_threshold: tuning.paddle_stop_threshold,
            moving_left: false,
            moving_right: false,
            bounce_scale: 1.0,
            bounce_velocity: 0.0,
            bounce_impulse: tuning.bounce_impulse,
            bounce_decay: tuning.bounce_decay,
        }
    }

    /// Latch the directional intent for the next advance
    pub fn apply_input(&mut self, input: &TickInput) {
        self.moving_left = input.left;
        self.moving_right = input.right;
    }

    /// Move one tick, keeping the paddle inside [0, viewport_width]
    pub fn advance(&mut self, viewport_width: f32) {
        match (self.moving_left, self.moving_right) {
            (true, false) => self.speed -= self.acceleration,
            (false, true) => self.speed += self.acceleration,
            _ => {
                self.speed *= self.damping;
                if self.speed.abs() < self.stop_threshold {
                    self.speed = 0.0;
                }
            }
        }

        self.speed = self.speed.clamp(-self.max_speed, self.max_speed);
        self.pos.x += self.speed;

        let max_x = (viewport_width - self.width).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);

        self.advance_bounce();
    }

    /// Kick off the squash/stretch reaction
    pub fn trigger_bounce(&mut self) {
        self.bounce_velocity = self.bounce_impulse;
    }

    fn advance_bounce(&mut self) {
        if self.bounce_velocity > 0.0 {
            self.bounce_scale = 1.0 + self.bounce_velocity;
            self.bounce_velocity -= self.bounce_decay;
            if self.bounce_velocity <= 0.0 {
                self.bounce_velocity = 0.0;
                self.bounce_scale = 1.0;
            }
        }
    }

    /// Collision bounds; never affected by the bounce scale
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paddle() -> Paddle {
        Paddle::new(Viewport::new(800.0, 600.0), &Tuning::default())
    }

    const LEFT: TickInput = TickInput { left: true, right: false };
    const RIGHT: TickInput = TickInput { left: false, right: true };
    const BOTH: TickInput = TickInput { left: true, right: true };
    const NONE: TickInput = TickInput { left: false, right: false };

    #[test]
    fn test_starts_centered() {
        let p = paddle();
        assert!((p.center_x() - 400.0).abs() < 1e-4);
        assert_eq!(p.pos.y, 550.0);
        assert_eq!(p.speed, 0.0);
        assert_eq!(p.bounce_scale, 1.0);
    }

    #[test]
    fn test_accelerates_toward_max_speed() {
        let mut p = paddle();
        p.apply_input(&RIGHT);
        p.advance(800.0);
        assert!((p.speed - 0.8).abs() < 1e-5);
        for _ in 0..50 {
            p.advance(800.0);
        }
        assert_eq!(p.speed, p.max_speed);
    }

    #[test]
    fn test_both_flags_damp() {
        let mut p = paddle();
        p.speed = 5.0;
        p.apply_input(&BOTH);
        p.advance(800.0);
        assert!((p.speed - 5.0 * 0.92).abs() < 1e-5);
    }

    #[test]
    fn test_damping_snaps_to_zero() {
        let mut p = paddle();
        p.speed = -3.0;
        p.apply_input(&NONE);
        let mut ticks = 0;
        while p.speed != 0.0 {
            p.advance(800.0);
            ticks += 1;
            assert!(ticks < 100, "speed never settled");
        }
        // 3.0 * 0.92^n drops under 0.2 after 33 ticks
        assert_eq!(ticks, 33);
    }

    #[test]
    fn test_clamped_at_left_edge() {
        let mut p = paddle();
        p.apply_input(&LEFT);
        for _ in 0..200 {
            p.advance(800.0);
        }
        assert_eq!(p.pos.x, 0.0);
    }

    #[test]
    fn test_clamped_at_right_edge() {
        let mut p = paddle();
        p.apply_input(&RIGHT);
        for _ in 0..200 {
            p.advance(800.0);
        }
        assert!((p.pos.x - (800.0 - p.width)).abs() < 1e-4);
    }

    #[test]
    fn test_bounce_decays_to_exactly_one() {
        let mut p = paddle();
        let before = p.bounds();
        p.trigger_bounce();
        p.advance(800.0);
        assert!((p.bounce_scale - 1.18).abs() < 1e-5);
        assert_eq!(p.bounds(), before, "bounce must not touch collision bounds");

        let mut ticks = 1;
        while p.bounce_velocity > 0.0 {
            p.advance(800.0);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(p.bounce_scale, 1.0);
        assert_eq!(p.bounce_velocity, 0.0);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_bounds_and_under_max_speed(
            inputs in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..400),
            width in 200.0f32..2000.0,
        ) {
            let viewport = Viewport::new(width, 600.0);
            let mut p = Paddle::new(viewport, &Tuning::default());
            for (left, right) in inputs {
                p.apply_input(&TickInput { left, right });
                p.advance(viewport.width);
                prop_assert!(p.pos.x >= 0.0);
                prop_assert!(p.pos.x <= viewport.width - p.width + 1e-3);
                prop_assert!(p.speed.abs() <= p.max_speed);
            }
        }
    }
}
