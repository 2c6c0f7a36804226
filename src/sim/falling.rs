//! Falling objects: spawning, motion and retirement

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use super::paddle::Paddle;
use super::progression::Progression;
use super::state::GameEvent;

/// A glowing square falling toward the paddle
#[derive(Debug, Clone)]
pub struct FallingObject {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Current rotation (radians)
    pub rotation: f32,
    /// Fixed at creation
    pub rotation_speed: f32,
    /// Glow pulse phase in [0, 1]
    pub glow: f32,
    pub glow_dir: f32,
    /// Fall speed copied from the progression at spawn time
    pub speed: f32,
}

impl FallingObject {
    /// Advance one tick
    pub fn advance(&mut self, glow_step: f32) {
        self.pos.y += self.speed;
        self.rotation += self.rotation_speed;
        self.glow += glow_step * self.glow_dir;
        if self.glow > 1.0 {
            self.glow_dir = -1.0;
        } else if self.glow < 0.0 {
            self.glow_dir = 1.0;
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// Owns the active falling objects
#[derive(Debug, Clone)]
pub struct FallingField {
    /// Oldest first
    pub objects: Vec<FallingObject>,
    /// Edge length of every object in this session
    pub object_size: f32,
    rotation_speed_range: f32,
    glow_step: f32,
    next_id: u32,
}

impl FallingField {
    pub fn new(object_size: f32, rotation_speed_range: f32, glow_step: f32) -> Self {
        Self {
            objects: Vec::new(),
            object_size,
            rotation_speed_range,
            glow_step,
            next_id: 1,
        }
    }

    /// Spawn one object at a random column just above the visible area
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, viewport_width: f32, speed: f32) -> u32 {
        let max_x = (viewport_width - self.object_size).max(0.0);
        let x = rng.random::<f32>() * max_x;
        let rotation_speed = (rng.random::<f32>() * 2.0 - 1.0) * self.rotation_speed_range;
        self.spawn_at(x, speed, rotation_speed)
    }

    /// Spawn one object at an explicit column
    pub fn spawn_at(&mut self, x: f32, speed: f32, rotation_speed: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.push(FallingObject {
            id,
            pos: Vec2::new(x, -self.object_size),
            size: self.object_size,
            rotation: 0.0,
            rotation_speed,
            glow: 0.0,
            glow_dir: 1.0,
            speed,
        });
        id
    }

    /// Advance every object newest-first, resolving catches and misses.
    ///
    /// Stops as soon as the progression reports game over, so at most one
    /// game-ending miss is ever recorded.
    pub fn advance_all(
        &mut self,
        paddle: &mut Paddle,
        progression: &mut Progression,
        viewport_height: f32,
        events: &mut Vec<GameEvent>,
    ) {
        let paddle_bounds = paddle.bounds();

        for i in (0..self.objects.len()).rev() {
            if progression.is_over() {
                break;
            }

            let object = &mut self.objects[i];
            object.advance(self.glow_step);

            if object.bounds().overlaps(&paddle_bounds) {
                let id = object.id;
                self.objects.remove(i);

                let milestone = progression.record_catch();
                paddle.trigger_bounce();
                events.push(GameEvent::Caught {
                    id,
                    score: progression.score,
                });
                if milestone {
                    log::info!(
                        "Milestone {} reached, fall speed {:.2}",
                        progression.milestones,
                        progression.fall_speed
                    );
                    events.push(GameEvent::Milestone {
                        level: progression.level(),
                        fall_speed: progression.fall_speed,
                    });
                }
            } else if object.pos.y > viewport_height {
                let id = object.id;
                self.objects.remove(i);

                let over = progression.record_miss();
                events.push(GameEvent::Missed {
                    id,
                    misses: progression.misses,
                });
                if over {
                    events.push(GameEvent::GameOver {
                        score: progression.score,
                    });
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (FallingField, Paddle, Progression) {
        let tuning = Tuning::default();
        let viewport = Viewport::new(800.0, 600.0);
        let field = FallingField::new(24.0, tuning.rotation_speed_range, tuning.glow_step);
        (field, Paddle::new(viewport, &tuning), Progression::new(&tuning))
    }

    #[test]
    fn test_spawn_within_columns() {
        let (mut field, _, _) = setup();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            field.spawn(&mut rng, 800.0, 4.0);
        }
        for obj in &field.objects {
            assert!(obj.pos.x >= 0.0 && obj.pos.x <= 800.0 - 24.0);
            assert_eq!(obj.pos.y, -24.0);
            assert!(obj.rotation_speed.abs() <= 0.06);
        }
    }

    #[test]
    fn test_spawn_in_narrow_viewport() {
        let (mut field, _, _) = setup();
        let mut rng = Pcg32::seed_from_u64(7);
        field.spawn(&mut rng, 10.0, 4.0);
        assert_eq!(field.objects[0].pos.x, 0.0);
    }

    #[test]
    fn test_glow_flips_at_bounds() {
        let (mut field, _, _) = setup();
        field.spawn_at(0.0, 0.0, 0.0);
        let obj = &mut field.objects[0];
        for _ in 0..18 {
            obj.advance(0.06);
        }
        assert_eq!(obj.glow_dir, -1.0);
        for _ in 0..18 {
            obj.advance(0.06);
        }
        assert_eq!(obj.glow_dir, 1.0);
    }

    #[test]
    fn test_catch_scores_and_bounces() {
        let (mut field, mut paddle, mut progression) = setup();
        let mut events = Vec::new();
        // Directly above the paddle, fast enough to reach it in one tick
        let x = paddle.center_x() - 12.0;
        field.spawn_at(x, paddle.pos.y + 10.0, 0.0);

        field.advance_all(&mut paddle, &mut progression, 600.0, &mut events);

        assert_eq!(progression.score, 5);
        assert!(field.is_empty());
        assert_eq!(paddle.bounce_velocity, 0.18);
        assert!(matches!(events[0], GameEvent::Caught { score: 5, .. }));
    }

    #[test]
    fn test_miss_counts_once_and_ends_game() {
        let (mut field, mut paddle, mut progression) = setup();
        let mut events = Vec::new();
        // Far left of the paddle span
        field.spawn_at(0.0, 50.0, 0.0);
        field.spawn_at(700.0, 50.0, 0.0);

        for _ in 0..20 {
            field.advance_all(&mut paddle, &mut progression, 600.0, &mut events);
        }

        assert_eq!(progression.misses, 1);
        assert_eq!(progression.score, 0);
        assert!(progression.is_over());
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_newest_first_iteration_removes_safely() {
        let (mut field, mut paddle, mut progression) = setup();
        let mut events = Vec::new();
        let x = paddle.center_x() - 12.0;
        // Three objects, the middle one lands on the paddle this tick
        field.spawn_at(x, 1.0, 0.0);
        field.spawn_at(x, paddle.pos.y + 10.0, 0.0);
        field.spawn_at(x, 1.0, 0.0);

        field.advance_all(&mut paddle, &mut progression, 600.0, &mut events);

        assert_eq!(progression.score, 5);
        let ids: Vec<u32> = field.objects.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(field.objects.iter().all(|o| o.pos.y == -23.0));
    }

    #[test]
    fn test_speed_not_retroactive() {
        let (mut field, mut paddle, mut progression) = setup();
        let mut events = Vec::new();
        field.spawn_at(0.0, progression.fall_speed, 0.0);
        progression.fall_speed *= 2.0;
        field.advance_all(&mut paddle, &mut progression, 600.0, &mut events);
        assert_eq!(field.objects[0].pos.y, -24.0 + 4.0);
    }
}
