//! Ambient background: flickering starfield and a scrolling glow grid
//!
//! Lives outside the game session so it keeps animating seamlessly across
//! restarts. Drawing happens in `renderer::scene`.

use glam::Vec2;
use rand::Rng;

use crate::Viewport;
use crate::tuning::Tuning;

/// A single background star
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub flicker_speed: f32,
    pub flicker_dir: f32,
}

/// Background animation state
#[derive(Debug, Clone)]
pub struct Background {
    pub stars: Vec<Star>,
    /// Current hue in degrees, cycles through [hue_base, hue_max]
    pub hue: f32,
    /// Grid scroll offset in (0, grid_spacing]
    pub grid_offset: f32,
    pub viewport: Viewport,
    running: bool,
    hue_base: f32,
    hue_max: f32,
    hue_step: f32,
    alpha_min: f32,
    alpha_max: f32,
    grid_spacing: f32,
    grid_speed: f32,
}

impl Background {
    pub fn new<R: Rng>(rng: &mut R, viewport: Viewport, tuning: &Tuning) -> Self {
        let stars = (0..tuning.star_count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * viewport.width,
                    rng.random::<f32>() * viewport.height,
                ),
                radius: rng.random::<f32>() * 1.8 + 0.5,
                alpha: rng.random::<f32>() * 0.5 + tuning.star_alpha_min,
                flicker_speed: rng.random::<f32>() * 0.02 + 0.01,
                flicker_dir: 1.0,
            })
            .collect();

        Self {
            stars,
            hue: tuning.hue_base,
            grid_offset: 0.0,
            viewport,
            running: true,
            hue_base: tuning.hue_base,
            hue_max: tuning.hue_max,
            hue_step: tuning.hue_step,
            alpha_min: tuning.star_alpha_min,
            alpha_max: tuning.star_alpha_max,
            grid_spacing: tuning.grid_spacing,
            grid_speed: tuning.grid_speed,
        }
    }

    /// Advance one tick; does nothing while stopped
    pub fn update(&mut self) {
        if !self.running {
            return;
        }

        self.hue += self.hue_step;
        if self.hue > self.hue_max {
            self.hue = self.hue_base;
        }

        for star in &mut self.stars {
            star.alpha += star.flicker_speed * star.flicker_dir;
            if star.alpha >= self.alpha_max {
                star.alpha = self.alpha_max;
                star.flicker_dir = -1.0;
            } else if star.alpha <= self.alpha_min {
                star.alpha = self.alpha_min;
                star.flicker_dir = 1.0;
            }
        }

        self.grid_offset -= self.grid_speed;
        if self.grid_offset <= 0.0 {
            self.grid_offset = self.grid_spacing;
        }
    }

    /// Pause or resume without losing any animation state
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Track the surface size; stars keep their positions
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn grid_spacing(&self) -> f32 {
        self.grid_spacing
    }

    /// Offsets of grid lines along an axis of the given length
    pub fn grid_lines(&self, extent: f32) -> impl Iterator<Item = f32> + '_ {
        let spacing = self.grid_spacing;
        std::iter::successors(Some(self.grid_offset), move |x| Some(x + spacing))
            .take_while(move |x| *x < extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn background() -> Background {
        let mut rng = Pcg32::seed_from_u64(9);
        Background::new(&mut rng, Viewport::new(800.0, 600.0), &Tuning::default())
    }

    #[test]
    fn test_stars_generated_in_viewport() {
        let bg = background();
        assert_eq!(bg.stars.len(), 120);
        for star in &bg.stars {
            assert!(star.pos.x >= 0.0 && star.pos.x < 800.0);
            assert!(star.pos.y >= 0.0 && star.pos.y < 600.0);
            assert!(star.radius >= 0.5 && star.radius < 2.3);
            assert!(star.alpha >= 0.3 && star.alpha < 0.8);
        }
    }

    #[test]
    fn test_hue_wraps_to_base() {
        let mut bg = background();
        bg.hue = 359.5;
        bg.update();
        assert_eq!(bg.hue, 290.0);
    }

    #[test]
    fn test_grid_offset_wraps_to_spacing() {
        let mut bg = background();
        bg.update();
        assert_eq!(bg.grid_offset, 60.0);
        bg.update();
        assert!((bg.grid_offset - 59.1).abs() < 1e-4);
    }

    #[test]
    fn test_stopped_background_keeps_state() {
        let mut bg = background();
        for _ in 0..10 {
            bg.update();
        }
        let hue = bg.hue;
        let offset = bg.grid_offset;
        let alpha = bg.stars[0].alpha;

        bg.set_running(false);
        for _ in 0..10 {
            bg.update();
        }
        assert_eq!(bg.hue, hue);
        assert_eq!(bg.grid_offset, offset);
        assert_eq!(bg.stars[0].alpha, alpha);

        bg.set_running(true);
        bg.update();
        assert!((bg.hue - (hue + 0.8)).abs() < 1e-4);
    }

    #[test]
    fn test_grid_lines_cover_extent() {
        let mut bg = background();
        bg.grid_offset = 30.0;
        let lines: Vec<f32> = bg.grid_lines(200.0).collect();
        assert_eq!(lines, vec![30.0, 90.0, 150.0]);
    }

    #[test]
    fn test_resize_keeps_stars() {
        let mut bg = background();
        let first = bg.stars[0].pos;
        bg.resize(Viewport::new(1920.0, 1080.0));
        assert_eq!(bg.stars[0].pos, first);
        assert_eq!(bg.viewport.width, 1920.0);
    }

    proptest! {
        #[test]
        fn prop_alpha_and_hue_stay_bounded(seed in any::<u64>(), ticks in 1usize..600) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut bg = Background::new(&mut rng, Viewport::new(640.0, 480.0), &Tuning::default());
            for _ in 0..ticks {
                bg.update();
                prop_assert!(bg.hue >= 290.0 && bg.hue <= 360.0);
                prop_assert!(bg.grid_offset > 0.0 && bg.grid_offset <= 60.0);
                for star in &bg.stars {
                    prop_assert!(star.alpha >= 0.3 && star.alpha <= 1.0);
                }
            }
        }
    }
}
