//! Scene building: game state to triangle lists, one list per layer

use glam::Vec2;

use super::shapes::{circle, glow_rect, hsla, line};
use super::vertex::{Vertex, colors};
use crate::background::Background;
use crate::sim::{FallingField, GameSession, Paddle};

const STAR_SEGMENTS: u32 = 8;
const GRID_LINE_WIDTH: f32 = 1.7;
const GRID_GLOW_WIDTH: f32 = 8.0;
const PADDLE_BLUR: f32 = 18.0;
const OBJECT_BLUR: f32 = 22.0;
const GLOW_LAYERS: u32 = 4;

/// Stars and the scrolling grid
pub fn draw_background(background: &Background, out: &mut Vec<Vertex>) {
    let hue = background.hue;
    let (w, h) = (background.viewport.width, background.viewport.height);

    for star in &background.stars {
        let color = hsla(hue, 1.0, 0.75, star.alpha);
        circle(out, star.pos, star.radius, color, STAR_SEGMENTS);
    }

    let glow = hsla(hue, 1.0, 0.8, 0.12);
    let stroke = hsla(hue, 0.9, 0.7, 1.0);
    for x in background.grid_lines(w) {
        line(out, Vec2::new(x, 0.0), Vec2::new(x, h), GRID_GLOW_WIDTH, glow);
        line(out, Vec2::new(x, 0.0), Vec2::new(x, h), GRID_LINE_WIDTH, stroke);
    }
    for y in background.grid_lines(h) {
        line(out, Vec2::new(0.0, y), Vec2::new(w, y), GRID_GLOW_WIDTH, glow);
        line(out, Vec2::new(0.0, y), Vec2::new(w, y), GRID_LINE_WIDTH, stroke);
    }
}

/// Paddle, stretched horizontally by its bounce scale around its center
pub fn draw_paddle(paddle: &Paddle, out: &mut Vec<Vertex>) {
    let bounds = paddle.bounds();
    let half = Vec2::new(paddle.width * paddle.bounce_scale, paddle.height) / 2.0;
    glow_rect(
        out,
        bounds.center(),
        half,
        0.0,
        colors::NEON_PINK,
        colors::PADDLE_GLOW,
        PADDLE_BLUR,
        GLOW_LAYERS,
    );
}

/// Every active falling object, rotated, with its pulsing glow
pub fn draw_falling_objects(field: &FallingField, out: &mut Vec<Vertex>) {
    for object in &field.objects {
        let glow_alpha = 0.65 + 0.35 * object.glow.clamp(0.0, 1.0);
        let glow = [
            colors::OBJECT_GLOW[0],
            colors::OBJECT_GLOW[1],
            colors::OBJECT_GLOW[2],
            glow_alpha,
        ];
        glow_rect(
            out,
            object.bounds().center(),
            Vec2::splat(object.size / 2.0),
            object.rotation,
            colors::NEON_PINK,
            glow,
            OBJECT_BLUR,
            GLOW_LAYERS,
        );
    }
}

/// Gameplay layer
pub fn draw_foreground(session: &GameSession, out: &mut Vec<Vertex>) {
    draw_paddle(&session.paddle, out);
    draw_falling_objects(&session.field, out);
}
