//! Shape generation for 2D primitives
//!
//! Everything is tessellated into triangle lists in pixel space (origin top
//! left, y down). Glow is faked with translucent outer layers.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Convert HSL (degrees, 0-1, 0-1) plus alpha to linear RGBA
pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, alpha]
}

/// Same color with a different alpha
#[inline]
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Push a quad given its corners in order
pub fn quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, c, d, a] {
        out.push(Vertex::new(p.x, p.y, color));
    }
}

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    let max = min + size;
    quad(
        out,
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        color,
    );
}

/// Rectangle rotated about its center
pub fn rotated_rect(out: &mut Vec<Vertex>, center: Vec2, half: Vec2, angle: f32, color: [f32; 4]) {
    let rot = Vec2::from_angle(angle);
    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|corner| center + rot.rotate(corner));
    quad(out, corners, color);
}

/// Rotated rectangle with a soft halo of `layers` translucent outer rings
#[allow(clippy::too_many_arguments)]
pub fn glow_rect(
    out: &mut Vec<Vertex>,
    center: Vec2,
    half: Vec2,
    angle: f32,
    color: [f32; 4],
    glow: [f32; 4],
    blur: f32,
    layers: u32,
) {
    for i in (1..=layers).rev() {
        let t = i as f32 / layers as f32;
        let grow = Vec2::splat(blur * t);
        let alpha = glow[3] * (1.0 - t) * 0.5 + glow[3] * 0.08;
        rotated_rect(out, center, half + grow, angle, with_alpha(glow, alpha));
    }
    rotated_rect(out, center, half, angle, color);
}

/// Thick line segment
pub fn line(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(out, [a + perp, b + perp, b - perp, a - perp], color);
}

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-3)
    }

    #[test]
    fn test_hsla_primaries() {
        assert!(close(hsla(0.0, 1.0, 0.5, 1.0), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hsla(120.0, 1.0, 0.5, 0.5), [0.0, 1.0, 0.0, 0.5]));
        assert!(close(hsla(240.0, 1.0, 0.5, 1.0), [0.0, 0.0, 1.0, 1.0]));
        assert!(close(hsla(360.0, 1.0, 0.5, 1.0), [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_hsla_violet_range() {
        // Background hues stay in the violet/magenta band: red and blue dominate green
        for hue in [290.0, 320.0, 359.0] {
            let [r, g, b, _] = hsla(hue, 1.0, 0.75, 1.0);
            assert!(r >= g && b >= g, "hue {hue} -> {r} {g} {b}");
        }
    }

    #[test]
    fn test_rect_vertices() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), [1.0; 4]);
        assert_eq!(out.len(), 6);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        assert!(xs.iter().all(|x| *x == 10.0 || *x == 40.0));
    }

    #[test]
    fn test_rotated_rect_keeps_center() {
        let mut out = Vec::new();
        let center = Vec2::new(50.0, 50.0);
        rotated_rect(&mut out, center, Vec2::splat(12.0), 0.7, [1.0; 4]);
        let sum: Vec2 = out
            .iter()
            .map(|v| Vec2::from(v.position))
            .fold(Vec2::ZERO, |acc, p| acc + p);
        // Each quad repeats two corners, but symmetric pairs still average to the center
        let avg = sum / out.len() as f32;
        assert!((avg - center).length() < 1e-3);
    }

    #[test]
    fn test_circle_vertex_count() {
        let mut out = Vec::new();
        circle(&mut out, Vec2::ZERO, 2.0, [1.0; 4], 8);
        assert_eq!(out.len(), 24);
    }

    #[test]
    fn test_glow_rect_layers() {
        let mut out = Vec::new();
        glow_rect(
            &mut out,
            Vec2::ZERO,
            Vec2::splat(10.0),
            0.0,
            [1.0; 4],
            [1.0, 0.4, 1.0, 0.8],
            20.0,
            3,
        );
        assert_eq!(out.len(), 4 * 6);
        // Core drawn last and opaque
        assert_eq!(out.last().map(|v| v.color[3]), Some(1.0));
    }
}
