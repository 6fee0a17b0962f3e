//! Shape generation for 2D primitives
//!
//! All builders append triangle-list vertices to an existing buffer, in
//! playfield pixel coordinates.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, left: f32, top: f32, width: f32, height: f32, color: [f32; 4]) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    let (r, b) = (left + width, top + height);
    out.extend_from_slice(&[
        Vertex::new(left, top, color),
        Vertex::new(r, top, color),
        Vertex::new(left, b, color),
        Vertex::new(left, b, color),
        Vertex::new(r, top, color),
        Vertex::new(r, b, color),
    ]);
}

/// Filled ellipse, optionally rotated by `angle` radians around its center
pub fn ellipse(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radii: Vec2,
    angle: f32,
    color: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(3);
    let rot = Vec2::from_angle(angle);
    let point = |i: u32| {
        let theta = i as f32 / segments as f32 * TAU;
        let local = Vec2::new(radii.x * theta.cos(), radii.y * theta.sin());
        center + rot.rotate(local)
    };

    out.reserve((segments * 3) as usize);
    for i in 0..segments {
        let a = point(i);
        let b = point(i + 1);
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(a.x, a.y, color));
        out.push(Vertex::new(b.x, b.y, color));
    }
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    ellipse(out, center, Vec2::splat(radius), 0.0, color, segments);
}

/// Filled triangle
pub fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.extend_from_slice(&[
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]);
}
