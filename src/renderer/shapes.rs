//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Outline of a rounded rectangle, clockwise from the top-left corner arc
fn rounded_rect_outline(min: Vec2, size: Vec2, radius: f32, corner_segments: u32) -> Vec<Vec2> {
    let r = radius.min(size.x / 2.0).min(size.y / 2.0).max(0.0);
    let max = min + size;
    // Corner centers paired with the angle each quarter arc starts at
    let corners = [
        (Vec2::new(min.x + r, min.y + r), PI),
        (Vec2::new(max.x - r, min.y + r), PI + FRAC_PI_2),
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), FRAC_PI_2),
    ];

    let steps = corner_segments.max(1);
    let mut outline = Vec::with_capacity(((steps + 1) * 4) as usize);
    for (center, start) in corners {
        for i in 0..=steps {
            let theta = start + FRAC_PI_2 * (i as f32 / steps as f32);
            outline.push(center + Vec2::new(theta.cos(), theta.sin()) * r);
        }
    }
    outline
}

/// Generate vertices for a filled rounded rectangle (fan from its center)
pub fn rounded_rect(
    min: Vec2,
    size: Vec2,
    radius: f32,
    color: [f32; 4],
    corner_segments: u32,
) -> Vec<Vertex> {
    let center = min + size / 2.0;
    let outline = rounded_rect_outline(min, size, radius, corner_segments);

    let mut vertices = Vec::with_capacity(outline.len() * 3);
    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

/// Soft halo approximated by stacked translucent circles
pub fn circle_glow(
    center: Vec2,
    radius: f32,
    blur: f32,
    color: [f32; 4],
    layers: u32,
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for layer in (1..=layers).rev() {
        let t = layer as f32 / layers as f32;
        let alpha = color[3] * (1.0 - t) * 0.35 + 0.02;
        let c = [color[0], color[1], color[2], alpha];
        vertices.extend(circle(center, radius + blur * t, c, segments));
    }
    vertices
}

/// Soft halo around a rounded rectangle
pub fn rounded_rect_glow(
    min: Vec2,
    size: Vec2,
    radius: f32,
    blur: f32,
    color: [f32; 4],
    layers: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for layer in (1..=layers).rev() {
        let t = layer as f32 / layers as f32;
        let grow = blur * t;
        let alpha = color[3] * (1.0 - t) * 0.35 + 0.02;
        let c = [color[0], color[1], color[2], alpha];
        vertices.extend(rounded_rect(
            min - Vec2::splat(grow),
            size + Vec2::splat(grow * 2.0),
            radius + grow,
            c,
            6,
        ));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 5.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 48);
    }

    #[test]
    fn test_rounded_rect_stays_in_bounds() {
        let min = Vec2::new(150.0, 370.0);
        let size = Vec2::new(100.0, 20.0);
        let verts = rounded_rect(min, size, 10.0, [1.0; 4], 8);
        assert!(!verts.is_empty());
        for v in &verts {
            assert!(v.position[0] >= min.x - 1e-3 && v.position[0] <= min.x + size.x + 1e-3);
            assert!(v.position[1] >= min.y - 1e-3 && v.position[1] <= min.y + size.y + 1e-3);
        }
    }

    #[test]
    fn test_no_glow_layers_no_vertices() {
        assert!(circle_glow(Vec2::ZERO, 10.0, 20.0, [1.0; 4], 0, 16).is_empty());
    }
}
