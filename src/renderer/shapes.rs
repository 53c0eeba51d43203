//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in canvas units (origin top-left).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Filled axis-aligned rectangle, snapped to whole units for the pixel look
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let x0 = pos.x.floor();
    let y0 = pos.y.floor();
    let x1 = x0 + size.x;
    let y1 = y0 + size.y;

    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Same color with alpha scaled by `alpha`
pub fn faded(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_snaps_and_spans() {
        let verts = rect(Vec2::new(10.7, 20.2), Vec2::new(5.0, 3.0), [1.0; 4]);
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[0].position, [10.0, 20.0]);
        assert_eq!(verts[5].position, [15.0, 23.0]);
    }

    #[test]
    fn test_ring_stays_between_radii() {
        let center = Vec2::new(100.0, 100.0);
        let verts = ring(center, 11.0, 13.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 16 * 6);
        for v in &verts {
            let d = Vec2::from(v.position).distance(center);
            assert!((11.0 - 1e-3..=13.0 + 1e-3).contains(&d));
        }
    }

    #[test]
    fn test_faded_scales_alpha() {
        assert_eq!(faded([1.0, 0.5, 0.0, 1.0], 0.25), [1.0, 0.5, 0.0, 0.25]);
        assert_eq!(faded([1.0; 4], 2.0)[3], 1.0);
    }
}
