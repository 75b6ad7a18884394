//! Shape generation for box footprints
//!
//! Vertices are emitted in ground-plane world coordinates (x, z); the render
//! state maps them to clip space.

use glam::Vec2;

use super::vertex::Vertex;
use crate::sim::{BoxInstance, GameSession, boxes};

/// Edge thickness for wireframe boxes, in world units
pub const EDGE_WIDTH: f32 = 2.0;

/// Two triangles covering the axis-aligned rectangle `min..max`
fn quad(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a box seen from above
pub fn box_top_down(instance: &BoxInstance) -> Vec<Vertex> {
    let center = Vec2::new(instance.center.x, instance.center.z);
    let half = Vec2::new(instance.dims.x, instance.dims.z) * 0.5;
    let min = center - half;
    let max = center + half;
    let color = instance.color;

    if !instance.wireframe {
        return quad(min, max, color).to_vec();
    }

    // Four edge strips, straddling the outline
    let w = EDGE_WIDTH * 0.5;
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(quad(
        Vec2::new(min.x - w, min.y - w),
        Vec2::new(max.x + w, min.y + w),
        color,
    ));
    vertices.extend(quad(
        Vec2::new(min.x - w, max.y - w),
        Vec2::new(max.x + w, max.y + w),
        color,
    ));
    vertices.extend(quad(
        Vec2::new(min.x - w, min.y + w),
        Vec2::new(min.x + w, max.y - w),
        color,
    ));
    vertices.extend(quad(
        Vec2::new(max.x - w, min.y + w),
        Vec2::new(max.x + w, max.y - w),
        color,
    ));
    vertices
}

/// Vertices for the whole session, in draw order
pub fn scene_vertices(session: &GameSession) -> Vec<Vertex> {
    boxes(session).iter().flat_map(box_top_down).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BoxKind;
    use glam::Vec3;

    fn cube(center: Vec3, wireframe: bool) -> BoxInstance {
        BoxInstance {
            kind: BoxKind::Fruit,
            center,
            dims: Vec3::splat(20.0),
            color: [1.0, 0.0, 0.0, 1.0],
            wireframe,
        }
    }

    #[test]
    fn test_filled_footprint() {
        let vertices = box_top_down(&cube(Vec3::new(100.0, 0.0, -50.0), false));
        assert_eq!(vertices.len(), 6);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let zs: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 90.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 110.0);
        assert_eq!(zs.iter().cloned().fold(f32::MAX, f32::min), -60.0);
        assert_eq!(zs.iter().cloned().fold(f32::MIN, f32::max), -40.0);
    }

    #[test]
    fn test_wireframe_outline() {
        let vertices = box_top_down(&cube(Vec3::ZERO, true));
        assert_eq!(vertices.len(), 24);
        // Nothing covers the middle of the box
        let covers_center = vertices.chunks(6).any(|q| {
            let min_x = q.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
            let max_x = q.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
            let min_z = q.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
            let max_z = q.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
            min_x < 0.0 && max_x > 0.0 && min_z < 0.0 && max_z > 0.0
        });
        assert!(!covers_center);
    }
}
