//! Render view of a session: one colored box per entity

use glam::Vec3;

use super::state::GameSession;
use crate::consts::BOUNDARY_THICKNESS;
use crate::hex_to_rgba;

/// What a box represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    Boundary,
    Fruit,
    Body,
    Head,
}

/// An axis-aligned box for the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxInstance {
    pub kind: BoxKind,
    pub center: Vec3,
    /// Full extents along x, y, z
    pub dims: Vec3,
    pub color: [f32; 4],
    /// Draw edges only
    pub wireframe: bool,
}

/// All boxes to draw, back to front: boundary, fruits, body (tail first), head
pub fn boxes(session: &GameSession) -> Vec<BoxInstance> {
    let config = &session.config;
    let sizes = session.sizes();
    let cube = Vec3::splat(sizes.cube_dim);

    let mut out = Vec::with_capacity(2 + session.fruits().len() + session.body().len());

    out.push(BoxInstance {
        kind: BoxKind::Boundary,
        center: config.origin,
        dims: Vec3::new(sizes.boundary_size, BOUNDARY_THICKNESS, sizes.boundary_size),
        color: hex_to_rgba(config.color_boundary),
        wireframe: true,
    });

    let fruit_color = hex_to_rgba(config.color_fruit);
    out.extend(session.fruits().iter().map(|fruit| BoxInstance {
        kind: BoxKind::Fruit,
        center: fruit.pos,
        dims: cube,
        color: fruit_color,
        wireframe: false,
    }));

    let body_color = hex_to_rgba(config.color_body);
    out.extend(session.body().iter().rev().map(|&pos| BoxInstance {
        kind: BoxKind::Body,
        center: pos,
        dims: cube,
        color: body_color,
        wireframe: false,
    }));

    if let Some(head) = session.head() {
        out.push(BoxInstance {
            kind: BoxKind::Head,
            center: head,
            dims: cube,
            color: hex_to_rgba(config.color_head),
            wireframe: false,
        });
    }

    out
}
