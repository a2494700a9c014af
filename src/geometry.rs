//! Canonical demo geometry.
//!
//! Plain vertex/index data for the shapes the rendering demos are built
//! from. The data is GPU-agnostic; feed it to [`Mesh::new`] together
//! with whatever textures the scene calls for.
//!
//! [`Mesh::new`]: crate::mesh::Mesh::new

use glam::{Vec2, Vec3, vec2, vec3};

use crate::vertex::Vertex;

/// Index pattern for a quad whose corners are pushed in
/// bottom-left, bottom-right, top-right, top-left order.
const QUAD_INDICES: [u32; 6] = [0, 1, 3, 3, 2, 1];

/// A unit quad in the XY plane, facing +Z: 4 vertices, 6 indices.
pub fn quad() -> (Vec<Vertex>, Vec<u32>) {
    let normal = vec3(0.0, 0.0, 1.0);
    let vertices = vec![
        Vertex::new(vec3(-0.5, -0.5, 0.0), normal, vec2(0.0, 0.0)),
        Vertex::new(vec3(0.5, -0.5, 0.0), normal, vec2(1.0, 0.0)),
        Vertex::new(vec3(0.5, 0.5, 0.0), normal, vec2(1.0, 1.0)),
        Vertex::new(vec3(-0.5, 0.5, 0.0), normal, vec2(0.0, 1.0)),
    ];
    (vertices, QUAD_INDICES.to_vec())
}

// Corners are listed bottom-left, bottom-right, top-right, top-left as
// seen from outside the cube, so bl->br x bl->tl is the outward normal.
const CUBE_FACES: [(Vec3, [Vec3; 4]); 6] = [
    (
        Vec3::new(0.0, 0.0, 1.0),
        [
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
        ],
    ),
    (
        Vec3::new(0.0, 0.0, -1.0),
        [
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
        ],
    ),
    (
        Vec3::new(1.0, 0.0, 0.0),
        [
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(0.5, 0.5, 0.5),
        ],
    ),
    (
        Vec3::new(-1.0, 0.0, 0.0),
        [
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, -0.5),
        ],
    ),
    (
        Vec3::new(0.0, 1.0, 0.0),
        [
            Vec3::new(-0.5, 0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
        ],
    ),
    (
        Vec3::new(0.0, -1.0, 0.0),
        [
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(-0.5, -0.5, 0.5),
        ],
    ),
];

const CORNER_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// A unit cube with per-face normals: 24 vertices, 36 indices.
pub fn cube() -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (face, (normal, corners)) in CUBE_FACES.iter().enumerate() {
        let base = (face * 4) as u32;
        for (corner, position) in corners.iter().enumerate() {
            vertices.push(Vertex::new(*position, *normal, CORNER_UVS[corner]));
        }
        indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    (vertices, indices)
}
