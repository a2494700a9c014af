//! The vertex layout shared by every mesh in the crate.
//!
//! The GPU pipeline reads vertices by byte offset, not by name, so the
//! layout is fixed at compile time and published as [`Vertex::ATTRIBUTES`].

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// A single mesh vertex: position, normal, texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coords: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, tex_coords: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coords,
        }
    }

    /// Byte stride between consecutive vertices.
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

    /// Attribute table consumed by [`GraphicsContext::vertex_attrib`].
    ///
    /// [`GraphicsContext::vertex_attrib`]: crate::context::GraphicsContext::vertex_attrib
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            location: 0,
            components: 3,
            offset: std::mem::offset_of!(Vertex, position) as i32,
        },
        VertexAttribute {
            location: 1,
            components: 3,
            offset: std::mem::offset_of!(Vertex, normal) as i32,
        },
        VertexAttribute {
            location: 2,
            components: 2,
            offset: std::mem::offset_of!(Vertex, tex_coords) as i32,
        },
    ];
}

/// One entry of the vertex attribute layout, in float components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: i32,
    pub offset: i32,
}
