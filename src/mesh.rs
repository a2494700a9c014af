//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing textured, indexed
//! triangle geometry on the GPU side, together with the [`TextureRole`] /
//! [`TextureBinding`] pair that describes which textures a mesh samples
//! and under which material parameter names.

use std::collections::HashMap;
use std::sync::Arc;

use crate::context::{BufferKind, GraphicsContext};
use crate::error::Error;
use crate::material::Material;
use crate::vertex::Vertex;

/// What a bound texture contributes to the material.
///
/// Roles drive the sampler parameter names derived during [`Mesh::draw`]:
/// the first diffuse binding becomes `material.diffuse1`, the second
/// `material.diffuse2`, and so on, counted per role in sequence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureRole {
    Diffuse,
    Specular,
    Normal,
    Height,
    /// A role outside the built-in naming convention. It is still bound to
    /// a unit; shaders that do not declare the derived parameter simply
    /// never sample it.
    Custom(&'static str),
}

impl TextureRole {
    /// The role tag as it appears in sampler parameter names.
    pub fn name(&self) -> &'static str {
        match self {
            TextureRole::Diffuse => "diffuse",
            TextureRole::Specular => "specular",
            TextureRole::Normal => "normal",
            TextureRole::Height => "height",
            TextureRole::Custom(name) => name,
        }
    }
}

/// A non-owning reference to a GPU texture plus its material role.
///
/// Textures are shared between meshes, so a binding carries only the raw
/// context handle; whoever owns the texture must keep it alive for as long
/// as meshes referencing it are drawn.
pub struct TextureBinding<C: GraphicsContext> {
    pub texture: C::TextureId,
    pub role: TextureRole,
}

impl<C: GraphicsContext> TextureBinding<C> {
    pub fn new(texture: C::TextureId, role: TextureRole) -> Self {
        Self { texture, role }
    }
}

impl<C: GraphicsContext> Clone for TextureBinding<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: GraphicsContext> Copy for TextureBinding<C> {}

/// Indexed triangle geometry resident on the GPU.
///
/// A mesh is built once from fully-formed vertex, index and texture data,
/// drawn zero or more times per frame, and releases its vertex array and
/// buffer objects when dropped. The vertex layout is fixed
/// ([`Vertex::ATTRIBUTES`]) and the topology is immutable after
/// construction.
pub struct Mesh<C: GraphicsContext> {
    gl: Arc<C>,
    vertex_array: C::VertexArray,
    vertex_buffer: C::Buffer,
    index_buffer: C::Buffer,
    index_count: usize,
    textures: Vec<TextureBinding<C>>,
}

impl<C: GraphicsContext> Mesh<C> {
    /// Creates a new mesh from the given vertex, index and texture data.
    ///
    /// The index sequence must describe a whole number of triangles and
    /// every index must reference a valid vertex slot; both are checked
    /// before any GPU allocation happens. Buffers are allocated and
    /// uploaded eagerly, and a failed allocation releases whatever was
    /// already allocated before returning [`Error::Allocation`].
    pub fn new(
        gl: &Arc<C>,
        vertices: &[Vertex],
        indices: &[u32],
        textures: Vec<TextureBinding<C>>,
    ) -> Result<Self, Error> {
        if indices.len() % 3 != 0 {
            return Err(Error::PartialTriangle(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(Error::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        let vertex_array = gl.create_vertex_array().map_err(Error::Allocation)?;
        let vertex_buffer = match gl.create_buffer() {
            Ok(buffer) => buffer,
            Err(e) => {
                gl.delete_vertex_array(vertex_array);
                return Err(Error::Allocation(e));
            }
        };
        let index_buffer = match gl.create_buffer() {
            Ok(buffer) => buffer,
            Err(e) => {
                gl.delete_buffer(vertex_buffer);
                gl.delete_vertex_array(vertex_array);
                return Err(Error::Allocation(e));
            }
        };

        gl.bind_vertex_array(Some(vertex_array));
        gl.bind_buffer(BufferKind::Vertex, Some(vertex_buffer));
        gl.buffer_data(BufferKind::Vertex, bytemuck::cast_slice(vertices));
        gl.bind_buffer(BufferKind::Index, Some(index_buffer));
        gl.buffer_data(BufferKind::Index, bytemuck::cast_slice(indices));

        for attribute in Vertex::ATTRIBUTES {
            gl.vertex_attrib(
                attribute.location,
                attribute.components,
                Vertex::STRIDE,
                attribute.offset,
            );
        }

        gl.bind_vertex_array(None);
        gl.bind_buffer(BufferKind::Vertex, None);
        gl.bind_buffer(BufferKind::Index, None);

        log::debug!(
            "uploaded mesh: {} vertices, {} indices, {} textures",
            vertices.len(),
            indices.len(),
            textures.len()
        );

        Ok(Self {
            gl: Arc::clone(gl),
            vertex_array,
            vertex_buffer,
            index_buffer,
            index_count: indices.len(),
            textures,
        })
    }

    /// Draws the mesh with the given material.
    ///
    /// The material must already be active. Each texture binding is bound
    /// to its own unit, starting at unit 0 and following sequence order,
    /// and the matching `material.<role><n>` sampler parameter is pointed
    /// at that unit. The per-role counters are rebuilt on every call, so
    /// repeated draws derive identical names. Afterwards the active
    /// texture unit is restored to 0 and the vertex array is unbound,
    /// leaving no state behind for the next mesh.
    pub fn draw<M: Material>(&self, material: &M) {
        let mut role_counts: HashMap<&str, u32> = HashMap::new();
        for (unit, binding) in self.textures.iter().enumerate() {
            let count = role_counts.entry(binding.role.name()).or_insert(0);
            *count += 1;
            let name = format!("material.{}{}", binding.role.name(), count);

            self.gl.active_texture_unit(unit as u32);
            self.gl.bind_texture(Some(binding.texture));
            material.set_sampler(&name, unit as i32);
        }
        self.gl.active_texture_unit(0);

        self.gl.bind_vertex_array(Some(self.vertex_array));
        self.gl.draw_triangles(self.index_count as i32);
        self.gl.bind_vertex_array(None);
    }

    /// Returns the amount of indices used in the mesh.
    pub fn index_count(&self) -> usize {
        self.index_count
    }

    /// The texture bindings in unit order.
    pub fn textures(&self) -> &[TextureBinding<C>] {
        &self.textures
    }
}

impl<C: GraphicsContext> Drop for Mesh<C> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.vertex_buffer);
        self.gl.delete_buffer(self.index_buffer);
        self.gl.delete_vertex_array(self.vertex_array);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_follow_the_material_convention() {
        assert_eq!(TextureRole::Diffuse.name(), "diffuse");
        assert_eq!(TextureRole::Specular.name(), "specular");
        assert_eq!(TextureRole::Custom("shadow").name(), "shadow");
    }
}
