//! The graphics context seam.
//!
//! [`Mesh`] talks to the GPU exclusively through the [`GraphicsContext`]
//! trait: buffer allocation and upload, offset/stride vertex attribute
//! declaration, texture binding by unit index and indexed draw submission.
//! The production implementation is [`glow::Context`]; the test suite
//! substitutes a recording mock.
//!
//! [`Mesh`]: crate::mesh::Mesh

use glow::HasContext;

/// The two buffer targets a mesh uploads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Per-vertex attribute data.
    Vertex,
    /// Triangle-list connectivity.
    Index,
}

/// Minimal GPU surface needed to build and draw indexed triangle meshes.
///
/// All operations are context-thread affine, mirroring the underlying API:
/// nothing here may be called from a thread that does not own the context.
pub trait GraphicsContext {
    type Buffer: Copy + PartialEq + std::fmt::Debug;
    type VertexArray: Copy + PartialEq + std::fmt::Debug;
    type TextureId: Copy + PartialEq + std::fmt::Debug;

    /// Allocates a vertex array object.
    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;

    /// Allocates a buffer object.
    fn create_buffer(&self) -> Result<Self::Buffer, String>;

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<Self::Buffer>);

    /// Uploads `data` to the buffer currently bound to `kind`. The upload
    /// is static; meshes never rewrite their buffers after construction.
    fn buffer_data(&self, kind: BufferKind, data: &[u8]);

    /// Declares one float vertex attribute on the bound vertex array.
    fn vertex_attrib(&self, location: u32, components: i32, stride: i32, offset: i32);

    /// Selects the active texture unit.
    fn active_texture_unit(&self, unit: u32);

    /// Binds a 2D texture to the active unit.
    fn bind_texture(&self, texture: Option<Self::TextureId>);

    /// Submits one indexed triangle-list draw over `index_count` indices.
    fn draw_triangles(&self, index_count: i32);

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    fn delete_buffer(&self, buffer: Self::Buffer);
}

impl GraphicsContext for glow::Context {
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type TextureId = glow::Texture;

    fn create_vertex_array(&self) -> Result<glow::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn create_buffer(&self) -> Result<glow::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<glow::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array) }
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<glow::Buffer>) {
        unsafe { HasContext::bind_buffer(self, target(kind), buffer) }
    }

    fn buffer_data(&self, kind: BufferKind, data: &[u8]) {
        unsafe { self.buffer_data_u8_slice(target(kind), data, glow::STATIC_DRAW) }
    }

    fn vertex_attrib(&self, location: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, stride, offset);
            self.enable_vertex_attrib_array(location);
        }
    }

    fn active_texture_unit(&self, unit: u32) {
        unsafe { self.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture(&self, texture: Option<glow::Texture>) {
        unsafe { HasContext::bind_texture(self, glow::TEXTURE_2D, texture) }
    }

    fn draw_triangles(&self, index_count: i32) {
        unsafe { self.draw_elements(glow::TRIANGLES, index_count, glow::UNSIGNED_INT, 0) }
    }

    fn delete_vertex_array(&self, vertex_array: glow::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vertex_array) }
    }

    fn delete_buffer(&self, buffer: glow::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }
}

fn target(kind: BufferKind) -> u32 {
    match kind {
        BufferKind::Vertex => glow::ARRAY_BUFFER,
        BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}
