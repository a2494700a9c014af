//! Error types for GPU resource creation and mesh validation.

use thiserror::Error;

/// Errors surfaced by mesh construction and the OpenGL-backed wrappers.
#[derive(Debug, Error)]
pub enum Error {
    /// The graphics context could not allocate a buffer, vertex array or
    /// texture object.
    #[error("graphics resource allocation failed: {0}")]
    Allocation(String),

    /// The index sequence does not describe a whole number of triangles.
    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),

    /// An index references a vertex slot past the end of the vertex buffer.
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// The framebuffer failed its completeness check.
    #[error("framebuffer incomplete: {0}")]
    IncompleteFramebuffer(String),

    /// A glyph atlas descriptor could not be parsed.
    #[error("invalid atlas descriptor: {0}")]
    AtlasDescriptor(String),
}
