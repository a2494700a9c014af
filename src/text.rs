//! Glyph-atlas text meshes.
//!
//! A [`GlyphAtlas`] describes a fixed-grid bitmap font texture: which
//! character the grid starts at, how many glyphs sit on a row and how big
//! one glyph cell is. From that it computes per-glyph UV rectangles,
//! measures text and lays a string out as one textured quad per glyph,
//! producing a [`Mesh`] that samples the atlas as its diffuse texture.
//!
//! Coordinates are screen-style: the y axis grows downward and a newline
//! advances one `font_size` down. Characters outside the atlas are
//! skipped, matching how permissive the rest of the material naming is.

use std::sync::Arc;

use glam::{Vec2, vec2, vec3};
use serde::Deserialize;

use crate::context::GraphicsContext;
use crate::error::Error;
use crate::mesh::{Mesh, TextureBinding, TextureRole};
use crate::vertex::Vertex;

/// The grid parameters of a glyph atlas texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GlyphMetrics {
    /// Character stored in the top-left cell; the grid continues in
    /// code-point order, row-major.
    pub first_char: char,
    pub chars_per_row: u32,
    /// Width of one glyph cell in texels.
    pub glyph_width: u32,
    /// Height of one glyph cell in texels.
    pub glyph_height: u32,
}

impl GlyphMetrics {
    /// Parses a JSON atlas descriptor, e.g.
    /// `{"first_char": " ", "chars_per_row": 16, "glyph_width": 7, "glyph_height": 12}`.
    pub fn from_json(s: &str) -> Result<Self, Error> {
        serde_json::from_str(s).map_err(|e| Error::AtlasDescriptor(e.to_string()))
    }
}

/// A fixed-grid bitmap font laid over an atlas texture of known size.
pub struct GlyphAtlas {
    metrics: GlyphMetrics,
    atlas_width: u32,
    atlas_height: u32,
}

impl GlyphAtlas {
    pub fn new(metrics: GlyphMetrics, atlas_width: u32, atlas_height: u32) -> Self {
        Self {
            metrics,
            atlas_width,
            atlas_height,
        }
    }

    /// Gets the UV rectangle for the given character, top-left and
    /// bottom-right corners. Returns `None` for characters outside the
    /// atlas grid.
    pub fn glyph_uv(&self, ch: char) -> Option<([f32; 2], [f32; 2])> {
        let glyph_index = (ch as u32).checked_sub(self.metrics.first_char as u32)?;

        let rows = self.atlas_height / self.metrics.glyph_height;
        if glyph_index >= self.metrics.chars_per_row * rows {
            return None; // glyph not in atlas
        }

        let col = glyph_index % self.metrics.chars_per_row;
        let row = glyph_index / self.metrics.chars_per_row;

        let u0 = (col * self.metrics.glyph_width) as f32 / self.atlas_width as f32;
        let v0 = (row * self.metrics.glyph_height) as f32 / self.atlas_height as f32;
        let u1 = ((col + 1) * self.metrics.glyph_width) as f32 / self.atlas_width as f32;
        let v1 = ((row + 1) * self.metrics.glyph_height) as f32 / self.atlas_height as f32;

        Some(([u0, v0], [u1, v1]))
    }

    /// Calculates the width and height of the given text string at the
    /// specified font size.
    pub fn text_size(&self, text: &str, font_size: f32) -> Vec2 {
        let glyph_advance =
            self.metrics.glyph_width as f32 * font_size / self.metrics.glyph_height as f32;

        let mut max_width = 0f32;
        let mut current_width = 0.0;
        let mut lines = 1;

        for ch in text.chars() {
            if ch == '\n' {
                max_width = max_width.max(current_width);
                current_width = 0.0;
                lines += 1;
                continue;
            }

            if self.glyph_uv(ch).is_some() {
                current_width += glyph_advance;
            }
        }

        max_width = max_width.max(current_width);
        vec2(max_width, lines as f32 * font_size)
    }

    /// Lays the text out as one quad per glyph, starting at `origin`
    /// (top-left of the first line) with the given font size.
    pub fn layout(&self, text: &str, origin: Vec2, font_size: f32) -> (Vec<Vertex>, Vec<u32>) {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        let normal = vec3(0.0, 0.0, 1.0);
        let h = font_size;
        let w = self.metrics.glyph_width as f32 * font_size / self.metrics.glyph_height as f32;

        let mut x = origin.x;
        let mut y = origin.y;
        let mut glyph = 0;

        for ch in text.chars() {
            if ch == '\n' {
                x = origin.x;
                y += font_size;
                continue;
            }

            let Some((uv0, uv1)) = self.glyph_uv(ch) else {
                log::trace!("glyph {ch:?} not in atlas, skipping");
                continue;
            };

            let idx = glyph * 4;

            vertices.push(Vertex::new(
                vec3(x, y + h, 0.0),
                normal,
                vec2(uv0[0], uv1[1]),
            ));
            vertices.push(Vertex::new(
                vec3(x + w, y + h, 0.0),
                normal,
                vec2(uv1[0], uv1[1]),
            ));
            vertices.push(Vertex::new(vec3(x + w, y, 0.0), normal, vec2(uv1[0], uv0[1])));
            vertices.push(Vertex::new(vec3(x, y, 0.0), normal, vec2(uv0[0], uv0[1])));

            indices.extend_from_slice(&[idx, idx + 1, idx + 2, idx, idx + 2, idx + 3]);

            x += w;
            glyph += 1;
        }

        (vertices, indices)
    }

    /// Builds a mesh for rendering the given text string, carrying the
    /// atlas texture as its single diffuse binding (sampler parameter
    /// `material.diffuse1`).
    pub fn build_mesh<C: GraphicsContext>(
        &self,
        gl: &Arc<C>,
        text: &str,
        origin: Vec2,
        font_size: f32,
        atlas_texture: C::TextureId,
    ) -> Result<Mesh<C>, Error> {
        let (vertices, indices) = self.layout(text, origin, font_size);
        Mesh::new(
            gl,
            &vertices,
            &indices,
            vec![TextureBinding::new(atlas_texture, TextureRole::Diffuse)],
        )
    }
}
