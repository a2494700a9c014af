//! Module to work with OpenGL framebuffers.
//!
//! This module provides the [`Framebuffer`] struct for off-screen
//! rendering. The color attachment is an ordinary [`Texture`], so it can
//! be handed to a mesh as a diffuse binding and inspected on a screen
//! quad (see [`crate::geometry::quad`]), which is how attachment
//! debugging works here.

use std::sync::Arc;

use glow::HasContext;

use crate::error::Error;
use crate::mesh::{TextureBinding, TextureRole};
use crate::texture::Texture;

/// Color attachment storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    /// Four 8-bit channels (RGBA8).
    Rgba8,
    /// Single 32-bit float red channel (R32F).
    RedFloat,
}

/// Represents an OpenGL framebuffer with a color attachment and an
/// optional depth attachment.
pub struct Framebuffer {
    gl: Arc<glow::Context>,
    fbo: glow::Framebuffer,
    color_tex: Texture,
    depth_tex: Option<Texture>,
}

impl Framebuffer {
    /// Creates a new framebuffer with the specified size.
    ///
    /// Fails with [`Error::Allocation`] if the context cannot allocate
    /// the underlying objects and with [`Error::IncompleteFramebuffer`]
    /// if the completeness check does not pass.
    pub fn new(
        gl: &Arc<glow::Context>,
        width: i32,
        height: i32,
        use_depth: bool,
        format: ColorFormat,
    ) -> Result<Self, Error> {
        unsafe {
            let fbo = gl.create_framebuffer().map_err(Error::Allocation)?;
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));

            let color_tex = {
                let tex = gl.create_texture().map_err(Error::Allocation)?;
                gl.bind_texture(glow::TEXTURE_2D, Some(tex));

                let (internal, layout, ty) = match format {
                    ColorFormat::Rgba8 => (glow::RGBA8 as i32, glow::RGBA, glow::UNSIGNED_BYTE),
                    ColorFormat::RedFloat => (glow::R32F as i32, glow::RED, glow::FLOAT),
                };

                gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    internal,
                    width,
                    height,
                    0,
                    layout,
                    ty,
                    glow::PixelUnpackData::Slice(None),
                );

                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MIN_FILTER,
                    glow::LINEAR as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MAG_FILTER,
                    glow::LINEAR as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_S,
                    glow::CLAMP_TO_EDGE as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_T,
                    glow::CLAMP_TO_EDGE as i32,
                );

                gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::COLOR_ATTACHMENT0,
                    glow::TEXTURE_2D,
                    Some(tex),
                    0,
                );

                gl.bind_texture(glow::TEXTURE_2D, None);
                tex
            };

            let depth_tex = if use_depth {
                let tex = gl.create_texture().map_err(Error::Allocation)?;
                gl.bind_texture(glow::TEXTURE_2D, Some(tex));

                gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    glow::DEPTH_COMPONENT24 as i32,
                    width,
                    height,
                    0,
                    glow::DEPTH_COMPONENT,
                    glow::UNSIGNED_INT,
                    glow::PixelUnpackData::Slice(None),
                );

                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MIN_FILTER,
                    glow::NEAREST as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MAG_FILTER,
                    glow::NEAREST as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_S,
                    glow::CLAMP_TO_EDGE as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_T,
                    glow::CLAMP_TO_EDGE as i32,
                );

                gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::DEPTH_ATTACHMENT,
                    glow::TEXTURE_2D,
                    Some(tex),
                    0,
                );

                gl.bind_texture(glow::TEXTURE_2D, None);
                Some(tex)
            } else {
                None
            };

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                gl.delete_texture(color_tex);
                if let Some(tex) = depth_tex {
                    gl.delete_texture(tex);
                }
                gl.delete_framebuffer(fbo);
                return Err(Error::IncompleteFramebuffer(status_name(status)));
            }

            gl.bind_framebuffer(glow::FRAMEBUFFER, None);

            log::debug!(
                "created {width}x{height} framebuffer (depth: {use_depth}, format: {format:?})"
            );

            Ok(Self {
                gl: gl.clone(),
                fbo,
                color_tex: Texture {
                    gl: gl.clone(),
                    id: color_tex,
                    width: width as u32,
                    height: height as u32,
                },
                depth_tex: depth_tex.map(|tex| Texture {
                    gl: gl.clone(),
                    id: tex,
                    width: width as u32,
                    height: height as u32,
                }),
            })
        }
    }

    /// Binds the framebuffer for rendering.
    pub fn bind(&self) {
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
        }
    }

    /// Unbinds the framebuffer, reverting to the default framebuffer.
    pub fn unbind(gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    /// Returns the color texture of the framebuffer.
    pub fn texture(&self) -> &Texture {
        &self.color_tex
    }

    /// Returns the depth texture of the framebuffer, if it exists.
    pub fn depth_texture(&self) -> Option<&Texture> {
        self.depth_tex.as_ref()
    }

    /// A diffuse binding of the color attachment, ready to draw on a
    /// debug quad.
    pub fn color_binding(&self) -> TextureBinding<glow::Context> {
        self.color_tex.binding(TextureRole::Diffuse)
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_framebuffer(self.fbo);
        }
    }
}

fn status_name(status: u32) -> String {
    match status {
        glow::FRAMEBUFFER_UNDEFINED => "undefined".to_string(),
        glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => "incomplete attachment".to_string(),
        glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => "missing attachment".to_string(),
        glow::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => "inconsistent multisampling".to_string(),
        glow::FRAMEBUFFER_UNSUPPORTED => "unsupported format combination".to_string(),
        other => format!("status 0x{other:x}"),
    }
}
