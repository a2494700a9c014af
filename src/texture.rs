//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct, an owning wrapper around a
//! GPU texture. Meshes reference textures through non-owning
//! [`TextureBinding`]s minted by [`Texture::binding`], so one texture can
//! back any number of meshes.

use std::sync::Arc;

use glow::HasContext;
use image::{DynamicImage, GenericImageView};

use crate::error::Error;
use crate::mesh::{TextureBinding, TextureRole};

/// Texel filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// Coordinate wrapping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

/// Sampling parameters applied at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureOptions {
    pub filter: TextureFilter,
    pub wrap: TextureWrap,
    pub mipmaps: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            filter: TextureFilter::Nearest,
            wrap: TextureWrap::Repeat,
            mipmaps: true,
        }
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    pub(crate) gl: Arc<glow::Context>,
    pub(crate) id: glow::Texture,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Texture {
    /// Creates a new texture from the given [`image::DynamicImage`] with
    /// default sampling options.
    pub fn new(gl: &Arc<glow::Context>, image: &DynamicImage) -> Result<Self, Error> {
        Self::with_options(gl, image, TextureOptions::default())
    }

    /// Creates a new texture from the given [`image::DynamicImage`].
    pub fn with_options(
        gl: &Arc<glow::Context>,
        image: &DynamicImage,
        options: TextureOptions,
    ) -> Result<Self, Error> {
        let (width, height) = image.dimensions();
        let data = image.to_rgba8().into_raw();
        Self::from_rgba(gl, width, height, &data, options)
    }

    /// Creates a new texture from raw RGBA data.
    pub fn from_rgba(
        gl: &Arc<glow::Context>,
        width: u32,
        height: u32,
        data: &[u8],
        options: TextureOptions,
    ) -> Result<Self, Error> {
        unsafe {
            let texture = gl.create_texture().map_err(Error::Allocation)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            );
            if options.mipmaps {
                gl.generate_mipmap(glow::TEXTURE_2D);
            }

            let wrap = match options.wrap {
                TextureWrap::Repeat => glow::REPEAT,
                TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE,
            } as i32;
            let mag_filter = match options.filter {
                TextureFilter::Nearest => glow::NEAREST,
                TextureFilter::Linear => glow::LINEAR,
            } as i32;
            let min_filter = match (options.filter, options.mipmaps) {
                (TextureFilter::Nearest, true) => glow::NEAREST_MIPMAP_NEAREST,
                (TextureFilter::Linear, true) => glow::LINEAR_MIPMAP_LINEAR,
                (TextureFilter::Nearest, false) => glow::NEAREST,
                (TextureFilter::Linear, false) => glow::LINEAR,
            } as i32;

            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, min_filter);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, mag_filter);
            gl.bind_texture(glow::TEXTURE_2D, None);

            log::debug!("uploaded {width}x{height} texture");

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
            })
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw context handle.
    pub fn id(&self) -> glow::Texture {
        self.id
    }

    /// Mints a non-owning binding for meshes. The texture must outlive
    /// every mesh drawn with the binding.
    pub fn binding(&self, role: TextureRole) -> TextureBinding<glow::Context> {
        TextureBinding::new(self.id, role)
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}
