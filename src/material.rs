//! Material interface and the OpenGL shader program binding.
//!
//! Meshes never compile or link shaders; they only need a [`Material`]
//! that can be activated and pointed at texture units by parameter name.
//! [`Program`] adapts an already linked [`glow::Program`] to that
//! interface, and the [`Uniform`] trait covers the remaining non-sampler
//! material parameters.

use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;

/// The shader/material surface a mesh draws against.
pub trait Material {
    /// Activates this material for subsequent draws.
    fn bind(&self);

    /// Points the named sampler parameter at a texture unit. Parameters
    /// the shader does not declare are ignored.
    fn set_sampler(&self, name: &str, unit: i32);
}

/// A value that can be written to a named shader parameter.
pub trait Uniform {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for bool {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(program, name) {
                gl.uniform_1_i32(Some(&loc), *self as i32);
            }
        }
    }
}

impl Uniform for i32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(program, name) {
                gl.uniform_1_i32(Some(&loc), *self);
            }
        }
    }
}

impl Uniform for f32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(program, name) {
                gl.uniform_1_f32(Some(&loc), *self);
            }
        }
    }
}

impl Uniform for Vec2 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(program, name) {
                gl.uniform_2_f32(Some(&loc), self.x, self.y);
            }
        }
    }
}

impl Uniform for Vec3 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(program, name) {
                gl.uniform_3_f32(Some(&loc), self.x, self.y, self.z);
            }
        }
    }
}

impl Uniform for Vec4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(program, name) {
                gl.uniform_4_f32(Some(&loc), self.x, self.y, self.z, self.w);
            }
        }
    }
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(program, name) {
                gl.uniform_matrix_4_f32_slice(Some(&loc), false, self.as_ref());
            }
        }
    }
}

/// An already linked OpenGL shader program.
///
/// Compilation and linking happen outside this crate; `Program` only
/// carries the handle so meshes can address its parameters.
pub struct Program {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl Program {
    /// Wraps a linked program handle. The handle stays owned by the
    /// caller's shader tooling; dropping a `Program` does not delete it.
    pub fn from_linked(gl: &Arc<glow::Context>, id: glow::Program) -> Self {
        Self {
            gl: Arc::clone(gl),
            id,
        }
    }

    /// Sets a non-sampler parameter on the program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl Material for Program {
    fn bind(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    fn set_sampler(&self, name: &str, unit: i32) {
        unsafe {
            if let Some(loc) = self.gl.get_uniform_location(self.id, name) {
                self.gl.uniform_1_i32(Some(&loc), unit);
            }
        }
    }
}
