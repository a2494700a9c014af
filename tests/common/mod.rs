//! A recording graphics context and material for driving meshes without
//! a GPU. Every operation mutates or records into plain state that the
//! tests can inspect afterwards.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use meshkit::{BufferKind, GraphicsContext, Material};

#[derive(Default)]
pub struct RecordingContext {
    state: RefCell<State>,
}

#[derive(Default)]
struct State {
    next_id: u32,
    allocations_before_failure: Option<u32>,
    live_buffers: HashSet<u32>,
    live_vertex_arrays: HashSet<u32>,
    bound_vertex_array: Option<u32>,
    bound_buffers: HashMap<BufferKind, u32>,
    uploads: Vec<(BufferKind, usize)>,
    attribs: Vec<(u32, i32, i32, i32)>,
    active_unit: u32,
    unit_bindings: HashMap<u32, u32>,
    draws: Vec<(Option<u32>, i32)>,
}

impl State {
    fn allocate(&mut self) -> Result<u32, String> {
        if let Some(remaining) = &mut self.allocations_before_failure {
            if *remaining == 0 {
                return Err("mock context out of memory".to_string());
            }
            *remaining -= 1;
        }
        self.next_id += 1;
        Ok(self.next_id)
    }
}

impl RecordingContext {
    /// Allow `n` more allocations, then fail every one after that.
    pub fn fail_allocations_after(&self, n: u32) {
        self.state.borrow_mut().allocations_before_failure = Some(n);
    }

    /// Buffers plus vertex arrays currently allocated and not deleted.
    pub fn live_resources(&self) -> usize {
        let state = self.state.borrow();
        state.live_buffers.len() + state.live_vertex_arrays.len()
    }

    pub fn active_unit(&self) -> u32 {
        self.state.borrow().active_unit
    }

    pub fn bound_vertex_array(&self) -> Option<u32> {
        self.state.borrow().bound_vertex_array
    }

    pub fn bound_buffer(&self, kind: BufferKind) -> Option<u32> {
        self.state.borrow().bound_buffers.get(&kind).copied()
    }

    pub fn texture_on_unit(&self, unit: u32) -> Option<u32> {
        self.state.borrow().unit_bindings.get(&unit).copied()
    }

    /// Each draw as (vertex array bound at submission, index count).
    pub fn draws(&self) -> Vec<(Option<u32>, i32)> {
        self.state.borrow().draws.clone()
    }

    /// Each upload as (target, byte length).
    pub fn uploads(&self) -> Vec<(BufferKind, usize)> {
        self.state.borrow().uploads.clone()
    }

    /// Declared attributes as (location, components, stride, offset).
    pub fn attribs(&self) -> Vec<(u32, i32, i32, i32)> {
        self.state.borrow().attribs.clone()
    }
}

impl GraphicsContext for RecordingContext {
    type Buffer = u32;
    type VertexArray = u32;
    type TextureId = u32;

    fn create_vertex_array(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate()?;
        state.live_vertex_arrays.insert(id);
        Ok(id)
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate()?;
        state.live_buffers.insert(id);
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.state.borrow_mut().bound_vertex_array = vertex_array;
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<u32>) {
        let mut state = self.state.borrow_mut();
        match buffer {
            Some(buffer) => {
                state.bound_buffers.insert(kind, buffer);
            }
            None => {
                state.bound_buffers.remove(&kind);
            }
        }
    }

    fn buffer_data(&self, kind: BufferKind, data: &[u8]) {
        let mut state = self.state.borrow_mut();
        assert!(
            state.bound_buffers.contains_key(&kind),
            "upload to {kind:?} with no buffer bound"
        );
        state.uploads.push((kind, data.len()));
    }

    fn vertex_attrib(&self, location: u32, components: i32, stride: i32, offset: i32) {
        let mut state = self.state.borrow_mut();
        assert!(
            state.bound_vertex_array.is_some(),
            "attribute declared with no vertex array bound"
        );
        state.attribs.push((location, components, stride, offset));
    }

    fn active_texture_unit(&self, unit: u32) {
        self.state.borrow_mut().active_unit = unit;
    }

    fn bind_texture(&self, texture: Option<u32>) {
        let mut state = self.state.borrow_mut();
        let unit = state.active_unit;
        match texture {
            Some(texture) => {
                state.unit_bindings.insert(unit, texture);
            }
            None => {
                state.unit_bindings.remove(&unit);
            }
        }
    }

    fn draw_triangles(&self, index_count: i32) {
        let mut state = self.state.borrow_mut();
        let vertex_array = state.bound_vertex_array;
        state.draws.push((vertex_array, index_count));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        let removed = self.state.borrow_mut().live_vertex_arrays.remove(&vertex_array);
        assert!(removed, "double delete of vertex array {vertex_array}");
    }

    fn delete_buffer(&self, buffer: u32) {
        let removed = self.state.borrow_mut().live_buffers.remove(&buffer);
        assert!(removed, "double delete of buffer {buffer}");
    }
}

/// A material that records every sampler assignment it receives.
#[derive(Default)]
pub struct RecordingMaterial {
    samplers: RefCell<Vec<(String, i32)>>,
}

impl RecordingMaterial {
    pub fn samplers(&self) -> Vec<(String, i32)> {
        self.samplers.borrow().clone()
    }

    pub fn clear(&self) {
        self.samplers.borrow_mut().clear();
    }
}

impl Material for RecordingMaterial {
    fn bind(&self) {}

    fn set_sampler(&self, name: &str, unit: i32) {
        self.samplers.borrow_mut().push((name.to_string(), unit));
    }
}
