//! Recording backend
//!
//! Implements [`RenderBackend`] without touching a GPU: every uniform
//! broadcast and resource call is stored so tests can assert on exactly
//! what was sent.

use crate::backend::traits::RenderBackend;
use crate::backend::types::*;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::collections::HashMap;

/// A uniform value exactly as it was broadcast
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

/// Backend that records calls instead of dispatching them
#[derive(Debug, Default)]
pub struct RecordingBackend {
    uniforms: HashMap<String, UniformValue>,
    next_texture_id: u64,
    next_mesh_id: u64,
    live_textures: Vec<TextureHandle>,
    destroyed_textures: Vec<TextureHandle>,
    bound_slots: Vec<(u32, TextureHandle)>,
    uploaded_meshes: Vec<(String, usize, usize)>,
    draw_calls: Vec<MeshHandle>,
    frames_begun: u32,
    frames_ended: u32,
    resized_to: Option<(u32, u32)>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last value broadcast under `name`, if any
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    pub fn bool_uniform(&self, name: &str) -> Option<bool> {
        match self.uniforms.get(name) {
            Some(UniformValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn int_uniform(&self, name: &str) -> Option<i32> {
        match self.uniforms.get(name) {
            Some(UniformValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn float_uniform(&self, name: &str) -> Option<f32> {
        match self.uniforms.get(name) {
            Some(UniformValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn vec2_uniform(&self, name: &str) -> Option<Vec2> {
        match self.uniforms.get(name) {
            Some(UniformValue::Vec2(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn vec3_uniform(&self, name: &str) -> Option<Vec3> {
        match self.uniforms.get(name) {
            Some(UniformValue::Vec3(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn vec4_uniform(&self, name: &str) -> Option<Vec4> {
        match self.uniforms.get(name) {
            Some(UniformValue::Vec4(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn mat4_uniform(&self, name: &str) -> Option<Mat4> {
        match self.uniforms.get(name) {
            Some(UniformValue::Mat4(v)) => Some(*v),
            _ => None,
        }
    }

    /// Textures created and not yet destroyed
    pub fn live_textures(&self) -> &[TextureHandle] {
        &self.live_textures
    }

    pub fn destroyed_textures(&self) -> &[TextureHandle] {
        &self.destroyed_textures
    }

    /// Every `bind_texture_slot` call, in order
    pub fn bind_log(&self) -> &[(u32, TextureHandle)] {
        &self.bound_slots
    }

    /// Uploaded meshes as (label, vertex count, index count)
    pub fn uploaded_meshes(&self) -> &[(String, usize, usize)] {
        &self.uploaded_meshes
    }

    pub fn draw_calls(&self) -> &[MeshHandle] {
        &self.draw_calls
    }

    pub fn frames_begun(&self) -> u32 {
        self.frames_begun
    }

    pub fn frames_ended(&self) -> u32 {
        self.frames_ended
    }

    pub fn resized_to(&self) -> Option<(u32, u32)> {
        self.resized_to
    }
}

impl RenderBackend for RecordingBackend {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.uniforms.insert(name.to_string(), UniformValue::Bool(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.uniforms.insert(name.to_string(), UniformValue::Int(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.uniforms.insert(name.to_string(), UniformValue::Float(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.uniforms.insert(name.to_string(), UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.uniforms.insert(name.to_string(), UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.uniforms.insert(name.to_string(), UniformValue::Vec4(value));
    }

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.uniforms.insert(name.to_string(), UniformValue::Mat4(value));
    }

    fn create_texture(
        &mut self,
        desc: &TextureDescriptor,
        pixels: &[u8],
    ) -> BackendResult<TextureHandle> {
        let expected = desc.width as usize * desc.height as usize * 4;
        if pixels.len() != expected {
            return Err(BackendError::TextureCreationFailed(format!(
                "pixel data is {} bytes, expected {}",
                pixels.len(),
                expected
            )));
        }

        let handle = TextureHandle(self.next_texture_id);
        self.next_texture_id += 1;
        self.live_textures.push(handle);
        Ok(handle)
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        self.live_textures.retain(|t| *t != texture);
        self.destroyed_textures.push(texture);
    }

    fn bind_texture_slot(&mut self, slot: u32, texture: TextureHandle) {
        self.bound_slots.push((slot, texture));
    }

    fn upload_mesh(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
        label: &str,
    ) -> BackendResult<MeshHandle> {
        if vertices.is_empty() || indices.is_empty() {
            return Err(BackendError::BufferCreationFailed(format!(
                "mesh '{}' has no geometry",
                label
            )));
        }

        let handle = MeshHandle(self.next_mesh_id);
        self.next_mesh_id += 1;
        self.uploaded_meshes
            .push((label.to_string(), vertices.len(), indices.len()));
        Ok(handle)
    }

    fn begin_frame(&mut self) -> BackendResult<()> {
        self.frames_begun += 1;
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: MeshHandle) {
        self.draw_calls.push(mesh);
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        self.frames_ended += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.resized_to = Some((width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_record_last_value() {
        let mut backend = RecordingBackend::new();
        backend.set_bool("bUseTexture", true);
        backend.set_bool("bUseTexture", false);
        assert_eq!(backend.bool_uniform("bUseTexture"), Some(false));
        assert_eq!(backend.bool_uniform("bUseLighting"), None);
    }

    #[test]
    fn test_texture_bookkeeping() {
        let mut backend = RecordingBackend::new();
        let desc = TextureDescriptor {
            width: 2,
            height: 2,
            ..Default::default()
        };
        let a = backend.create_texture(&desc, &[0; 16]).unwrap();
        let b = backend.create_texture(&desc, &[0; 16]).unwrap();
        assert_ne!(a, b);
        assert_eq!(backend.live_textures().len(), 2);

        backend.destroy_texture(a);
        assert_eq!(backend.live_textures(), &[b]);
        assert_eq!(backend.destroyed_textures(), &[a]);
    }

    #[test]
    fn test_create_texture_validates_pixel_length() {
        let mut backend = RecordingBackend::new();
        let desc = TextureDescriptor {
            width: 2,
            height: 2,
            ..Default::default()
        };
        assert!(backend.create_texture(&desc, &[0; 3]).is_err());
        assert!(backend.live_textures().is_empty());
    }

    #[test]
    fn test_empty_mesh_is_rejected() {
        let mut backend = RecordingBackend::new();
        assert!(backend.upload_mesh(&[], &[], "empty").is_err());
    }
}
