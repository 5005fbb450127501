//! Core backend abstraction trait
//!
//! The trait mirrors a classic immediate-mode shader interface: typed
//! uniform setters addressed by string name, a bounded pool of texture
//! slots, and a begin/draw/end frame lifecycle. [`crate::backend::WgpuBackend`]
//! dispatches to the GPU; [`crate::backend::RecordingBackend`] stores the
//! calls for inspection in tests.

use crate::backend::types::*;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Number of texture slots a backend exposes
pub const MAX_TEXTURE_SLOTS: usize = 16;

/// Graphics backend with a string-addressed uniform broadcast surface
pub trait RenderBackend {
    // Uniform broadcast

    /// Set a boolean uniform
    fn set_bool(&mut self, name: &str, value: bool);

    /// Set an integer or sampler-slot uniform
    fn set_int(&mut self, name: &str, value: i32);

    /// Set a float uniform
    fn set_float(&mut self, name: &str, value: f32);

    /// Set a vec2 uniform
    fn set_vec2(&mut self, name: &str, value: Vec2);

    /// Set a vec3 uniform
    fn set_vec3(&mut self, name: &str, value: Vec3);

    /// Set a vec4 uniform
    fn set_vec4(&mut self, name: &str, value: Vec4);

    /// Set a 4x4 matrix uniform
    fn set_mat4(&mut self, name: &str, value: Mat4);

    // Resource creation

    /// Create a texture and upload its base-level RGBA8 pixels
    fn create_texture(
        &mut self,
        desc: &TextureDescriptor,
        pixels: &[u8],
    ) -> BackendResult<TextureHandle>;

    /// Destroy a texture
    fn destroy_texture(&mut self, texture: TextureHandle);

    /// Bind a texture to a sampler slot; the slot stays bound until rebound
    fn bind_texture_slot(&mut self, slot: u32, texture: TextureHandle);

    /// Upload mesh geometry and return a handle for drawing
    fn upload_mesh(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
        label: &str,
    ) -> BackendResult<MeshHandle>;

    // Frame lifecycle

    /// Begin a new frame
    fn begin_frame(&mut self) -> BackendResult<()>;

    /// Draw a mesh using the uniform state current at this moment
    fn draw_mesh(&mut self, mesh: MeshHandle);

    /// Finish and present the frame
    fn end_frame(&mut self) -> BackendResult<()>;

    /// Resize the output surface
    fn resize(&mut self, width: u32, height: u32);
}
