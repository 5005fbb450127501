//! Scene renderer - a slot-and-tag resource layer over a wgpu pipeline
//!
//! Assembles static 3D scenes from primitive shapes, tagged textures,
//! named Phong materials, and point lights. Rendering is driven through a
//! broadcast protocol: per object, the scene sets a transform, selects a
//! color or texture, selects a material, and draws; every setter mutates
//! the shared render state that the next draw call consumes.
//!
//! - Textures live in a bounded, insertion-ordered slot pool addressed
//!   by tag; misses degrade to a fallback texture instead of failing
//! - Materials are an append-only catalog with first-match lookup
//! - The [`backend::RenderBackend`] trait separates the protocol from
//!   the GPU; [`backend::RecordingBackend`] lets tests assert on exactly
//!   what was broadcast

pub mod backend;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod window;

pub use backend::{RecordingBackend, RenderBackend, WgpuBackend};
pub use renderer::SceneRenderer;
pub use window::Window;

/// Configuration for opening a renderer window
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Window title
    pub title: String,
    /// Initial window width
    pub width: u32,
    /// Initial window height
    pub height: u32,
    /// Enable vsync
    pub vsync: bool,
    /// Flip images vertically on load
    pub flip_textures_on_load: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            title: "Scene Renderer".to_string(),
            width: 1000,
            height: 800,
            vsync: true,
            flip_textures_on_load: true,
        }
    }
}
