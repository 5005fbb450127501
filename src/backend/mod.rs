//! Backend abstraction layer
//!
//! Provides the uniform-broadcast trait, shared handle types, and the two
//! implementations: the wgpu backend and a recording backend for tests.

pub mod recording;
pub mod traits;
pub mod types;
pub mod uniforms;
pub mod wgpu_backend;

pub use recording::RecordingBackend;
pub use traits::*;
pub use types::*;
pub use wgpu_backend::WgpuBackend;
