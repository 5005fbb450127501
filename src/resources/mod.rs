//! Resource management
//!
//! Loading and bookkeeping for textures, materials, and mesh geometry.

mod material;
mod mesh;
pub mod shapes;
mod texture;

pub use material::*;
pub use mesh::*;
pub use shapes::{CubeFace, MeshData};
pub use texture::*;
