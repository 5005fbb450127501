//! Name-addressed mesh library
//!
//! Uploads shape geometry once and resolves draw calls by shape name.
//! Meshes live for the lifetime of the backend; re-registering a name
//! simply points it at the new upload.

use crate::backend::traits::RenderBackend;
use crate::backend::types::{BackendResult, MeshHandle};
use crate::resources::shapes::{self, CubeFace, MeshData};
use std::collections::HashMap;

/// Segment count used for the stock curved shapes
const CURVE_SEGMENTS: u32 = 36;

pub struct MeshLibrary {
    meshes: HashMap<String, MeshHandle>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self {
            meshes: HashMap::new(),
        }
    }

    /// Upload the stock primitive set under its conventional names
    pub fn with_primitives<B: RenderBackend>(backend: &mut B) -> BackendResult<Self> {
        let mut library = Self::new();

        library.register(backend, "plane", &shapes::plane())?;
        library.register(backend, "cube", &shapes::cube())?;
        library.register(backend, "cube_front", &shapes::cube_face(CubeFace::Front))?;
        library.register(backend, "cube_back", &shapes::cube_face(CubeFace::Back))?;
        library.register(backend, "cube_left", &shapes::cube_face(CubeFace::Left))?;
        library.register(backend, "cube_right", &shapes::cube_face(CubeFace::Right))?;
        library.register(backend, "cube_top", &shapes::cube_face(CubeFace::Top))?;
        library.register(backend, "cube_bottom", &shapes::cube_face(CubeFace::Bottom))?;
        library.register(
            backend,
            "cylinder",
            &shapes::cylinder(CURVE_SEGMENTS, true, true),
        )?;
        library.register(
            backend,
            "tapered_cylinder",
            &shapes::tapered_cylinder(CURVE_SEGMENTS, 0.5, false, true),
        )?;
        library.register(
            backend,
            "tapered_cylinder_open",
            &shapes::tapered_cylinder(CURVE_SEGMENTS, 0.5, false, false),
        )?;
        library.register(backend, "sphere", &shapes::sphere(CURVE_SEGMENTS, 18))?;
        library.register(backend, "torus", &shapes::torus(CURVE_SEGMENTS, 18, 0.2))?;
        library.register(
            backend,
            "half_torus",
            &shapes::half_torus(CURVE_SEGMENTS, 18, 0.2),
        )?;

        Ok(library)
    }

    /// Upload `data` and make it drawable under `name`
    pub fn register<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        name: &str,
        data: &MeshData,
    ) -> BackendResult<MeshHandle> {
        let handle = backend.upload_mesh(&data.vertices, &data.indices, name)?;
        self.meshes.insert(name.to_string(), handle);
        Ok(handle)
    }

    pub fn handle(&self, name: &str) -> Option<MeshHandle> {
        self.meshes.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl Default for MeshLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::RecordingBackend;

    #[test]
    fn registered_mesh_is_resolvable() {
        let mut backend = RecordingBackend::new();
        let mut library = MeshLibrary::new();

        let handle = library
            .register(&mut backend, "plane", &shapes::plane())
            .unwrap();

        assert_eq!(library.handle("plane"), Some(handle));
        assert_eq!(library.handle("missing"), None);
    }

    #[test]
    fn primitives_cover_the_stock_names() {
        let mut backend = RecordingBackend::new();
        let library = MeshLibrary::with_primitives(&mut backend).unwrap();

        for name in [
            "plane",
            "cube",
            "cube_top",
            "cube_bottom",
            "cube_front",
            "cube_back",
            "cube_left",
            "cube_right",
            "cylinder",
            "tapered_cylinder",
            "tapered_cylinder_open",
            "sphere",
            "torus",
            "half_torus",
        ] {
            assert!(library.handle(name).is_some(), "missing shape '{}'", name);
        }
        assert_eq!(library.len(), backend.uploaded_meshes().len());
    }

    #[test]
    fn reregistering_a_name_replaces_the_handle() {
        let mut backend = RecordingBackend::new();
        let mut library = MeshLibrary::new();

        let first = library
            .register(&mut backend, "shape", &shapes::plane())
            .unwrap();
        let second = library
            .register(&mut backend, "shape", &shapes::cube())
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(library.handle("shape"), Some(second));
        assert_eq!(library.len(), 1);
    }
}
