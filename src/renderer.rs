//! Scene renderer
//!
//! Owns the backend plus the three resource tables (textures, materials,
//! meshes) and exposes the per-object broadcast protocol: set the
//! transform, select an appearance (color or texture plus UV scale),
//! select a material, then draw. Each setter mutates shared render state
//! immediately; a draw call consumes whatever state is current when it
//! executes, so call order is the correctness contract.
//!
//! Appearance selection is asymmetric on purpose: [`SceneRenderer::set_color`]
//! clears the use-texture flag, but selecting a texture leaves the color
//! in place. Scene scripts lean on that carry-over, drawing several
//! objects under one texture or UV scale set a few calls earlier.

use crate::backend::traits::RenderBackend;
use crate::backend::types::{BackendResult, MeshHandle};
use crate::backend::uniforms::{
    point_light_uniform, MATERIAL_DIFFUSE, MATERIAL_SHININESS, MATERIAL_SPECULAR,
    MAX_POINT_LIGHTS, MODEL, OBJECT_COLOR, OBJECT_TEXTURE, PROJECTION, USE_LIGHTING, USE_TEXTURE,
    UV_SCALE, VIEW, VIEW_POSITION,
};
use crate::resources::{
    Material, MaterialCatalog, MeshData, MeshLibrary, TextureError, TextureRegistry,
};
use crate::scene::{compose_transform, Camera, PointLight};
use glam::{Vec2, Vec3, Vec4};
use std::path::Path;

pub struct SceneRenderer<B: RenderBackend> {
    backend: B,
    textures: TextureRegistry,
    materials: MaterialCatalog,
    meshes: MeshLibrary,
}

impl<B: RenderBackend> SceneRenderer<B> {
    /// Wrap a backend and upload the stock primitive shapes.
    /// `flip_textures` controls vertical flip on image load.
    pub fn new(mut backend: B, flip_textures: bool) -> BackendResult<Self> {
        let meshes = MeshLibrary::with_primitives(&mut backend)?;
        Ok(Self {
            backend,
            textures: TextureRegistry::new(flip_textures),
            materials: MaterialCatalog::new(),
            meshes,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialCatalog {
        &self.materials
    }

    pub fn meshes(&self) -> &MeshLibrary {
        &self.meshes
    }

    // Scene preparation

    /// Load an image file into the texture pool under `tag`
    pub fn load_texture(
        &mut self,
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<(), TextureError> {
        self.textures.load_file(&mut self.backend, path, tag)
    }

    /// Load raw RGBA8 pixels into the texture pool under `tag`
    pub fn load_texture_data(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
        tag: &str,
    ) -> Result<(), TextureError> {
        self.textures
            .load_data(&mut self.backend, width, height, pixels, tag)
    }

    /// Bind every loaded texture to its slot. Call once after loading
    /// completes, before the first textured draw.
    pub fn bind_textures(&mut self) {
        self.textures.bind_all(&mut self.backend);
    }

    /// Release every loaded texture
    pub fn release_textures(&mut self) {
        self.textures.release_all(&mut self.backend);
    }

    pub fn define_material(&mut self, tag: &str, material: Material) {
        self.materials.define(tag, material);
    }

    /// Upload custom geometry drawable under `name`
    pub fn register_shape(&mut self, name: &str, data: &MeshData) -> BackendResult<MeshHandle> {
        self.meshes.register(&mut self.backend, name, data)
    }

    // Per-object broadcast protocol

    /// Compose and broadcast the model matrix for the next draw
    pub fn set_transform(&mut self, scale: Vec3, rotation_degrees: Vec3, translation: Vec3) {
        let model = compose_transform(scale, rotation_degrees, translation);
        self.backend.set_mat4(MODEL, model);
    }

    /// Broadcast a flat color and force the use-texture flag off
    pub fn set_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.backend
            .set_vec4(OBJECT_COLOR, Vec4::new(red, green, blue, alpha));
        self.backend.set_bool(USE_TEXTURE, false);
    }

    /// Select the texture registered under `tag` and force the
    /// use-texture flag on. An unknown tag broadcasts the -1 sentinel,
    /// which samples the backend's fallback texture instead of failing.
    pub fn set_texture(&mut self, tag: &str) {
        let slot = self.textures.find_slot(tag);
        if slot < 0 {
            log::debug!("texture '{}' is not registered, drawing fallback", tag);
        }
        self.backend.set_int(OBJECT_TEXTURE, slot);
        self.backend.set_bool(USE_TEXTURE, true);
    }

    /// Broadcast the texture-coordinate tiling multiplier
    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        self.backend.set_vec2(UV_SCALE, Vec2::new(u, v));
    }

    /// Broadcast the material registered under `tag`. Unknown tags leave
    /// the previously broadcast material untouched.
    pub fn set_material(&mut self, tag: &str) {
        match self.materials.lookup(tag).copied() {
            Some(material) => {
                self.backend
                    .set_vec3(MATERIAL_DIFFUSE, material.diffuse_color);
                self.backend
                    .set_vec3(MATERIAL_SPECULAR, material.specular_color);
                self.backend.set_float(MATERIAL_SHININESS, material.shininess);
            }
            None => log::debug!("material '{}' is not defined, keeping current", tag),
        }
    }

    /// Enable or disable lighting for subsequent draws
    pub fn set_lighting(&mut self, enabled: bool) {
        self.backend.set_bool(USE_LIGHTING, enabled);
    }

    /// Configure and activate one of the [`MAX_POINT_LIGHTS`] light slots
    pub fn set_point_light(&mut self, index: usize, light: &PointLight) {
        if index >= MAX_POINT_LIGHTS {
            log::warn!(
                "point light index {} is out of range (max {})",
                index,
                MAX_POINT_LIGHTS
            );
            return;
        }
        self.backend
            .set_vec3(&point_light_uniform(index, "position"), light.position);
        self.backend
            .set_vec3(&point_light_uniform(index, "ambient"), light.ambient);
        self.backend
            .set_vec3(&point_light_uniform(index, "diffuse"), light.diffuse);
        self.backend
            .set_vec3(&point_light_uniform(index, "specular"), light.specular);
        self.backend
            .set_bool(&point_light_uniform(index, "bActive"), true);
    }

    /// Deactivate one of the light slots
    pub fn disable_point_light(&mut self, index: usize) {
        if index >= MAX_POINT_LIGHTS {
            return;
        }
        self.backend
            .set_bool(&point_light_uniform(index, "bActive"), false);
    }

    /// Broadcast the camera's view, projection, and eye position
    pub fn apply_camera(&mut self, camera: &Camera) {
        self.backend.set_mat4(VIEW, camera.view_matrix());
        self.backend.set_mat4(PROJECTION, camera.projection_matrix());
        self.backend.set_vec3(VIEW_POSITION, camera.position);
    }

    // Frame lifecycle

    pub fn begin_frame(&mut self) -> BackendResult<()> {
        self.backend.begin_frame()
    }

    pub fn end_frame(&mut self) -> BackendResult<()> {
        self.backend.end_frame()
    }

    /// Draw the shape registered under `name` with the current state.
    /// Unknown names log a warning and draw nothing.
    pub fn draw(&mut self, name: &str) {
        match self.meshes.handle(name) {
            Some(mesh) => self.backend.draw_mesh(mesh),
            None => log::warn!("unknown shape '{}', skipping draw", name),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.backend.resize(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::RecordingBackend;
    use crate::resources::shapes;

    fn renderer() -> SceneRenderer<RecordingBackend> {
        SceneRenderer::new(RecordingBackend::new(), true).unwrap()
    }

    fn pixels(width: u32, height: u32) -> Vec<u8> {
        vec![128; (width * height * 4) as usize]
    }

    #[test]
    fn transform_broadcasts_composed_model_matrix() {
        let mut renderer = renderer();
        let scale = Vec3::new(20.0, 1.0, 10.0);
        let rotation = Vec3::new(0.0, 45.0, 0.0);
        let translation = Vec3::new(0.0, 3.0, -2.0);

        renderer.set_transform(scale, rotation, translation);

        let expected = compose_transform(scale, rotation, translation);
        assert_eq!(renderer.backend().mat4_uniform(MODEL), Some(expected));
    }

    #[test]
    fn color_selection_clears_use_texture() {
        let mut renderer = renderer();
        renderer
            .load_texture_data(2, 2, &pixels(2, 2), "wood")
            .unwrap();

        renderer.set_texture("wood");
        assert_eq!(renderer.backend().bool_uniform(USE_TEXTURE), Some(true));

        renderer.set_color(1.0, 0.5, 0.25, 1.0);
        assert_eq!(renderer.backend().bool_uniform(USE_TEXTURE), Some(false));
        assert_eq!(
            renderer.backend().vec4_uniform(OBJECT_COLOR),
            Some(Vec4::new(1.0, 0.5, 0.25, 1.0))
        );
    }

    #[test]
    fn texture_selection_does_not_clear_color() {
        // The reverse of the color/texture coupling: color survives a
        // texture selection so later color-only draws can reuse it
        let mut renderer = renderer();
        renderer
            .load_texture_data(2, 2, &pixels(2, 2), "wood")
            .unwrap();

        renderer.set_color(0.2, 0.4, 0.6, 1.0);
        renderer.set_texture("wood");

        assert_eq!(renderer.backend().bool_uniform(USE_TEXTURE), Some(true));
        assert_eq!(
            renderer.backend().vec4_uniform(OBJECT_COLOR),
            Some(Vec4::new(0.2, 0.4, 0.6, 1.0))
        );
    }

    #[test]
    fn texture_selection_broadcasts_slot() {
        let mut renderer = renderer();
        renderer
            .load_texture_data(2, 2, &pixels(2, 2), "wood")
            .unwrap();
        renderer
            .load_texture_data(2, 2, &pixels(2, 2), "metal")
            .unwrap();

        renderer.set_texture("metal");
        assert_eq!(renderer.backend().int_uniform(OBJECT_TEXTURE), Some(1));
    }

    #[test]
    fn unknown_texture_broadcasts_sentinel_and_keeps_flag() {
        let mut renderer = renderer();
        renderer.set_texture("never-loaded");

        assert_eq!(renderer.backend().int_uniform(OBJECT_TEXTURE), Some(-1));
        assert_eq!(renderer.backend().bool_uniform(USE_TEXTURE), Some(true));
    }

    #[test]
    fn material_broadcast_and_miss_semantics() {
        let mut renderer = renderer();
        let wood = Material::new(Vec3::new(0.4, 0.3, 0.1), Vec3::new(0.2, 0.2, 0.2), 0.3);
        renderer.define_material("wood", wood);

        renderer.set_material("wood");
        assert_eq!(
            renderer.backend().vec3_uniform(MATERIAL_DIFFUSE),
            Some(wood.diffuse_color)
        );
        assert_eq!(
            renderer.backend().vec3_uniform(MATERIAL_SPECULAR),
            Some(wood.specular_color)
        );
        assert_eq!(
            renderer.backend().float_uniform(MATERIAL_SHININESS),
            Some(wood.shininess)
        );

        // A miss leaves the previous broadcast in place
        renderer.set_material("granite");
        assert_eq!(
            renderer.backend().vec3_uniform(MATERIAL_DIFFUSE),
            Some(wood.diffuse_color)
        );
        assert_eq!(
            renderer.backend().float_uniform(MATERIAL_SHININESS),
            Some(wood.shininess)
        );
    }

    #[test]
    fn uv_scale_is_independent_of_appearance() {
        let mut renderer = renderer();
        renderer.set_uv_scale(4.0, 2.0);
        renderer.set_color(1.0, 1.0, 1.0, 1.0);

        assert_eq!(
            renderer.backend().vec2_uniform(UV_SCALE),
            Some(Vec2::new(4.0, 2.0))
        );
    }

    #[test]
    fn point_light_slots_are_bounded() {
        let mut renderer = renderer();
        let light = PointLight::new(Vec3::new(1.0, 2.0, 3.0))
            .with_diffuse(Vec3::splat(0.8));

        renderer.set_point_light(0, &light);
        assert_eq!(
            renderer
                .backend()
                .vec3_uniform("pointLights[0].position"),
            Some(light.position)
        );
        assert_eq!(
            renderer.backend().bool_uniform("pointLights[0].bActive"),
            Some(true)
        );

        renderer.set_point_light(MAX_POINT_LIGHTS, &light);
        assert_eq!(
            renderer
                .backend()
                .uniform(&point_light_uniform(MAX_POINT_LIGHTS, "position")),
            None
        );

        renderer.disable_point_light(0);
        assert_eq!(
            renderer.backend().bool_uniform("pointLights[0].bActive"),
            Some(false)
        );
    }

    #[test]
    fn camera_broadcast_covers_view_projection_eye() {
        let mut renderer = renderer();
        let camera = Camera::new(Vec3::new(0.0, 6.0, 14.0), Vec3::new(0.0, 3.0, 0.0));

        renderer.apply_camera(&camera);

        assert_eq!(
            renderer.backend().mat4_uniform(VIEW),
            Some(camera.view_matrix())
        );
        assert_eq!(
            renderer.backend().mat4_uniform(PROJECTION),
            Some(camera.projection_matrix())
        );
        assert_eq!(
            renderer.backend().vec3_uniform(VIEW_POSITION),
            Some(camera.position)
        );
    }

    #[test]
    fn draw_resolves_shape_names_fail_soft() {
        let mut renderer = renderer();

        renderer.draw("cube");
        assert_eq!(renderer.backend().draw_calls().len(), 1);
        assert_eq!(
            renderer.backend().draw_calls()[0],
            renderer.meshes().handle("cube").unwrap()
        );

        renderer.draw("dodecahedron");
        assert_eq!(renderer.backend().draw_calls().len(), 1);
    }

    #[test]
    fn custom_shapes_can_be_registered() {
        let mut renderer = renderer();
        let handle = renderer
            .register_shape("keycap", &shapes::cube())
            .unwrap();

        renderer.draw("keycap");
        assert_eq!(renderer.backend().draw_calls(), &[handle]);
    }

    #[test]
    fn release_textures_empties_the_pool() {
        let mut renderer = renderer();
        renderer
            .load_texture_data(2, 2, &pixels(2, 2), "wood")
            .unwrap();
        renderer.bind_textures();

        renderer.release_textures();
        assert!(renderer.textures().is_empty());
        assert!(renderer.backend().live_textures().is_empty());
        assert_eq!(renderer.textures().find_slot("wood"), -1);
    }

    #[test]
    fn end_to_end_scene_preparation() {
        let mut renderer = renderer();

        renderer
            .load_texture_data(4, 4, &pixels(4, 4), "wood")
            .unwrap();
        renderer
            .load_texture_data(4, 4, &pixels(4, 4), "metal")
            .unwrap();
        renderer.bind_textures();
        renderer.define_material(
            "wood",
            Material::new(Vec3::splat(0.4), Vec3::splat(0.1), 0.3),
        );

        assert_eq!(renderer.textures().find_slot("wood"), 0);
        assert_eq!(renderer.textures().find_slot("metal"), 1);
        assert!(renderer.materials().lookup("wood").is_some());
        assert!(renderer.materials().lookup("glass").is_none());

        // One object, protocol order: transform, appearance, material, draw
        renderer.set_transform(
            Vec3::new(20.0, 1.0, 10.0),
            Vec3::ZERO,
            Vec3::ZERO,
        );
        renderer.set_texture("wood");
        renderer.set_uv_scale(4.0, 2.0);
        renderer.set_material("wood");
        renderer.draw("plane");

        assert_eq!(renderer.backend().int_uniform(OBJECT_TEXTURE), Some(0));
        assert_eq!(renderer.backend().draw_calls().len(), 1);

        renderer.release_textures();
    }
}
