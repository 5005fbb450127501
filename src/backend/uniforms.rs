//! Shader uniform name contract and the CPU-side uniform mirror
//!
//! The shader is addressed by string uniform names. Backends route every
//! named set into a [`UniformState`], the single mutable cursor that the
//! next draw call snapshots. Unknown names are dropped with a warning
//! rather than failing the caller.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};

pub const MODEL: &str = "model";
pub const VIEW: &str = "view";
pub const PROJECTION: &str = "projection";
pub const VIEW_POSITION: &str = "viewPosition";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";
pub const MATERIAL_DIFFUSE: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

/// Number of point light slots the shader declares
pub const MAX_POINT_LIGHTS: usize = 4;

/// Build a structured point light uniform name, e.g. `pointLights[1].diffuse`
pub fn point_light_uniform(index: usize, field: &str) -> String {
    format!("pointLights[{}].{}", index, field)
}

/// Parse `pointLights[i].<field>` into its index and field name
fn parse_point_light(name: &str) -> Option<(usize, &str)> {
    let rest = name.strip_prefix("pointLights[")?;
    let end = rest.find(']')?;
    let index = rest[..end].parse::<usize>().ok()?;
    let field = rest[end + 1..].strip_prefix('.')?;
    Some((index, field))
}

/// Mirror of one shader-side point light slot
#[derive(Debug, Clone, Copy, Default)]
pub struct PointLightState {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub active: bool,
}

/// Mirror of the shader's addressable uniform state
///
/// Every set overwrites the previous value unconditionally; ordering
/// discipline is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct UniformState {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub view_position: Vec3,
    pub object_color: Vec4,
    pub use_texture: bool,
    pub use_lighting: bool,
    pub texture_slot: i32,
    pub uv_scale: Vec2,
    pub material_diffuse: Vec3,
    pub material_specular: Vec3,
    pub material_shininess: f32,
    pub point_lights: [PointLightState; MAX_POINT_LIGHTS],
}

impl Default for UniformState {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_position: Vec3::ZERO,
            object_color: Vec4::ONE,
            use_texture: false,
            use_lighting: false,
            texture_slot: -1,
            uv_scale: Vec2::ONE,
            material_diffuse: Vec3::splat(0.8),
            material_specular: Vec3::ZERO,
            material_shininess: 1.0,
            point_lights: [PointLightState::default(); MAX_POINT_LIGHTS],
        }
    }
}

impl UniformState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bool(&mut self, name: &str, value: bool) {
        match name {
            USE_TEXTURE => self.use_texture = value,
            USE_LIGHTING => self.use_lighting = value,
            _ => match self.light_field_mut(name) {
                Some((light, "bActive")) => light.active = value,
                _ => log::warn!("unknown bool uniform '{}'", name),
            },
        }
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        match name {
            OBJECT_TEXTURE => self.texture_slot = value,
            // GL-style callers pass booleans through the int setter
            USE_TEXTURE => self.use_texture = value != 0,
            USE_LIGHTING => self.use_lighting = value != 0,
            _ => log::warn!("unknown int uniform '{}'", name),
        }
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        match name {
            MATERIAL_SHININESS => self.material_shininess = value,
            _ => log::warn!("unknown float uniform '{}'", name),
        }
    }

    pub fn set_vec2(&mut self, name: &str, value: Vec2) {
        match name {
            UV_SCALE => self.uv_scale = value,
            _ => log::warn!("unknown vec2 uniform '{}'", name),
        }
    }

    pub fn set_vec3(&mut self, name: &str, value: Vec3) {
        match name {
            VIEW_POSITION => self.view_position = value,
            MATERIAL_DIFFUSE => self.material_diffuse = value,
            MATERIAL_SPECULAR => self.material_specular = value,
            _ => match self.light_field_mut(name) {
                Some((light, "position")) => light.position = value,
                Some((light, "ambient")) => light.ambient = value,
                Some((light, "diffuse")) => light.diffuse = value,
                Some((light, "specular")) => light.specular = value,
                _ => log::warn!("unknown vec3 uniform '{}'", name),
            },
        }
    }

    pub fn set_vec4(&mut self, name: &str, value: Vec4) {
        match name {
            OBJECT_COLOR => self.object_color = value,
            _ => log::warn!("unknown vec4 uniform '{}'", name),
        }
    }

    pub fn set_mat4(&mut self, name: &str, value: Mat4) {
        match name {
            MODEL => self.model = value,
            VIEW => self.view = value,
            PROJECTION => self.projection = value,
            _ => log::warn!("unknown mat4 uniform '{}'", name),
        }
    }

    fn light_field_mut<'a>(
        &mut self,
        name: &'a str,
    ) -> Option<(&mut PointLightState, &'a str)> {
        let (index, field) = parse_point_light(name)?;
        let light = self.point_lights.get_mut(index)?;
        Some((light, field))
    }

    /// Build per-frame uniform data for the GPU
    pub fn frame_data(&self) -> FrameUniformData {
        FrameUniformData {
            view: self.view,
            projection: self.projection,
            view_position: self.view_position.extend(1.0),
        }
    }

    /// Build the point light uniform block for the GPU
    pub fn lights_data(&self) -> LightsUniformData {
        let mut lights = [PointLightData::zeroed(); MAX_POINT_LIGHTS];
        for (data, light) in lights.iter_mut().zip(&self.point_lights) {
            *data = PointLightData {
                position: light.position.extend(1.0),
                ambient: light.ambient.extend(0.0),
                diffuse: light.diffuse.extend(0.0),
                specular: light
                    .specular
                    .extend(if light.active { 1.0 } else { 0.0 }),
            };
        }
        LightsUniformData { lights }
    }

    /// Snapshot the per-object uniform data for the next draw call
    pub fn object_data(&self) -> ObjectUniformData {
        ObjectUniformData {
            model: self.model,
            normal_matrix: self.model.inverse().transpose(),
            object_color: self.object_color,
            material_diffuse: self.material_diffuse.extend(0.0),
            material_specular: self.material_specular.extend(self.material_shininess),
            uv_scale: Vec4::new(self.uv_scale.x, self.uv_scale.y, 0.0, 0.0),
            flags: [
                u32::from(self.use_texture),
                u32::from(self.use_lighting),
                0,
                0,
            ],
        }
    }
}

/// Per-frame uniform data (camera)
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct FrameUniformData {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_position: Vec4, // w unused
}

/// One point light as the shader sees it
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PointLightData {
    pub position: Vec4, // w unused
    pub ambient: Vec4,  // w unused
    pub diffuse: Vec4,  // w unused
    pub specular: Vec4, // w = 1.0 when the light is active
}

/// Point light uniform block
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightsUniformData {
    pub lights: [PointLightData; MAX_POINT_LIGHTS],
}

/// Per-object uniform data snapshotted at draw time
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjectUniformData {
    pub model: Mat4,
    pub normal_matrix: Mat4,
    pub object_color: Vec4,
    pub material_diffuse: Vec4,  // w unused
    pub material_specular: Vec4, // w = shininess
    pub uv_scale: Vec4,          // xy = tiling, zw unused
    pub flags: [u32; 4],         // x = use texture, y = use lighting
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point_light_names() {
        assert_eq!(
            parse_point_light("pointLights[0].position"),
            Some((0, "position"))
        );
        assert_eq!(
            parse_point_light("pointLights[3].bActive"),
            Some((3, "bActive"))
        );
        assert_eq!(parse_point_light("pointLights[x].position"), None);
        assert_eq!(parse_point_light("pointLights[1]position"), None);
        assert_eq!(parse_point_light("material.diffuseColor"), None);
    }

    #[test]
    fn test_point_light_routing() {
        let mut state = UniformState::new();
        state.set_vec3("pointLights[2].diffuse", Vec3::new(0.5, 0.5, 0.5));
        state.set_vec3("pointLights[2].position", Vec3::new(1.0, 2.0, 3.0));
        state.set_bool("pointLights[2].bActive", true);

        assert_eq!(state.point_lights[2].diffuse, Vec3::splat(0.5));
        assert_eq!(state.point_lights[2].position, Vec3::new(1.0, 2.0, 3.0));
        assert!(state.point_lights[2].active);
        assert!(!state.point_lights[0].active);
    }

    #[test]
    fn test_out_of_range_light_index_is_dropped() {
        let mut state = UniformState::new();
        state.set_vec3("pointLights[9].diffuse", Vec3::ONE);
        for light in &state.point_lights {
            assert_eq!(light.diffuse, Vec3::ZERO);
        }
    }

    #[test]
    fn test_unknown_names_do_not_panic() {
        let mut state = UniformState::new();
        state.set_bool("noSuchFlag", true);
        state.set_float("noSuchFloat", 1.0);
        state.set_vec4("noSuchColor", Vec4::ONE);
        state.set_mat4("noSuchMatrix", Mat4::IDENTITY);
    }

    #[test]
    fn test_sampler_slot_accepts_sentinel() {
        let mut state = UniformState::new();
        state.set_int(OBJECT_TEXTURE, 5);
        assert_eq!(state.texture_slot, 5);
        state.set_int(OBJECT_TEXTURE, -1);
        assert_eq!(state.texture_slot, -1);
    }

    #[test]
    fn test_flags_accept_int_setter() {
        let mut state = UniformState::new();
        state.set_int(USE_TEXTURE, 1);
        assert!(state.use_texture);
        state.set_int(USE_TEXTURE, 0);
        assert!(!state.use_texture);
    }

    #[test]
    fn test_object_data_snapshot() {
        let mut state = UniformState::new();
        state.set_bool(USE_TEXTURE, true);
        state.set_bool(USE_LIGHTING, true);
        state.set_vec2(UV_SCALE, Vec2::new(4.0, 2.0));
        state.set_float(MATERIAL_SHININESS, 32.0);

        let data = state.object_data();
        assert_eq!(data.flags, [1, 1, 0, 0]);
        assert_eq!(data.uv_scale, Vec4::new(4.0, 2.0, 0.0, 0.0));
        assert_eq!(data.material_specular.w, 32.0);
    }

    #[test]
    fn test_lights_data_active_flag() {
        let mut state = UniformState::new();
        state.set_vec3("pointLights[1].specular", Vec3::splat(0.01));
        state.set_bool("pointLights[1].bActive", true);

        let data = state.lights_data();
        assert_eq!(data.lights[0].specular.w, 0.0);
        assert_eq!(data.lights[1].specular.w, 1.0);
        assert_eq!(data.lights[1].specular.x, 0.01);
    }

    #[test]
    fn test_uniform_block_sizes() {
        assert_eq!(std::mem::size_of::<FrameUniformData>(), 144);
        assert_eq!(std::mem::size_of::<LightsUniformData>(), 256);
        assert_eq!(std::mem::size_of::<ObjectUniformData>(), 208);
    }
}
