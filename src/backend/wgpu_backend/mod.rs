//! wgpu backend implementation
//!
//! Emulates the classic slot-addressed shader interface on top of wgpu:
//! named uniform sets land in a CPU-side [`UniformState`], each draw call
//! snapshots that state into a dynamic-offset uniform buffer, and texture
//! slots are one bind group each. A slot that was never bound (or the -1
//! sampler sentinel) resolves to a built-in 1x1 black texture, so a missing
//! texture degrades the picture instead of failing the frame.

use crate::backend::traits::{RenderBackend, MAX_TEXTURE_SLOTS};
use crate::backend::types::*;
use crate::backend::uniforms::{
    FrameUniformData, LightsUniformData, ObjectUniformData, UniformState,
};
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::collections::HashMap;
use std::sync::Arc;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Dynamic-offset stride of the per-object uniform buffer
const OBJECT_STRIDE: u64 = 256;

/// Upper bound on draw calls per frame
const MAX_OBJECTS_PER_FRAME: usize = 1024;

const SCENE_SHADER: &str = r#"
// Scene shader: flat color or slot-sampled texture, optional Phong lighting

struct FrameUniform {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    view_position: vec4<f32>,
}

struct PointLight {
    position: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>, // w > 0.5 means active
}

struct LightsUniform {
    lights: array<PointLight, 4>,
}

struct ObjectUniform {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    object_color: vec4<f32>,
    material_diffuse: vec4<f32>,
    material_specular: vec4<f32>, // w = shininess
    uv_scale: vec4<f32>,          // xy = tiling
    flags: vec4<u32>,             // x = use texture, y = use lighting
}

@group(0) @binding(0) var<uniform> frame: FrameUniform;
@group(0) @binding(1) var<uniform> lighting: LightsUniform;
@group(1) @binding(0) var<uniform> object: ObjectUniform;
@group(2) @binding(0) var object_texture: texture_2d<f32>;
@group(2) @binding(1) var object_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;

    let world_pos = object.model * vec4<f32>(in.position, 1.0);
    out.world_position = world_pos.xyz;
    out.clip_position = frame.projection * frame.view * world_pos;
    out.world_normal = normalize((object.normal_matrix * vec4<f32>(in.normal, 0.0)).xyz);
    out.uv = in.uv * object.uv_scale.xy;

    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // Sample unconditionally to keep control flow uniform
    let sampled = textureSample(object_texture, object_sampler, in.uv);

    var base = object.object_color;
    if (object.flags.x != 0u) {
        base = sampled;
    }
    if (object.flags.y == 0u) {
        return base;
    }

    let normal = normalize(in.world_normal);
    let view_dir = normalize(frame.view_position.xyz - in.world_position);

    var lit = vec3<f32>(0.0);
    for (var i = 0u; i < 4u; i = i + 1u) {
        let light = lighting.lights[i];
        if (light.specular.w < 0.5) {
            continue;
        }

        let light_dir = normalize(light.position.xyz - in.world_position);
        let ndotl = max(dot(normal, light_dir), 0.0);
        let reflect_dir = reflect(-light_dir, normal);
        let spec = pow(max(dot(view_dir, reflect_dir), 0.0), object.material_specular.w);

        lit += light.ambient.xyz * object.material_diffuse.xyz * base.rgb;
        lit += light.diffuse.xyz * ndotl * object.material_diffuse.xyz * base.rgb;
        lit += light.specular.xyz * spec * object.material_specular.xyz;
    }

    return vec4<f32>(lit, base.a);
}
"#;

struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Buffered draw call, executed when the frame ends
struct DrawCommand {
    mesh: MeshHandle,
    object_offset: u32,
    slot: i32,
}

struct FrameOutput {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

/// wgpu backend
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    pipeline: wgpu::RenderPipeline,

    frame_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    object_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_bind_group: wgpu::BindGroup,

    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    fallback_bind_group: wgpu::BindGroup,
    slot_bind_groups: Vec<Option<wgpu::BindGroup>>,
    slot_handles: Vec<Option<TextureHandle>>,

    // Resource storage
    textures: HashMap<u64, GpuTexture>,
    meshes: HashMap<u64, GpuMesh>,
    next_texture_id: u64,
    next_mesh_id: u64,

    state: UniformState,
    frame: Option<FrameOutput>,
    draws: Vec<DrawCommand>,
    object_cursor: u32,
}

impl WgpuBackend {
    /// Create a backend for the given window, blocking on adapter selection
    pub fn new(window: Arc<winit::window::Window>, vsync: bool) -> BackendResult<Self> {
        pollster::block_on(Self::new_async(window, vsync))
    }

    pub async fn new_async(
        window: Arc<winit::window::Window>,
        vsync: bool,
    ) -> BackendResult<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| BackendError::SurfaceCreationFailed(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await;

        let adapter = match adapter {
            Some(adapter) => adapter,
            None => {
                log::warn!("No high performance adapter available, trying fallback");
                instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: true,
                    })
                    .await
                    .ok_or_else(|| {
                        BackendError::InitializationFailed("No suitable adapter found".into())
                    })?
            }
        };

        let adapter_info = adapter.get_info();
        log::info!(
            "Selected GPU: {} ({:?} backend)",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Scene Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .map_err(|e| BackendError::DeviceCreationFailed(e.to_string()))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let depth_view =
            Self::create_depth_view(&device, surface_config.width, surface_config.height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_SHADER.into()),
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<
                            FrameUniformData,
                        >() as u64),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<
                            LightsUniformData,
                        >() as u64),
                    },
                    count: None,
                },
            ],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ObjectUniformData>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene pipeline layout"),
            bind_group_layouts: &[&frame_layout, &object_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        // Planes and open cylinders are visible from both sides, so no culling
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 12,
                            shader_location: 1,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 24,
                            shader_location: 2,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame uniforms"),
            size: std::mem::size_of::<FrameUniformData>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let lights_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("light uniforms"),
            size: std::mem::size_of::<LightsUniformData>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object uniforms"),
            size: OBJECT_STRIDE * MAX_OBJECTS_PER_FRAME as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame bind group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        });

        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object bind group"),
            layout: &object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniformData>() as u64),
                }),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("scene sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // Unbound slots and the -1 sampler sentinel resolve to this texture
        let fallback_view = Self::upload_texture(
            &device,
            &queue,
            &TextureDescriptor {
                label: Some("fallback black".to_string()),
                width: 1,
                height: 1,
                mip_levels: 1,
            },
            &[0, 0, 0, 255],
        )
        .1;
        let fallback_bind_group =
            Self::texture_bind_group(&device, &texture_layout, &fallback_view, &sampler);

        let mut slot_bind_groups = Vec::with_capacity(MAX_TEXTURE_SLOTS);
        let mut slot_handles = Vec::with_capacity(MAX_TEXTURE_SLOTS);
        for _ in 0..MAX_TEXTURE_SLOTS {
            slot_bind_groups.push(None);
            slot_handles.push(None);
        }

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            depth_view,
            pipeline,
            frame_buffer,
            lights_buffer,
            object_buffer,
            frame_bind_group,
            object_bind_group,
            texture_layout,
            sampler,
            fallback_bind_group,
            slot_bind_groups,
            slot_handles,
            textures: HashMap::new(),
            meshes: HashMap::new(),
            next_texture_id: 1,
            next_mesh_id: 1,
            state: UniformState::new(),
            frame: None,
            draws: Vec::new(),
            object_cursor: 0,
        })
    }

    /// Current uniform state, for inspection
    pub fn uniform_state(&self) -> &UniformState {
        &self.state
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn texture_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    /// Create a texture, upload the base level, and fill the mip chain
    /// by downscaling on the CPU
    fn upload_texture(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        desc: &TextureDescriptor,
        pixels: &[u8],
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let mip_level_count = desc.mip_levels.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: desc.label.as_deref(),
            size: wgpu::Extent3d {
                width: desc.width,
                height: desc.height,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(desc.width * 4),
                rows_per_image: Some(desc.height),
            },
            wgpu::Extent3d {
                width: desc.width,
                height: desc.height,
                depth_or_array_layers: 1,
            },
        );

        if mip_level_count > 1 {
            if let Some(base) =
                image::RgbaImage::from_raw(desc.width, desc.height, pixels.to_vec())
            {
                let mut level_width = desc.width;
                let mut level_height = desc.height;
                for level in 1..mip_level_count {
                    level_width = (level_width / 2).max(1);
                    level_height = (level_height / 2).max(1);
                    let scaled = image::imageops::resize(
                        &base,
                        level_width,
                        level_height,
                        image::imageops::FilterType::Triangle,
                    );
                    queue.write_texture(
                        wgpu::ImageCopyTexture {
                            texture: &texture,
                            mip_level: level,
                            origin: wgpu::Origin3d::ZERO,
                            aspect: wgpu::TextureAspect::All,
                        },
                        &scaled,
                        wgpu::ImageDataLayout {
                            offset: 0,
                            bytes_per_row: Some(level_width * 4),
                            rows_per_image: Some(level_height),
                        },
                        wgpu::Extent3d {
                            width: level_width,
                            height: level_height,
                            depth_or_array_layers: 1,
                        },
                    );
                }
            }
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    fn slot_bind_group(&self, slot: i32) -> &wgpu::BindGroup {
        usize::try_from(slot)
            .ok()
            .and_then(|index| self.slot_bind_groups.get(index))
            .and_then(|group| group.as_ref())
            .unwrap_or(&self.fallback_bind_group)
    }
}

impl RenderBackend for WgpuBackend {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.state.set_bool(name, value);
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.state.set_int(name, value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.state.set_float(name, value);
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.state.set_vec2(name, value);
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.state.set_vec3(name, value);
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.state.set_vec4(name, value);
    }

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.state.set_mat4(name, value);
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

        let (texture, view) = Self::upload_texture(&self.device, &self.queue, desc, pixels);

        let id = self.next_texture_id;
        self.next_texture_id += 1;
        self.textures.insert(id, GpuTexture { texture, view });

        Ok(TextureHandle(id))
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        if let Some(entry) = self.textures.remove(&texture.0) {
            entry.texture.destroy();
        }
        for (group, handle) in self
            .slot_bind_groups
            .iter_mut()
            .zip(self.slot_handles.iter_mut())
        {
            if *handle == Some(texture) {
                *group = None;
                *handle = None;
            }
        }
    }

    fn bind_texture_slot(&mut self, slot: u32, texture: TextureHandle) {
        let index = slot as usize;
        if index >= MAX_TEXTURE_SLOTS {
            log::warn!("texture slot {} is out of range", slot);
            return;
        }
        match self.textures.get(&texture.0) {
            Some(entry) => {
                let group = Self::texture_bind_group(
                    &self.device,
                    &self.texture_layout,
                    &entry.view,
                    &self.sampler,
                );
                self.slot_bind_groups[index] = Some(group);
                self.slot_handles[index] = Some(texture);
            }
            None => log::warn!("bind_texture_slot with unknown texture {:?}", texture),
        }
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

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let id = self.next_mesh_id;
        self.next_mesh_id += 1;
        self.meshes.insert(
            id,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: indices.len() as u32,
            },
        );

        Ok(MeshHandle(id))
    }

    fn begin_frame(&mut self) -> BackendResult<()> {
        debug_assert!(self.frame.is_none(), "begin_frame called twice");

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                // Reconfigure and retry once
                self.surface.configure(&self.device, &self.surface_config);
                self.surface.get_current_texture().map_err(|e| match e {
                    wgpu::SurfaceError::Lost => BackendError::SurfaceLost,
                    wgpu::SurfaceError::OutOfMemory => BackendError::OutOfMemory,
                    _ => BackendError::AcquireImageFailed(e.to_string()),
                })?
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(BackendError::OutOfMemory),
            Err(e) => return Err(BackendError::AcquireImageFailed(e.to_string())),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.frame = Some(FrameOutput {
            surface_texture: output,
            view,
        });
        self.draws.clear();
        self.object_cursor = 0;

        Ok(())
    }

    fn draw_mesh(&mut self, mesh: MeshHandle) {
        debug_assert!(self.frame.is_some(), "draw_mesh outside of a frame");

        if !self.meshes.contains_key(&mesh.0) {
            log::warn!("draw_mesh with unknown mesh {:?}", mesh);
            return;
        }
        if self.object_cursor as usize >= MAX_OBJECTS_PER_FRAME {
            log::warn!(
                "per-frame object limit ({}) reached, draw dropped",
                MAX_OBJECTS_PER_FRAME
            );
            return;
        }

        let offset = self.object_cursor as u64 * OBJECT_STRIDE;
        let data = self.state.object_data();
        self.queue
            .write_buffer(&self.object_buffer, offset, bytemuck::bytes_of(&data));

        self.draws.push(DrawCommand {
            mesh,
            object_offset: offset as u32,
            slot: self.state.texture_slot,
        });
        self.object_cursor += 1;
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        debug_assert!(self.frame.is_some(), "end_frame without begin_frame");
        let frame = match self.frame.take() {
            Some(frame) => frame,
            None => return Ok(()),
        };

        self.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&self.state.frame_data()),
        );
        self.queue.write_buffer(
            &self.lights_buffer,
            0,
            bytemuck::bytes_of(&self.state.lights_data()),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.15,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for draw in &self.draws {
                let mesh = match self.meshes.get(&draw.mesh.0) {
                    Some(mesh) => mesh,
                    None => continue,
                };
                pass.set_bind_group(1, &self.object_bind_group, &[draw.object_offset]);
                pass.set_bind_group(2, self.slot_bind_group(draw.slot), &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.surface_texture.present();

        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let max_size = self.device.limits().max_texture_dimension_2d;
        let width = width.min(max_size);
        let height = height.min(max_size);

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_view(&self.device, width, height);
    }
}
