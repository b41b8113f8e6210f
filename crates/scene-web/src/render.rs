//! WebGPU state and the two scene pipelines: additive point-sprite particles
//! and lit, fogged, vertex-colored shape meshes.

use glam::{Mat4, Vec3};
use scene_core::mesh::{MeshData, Vertex};
use scene_core::passing::ShapeKind;
use scene_core::state::{Camera, Fog, LightRig};
use scene_core::{GalaxyField, GradientStops, GALAXY_OPACITY, GALAXY_Z_OFFSET};
use web_sys as web;

use crate::constants::SHAPE_INSTANCE_CAPACITY;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ParticleUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    size: f32,
    opacity: f32,
    _pad: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ParticleInstance {
    pos: [f32; 3],
    color: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    ambient: [f32; 4],
    light_color: [f32; 4],
    light_dir: [f32; 4],
    fog_color_near: [f32; 4],
    fog_far: [f32; 4],
    camera_pos: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeInstance {
    pub model: [[f32; 4]; 4],
    /// x = opacity, yzw unused
    pub misc: [f32; 4],
}

impl ShapeInstance {
    pub fn new(model: Mat4, opacity: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            misc: [opacity, 0.0, 0.0, 0.0],
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum MeshSlot {
    Passing(ShapeKind),
    Anchored(ShapeKind),
    Model,
}

#[derive(Clone, Copy)]
pub struct ShapeDraw {
    pub mesh: MeshSlot,
    pub instance: ShapeInstance,
}

struct GpuMesh {
    vb: wgpu::Buffer,
    ib: wgpu::Buffer,
    index_count: u32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    particle_pipeline: wgpu::RenderPipeline,
    particle_uniforms: wgpu::Buffer,
    particle_bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    particle_vb: wgpu::Buffer,

    shape_pipeline: wgpu::RenderPipeline,
    scene_uniforms: wgpu::Buffer,
    shape_bind_group: wgpu::BindGroup,
    shape_instance_vb: wgpu::Buffer,
    passing_meshes: [GpuMesh; 3],
    anchored_meshes: [GpuMesh; 3],
    model_mesh: Option<GpuMesh>,

    camera: Camera,
    fog: Fog,
    lights: LightRig,
    width: u32,
    height: u32,
}

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

const ADDITIVE_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

fn upload_mesh(device: &wgpu::Device, label: &str, mesh: &MeshData) -> GpuMesh {
    use wgpu::util::DeviceExt;
    let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    GpuMesh {
        vb,
        ib,
        index_count: mesh.index_count(),
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        camera: Camera,
        field: &GalaxyField,
        stops: &GradientStops,
        model_mesh: Option<&MeshData>,
    ) -> anyhow::Result<Self> {
        use wgpu::util::DeviceExt;

        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, width, height);

        // ---------------- particle pipeline ----------------
        let particle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(scene_core::PARTICLES_WGSL.into()),
        });
        let particle_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_uniforms"),
            size: std::mem::size_of::<ParticleUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Interleave the generated field once; the draw range alone changes
        // at runtime.
        let mut particle_data: Vec<ParticleInstance> =
            Vec::with_capacity(field.max_count() as usize);
        let (pos, col) = (field.positions(), field.colors());
        for i in 0..field.max_count() as usize {
            let i3 = i * 3;
            particle_data.push(ParticleInstance {
                pos: [pos[i3], pos[i3 + 1], pos[i3 + 2]],
                color: [col[i3], col[i3 + 1], col[i3 + 2]],
            });
        }
        let particle_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_vb"),
            contents: bytemuck::cast_slice(&particle_data),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let particle_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("particle_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let particle_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("particle_bg"),
            layout: &particle_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: particle_uniforms.as_entire_binding(),
            }],
        });
        let particle_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particle_pl"),
            bind_group_layouts: &[&particle_bgl],
            push_constant_ranges: &[],
        });
        let particle_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 12,
                        shader_location: 2,
                    },
                ],
            },
        ];
        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&particle_pl),
            vertex: wgpu::VertexState {
                module: &particle_shader,
                entry_point: Some("vs_main"),
                buffers: &particle_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                // additive sprites test against the shapes but never occlude
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &particle_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(ADDITIVE_BLEND),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        // ---------------- shape pipeline ----------------
        let shape_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shapes_shader"),
            source: wgpu::ShaderSource::Wgsl(scene_core::SHAPES_WGSL.into()),
        });
        let scene_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let shape_instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("shape_instance_vb"),
            size: (std::mem::size_of::<ShapeInstance>() * SHAPE_INSTANCE_CAPACITY) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let shape_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shape_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let shape_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shape_bg"),
            layout: &shape_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniforms.as_entire_binding(),
            }],
        });
        let shape_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shape_pl"),
            bind_group_layouts: &[&shape_bgl],
            push_constant_ranges: &[],
        });
        let shape_buffers = [
            wgpu::VertexBufferLayout {
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
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 24,
                        shader_location: 2,
                    },
                ],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ShapeInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 0,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 4,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 32,
                        shader_location: 5,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 48,
                        shader_location: 6,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 64,
                        shader_location: 7,
                    },
                ],
            },
        ];
        let shape_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shape_pipeline"),
            layout: Some(&shape_pl),
            vertex: wgpu::VertexState {
                module: &shape_shader,
                entry_point: Some("vs_main"),
                buffers: &shape_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                cull_mode: Some(wgpu::Face::Back),
                ..wgpu::PrimitiveState::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shape_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let passing_meshes = [
            upload_mesh(&device, "passing_tetra", &scene_core::mesh::passing_mesh(ShapeKind::Tetra, stops)),
            upload_mesh(&device, "passing_sphere", &scene_core::mesh::passing_mesh(ShapeKind::Sphere, stops)),
            upload_mesh(&device, "passing_box", &scene_core::mesh::passing_mesh(ShapeKind::Box, stops)),
        ];
        let anchored_meshes = [
            upload_mesh(&device, "anchored_tetra", &scene_core::mesh::anchored_mesh(ShapeKind::Tetra, stops)),
            upload_mesh(&device, "anchored_sphere", &scene_core::mesh::anchored_mesh(ShapeKind::Sphere, stops)),
            upload_mesh(&device, "anchored_box", &scene_core::mesh::anchored_mesh(ShapeKind::Box, stops)),
        ];
        let model_mesh = model_mesh.map(|m| upload_mesh(&device, "model_mesh", m));

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            particle_pipeline,
            particle_uniforms,
            particle_bind_group,
            quad_vb,
            particle_vb,
            shape_pipeline,
            scene_uniforms,
            shape_bind_group,
            shape_instance_vb,
            passing_meshes,
            anchored_meshes,
            model_mesh,
            camera,
            fog: Fog::default(),
            lights: LightRig::default(),
            width,
            height,
        })
    }

    #[inline]
    pub fn has_model(&self) -> bool {
        self.model_mesh.is_some()
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    fn mesh(&self, slot: MeshSlot) -> Option<&GpuMesh> {
        let kind_index = |k: ShapeKind| match k {
            ShapeKind::Tetra => 0,
            ShapeKind::Sphere => 1,
            ShapeKind::Box => 2,
        };
        match slot {
            MeshSlot::Passing(k) => Some(&self.passing_meshes[kind_index(k)]),
            MeshSlot::Anchored(k) => Some(&self.anchored_meshes[kind_index(k)]),
            MeshSlot::Model => self.model_mesh.as_ref(),
        }
    }

    pub fn render(
        &mut self,
        particle_count: u32,
        galaxy_rotation: f32,
        point_size: f32,
        draws: &[ShapeDraw],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_proj = self.camera.view_proj().to_cols_array_2d();
        let galaxy_model = Mat4::from_translation(Vec3::new(0.0, 0.0, GALAXY_Z_OFFSET))
            * Mat4::from_rotation_y(galaxy_rotation);
        self.queue.write_buffer(
            &self.particle_uniforms,
            0,
            bytemuck::bytes_of(&ParticleUniforms {
                view_proj,
                model: galaxy_model.to_cols_array_2d(),
                size: point_size,
                opacity: GALAXY_OPACITY,
                _pad: [0.0; 2],
            }),
        );

        let dir = self.lights.directional_position.normalize_or_zero();
        self.queue.write_buffer(
            &self.scene_uniforms,
            0,
            bytemuck::bytes_of(&SceneUniforms {
                view_proj,
                ambient: (self.lights.ambient_color * self.lights.ambient_intensity)
                    .extend(0.0)
                    .to_array(),
                light_color: (self.lights.directional_color * self.lights.directional_intensity)
                    .extend(0.0)
                    .to_array(),
                light_dir: dir.extend(0.0).to_array(),
                fog_color_near: self.fog.color.extend(self.fog.near).to_array(),
                fog_far: [self.fog.far, 0.0, 0.0, 0.0],
                camera_pos: self.camera.eye.extend(0.0).to_array(),
            }),
        );

        // Clamp defensively; more draws than slots is a composition bug.
        let draws = &draws[..draws.len().min(SHAPE_INSTANCE_CAPACITY)];
        let instances: Vec<ShapeInstance> = draws.iter().map(|d| d.instance).collect();
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.shape_instance_vb, 0, bytemuck::cast_slice(&instances));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.fog.color.x as f64,
                            g: self.fog.color.y as f64,
                            b: self.fog.color.z as f64,
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

            rpass.set_pipeline(&self.shape_pipeline);
            rpass.set_bind_group(0, &self.shape_bind_group, &[]);
            let stride = std::mem::size_of::<ShapeInstance>() as u64;
            for (i, draw) in draws.iter().enumerate() {
                let Some(mesh) = self.mesh(draw.mesh) else {
                    continue;
                };
                rpass.set_vertex_buffer(0, mesh.vb.slice(..));
                rpass.set_vertex_buffer(
                    1,
                    self.shape_instance_vb
                        .slice(i as u64 * stride..(i as u64 + 1) * stride),
                );
                rpass.set_index_buffer(mesh.ib.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }

            rpass.set_pipeline(&self.particle_pipeline);
            rpass.set_bind_group(0, &self.particle_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.particle_vb.slice(..));
            rpass.draw(0..6, 0..particle_count);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
