use glam::Vec2;
use web_sys as web;

mod geometry;

use crate::constants::{
    ENABLE_SHADING, FOG_COLOR, FOG_DENSITY, PARTICLE_COUNT,
};
use crate::scene::{Light, MeshKind};
use crate::{camera, scene};

pub use crate::camera::screen_to_world_ray;

static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

const MESH_KINDS: usize = 4;
const MESH_INSTANCE_CAPACITY: usize = 64;

#[inline]
pub fn mesh_slot(kind: MeshKind) -> usize {
    match kind {
        MeshKind::Cuboid => 0,
        MeshKind::Sphere => 1,
        MeshKind::Torus => 2,
        MeshKind::Cylinder => 3,
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x = emissive intensity; yzw reserved.
    pub emissive: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    /// xyz = world position, w = point size.
    pub pos_size: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    /// xyz = camera eye, w = time.
    eye_time: [f32; 4],
    /// rgb = fog color, w = fog density.
    fog: [f32; 4],
    /// x = ambient, y = shading toggle, zw unused.
    params: [f32; 4],
    /// Pairs per light: position+intensity, color+pad.
    lights: [[f32; 4]; 8],
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Per-frame draw input, assembled by the frame loop from the scene.
pub struct FrameDraw<'f> {
    pub camera_z: f32,
    pub lights: [Light; 4],
    pub meshes: &'f [Vec<MeshInstance>; MESH_KINDS],
    pub particles: &'f [ParticleInstance],
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    mesh_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    meshes: [GpuMesh; MESH_KINDS],
    mesh_instance_buffers: [wgpu::Buffer; MESH_KINDS],
    particle_quad: wgpu::Buffer,
    particle_instances: wgpu::Buffer,

    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
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

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<geometry::Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
        };
        let mesh_instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
                6 => Float32x4, 7 => Float32x4
            ],
        };
        let depth_state = wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth24Plus,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        };
        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_mesh"),
                buffers: &[vertex_layout, mesh_instance_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..wgpu::PrimitiveState::default()
            },
            depth_stencil: Some(depth_state.clone()),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_mesh"),
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

        let quad_layout = wgpu::VertexBufferLayout {
            array_stride: 8,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x2],
        };
        let particle_instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![1 => Float32x4, 2 => Float32x4],
        };
        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_particle"),
                buffers: &[quad_layout, particle_instance_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..wgpu::PrimitiveState::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                depth_write_enabled: false,
                ..depth_state
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    // Additive glow
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::SrcAlpha,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let meshes = [
            upload_mesh(&device, &queue, "cuboid", &geometry::cuboid()),
            upload_mesh(&device, &queue, "sphere", &geometry::uv_sphere(16, 24)),
            upload_mesh(&device, &queue, "torus", &geometry::torus(0.012, 64, 12)),
            upload_mesh(&device, &queue, "cylinder", &geometry::cylinder(32)),
        ];
        let mesh_instance_buffers = std::array::from_fn(|_| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("mesh_instances"),
                size: (MESH_INSTANCE_CAPACITY * std::mem::size_of::<MeshInstance>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });

        let particle_quad = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_quad"),
            size: 4 * 8,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let corners: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];
        queue.write_buffer(&particle_quad, 0, bytemuck::cast_slice(&corners));
        let particle_instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_instances"),
            size: (PARTICLE_COUNT * std::mem::size_of::<ParticleInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_view = create_depth(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            mesh_pipeline,
            particle_pipeline,
            uniform_buffer,
            bind_group,
            meshes,
            mesh_instance_buffers,
            particle_quad,
            particle_instances,
            depth_view,
            width,
            height,
            clear_color: wgpu::Color {
                r: FOG_COLOR[0] as f64,
                g: FOG_COLOR[1] as f64,
                b: FOG_COLOR[2] as f64,
                a: 1.0,
            },
            time_accum: 0.0,
        })
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
            self.depth_view = create_depth(&self.device, width, height);
        }
    }

    pub fn render(&mut self, dt_sec: f32, draw: &FrameDraw) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);

        let aspect = self.width as f32 / (self.height as f32).max(1.0);
        let view_proj = camera::projection_matrix(aspect) * camera::view_matrix(draw.camera_z);
        let mut lights = [[0.0_f32; 4]; 8];
        for (i, l) in draw.lights.iter().enumerate() {
            lights[i * 2] = [l.position.x, l.position.y, l.position.z, l.intensity];
            lights[i * 2 + 1] = [l.color.x, l.color.y, l.color.z, 0.0];
        }
        let uniforms = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            eye_time: [0.0, 0.0, draw.camera_z, self.time_accum],
            fog: [FOG_COLOR[0], FOG_COLOR[1], FOG_COLOR[2], FOG_DENSITY],
            params: [0.3, if ENABLE_SHADING { 1.0 } else { 0.0 }, 0.0, 0.0],
            lights,
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        for (slot, instances) in draw.meshes.iter().enumerate() {
            let count = instances.len().min(MESH_INSTANCE_CAPACITY);
            if count > 0 {
                self.queue.write_buffer(
                    &self.mesh_instance_buffers[slot],
                    0,
                    bytemuck::cast_slice(&instances[..count]),
                );
            }
        }
        let particle_count = draw.particles.len().min(PARTICLE_COUNT);
        if particle_count > 0 {
            self.queue.write_buffer(
                &self.particle_instances,
                0,
                bytemuck::cast_slice(&draw.particles[..particle_count]),
            );
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
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
                        load: wgpu::LoadOp::Clear(self.clear_color),
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

            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            for (slot, instances) in draw.meshes.iter().enumerate() {
                let count = instances.len().min(MESH_INSTANCE_CAPACITY) as u32;
                if count == 0 {
                    continue;
                }
                let mesh = &self.meshes[slot];
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.mesh_instance_buffers[slot].slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..count);
            }

            if !draw.particles.is_empty() {
                rpass.set_pipeline(&self.particle_pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.particle_quad.slice(..));
                rpass.set_vertex_buffer(1, self.particle_instances.slice(..));
                rpass.draw(0..4, 0..draw.particles.len().min(PARTICLE_COUNT) as u32);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn upload_mesh(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    data: &geometry::MeshData,
) -> GpuMesh {
    let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (data.vertices.len() * std::mem::size_of::<geometry::Vertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    queue.write_buffer(&vertex_buffer, 0, bytemuck::cast_slice(&data.vertices));
    // Index buffer sizes must be 4-byte aligned for writes.
    let index_bytes = (data.indices.len() * 2 + 3) & !3;
    let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: index_bytes as u64,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let mut padded = data.indices.clone();
    if padded.len() % 2 == 1 {
        padded.push(0);
    }
    queue.write_buffer(&index_buffer, 0, bytemuck::cast_slice(&padded));
    GpuMesh {
        vertex_buffer,
        index_buffer,
        index_count: data.indices.len() as u32,
    }
}

fn create_depth(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
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
        format: wgpu::TextureFormat::Depth24Plus,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Rotate a particle layer's packed positions into world space and pack
/// draw instances.
pub fn pack_particles(layer: &scene::ParticleLayer, out: &mut Vec<ParticleInstance>) {
    let rot = glam::Mat3::from_rotation_y(layer.rotation_y)
        * glam::Mat3::from_rotation_x(layer.rotation_x);
    for chunk in layer.positions.chunks_exact(3) {
        let p = rot * glam::Vec3::new(chunk[0], chunk[1], chunk[2]);
        out.push(ParticleInstance {
            pos_size: [p.x, p.y, p.z, layer.size],
            color: layer.color.to_array(),
        });
    }
}

/// NDC pointer position for the pointer-chasing light.
pub fn pointer_ndc(canvas: &web::HtmlCanvasElement, mouse_px: Vec2) -> Vec2 {
    let w = canvas.width().max(1) as f32;
    let h = canvas.height().max(1) as f32;
    Vec2::new(
        (mouse_px.x / w) * 2.0 - 1.0,
        1.0 - (mouse_px.y / h) * 2.0,
    )
}
