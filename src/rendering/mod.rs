//! # Rendering Module
//!
//! The wgpu side of the viewer: camera matrices (`camera`), depth and block
//! textures (`texture`), and the `WorldRenderer` that rebuilds the visible
//! mesh each frame and draws it in a single render pass.

pub mod camera;
pub mod texture;

use std::time::{Duration, Instant};

use cgmath::Point3;
use log::error;
use wgpu::util::DeviceExt;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use crate::geometry::{block_color, MeshBuilder, Vertex};
use crate::map::{MapCache, RENDER_LIMIT};
use camera::{Camera, CameraUniform, Projection};
use texture::Texture;

/// Number of full-cube markers in the showcase column.
const SHOWCASE_CUBES: i64 = 16;
/// World-space base height of the showcase columns.
const SHOWCASE_BASE: i64 = 10;

/// Owns the render pipeline and per-frame mesh for the voxel world.
///
/// The mesh is rebuilt from the map every frame, immediate-mode style; the
/// vertex buffer grows to the high-water mark and is reused in place below it.
pub struct WorldRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    depth_texture: Texture,
    projection: Projection,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    mesh: MeshBuilder,
    last_mesh_build: Duration,
}

impl WorldRenderer {
    /// Creates the pipeline, textures, and buffers for world rendering.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `queue` - The queue used to upload the block texture
    /// * `config` - Surface configuration containing size and format
    pub fn new(device: &Device, queue: &Queue, config: &SurfaceConfiguration) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Block Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../assets/shaders/block_shader.wgsl").into(),
            ),
        });

        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let block_texture = Texture::create_block_texture(device, queue);
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
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
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout: &texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&block_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&block_texture.sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Block Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Block Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Texture::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let depth_texture = Texture::create_depth_texture(device, config, "Depth Texture");
        let projection = Projection::new(config.width, config.height);

        let vertex_capacity = 1 << 20;
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("World Vertex Buffer"),
            size: (vertex_capacity * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            render_pipeline,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            texture_bind_group,
            depth_texture,
            projection,
            vertex_buffer,
            vertex_capacity,
            mesh: MeshBuilder::new(),
            last_mesh_build: Duration::ZERO,
        }
    }

    /// Handles window resize by recreating the depth texture and updating the
    /// projection aspect ratio.
    pub fn resize(&mut self, device: &Device, config: &SurfaceConfiguration) {
        self.depth_texture = Texture::create_depth_texture(device, config, "Depth Texture");
        self.projection.resize(config.width, config.height);
    }

    /// Wall-clock duration of the most recent mesh rebuild.
    pub fn last_mesh_build(&self) -> Duration {
        self.last_mesh_build
    }

    /// Rebuilds the frame's mesh from the map.
    ///
    /// Sweeps the render cube around the observer emitting every occupied
    /// voxel, then appends the fixed shape showcase columns.
    pub fn rebuild_mesh(&mut self, map: &MapCache, observer: Point3<f32>) {
        let started = Instant::now();
        self.mesh.clear();

        let px = observer.x.floor() as i64;
        let py = observer.y.floor() as i64;
        let pz = observer.z.floor() as i64;
        for x in px - RENDER_LIMIT..=px + RENDER_LIMIT {
            for y in py - RENDER_LIMIT..=py + RENDER_LIMIT {
                for z in pz - RENDER_LIMIT..=pz + RENDER_LIMIT {
                    let value = map.get(x, y, z);
                    if value != 0 {
                        self.mesh.emit_voxel(
                            x,
                            y,
                            z,
                            value,
                            Self::neighbors(map, x, y, z),
                            block_color(value),
                        );
                    }
                }
            }
        }

        self.emit_showcase(map);
        self.last_mesh_build = started.elapsed();
    }

    /// Emits the fixed demonstration columns that exercise the whole shape
    /// catalog: full cubes, the 8 anti-pyramids, the 8 pyramids, and the 12
    /// prisms, floating above the terrain near the spawn point.
    fn emit_showcase(&mut self, map: &MapCache) {
        for a in 0..SHOWCASE_CUBES {
            self.emit_marker(map, -2, 0, SHOWCASE_BASE + a * 2, 255, [1.0, 1.0, 0.0]);
        }

        for a in 0..8u8 {
            let mask = 255 - (1 << a);
            self.emit_marker(map, 0, 0, SHOWCASE_BASE + a as i64 * 2, mask, [1.0, 0.0, 0.0]);
        }

        for a in 0..8u8 {
            let mask = (1 << a) | (1 << (a ^ 1)) | (1 << (a ^ 2)) | (1 << (a ^ 4));
            self.emit_marker(
                map,
                0,
                0,
                SHOWCASE_BASE + a as i64 * 2 + 16,
                mask,
                [0.0, 0.0, 1.0],
            );
        }

        // One prism per unordered pair of corners differing in a single axis.
        let mut q = 0;
        for a in 0..8u8 {
            for b in 0..a {
                match a ^ b {
                    1 => {
                        let mask = 255 - (1 << (a ^ 6)) - (1 << (b ^ 6));
                        self.emit_marker(map, -4, 0, SHOWCASE_BASE + q, mask, [0.0, 1.0, 0.0]);
                        q += 2;
                    }
                    2 => {
                        let mask = 255 - (1 << (a ^ 5)) - (1 << (b ^ 5));
                        self.emit_marker(map, -4, 0, SHOWCASE_BASE + q, mask, [0.5, 0.5, 1.0]);
                        q += 2;
                    }
                    4 => {
                        let mask = 255 - (1 << (a ^ 3)) - (1 << (b ^ 3));
                        self.emit_marker(map, -4, 0, SHOWCASE_BASE + q, mask, [1.0, 0.5, 0.0]);
                        q += 2;
                    }
                    _ => {}
                }
            }
        }
    }

    fn emit_marker(&mut self, map: &MapCache, x: i64, y: i64, z: i64, mask: u8, color: [f32; 3]) {
        self.mesh
            .emit_voxel(x, y, z, mask, Self::neighbors(map, x, y, z), color);
    }

    /// The six face-adjacent block values in -x, +x, -y, +y, -z, +z order.
    fn neighbors(map: &MapCache, x: i64, y: i64, z: i64) -> [u8; 6] {
        [
            map.get(x - 1, y, z),
            map.get(x + 1, y, z),
            map.get(x, y - 1, z),
            map.get(x, y + 1, z),
            map.get(x, y, z - 1),
            map.get(x, y, z + 1),
        ]
    }

    /// Draws the current mesh to the surface.
    ///
    /// Uploads the camera uniform and the frame's vertices, then records a
    /// single render pass with a black clear and depth testing.
    pub fn render(
        &mut self,
        surface: &Surface,
        device: &Device,
        queue: &Queue,
        camera: &Camera,
    ) {
        let frame = match surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                error!("Error getting current frame: {:?}", err);
                return;
            }
        };

        self.camera_uniform.update_view_proj(camera, &self.projection);
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );

        let vertices = self.mesh.vertices();
        if vertices.len() > self.vertex_capacity {
            self.vertex_capacity = vertices.len().next_power_of_two();
            self.vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("World Vertex Buffer"),
                size: (self.vertex_capacity * std::mem::size_of::<Vertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));

        let view = frame.texture.create_view(&Default::default());
        let mut encoder = device.create_command_encoder(&Default::default());
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            rpass.set_pipeline(&self.render_pipeline);
            rpass.set_bind_group(0, &self.camera_bind_group, &[]);
            rpass.set_bind_group(1, &self.texture_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rpass.draw(0..vertices.len() as u32, 0..1);
        }

        queue.submit([encoder.finish()]);
        frame.present();
    }
}
