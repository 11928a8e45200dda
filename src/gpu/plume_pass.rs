//! Plume point pass.
//!
//! Keeps a GPU-side copy of the pool's attributes as interleaved instance
//! data. The copy refreshes only when the simulator reports dirty buffers;
//! an idle plume costs no uploads.

use bytemuck::{Pod, Zeroable};

use crate::pool::ParticlePool;
use crate::shader::PLUME_SHADER;

/// One particle's attributes, interleaved for the vertex fetch.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct PlumeInstance {
    position: [f32; 3],
    size: f32,
    age: f32,
    lifespan: f32,
    color: [f32; 3],
}

/// Instanced quad renderer for the exhaust plume.
pub struct PlumePass {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    /// Scratch for interleaving, reused across frames.
    staging: Vec<PlumeInstance>,
    capacity: u32,
}

impl PlumePass {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        scene_layout: &wgpu::BindGroupLayout,
        capacity: usize,
    ) -> Self {
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Plume Instance Buffer"),
            size: (capacity * std::mem::size_of::<PlumeInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Plume Shader"),
            source: wgpu::ShaderSource::Wgsl(PLUME_SHADER.into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Plume Pipeline Layout"),
            bind_group_layouts: &[scene_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Plume Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<PlumeInstance>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                        wgpu::VertexAttribute {
                            offset: 12,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32,
                        },
                        wgpu::VertexAttribute {
                            offset: 16,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32,
                        },
                        wgpu::VertexAttribute {
                            offset: 20,
                            shader_location: 3,
                            format: wgpu::VertexFormat::Float32,
                        },
                        wgpu::VertexAttribute {
                            offset: 24,
                            shader_location: 4,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    // Additive: overlapping exhaust glows hotter.
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent::OVER,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            instance_buffer,
            staging: Vec::with_capacity(capacity),
            capacity: capacity as u32,
        }
    }

    /// Refresh the GPU copy of the pool. Call only on dirty ticks.
    pub fn upload(&mut self, queue: &wgpu::Queue, pool: &ParticlePool) {
        debug_assert_eq!(pool.len() as u32, self.capacity);

        self.staging.clear();
        let positions = pool.positions();
        let colors = pool.colors();
        for i in 0..pool.len() {
            self.staging.push(PlumeInstance {
                position: [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]],
                size: pool.sizes()[i],
                age: pool.ages()[i],
                lifespan: pool.lifespans()[i],
                color: [colors[i * 3], colors[i * 3 + 1], colors[i * 3 + 2]],
            });
        }

        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.staging));
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, scene_bind_group: &wgpu::BindGroup) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, scene_bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        pass.draw(0..6, 0..self.capacity);
    }
}
