//! GPU state and frame orchestration.
//!
//! [`GpuState`] owns the surface, device, queue and the four render passes.
//! The camera is fixed: the demo frames the rocket from a few units back and
//! all motion comes from the simulation. Drawing order is back to front:
//! gradient backdrop, starfield, rocket sprite, then the additive plume.

mod backdrop;
mod plume_pass;
mod rocket;
mod starfield;

use std::sync::Arc;

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::GpuError;
use crate::pool::ParticlePool;
use crate::shader::SceneUniforms;
use crate::textures::SpriteImage;

pub use backdrop::BackdropPass;
pub use plume_pass::PlumePass;
pub use rocket::{RocketPass, SPRITE_HEIGHT, SPRITE_WIDTH};
pub use starfield::{StarfieldPass, STAR_COUNT};

/// Camera eye position. Looks at the origin, Y up.
const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 5.0);
const CAMERA_FOV_Y: f32 = 75.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 1000.0;

/// Everything the renderer needs from one simulation tick.
pub struct FrameState<'a> {
    /// Particle attributes to draw.
    pub pool: &'a ParticlePool,
    /// Whether the pool changed since the last uploaded frame.
    pub plume_dirty: bool,
    /// Rocket local-to-world matrix, sprite scale included.
    pub rocket_model: Mat4,
    /// Seconds since startup.
    pub time: f32,
    /// Seconds since the previous frame.
    pub delta_time: f32,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    backdrop: BackdropPass,
    starfield: StarfieldPass,
    rocket: RocketPass,
    plume: PlumePass,
}

impl GpuState {
    pub async fn new(
        window: Arc<Window>,
        sprite: &SpriteImage,
        plume_capacity: usize,
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        log::info!("adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::cast_slice(&[SceneUniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                time: 0.0,
                delta_time: 0.0,
                _padding: [0.0; 2],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
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

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });

        let backdrop = BackdropPass::new(&device, surface_format);
        let starfield = StarfieldPass::new(&device, surface_format, &scene_layout);
        let rocket = RocketPass::new(&device, &queue, surface_format, &scene_layout, sprite);
        let plume = PlumePass::new(&device, surface_format, &scene_layout, plume_capacity);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene_uniform_buffer,
            scene_bind_group,
            backdrop,
            starfield,
            rocket,
            plume,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    fn view_proj(&self) -> Mat4 {
        let aspect = self.config.width as f32 / self.config.height as f32;
        let proj = Mat4::perspective_rh(
            CAMERA_FOV_Y.to_radians(),
            aspect,
            CAMERA_NEAR,
            CAMERA_FAR,
        );
        let view = Mat4::look_at_rh(CAMERA_EYE, Vec3::ZERO, Vec3::Y);
        proj * view
    }

    pub fn render(
        &mut self,
        frame: &FrameState<'_>,
        #[cfg(feature = "egui")] ui: Option<crate::panel::UiDraw<'_>>,
    ) -> Result<(), wgpu::SurfaceError> {
        self.queue.write_buffer(
            &self.scene_uniform_buffer,
            0,
            bytemuck::cast_slice(&[SceneUniforms {
                view_proj: self.view_proj().to_cols_array_2d(),
                time: frame.time,
                delta_time: frame.delta_time,
                _padding: [0.0; 2],
            }]),
        );
        self.rocket.set_model(&self.queue, frame.rocket_model);
        if frame.plume_dirty {
            self.plume.upload(&self.queue, frame.pool);
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.backdrop.draw(&mut render_pass);
            self.starfield.draw(&mut render_pass, &self.scene_bind_group);
            self.rocket.draw(&mut render_pass, &self.scene_bind_group);
            self.plume.draw(&mut render_pass, &self.scene_bind_group);
        }

        #[cfg(feature = "egui")]
        if let Some(ui) = ui {
            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [self.config.width, self.config.height],
                pixels_per_point: ui.output.pixels_per_point,
            };
            ui.layer
                .prepare(&self.device, &self.queue, &mut encoder, &ui.output, &screen_descriptor);

            {
                let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Ui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
                let mut render_pass = render_pass.forget_lifetime();
                ui.layer
                    .renderer()
                    .render(&mut render_pass, &ui.output.paint_jobs, &screen_descriptor);
            }

            self.queue.submit(std::iter::once(encoder.finish()));
            output.present();
            ui.layer.cleanup(&ui.output);
            return Ok(());
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
