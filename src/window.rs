//! Winit application shell.
//!
//! Owns the window, the GPU state, the simulator and the live parameters.
//! Every redraw ticks the clock, steps the simulation with the current
//! slider values and hands the frame to [`GpuState::render`].

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::config::PlumeConfig;
use crate::emitter::exhaust_pose;
use crate::gpu::{FrameState, GpuState, SPRITE_HEIGHT, SPRITE_WIDTH};
use crate::params::{RocketParams, ThrustParams};
use crate::plume::PlumeSimulator;
use crate::textures;
use crate::time::FrameClock;

#[cfg(feature = "egui")]
use crate::panel::{ControlPanel, EguiLayer, UiDraw};

pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    simulator: PlumeSimulator,
    thrust: ThrustParams,
    rocket: RocketParams,
    clock: FrameClock,
    #[cfg(feature = "egui")]
    ui: Option<EguiLayer>,
    #[cfg(feature = "egui")]
    panel: ControlPanel,
}

impl App {
    pub fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            simulator: PlumeSimulator::new(PlumeConfig::default()),
            thrust: ThrustParams::default(),
            rocket: RocketParams::default(),
            clock: FrameClock::new(),
            #[cfg(feature = "egui")]
            ui: None,
            #[cfg(feature = "egui")]
            panel: ControlPanel::default(),
        }
    }

    /// Rocket local-to-world matrix: translate, spin, scale the unit quad.
    fn rocket_model(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::new(SPRITE_WIDTH, SPRITE_HEIGHT, 1.0),
            Quat::from_rotation_z(self.rocket.rotation_deg.to_radians()),
            Vec3::new(self.rocket.x, self.rocket.y, 0.0),
        )
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_none() {
            return;
        }

        let dt = self.clock.tick();
        self.thrust = self.thrust.clamped();

        let pose = exhaust_pose(&self.rocket, SPRITE_HEIGHT);
        let report = self.simulator.update(dt, self.thrust, pose);
        let rocket_model = self.rocket_model();

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let frame = FrameState {
            pool: self.simulator.pool(),
            plume_dirty: report.buffers_dirty,
            rocket_model,
            time: self.clock.elapsed(),
            delta_time: dt,
        };

        #[cfg(feature = "egui")]
        let ui = match (self.ui.as_mut(), self.window.as_ref()) {
            (Some(layer), Some(window)) => {
                layer.begin_frame(window);
                self.panel.show(
                    layer.ctx(),
                    &mut self.thrust,
                    &mut self.rocket,
                    self.clock.fps(),
                    report.active_count,
                );
                let output = layer.end_frame(window);
                Some((layer, output))
            }
            _ => None,
        };

        #[cfg(feature = "egui")]
        let result = gpu.render(&frame, ui.map(|(layer, output)| UiDraw { layer, output }));
        #[cfg(not(feature = "egui"))]
        let result = gpu.render(&frame);

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                let (w, h) = (gpu.config.width, gpu.config.height);
                gpu.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Rocket Plume")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let sprite = textures::rocket_sprite();
        let capacity = self.simulator.pool().len();
        let gpu = match pollster::block_on(GpuState::new(window.clone(), &sprite, capacity)) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        };

        #[cfg(feature = "egui")]
        {
            self.ui = Some(EguiLayer::new(gpu.device(), gpu.surface_format(), &window));
        }

        self.window = Some(window);
        self.gpu = Some(gpu);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        if let (Some(ui), Some(window)) = (self.ui.as_mut(), self.window.as_ref()) {
            if ui.on_window_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}
