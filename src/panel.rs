//! Egui control panel (behind the `egui` feature).
//!
//! [`EguiLayer`] wraps the egui context, winit state and wgpu renderer;
//! [`ControlPanel`] draws the thrust and rocket sliders. Slider ranges match
//! the parameter clamps in [`crate::params`].

use std::sync::Arc;

use winit::window::Window;

use crate::params::{
    RocketParams, ThrustParams, ANGLE_RANGE, DRAG_RANGE, MAGNITUDE_RANGE,
    ROCKET_POSITION_RANGE, ROCKET_ROTATION_RANGE,
};

/// Egui plumbing: context, winit event state and the wgpu renderer.
pub struct EguiLayer {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// Tessellated output of one egui frame, ready for the render pass.
pub struct EguiFrameOutput {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// Borrowed pair handed to the renderer for the overlay pass.
pub struct UiDraw<'a> {
    pub layer: &'a mut EguiLayer,
    pub output: EguiFrameOutput,
}

impl EguiLayer {
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Arc<Window>,
    ) -> Self {
        let ctx = egui::Context::default();

        let mut style = egui::Style::default();
        style.visuals = egui::Visuals::dark();
        style.visuals.window_shadow = egui::Shadow::NONE;
        style.visuals.popup_shadow = egui::Shadow::NONE;
        ctx.set_style(style);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(
            device,
            output_format,
            None,  // depth format
            1,     // msaa samples
            false, // dithering
        );

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Returns true when egui consumed the event.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    pub fn begin_frame(&mut self, window: &Window) {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_frame(raw_input);
    }

    pub fn ctx(&self) -> &egui::Context {
        &self.ctx
    }

    pub fn end_frame(&mut self, window: &Window) -> EguiFrameOutput {
        let full_output = self.ctx.end_frame();

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        EguiFrameOutput {
            paint_jobs,
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        }
    }

    /// Upload textures and buffers before the overlay render pass.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output: &EguiFrameOutput,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        self.renderer
            .update_buffers(device, queue, encoder, &output.paint_jobs, screen_descriptor);
    }

    pub fn renderer(&self) -> &egui_wgpu::Renderer {
        &self.renderer
    }

    /// Free textures once the frame has been submitted.
    pub fn cleanup(&mut self, output: &EguiFrameOutput) {
        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

/// The live-tuning window: thrust and rocket sliders plus an FPS readout.
#[derive(Default)]
pub struct ControlPanel;

impl ControlPanel {
    /// Draw the panel. Mutates the parameter structs in place.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        thrust: &mut ThrustParams,
        rocket: &mut RocketParams,
        fps: f32,
        active_particles: usize,
    ) {
        egui::Window::new("Rocket Plume")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Thrust");
                ui.add(
                    egui::Slider::new(&mut thrust.angle_deg, ANGLE_RANGE)
                        .text("angle (deg)"),
                );
                ui.add(
                    egui::Slider::new(&mut thrust.magnitude, MAGNITUDE_RANGE).text("magnitude"),
                );
                ui.add(
                    egui::Slider::new(&mut thrust.drag_coefficient, DRAG_RANGE).text("drag"),
                );

                ui.separator();
                ui.heading("Rocket");
                ui.add(egui::Slider::new(&mut rocket.x, ROCKET_POSITION_RANGE).text("x"));
                ui.add(egui::Slider::new(&mut rocket.y, ROCKET_POSITION_RANGE).text("y"));
                ui.add(
                    egui::Slider::new(&mut rocket.rotation_deg, ROCKET_ROTATION_RANGE)
                        .text("rotation (deg)"),
                );

                ui.separator();
                ui.label(format!("{fps:.0} fps, {active_particles} active"));
            });
    }
}
