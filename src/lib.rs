//! # Plume - Rocket Thrust Plume Demo
//!
//! A decorative particle simulation: a rocket sprite hovers over a starfield
//! while a pool of exhaust particles streams from its tail. Thrust angle,
//! magnitude and drag are live-tunable (enable the `egui` feature for the
//! slider panel).
//!
//! ## Quick Start
//!
//! ```ignore
//! use plume::prelude::*;
//!
//! let mut sim = PlumeSimulator::new(PlumeConfig::default());
//! let pose = exhaust_pose(&RocketParams::default(), 2.0);
//!
//! let report = sim.update(1.0 / 60.0, ThrustParams::default(), pose);
//! assert!(report.active_count > 0);
//! ```
//!
//! ## Core Concepts
//!
//! ### The pool
//!
//! [`ParticlePool`] holds a fixed number of particles in flat attribute
//! arrays (positions, velocities, ages, lifespans, sizes, colors). Slots are
//! never allocated or freed at runtime; expired particles are recycled in
//! place by the simulator.
//!
//! ### The simulator
//!
//! [`PlumeSimulator::update`] advances every particle by one Euler step:
//! expired slots respawn at the emitter while thrust is on (and hide
//! otherwise), live slots age, decay under drag, jitter under turbulence and
//! integrate velocity into position. The returned [`TickReport`] says how
//! many particles are visible and whether the GPU copy needs a refresh.
//!
//! ### Parameters
//!
//! [`ThrustParams`] and [`RocketParams`] are plain structs the caller owns
//! and mutates between ticks; turbulence derives from thrust magnitude
//! quadratically. [`EmitterPose`] carries the world-space position and
//! orientation of the exhaust nozzle, usually via [`exhaust_pose`].
//!
//! ## Rendering
//!
//! The demo shell ([`window::App`]) draws the scene with wgpu: gradient
//! backdrop, static starfield, rocket sprite, additive plume quads. The
//! simulation core has no GPU dependency and is usable headless.

pub mod config;
pub mod emitter;
pub mod error;
pub mod gpu;
#[cfg(feature = "egui")]
pub mod panel;
pub mod params;
pub mod plume;
pub mod pool;
pub mod shader;
pub mod textures;
pub mod time;
pub mod visuals;
pub mod window;

pub use config::PlumeConfig;
pub use emitter::{exhaust_pose, thrust_direction, EmitterPose};
pub use error::{DemoError, GpuError, TextureError};
pub use params::{RocketParams, ThrustParams};
pub use plume::{PlumeSimulator, TickReport};
pub use pool::ParticlePool;
pub use time::FrameClock;

/// Everything a typical caller needs.
pub mod prelude {
    pub use crate::config::PlumeConfig;
    pub use crate::emitter::{exhaust_pose, thrust_direction, EmitterPose};
    pub use crate::params::{RocketParams, ThrustParams};
    pub use crate::plume::{PlumeSimulator, TickReport};
    pub use crate::pool::ParticlePool;
    pub use crate::visuals::{alpha_over_life, color_over_life, life_progress, size_over_life};
    pub use glam::{Quat, Vec3};
}
