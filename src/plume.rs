//! The plume simulator.
//!
//! [`PlumeSimulator`] owns a fixed-size [`ParticlePool`] and advances it
//! once per frame. Each tick:
//!
//! 1. Every particle ages by `delta_time`.
//! 2. Expired particles respawn at the emitter (when thrust is on) or are
//!    hidden with size 0 (when it is off).
//! 3. Live particles decay by `drag^delta_time`, pick up turbulence noise
//!    and integrate their position with explicit Euler.
//!
//! The returned [`TickReport`] tells the renderer whether the attribute
//! buffers changed and feeds the next tick's short-circuit: when thrust is
//! zero and nothing was alive last tick, `update` is a no-op that leaves
//! every buffer byte-identical.
//!
//! # Example
//!
//! ```
//! use plume::config::PlumeConfig;
//! use plume::emitter::EmitterPose;
//! use plume::params::ThrustParams;
//! use plume::plume::PlumeSimulator;
//!
//! let mut sim = PlumeSimulator::with_seed(PlumeConfig::default(), 42);
//! let report = sim.update(1.0 / 60.0, ThrustParams::default(), EmitterPose::identity());
//! if report.buffers_dirty {
//!     // hand sim.pool() to the renderer
//! }
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::PlumeConfig;
use crate::emitter::EmitterPose;
use crate::params::ThrustParams;
use crate::pool::ParticlePool;

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Particles alive after the tick.
    pub active_count: usize,
    /// Whether the attribute buffers changed and need a GPU refresh.
    pub buffers_dirty: bool,
}

impl TickReport {
    /// True when the tick left nothing to draw.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.active_count == 0
    }
}

/// Per-frame particle simulation for the rocket exhaust plume.
pub struct PlumeSimulator {
    pool: ParticlePool,
    config: PlumeConfig,
    rng: SmallRng,
    /// Did the previous tick leave any particle alive? Drives the
    /// short-circuit when thrust is zero.
    has_active: bool,
}

impl PlumeSimulator {
    /// Create a simulator with a pool sized and seeded per `config`.
    pub fn new(config: PlumeConfig) -> Self {
        Self::from_rng(config, SmallRng::from_entropy())
    }

    /// Create a simulator with a deterministic random sequence.
    pub fn with_seed(config: PlumeConfig, seed: u64) -> Self {
        Self::from_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(config: PlumeConfig, mut rng: SmallRng) -> Self {
        let config = config.validated();
        let pool = ParticlePool::new(&config, &mut rng);
        Self {
            pool,
            config,
            rng,
            has_active: false,
        }
    }

    /// Read access to the attribute pool.
    #[inline]
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Mutable access to the pool, for hosts that seed custom states.
    #[inline]
    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    /// The validated configuration this simulator runs with.
    #[inline]
    pub fn config(&self) -> &PlumeConfig {
        &self.config
    }

    /// Advance the plume by `dt` seconds.
    ///
    /// `params` and `pose` are read by value each tick; the simulator never
    /// writes back to its collaborators. Inputs are expected pre-clamped by
    /// the control panel (see [`ThrustParams::clamped`]).
    pub fn update(&mut self, dt: f32, params: ThrustParams, pose: EmitterPose) -> TickReport {
        // Nothing emitting and nothing on screen: skip all per-particle work.
        // Must be indistinguishable from running the loop with zero emissions.
        if params.magnitude == 0.0 && !self.has_active {
            return TickReport {
                active_count: 0,
                buffers_dirty: false,
            };
        }

        let emitting = params.magnitude > 0.0;
        let turbulence = params.turbulence(self.config.max_turbulence);
        // Exponent, not multiplier: c^a * c^b == c^(a+b), so two half-steps
        // decay exactly as much as one full step.
        let drag = params.drag_coefficient.powf(dt);

        let mut active = 0;
        for i in 0..self.pool.len() {
            self.pool.advance_age(i, dt);

            if self.pool.is_expired(i) {
                if emitting {
                    self.respawn(i, params, pose, turbulence);
                    active += 1;
                } else {
                    // Dead with no replacement: hide and park.
                    self.pool.set_size(i, 0.0);
                    self.pool.set_velocity(i, Vec3::ZERO);
                }
            } else {
                active += 1;

                let mut v = self.pool.velocity(i) * drag;
                v.x += (self.rng.gen::<f32>() - 0.5) * turbulence * dt;
                v.y += (self.rng.gen::<f32>() - 0.5) * turbulence * dt;
                v.z += (self.rng.gen::<f32>() - 0.5) * turbulence * dt;
                self.pool.set_velocity(i, v);

                let p = self.pool.position(i) + v * dt;
                self.pool.set_position(i, p);
            }
        }

        self.has_active = active > 0;
        TickReport {
            active_count: active,
            buffers_dirty: active > 0,
        }
    }

    /// Reset a dead particle at the emitter.
    fn respawn(&mut self, i: usize, params: ThrustParams, pose: EmitterPose, turbulence: f32) {
        self.pool.set_age(i, 0.0);
        let lifespan = self.rng.gen_range(self.config.lifespan.clone());
        self.pool.set_lifespan(i, lifespan);

        self.pool.set_position(i, pose.position);

        let direction = pose.world_thrust_direction(params.angle_deg);
        let speed = params.magnitude * (1.0 + self.rng.gen::<f32>() * self.config.speed_spread);
        let mut v = direction * speed;
        v.x += (self.rng.gen::<f32>() - 0.5) * turbulence;
        v.y += (self.rng.gen::<f32>() - 0.5) * turbulence;
        v.z += (self.rng.gen::<f32>() - 0.5) * turbulence;
        self.pool.set_velocity(i, v);

        self.pool.set_size(i, self.config.newborn_size);
        // Full-bright at birth; the shader tints it toward smoke with age.
        self.pool.set_color(i, Vec3::ONE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> PlumeConfig {
        // No turbulence and no speed spread: respawn velocity is exactly
        // direction * magnitude.
        PlumeConfig::default()
            .with_particle_count(10)
            .with_max_turbulence(0.0)
            .with_speed_spread(0.0)
    }

    #[test]
    fn respawn_points_straight_down_at_zero_angle() {
        let mut sim = PlumeSimulator::with_seed(quiet_config(), 1);
        sim.pool_mut().kill_all();

        let params = ThrustParams {
            angle_deg: 0.0,
            magnitude: 1.0,
            ..Default::default()
        };
        sim.update(0.016, params, EmitterPose::identity());

        for i in 0..sim.pool().len() {
            let v = sim.pool().velocity(i);
            assert!((v - Vec3::new(0.0, -1.0, 0.0)).length() < 1.0e-6, "v = {v}");
        }
    }

    #[test]
    fn respawn_uses_emitter_position() {
        let mut sim = PlumeSimulator::with_seed(quiet_config(), 2);
        sim.pool_mut().kill_all();

        let pose = EmitterPose::at(Vec3::new(1.0, -2.5, 0.0));
        sim.update(0.016, ThrustParams::default(), pose);

        for i in 0..sim.pool().len() {
            assert_eq!(sim.pool().position(i), pose.position);
            assert_eq!(sim.pool().age(i), 0.0);
            assert_eq!(sim.pool().size(i), 10.0);
        }
    }

    #[test]
    fn dead_particles_stay_hidden_without_thrust() {
        let config = quiet_config().with_lifespan(0.1..0.2);
        let mut sim = PlumeSimulator::with_seed(config, 3);
        // One long-lived particle keeps the loop running past expiry of the
        // rest.
        sim.pool_mut().kill_all();
        sim.pool_mut().set_age(0, 0.0);
        sim.pool_mut().set_lifespan(0, 100.0);
        sim.pool_mut().set_size(0, 5.0);

        // Prime: everything else respawns with size 10.
        let on = ThrustParams {
            magnitude: 1.0,
            ..Default::default()
        };
        sim.update(0.001, on, EmitterPose::identity());

        // Cut thrust and let the short-lived particles expire: their slots
        // must be hidden and parked, the survivor left alone.
        let off = ThrustParams {
            magnitude: 0.0,
            ..Default::default()
        };
        let report = sim.update(0.5, off, EmitterPose::identity());

        assert_eq!(report.active_count, 1);
        assert!(sim.pool().size(0) > 0.0);
        for i in 1..sim.pool().len() {
            assert_eq!(sim.pool().size(i), 0.0);
            assert_eq!(sim.pool().velocity(i), Vec3::ZERO);
        }
    }

    #[test]
    fn report_goes_idle_when_everything_expires() {
        let config = quiet_config().with_lifespan(0.01..0.02);
        let mut sim = PlumeSimulator::with_seed(config, 4);
        sim.pool_mut().kill_all();

        let on = ThrustParams {
            magnitude: 1.0,
            ..Default::default()
        };
        let report = sim.update(0.016, on, EmitterPose::identity());
        assert_eq!(report.active_count, sim.pool().len());
        assert!(report.buffers_dirty);

        // One long tick with thrust off expires the whole pool.
        let off = ThrustParams {
            magnitude: 0.0,
            ..Default::default()
        };
        let report = sim.update(1.0, off, EmitterPose::identity());
        assert!(report.is_idle());
        assert!(!report.buffers_dirty);

        // And the next off-tick takes the short-circuit path.
        let report = sim.update(1.0, off, EmitterPose::identity());
        assert_eq!(
            report,
            TickReport {
                active_count: 0,
                buffers_dirty: false
            }
        );
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mk = || {
            let mut sim = PlumeSimulator::with_seed(PlumeConfig::default(), 99);
            for _ in 0..30 {
                sim.update(0.016, ThrustParams::default(), EmitterPose::identity());
            }
            sim
        };
        let a = mk();
        let b = mk();
        assert_eq!(a.pool(), b.pool());
    }
}
