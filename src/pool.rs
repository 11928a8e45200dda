//! Fixed-size particle attribute pool.
//!
//! The pool stores every particle attribute as a flat `f32` array, laid out
//! exactly as the GPU point renderer consumes them:
//!
//! | Attribute | Stride | Meaning |
//! |-----------|--------|---------|
//! | `positions` | 3 | world-space location |
//! | `velocities` | 3 | current velocity |
//! | `ages` | 1 | seconds since respawn |
//! | `lifespans` | 1 | seconds until expiry, always > 0 |
//! | `sizes` | 1 | visual scale, 0 when hidden |
//! | `colors` | 3 | RGB tint |
//!
//! The arrays are parallel and index-aligned: index `i` refers to the same
//! logical particle in every attribute. The pool is allocated once and never
//! resized.
//!
//! A particle is dead exactly when `age >= lifespan`. That derivation lives
//! in [`ParticlePool::is_expired`] and nowhere else; there is no stored
//! alive flag to drift out of sync.

use glam::Vec3;
use rand::Rng;

use crate::config::PlumeConfig;

/// Flat, parallel attribute arrays for a fixed number of particles.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticlePool {
    positions: Vec<f32>,
    velocities: Vec<f32>,
    ages: Vec<f32>,
    lifespans: Vec<f32>,
    sizes: Vec<f32>,
    colors: Vec<f32>,
    count: usize,
}

impl ParticlePool {
    /// Allocate a pool per the configuration.
    ///
    /// Starting ages are randomized in `[0, initial_age_spread)` so the
    /// first respawn wave is staggered, lifespans are drawn from the
    /// configured range, sizes start at 0 (nothing is emitting yet) and
    /// colors start white.
    pub fn new<R: Rng>(config: &PlumeConfig, rng: &mut R) -> Self {
        let count = config.particle_count;
        let mut pool = Self {
            positions: vec![0.0; count * 3],
            velocities: vec![0.0; count * 3],
            ages: vec![0.0; count],
            lifespans: vec![0.0; count],
            sizes: vec![0.0; count],
            colors: vec![1.0; count * 3],
            count,
        };

        for i in 0..count {
            pool.ages[i] = if config.initial_age_spread > 0.0 {
                rng.gen::<f32>() * config.initial_age_spread
            } else {
                0.0
            };
            pool.lifespans[i] = rng.gen_range(config.lifespan.clone());
        }

        pool
    }

    /// Number of particles. Fixed for the pool's lifetime.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// True only for a zero-capacity pool (never after validation).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The single source of truth for dead vs. alive.
    #[inline]
    pub fn is_expired(&self, i: usize) -> bool {
        self.ages[i] >= self.lifespans[i]
    }

    /// Number of particles currently alive.
    pub fn alive_count(&self) -> usize {
        (0..self.count).filter(|&i| !self.is_expired(i)).count()
    }

    // ========== Flat views for the renderer ==========

    /// Positions as a flat `[x, y, z, ...]` slice.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Velocities as a flat `[x, y, z, ...]` slice.
    #[inline]
    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    /// Ages in seconds, one per particle.
    #[inline]
    pub fn ages(&self) -> &[f32] {
        &self.ages
    }

    /// Lifespans in seconds, one per particle.
    #[inline]
    pub fn lifespans(&self) -> &[f32] {
        &self.lifespans
    }

    /// Visual sizes, one per particle. 0 means hidden.
    #[inline]
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Colors as a flat `[r, g, b, ...]` slice.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    // ========== Per-particle access ==========

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        )
    }

    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.positions[i * 3] = p.x;
        self.positions[i * 3 + 1] = p.y;
        self.positions[i * 3 + 2] = p.z;
    }

    #[inline]
    pub fn velocity(&self, i: usize) -> Vec3 {
        Vec3::new(
            self.velocities[i * 3],
            self.velocities[i * 3 + 1],
            self.velocities[i * 3 + 2],
        )
    }

    #[inline]
    pub fn set_velocity(&mut self, i: usize, v: Vec3) {
        self.velocities[i * 3] = v.x;
        self.velocities[i * 3 + 1] = v.y;
        self.velocities[i * 3 + 2] = v.z;
    }

    #[inline]
    pub fn age(&self, i: usize) -> f32 {
        self.ages[i]
    }

    #[inline]
    pub fn set_age(&mut self, i: usize, age: f32) {
        self.ages[i] = age;
    }

    #[inline]
    pub fn lifespan(&self, i: usize) -> f32 {
        self.lifespans[i]
    }

    #[inline]
    pub fn set_lifespan(&mut self, i: usize, lifespan: f32) {
        self.lifespans[i] = lifespan;
    }

    #[inline]
    pub fn size(&self, i: usize) -> f32 {
        self.sizes[i]
    }

    #[inline]
    pub fn set_size(&mut self, i: usize, size: f32) {
        self.sizes[i] = size;
    }

    #[inline]
    pub fn color(&self, i: usize) -> Vec3 {
        Vec3::new(
            self.colors[i * 3],
            self.colors[i * 3 + 1],
            self.colors[i * 3 + 2],
        )
    }

    #[inline]
    pub fn set_color(&mut self, i: usize, c: Vec3) {
        self.colors[i * 3] = c.x;
        self.colors[i * 3 + 1] = c.y;
        self.colors[i * 3 + 2] = c.z;
    }

    /// Advance a particle's age by `dt` seconds.
    #[inline]
    pub(crate) fn advance_age(&mut self, i: usize, dt: f32) {
        self.ages[i] += dt;
    }

    /// Expire every particle in place (`age = lifespan`).
    ///
    /// Useful for hosts and tests that want a fully dead pool before the
    /// first emission.
    pub fn kill_all(&mut self) {
        for i in 0..self.count {
            self.ages[i] = self.lifespans[i];
        }
    }
}
