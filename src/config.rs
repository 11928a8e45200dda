//! Plume simulator configuration.
//!
//! [`PlumeConfig`] collects the constants that shape the exhaust plume:
//! pool size, lifespan range, turbulence ceiling, newborn particle size and
//! the random speed spread applied at respawn. The defaults reproduce the
//! stock demo; builder methods let callers tune individual knobs.
//!
//! # Example
//!
//! ```
//! use plume::config::PlumeConfig;
//!
//! let config = PlumeConfig::new()
//!     .with_particle_count(200)
//!     .with_lifespan(0.5..1.0)
//!     .with_max_turbulence(0.1);
//! ```

use std::ops::Range;

/// Configuration for a [`PlumeSimulator`](crate::plume::PlumeSimulator).
#[derive(Clone, Debug, PartialEq)]
pub struct PlumeConfig {
    /// Number of particles in the pool. Fixed for the simulator's lifetime.
    pub particle_count: usize,
    /// Lifespan range in seconds, drawn uniformly per respawn.
    pub lifespan: Range<f32>,
    /// Upper bound on the starting age at construction, in seconds.
    ///
    /// Staggers the first wave of respawns instead of synchronizing them.
    pub initial_age_spread: f32,
    /// Turbulence amplitude at full thrust.
    pub max_turbulence: f32,
    /// Size assigned to a freshly respawned particle.
    pub newborn_size: f32,
    /// Random fraction added to the respawn speed (0.5 = up to +50%).
    pub speed_spread: f32,
}

/// Smallest lifespan the validator will allow. Keeps `age / lifespan` finite.
const MIN_LIFESPAN: f32 = 1.0e-3;

impl Default for PlumeConfig {
    fn default() -> Self {
        Self {
            particle_count: 1000,
            lifespan: 1.0..2.5,
            initial_age_spread: 2.0,
            max_turbulence: 0.25,
            newborn_size: 10.0,
            speed_spread: 0.5,
        }
    }
}

impl PlumeConfig {
    /// Create a configuration with the stock demo defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pool size.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the lifespan range drawn at respawn.
    pub fn with_lifespan(mut self, lifespan: Range<f32>) -> Self {
        self.lifespan = lifespan;
        self
    }

    /// Set the turbulence amplitude reached at full thrust.
    pub fn with_max_turbulence(mut self, max_turbulence: f32) -> Self {
        self.max_turbulence = max_turbulence;
        self
    }

    /// Set the size assigned to freshly respawned particles.
    pub fn with_newborn_size(mut self, size: f32) -> Self {
        self.newborn_size = size;
        self
    }

    /// Set the random fraction added to respawn speed.
    pub fn with_speed_spread(mut self, spread: f32) -> Self {
        self.speed_spread = spread;
        self
    }

    /// Copy of this configuration with out-of-range values pulled back.
    ///
    /// Lifespans must stay strictly positive and non-empty so the
    /// age/lifespan ratio used for fading never divides by zero.
    pub(crate) fn validated(&self) -> Self {
        let mut config = self.clone();
        if config.particle_count == 0 {
            config.particle_count = 1;
        }
        if !(config.lifespan.start >= MIN_LIFESPAN) {
            config.lifespan.start = MIN_LIFESPAN;
        }
        if !(config.lifespan.end > config.lifespan.start) {
            config.lifespan.end = config.lifespan.start + MIN_LIFESPAN;
        }
        if config.initial_age_spread < 0.0 {
            config.initial_age_spread = 0.0;
        }
        if config.max_turbulence < 0.0 {
            config.max_turbulence = 0.0;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_stock_demo() {
        let config = PlumeConfig::default();
        assert_eq!(config.particle_count, 1000);
        assert_eq!(config.lifespan, 1.0..2.5);
        assert_eq!(config.max_turbulence, 0.25);
        assert_eq!(config.newborn_size, 10.0);
    }

    #[test]
    fn builder_chain() {
        let config = PlumeConfig::new()
            .with_particle_count(64)
            .with_lifespan(0.2..0.4)
            .with_max_turbulence(0.0)
            .with_newborn_size(4.0)
            .with_speed_spread(0.0);

        assert_eq!(config.particle_count, 64);
        assert_eq!(config.lifespan, 0.2..0.4);
        assert_eq!(config.max_turbulence, 0.0);
        assert_eq!(config.newborn_size, 4.0);
        assert_eq!(config.speed_spread, 0.0);
    }

    #[test]
    fn validation_rejects_degenerate_lifespans() {
        let config = PlumeConfig::new().with_lifespan(0.0..0.0).validated();
        assert!(config.lifespan.start > 0.0);
        assert!(config.lifespan.end > config.lifespan.start);

        // NaN bounds also get pulled back to something usable.
        let config = PlumeConfig::new()
            .with_lifespan(f32::NAN..f32::NAN)
            .validated();
        assert!(config.lifespan.start > 0.0);
        assert!(config.lifespan.end > config.lifespan.start);
    }

    #[test]
    fn validation_keeps_empty_pool_usable() {
        let config = PlumeConfig::new().with_particle_count(0).validated();
        assert_eq!(config.particle_count, 1);
    }
}
