//! Live-tunable parameters for the plume and the rocket.
//!
//! The control panel owns these values and rewrites them every frame; the
//! simulator only ever reads them, passed in by value through
//! [`PlumeSimulator::update`](crate::plume::PlumeSimulator::update). Keeping
//! the parameters in plain value structs means there is no hidden coupling
//! between the panel widget and the simulation.
//!
//! # Example
//!
//! ```
//! use plume::params::ThrustParams;
//!
//! let params = ThrustParams {
//!     angle_deg: 10.0,
//!     magnitude: 0.5,
//!     ..ThrustParams::default()
//! };
//!
//! // Quadratic ramp: half thrust gives a quarter of the turbulence.
//! assert_eq!(params.turbulence(0.25), 0.25 * 0.5 * 0.5);
//! ```

use std::ops::RangeInclusive;

/// Allowed thrust angle range in degrees (slider bounds).
pub const ANGLE_RANGE: RangeInclusive<f32> = -15.0..=15.0;

/// Allowed thrust magnitude range (0 disables emission).
pub const MAGNITUDE_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Allowed drag coefficient range (per-unit-time velocity retention).
pub const DRAG_RANGE: RangeInclusive<f32> = 0.9..=1.0;

/// Allowed rocket x/y position range (slider bounds).
pub const ROCKET_POSITION_RANGE: RangeInclusive<f32> = -5.0..=5.0;

/// Allowed rocket rotation range in degrees.
pub const ROCKET_ROTATION_RANGE: RangeInclusive<f32> = -180.0..=180.0;

/// Thrust parameters read by the plume simulator each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrustParams {
    /// Thrust deflection from straight-down, in degrees.
    pub angle_deg: f32,
    /// Thrust strength in `[0, 1]`. Zero disables emission entirely.
    pub magnitude: f32,
    /// Velocity retained per unit time. Applied as `drag^delta_time`, so the
    /// decay is independent of frame rate.
    pub drag_coefficient: f32,
}

impl Default for ThrustParams {
    fn default() -> Self {
        Self {
            angle_deg: 0.0,
            magnitude: 1.0,
            drag_coefficient: 0.99,
        }
    }
}

impl ThrustParams {
    /// Per-tick turbulence amplitude for these parameters.
    ///
    /// Quadratic in magnitude: low thrust stays visually calm while full
    /// thrust gets noticeably noisy.
    #[inline]
    pub fn turbulence(&self, max_turbulence: f32) -> f32 {
        max_turbulence * self.magnitude * self.magnitude
    }

    /// Copy of these parameters clamped to the panel slider ranges.
    ///
    /// The simulator trusts its inputs and does not call this; hosts that
    /// feed values from somewhere other than the panel can clamp first.
    pub fn clamped(&self) -> Self {
        Self {
            angle_deg: self.angle_deg.clamp(*ANGLE_RANGE.start(), *ANGLE_RANGE.end()),
            magnitude: self.magnitude.clamp(*MAGNITUDE_RANGE.start(), *MAGNITUDE_RANGE.end()),
            drag_coefficient: self
                .drag_coefficient
                .clamp(*DRAG_RANGE.start(), *DRAG_RANGE.end()),
        }
    }
}

/// Rocket placement parameters, owned by the control panel.
///
/// The demo derives the emitter pose from these each frame; the simulator
/// never sees them directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RocketParams {
    /// World-space x position.
    pub x: f32,
    /// World-space y position.
    pub y: f32,
    /// Rotation around z in degrees.
    pub rotation_deg: f32,
}

impl Default for RocketParams {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: -1.5,
            rotation_deg: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turbulence_is_quadratic() {
        let full = ThrustParams {
            magnitude: 1.0,
            ..Default::default()
        };
        let half = ThrustParams {
            magnitude: 0.5,
            ..Default::default()
        };

        assert_eq!(full.turbulence(0.25), 0.25);
        assert_eq!(half.turbulence(0.25), 0.25 * 0.25);
    }

    #[test]
    fn zero_magnitude_means_zero_turbulence() {
        let off = ThrustParams {
            magnitude: 0.0,
            ..Default::default()
        };
        assert_eq!(off.turbulence(0.25), 0.0);
    }

    #[test]
    fn clamped_restores_panel_ranges() {
        let wild = ThrustParams {
            angle_deg: 90.0,
            magnitude: -2.0,
            drag_coefficient: 1.5,
        };
        let clamped = wild.clamped();

        assert_eq!(clamped.angle_deg, 15.0);
        assert_eq!(clamped.magnitude, 0.0);
        assert_eq!(clamped.drag_coefficient, 1.0);
    }

    #[test]
    fn clamped_leaves_valid_values_alone() {
        let params = ThrustParams::default();
        assert_eq!(params.clamped(), params);
    }
}
