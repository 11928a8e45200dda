//! Age-driven appearance of plume particles.
//!
//! Particles are born full-bright and cool off over their lifespan: the
//! tint runs from fire orange to smoke gray, the point size and alpha fade
//! to zero. The WGSL in [`crate::shader`] evaluates the same curves on the
//! GPU; the functions here are the CPU-side reference the tests pin down.

use glam::Vec3;

/// Tint at birth (life progress 0).
pub const FIRE_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.0);

/// Tint at death (life progress 1).
pub const SMOKE_COLOR: Vec3 = Vec3::new(0.2, 0.2, 0.2);

/// Fraction of the lifespan already lived, clamped to `[0, 1]`.
#[inline]
pub fn life_progress(age: f32, lifespan: f32) -> f32 {
    (age / lifespan).clamp(0.0, 1.0)
}

/// Fire-to-smoke tint for a given life progress.
#[inline]
pub fn color_over_life(progress: f32) -> Vec3 {
    FIRE_COLOR.lerp(SMOKE_COLOR, progress)
}

/// Rendered point size: the newborn size shrinking linearly to zero.
#[inline]
pub fn size_over_life(size: f32, progress: f32) -> f32 {
    size * (1.0 - progress)
}

/// Opacity fade matching the size curve.
#[inline]
pub fn alpha_over_life(progress: f32) -> f32 {
    1.0 - progress
}
