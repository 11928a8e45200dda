//! Emitter pose and thrust direction.
//!
//! The plume is emitted from the rocket's tail. Each frame the demo
//! recomputes an [`EmitterPose`] from the rocket transform and hands it to
//! the simulator by value; the simulator treats it as read-only input.
//!
//! Thrust direction convention: in the rocket's local space, exhaust at
//! angle 0 points straight down, `(0, -1, 0)`. A positive angle deflects the
//! exhaust toward local +x before the pose rotation carries it into world
//! space.

use glam::{Quat, Vec3};

use crate::params::RocketParams;

/// World-space position and orientation of the exhaust origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmitterPose {
    /// Exhaust point in world space.
    pub position: Vec3,
    /// Rotation from the rocket's local frame into world space.
    pub rotation: Quat,
}

impl EmitterPose {
    /// Pose at the world origin with no rotation.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    /// Pose at `position` with no rotation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// World-space thrust direction for the given deflection angle.
    #[inline]
    pub fn world_thrust_direction(&self, angle_deg: f32) -> Vec3 {
        self.rotation * thrust_direction(angle_deg)
    }
}

impl Default for EmitterPose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Local-space thrust direction for a deflection angle in degrees.
///
/// `(sin a, -cos a, 0)`: straight down at 0, tilting toward +x as the angle
/// grows.
#[inline]
pub fn thrust_direction(angle_deg: f32) -> Vec3 {
    let rad = angle_deg.to_radians();
    Vec3::new(rad.sin(), -rad.cos(), 0.0)
}

/// Emitter pose at the tail of a rocket sprite.
///
/// The exhaust point is the sprite's local bottom center,
/// `(0, -sprite_height / 2, 0)`, carried through the rocket's world
/// transform. Recomputed every tick so the plume follows the sliders.
pub fn exhaust_pose(rocket: &RocketParams, sprite_height: f32) -> EmitterPose {
    let rotation = Quat::from_rotation_z(rocket.rotation_deg.to_radians());
    let tail = rotation * Vec3::new(0.0, -sprite_height / 2.0, 0.0);
    EmitterPose {
        position: Vec3::new(rocket.x, rocket.y, 0.0) + tail,
        rotation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1.0e-5
    }

    #[test]
    fn zero_angle_points_straight_down() {
        assert!(approx(thrust_direction(0.0), Vec3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn positive_angle_tilts_toward_plus_x() {
        let dir = thrust_direction(15.0);
        assert!(dir.x > 0.0);
        assert!(dir.y < 0.0);
        assert_eq!(dir.z, 0.0);
        // Always unit length regardless of angle.
        assert!((dir.length() - 1.0).abs() < 1.0e-6);
    }

    #[test]
    fn pose_rotation_carries_direction_to_world() {
        let pose = EmitterPose {
            position: Vec3::ZERO,
            rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        };
        // (0, -1, 0) rotated +90 degrees around z is (1, 0, 0).
        assert!(approx(pose.world_thrust_direction(0.0), Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn exhaust_sits_below_unrotated_rocket() {
        let rocket = RocketParams {
            x: 1.0,
            y: -1.5,
            rotation_deg: 0.0,
        };
        let pose = exhaust_pose(&rocket, 2.0);
        assert!(approx(pose.position, Vec3::new(1.0, -2.5, 0.0)));
        assert_eq!(pose.rotation, Quat::IDENTITY);
    }

    #[test]
    fn exhaust_follows_rocket_rotation() {
        let rocket = RocketParams {
            x: 0.0,
            y: 0.0,
            rotation_deg: 90.0,
        };
        let pose = exhaust_pose(&rocket, 2.0);
        // Tail offset (0, -1, 0) rotates to (1, 0, 0).
        assert!(approx(pose.position, Vec3::new(1.0, 0.0, 0.0)));
    }
}
