//! End-to-end checks of the plume simulator's tick behavior.

use glam::{Quat, Vec3};

use plume::config::PlumeConfig;
use plume::emitter::EmitterPose;
use plume::params::ThrustParams;
use plume::plume::{PlumeSimulator, TickReport};

fn thrust(magnitude: f32) -> ThrustParams {
    ThrustParams {
        magnitude,
        ..Default::default()
    }
}

/// No turbulence and no speed spread, so velocities are deterministic given
/// the thrust direction.
fn quiet_config() -> PlumeConfig {
    PlumeConfig::default()
        .with_max_turbulence(0.0)
        .with_speed_spread(0.0)
}

#[test]
fn ages_and_lifespans_stay_sane_over_many_ticks() {
    let mut sim = PlumeSimulator::with_seed(PlumeConfig::default(), 7);

    // Alternate thrust on and off across a few hundred ticks.
    for frame in 0..300 {
        let magnitude = if (frame / 50) % 2 == 0 { 1.0 } else { 0.0 };
        sim.update(0.016, thrust(magnitude), EmitterPose::identity());
    }

    for i in 0..sim.pool().len() {
        assert!(sim.pool().age(i) >= 0.0);
        assert!(sim.pool().lifespan(i) > 0.0);
    }
}

#[test]
fn idle_simulator_never_touches_the_pool() {
    // has_active starts false, so the very first zero-thrust tick must take
    // the short-circuit and leave the pool byte-identical.
    let mut sim = PlumeSimulator::with_seed(PlumeConfig::default(), 11);
    let before = sim.pool().clone();

    for _ in 0..10 {
        let report = sim.update(0.5, thrust(0.0), EmitterPose::identity());
        assert_eq!(
            report,
            TickReport {
                active_count: 0,
                buffers_dirty: false
            }
        );
    }

    assert_eq!(sim.pool(), &before);
}

#[test]
fn drag_decay_composes_across_tick_sizes() {
    // One 1s tick and two 0.5s ticks must decay a coasting particle's
    // velocity by the same factor.
    let run = |steps: usize, dt: f32| -> Vec3 {
        let mut sim = PlumeSimulator::with_seed(quiet_config(), 13);
        sim.pool_mut().kill_all();
        sim.pool_mut().set_age(0, 0.0);
        sim.pool_mut().set_lifespan(0, 100.0);
        sim.pool_mut().set_velocity(0, Vec3::new(1.0, 2.0, -3.0));

        // Zero-length tick with thrust on: marks the pool active without
        // moving the coasting particle.
        sim.update(0.0, thrust(1.0), EmitterPose::identity());

        let params = ThrustParams {
            magnitude: 0.0,
            drag_coefficient: 0.95,
            ..Default::default()
        };
        for _ in 0..steps {
            sim.update(dt, params, EmitterPose::identity());
        }
        sim.pool().velocity(0)
    };

    let whole = run(1, 1.0);
    let halves = run(2, 0.5);
    assert!((whole - halves).length() < 1.0e-5, "{whole} vs {halves}");
}

#[test]
fn turbulence_grows_quadratically_with_magnitude() {
    // Zero out every velocity, tick once, and measure the noise floor. The
    // turbulence amplitude is max * magnitude^2, so halving the magnitude
    // should cut the per-component variance by ~16x.
    let variance_at = |magnitude: f32| -> f64 {
        let config = PlumeConfig::default().with_speed_spread(0.0);
        let mut sim = PlumeSimulator::with_seed(config, 17);
        for i in 0..sim.pool().len() {
            sim.pool_mut().set_age(i, 0.0);
            sim.pool_mut().set_lifespan(i, 100.0);
            sim.pool_mut().set_velocity(i, Vec3::ZERO);
        }

        let params = ThrustParams {
            magnitude,
            drag_coefficient: 1.0,
            ..Default::default()
        };
        sim.update(1.0, params, EmitterPose::identity());

        let mut sum_sq = 0.0f64;
        let mut n = 0usize;
        for i in 0..sim.pool().len() {
            let v = sim.pool().velocity(i);
            for c in [v.x, v.y, v.z] {
                sum_sq += (c as f64) * (c as f64);
                n += 1;
            }
        }
        sum_sq / n as f64
    };

    let full = variance_at(1.0);
    let half = variance_at(0.5);
    assert!(full > 0.0);
    let ratio = full / half;
    assert!((12.0..20.0).contains(&ratio), "ratio = {ratio}");
}

#[test]
fn respawn_direction_tracks_angle_and_rotation() {
    let mut sim = PlumeSimulator::with_seed(quiet_config(), 19);
    sim.pool_mut().kill_all();

    let pose = EmitterPose {
        position: Vec3::new(0.5, -1.0, 0.0),
        rotation: Quat::from_rotation_z(30.0f32.to_radians()),
    };
    let params = ThrustParams {
        angle_deg: 10.0,
        magnitude: 1.0,
        ..Default::default()
    };
    sim.update(0.016, params, pose);

    let expected = pose.rotation * Vec3::new(10.0f32.to_radians().sin(), -(10.0f32.to_radians().cos()), 0.0);
    for i in 0..sim.pool().len() {
        let v = sim.pool().velocity(i);
        assert!((v - expected).length() < 1.0e-5, "v = {v}, expected {expected}");
    }
}

#[test]
fn full_thrust_revives_a_dead_pool_at_the_emitter() {
    let mut sim = PlumeSimulator::with_seed(PlumeConfig::default(), 23);
    sim.pool_mut().kill_all();

    let pose = EmitterPose::at(Vec3::new(-2.0, 1.0, 0.0));
    let report = sim.update(0.016, thrust(1.0), pose);

    assert_eq!(report.active_count, sim.pool().len());
    assert!(report.buffers_dirty);
    for i in 0..sim.pool().len() {
        assert_eq!(sim.pool().age(i), 0.0);
        assert_eq!(sim.pool().size(i), 10.0);
        assert_eq!(sim.pool().position(i), pose.position);
        assert_eq!(sim.pool().color(i), Vec3::ONE);
    }
}

#[test]
fn plume_dies_out_after_thrust_cuts() {
    let mut sim = PlumeSimulator::with_seed(PlumeConfig::default(), 29);

    // Run at full thrust long enough for every slot to cycle at least once.
    for _ in 0..240 {
        sim.update(0.016, thrust(1.0), EmitterPose::identity());
    }
    assert!(sim.pool().alive_count() > 0);

    // Cut thrust. Default lifespans cap at 2.5s, so 4s of ticks outlives
    // everything.
    let mut last = TickReport::default();
    for _ in 0..250 {
        last = sim.update(0.016, thrust(0.0), EmitterPose::identity());
    }
    assert!(last.is_idle());
    assert!(!last.buffers_dirty);
    assert_eq!(sim.pool().alive_count(), 0);

    for i in 0..sim.pool().len() {
        assert_eq!(sim.pool().size(i), 0.0);
        assert_eq!(sim.pool().velocity(i), Vec3::ZERO);
    }
}
