//! Frame timing.
//!
//! [`FrameClock`] is the demo's single source of delta time. Call
//! [`FrameClock::tick`] once per frame; the returned delta feeds the plume
//! simulator, elapsed time feeds the shaders.
//!
//! A fixed delta can be installed for deterministic runs (tests, capture).

use std::time::{Duration, Instant};

/// Per-frame clock: delta, elapsed, frame count and a smoothed FPS figure.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    delta_secs: f32,
    elapsed_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_window_start: Instant,
    fps_window_frames: u64,
    fixed_delta: Option<f32>,
}

/// How often the FPS estimate refreshes.
const FPS_WINDOW: Duration = Duration::from_millis(500);

impl FrameClock {
    /// Start a clock at the current instant.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            elapsed_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_window_start: now,
            fps_window_frames: 0,
            fixed_delta: None,
        }
    }

    /// Advance the clock one frame and return the delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = self.fixed_delta.unwrap_or(raw);
        self.last_frame = now;
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.frame_count += 1;

        let window = now.duration_since(self.fps_window_start);
        if window >= FPS_WINDOW {
            let frames = self.frame_count - self.fps_window_frames;
            self.fps = frames as f32 / window.as_secs_f32();
            self.fps_window_start = now;
            self.fps_window_frames = self.frame_count;
        }

        self.delta_secs
    }

    /// Seconds since the previous tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Seconds since the clock started.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Frames ticked so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Smoothed frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Force every tick to report the same delta (None restores wall time).
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_at_frame_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn tick_advances_time() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(5));
        let dt = clock.tick();
        assert!(dt > 0.0);
        assert!(clock.elapsed() >= dt);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn fixed_delta_overrides_wall_time() {
        let mut clock = FrameClock::new();
        clock.set_fixed_delta(Some(1.0 / 60.0));
        thread::sleep(Duration::from_millis(20));
        let dt = clock.tick();
        assert!((dt - 1.0 / 60.0).abs() < 1.0e-6);
    }
}
