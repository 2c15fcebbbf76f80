//! Frame timing: frame time, frame rate display and the optional frame cap.

use std::time::{Duration, Instant};

use log::debug;

pub const DEFAULT_FRAME_RATE: f32 = 60.0;

pub struct FrameClock {
    last_frame: Instant,
    frame_time_ms: f32,
    last_fps_update: Instant,
    frame_count: u32,
    current_fps: f32,
    target_fps: f32,
}

impl FrameClock {
    pub fn new(target_fps: f32) -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            frame_time_ms: 0.0,
            last_fps_update: now,
            frame_count: 0,
            current_fps: 0.0,
            target_fps: target_fps.max(0.0),
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        self.frame_time_ms = now.saturating_duration_since(self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;
        self.frame_count += 1;

        let elapsed = now.saturating_duration_since(self.last_fps_update).as_secs_f32();
        if elapsed >= 1.0 {
            self.current_fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.last_fps_update = now;
            debug!("FPS: {:.2}", self.current_fps);
        }
    }

    /// Milliseconds between the two most recent ticks.
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    pub fn current_fps(&self) -> f32 {
        self.current_fps
    }

    pub fn set_target_fps(&mut self, fps: f32) {
        self.target_fps = fps.max(0.0);
    }

    pub fn is_capped(&self) -> bool {
        self.target_fps > 0.0
    }

    /// When the next frame is due, or `None` when running unlimited. A cap too small
    /// to express as a frame period also runs unlimited.
    pub fn next_frame_deadline(&self) -> Option<Instant> {
        if !self.is_capped() {
            return None;
        }
        let period = Duration::try_from_secs_f32(1.0 / self.target_fps).ok()?;
        self.last_frame.checked_add(period)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn frame_time_is_time_between_ticks() {
        let mut clock = FrameClock::new(60.0);
        let start = Instant::now();
        clock.tick_at(start);
        clock.tick_at(start + Duration::from_millis(20));
        assert_relative_eq!(clock.frame_time_ms(), 20.0, epsilon = 0.01);
        clock.tick_at(start + Duration::from_millis(25));
        assert_relative_eq!(clock.frame_time_ms(), 5.0, epsilon = 0.01);
    }

    #[test]
    fn fps_updates_once_per_second() {
        let mut clock = FrameClock::new(0.0);
        let start = clock.last_fps_update;
        for i in 1..=30 {
            clock.tick_at(start + Duration::from_millis(i * 20));
        }
        assert_eq!(clock.current_fps(), 0.0);
        for i in 31..=50 {
            clock.tick_at(start + Duration::from_millis(i * 20));
        }
        assert_relative_eq!(clock.current_fps(), 50.0, epsilon = 0.01);
    }

    #[test]
    fn deadline_only_when_capped() {
        let mut clock = FrameClock::new(0.0);
        assert!(clock.next_frame_deadline().is_none());
        clock.set_target_fps(50.0);
        let deadline = clock.next_frame_deadline().unwrap();
        assert_relative_eq!((deadline - clock.last_frame).as_secs_f32(), 0.02, epsilon = 1e-6);
    }

    #[test]
    fn tiny_frame_cap_runs_unlimited() {
        let mut clock = FrameClock::new(1e-39);
        assert!(clock.is_capped());
        assert!(clock.next_frame_deadline().is_none());
        clock.set_target_fps(f32::NAN);
        assert!(clock.next_frame_deadline().is_none());
    }
}
