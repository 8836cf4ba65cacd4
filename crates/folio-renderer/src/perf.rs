//! Frame timing and performance monitoring.

use std::collections::VecDeque;

/// Tracks frame intervals for FPS calculation.
///
/// Fed with the same millisecond timestamps the frame queue is driven
/// with, so simulated and real clocks report alike.
#[derive(Debug)]
pub struct FrameTimer {
    frame_times: VecDeque<f64>,
    last_frame: Option<f64>,
    max_samples: usize,
}

impl FrameTimer {
    /// Create a new frame timer with a default 120-sample rolling window.
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::new(),
            last_frame: None,
            max_samples: 120,
        }
    }

    /// Record a frame at `now` (milliseconds). The first call only sets
    /// the reference point.
    pub fn begin_frame(&mut self, now: f64) {
        if let Some(last) = self.last_frame {
            let dt = (now - last).max(0.0);
            self.frame_times.push_back(dt);
            if self.frame_times.len() > self.max_samples {
                self.frame_times.pop_front();
            }
        }
        self.last_frame = Some(now);
    }

    /// Average frames per second over the sample window.
    pub fn fps(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let total: f64 = self.frame_times.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.frame_times.len() as f64 * 1000.0 / total
    }

    /// Average frame time in milliseconds.
    pub fn frame_time_ms(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let total: f64 = self.frame_times.iter().sum();
        total / self.frame_times.len() as f64
    }

    /// Number of frame samples currently stored.
    pub fn sample_count(&self) -> usize {
        self.frame_times.len()
    }

    /// Forget every sample, e.g. after a remount.
    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.last_frame = None;
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_fps_is_zero() {
        let timer = FrameTimer::new();
        assert_eq!(timer.fps(), 0.0);
        assert_eq!(timer.frame_time_ms(), 0.0);
    }

    #[test]
    fn fps_after_frames() {
        let mut timer = FrameTimer::new();
        // 11 timestamps at 20ms spacing give 10 intervals (50fps)
        for i in 0..11 {
            timer.begin_frame(i as f64 * 20.0);
        }
        assert!((timer.fps() - 50.0).abs() < 1e-9);
        assert!((timer.frame_time_ms() - 20.0).abs() < 1e-9);
        assert_eq!(timer.sample_count(), 10);
    }

    #[test]
    fn max_samples_respected() {
        let mut timer = FrameTimer::new();
        for i in 0..200 {
            timer.begin_frame(i as f64);
        }
        assert!(timer.sample_count() <= 120);
    }

    #[test]
    fn reset_clears_samples() {
        let mut timer = FrameTimer::new();
        timer.begin_frame(0.0);
        timer.begin_frame(16.0);
        timer.reset();
        assert_eq!(timer.sample_count(), 0);
        timer.begin_frame(100.0);
        assert_eq!(timer.sample_count(), 0);
    }
}
