use super::scheduler::{FrameScheduler, FrameToken};

/// Largest step reported to animations, in seconds. Longer gaps (a
/// suspended tab, a debugger pause) are clamped so particles don't jump.
pub const MAX_FRAME_DELTA: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// One frame per refresh until cancelled.
    Continuous,
    /// A single frame at a fixed elapsed time (reduced motion).
    Static,
}

/// Timing handed to one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Scaled seconds since the clock started.
    pub elapsed: f64,
    /// Scaled seconds since the previous frame.
    pub delta: f64,
    /// Zero-based frame counter.
    pub index: u64,
}

/// Per-animation loop driver.
///
/// Holds at most one outstanding [`FrameToken`]. A token that is not the
/// outstanding one (because the clock was cancelled, or it was already
/// consumed) is stale and [`begin_frame`](Self::begin_frame) ignores it.
#[derive(Debug)]
pub struct AnimationClock {
    mode: ClockMode,
    time_scale: f64,
    static_elapsed: f64,
    start: Option<f64>,
    outstanding: Option<FrameToken>,
    running: bool,
    frames: u64,
    last_elapsed: f64,
}

impl AnimationClock {
    pub fn new(mode: ClockMode, time_scale: f64, static_elapsed: f64) -> Self {
        Self {
            mode,
            time_scale,
            static_elapsed,
            start: None,
            outstanding: None,
            running: false,
            frames: 0,
            last_elapsed: 0.0,
        }
    }

    /// Begin at `now` (milliseconds) and request the first frame.
    pub fn start(&mut self, now: f64, scheduler: &mut dyn FrameScheduler) {
        if self.running {
            return;
        }
        self.start = Some(now);
        self.running = true;
        self.frames = 0;
        self.last_elapsed = match self.mode {
            ClockMode::Continuous => 0.0,
            ClockMode::Static => self.static_elapsed,
        };
        self.schedule(scheduler);
    }

    fn schedule(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.outstanding.is_none() {
            self.outstanding = Some(scheduler.request_frame());
        }
    }

    /// Validate `token` and compute this frame's timing, or `None` if the
    /// token is stale.
    pub fn begin_frame(&mut self, token: FrameToken, now: f64) -> Option<FrameTime> {
        if !self.running || self.outstanding != Some(token) {
            return None;
        }
        self.outstanding = None;

        let elapsed = match self.mode {
            ClockMode::Continuous => {
                let start = self.start.unwrap_or(now);
                ((now - start) / 1000.0 * self.time_scale).max(0.0)
            }
            ClockMode::Static => self.static_elapsed,
        };
        let delta = (elapsed - self.last_elapsed).clamp(0.0, MAX_FRAME_DELTA);
        self.last_elapsed = elapsed;

        let index = self.frames;
        self.frames += 1;
        Some(FrameTime {
            elapsed,
            delta,
            index,
        })
    }

    /// Request the next frame in continuous mode. A static clock stops here.
    pub fn finish_frame(&mut self, scheduler: &mut dyn FrameScheduler) {
        if !self.running {
            return;
        }
        match self.mode {
            ClockMode::Continuous => self.schedule(scheduler),
            ClockMode::Static => self.running = false,
        }
    }

    /// Stop the loop and withdraw the outstanding request. Any copy of the
    /// token still queued becomes stale.
    pub fn cancel(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.running = false;
        if let Some(token) = self.outstanding.take() {
            scheduler.cancel_frame(token);
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn outstanding(&self) -> Option<FrameToken> {
        self.outstanding
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
