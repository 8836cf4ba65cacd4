//! Gaze state machine for the eye.
//!
//! An active pointer is tracked inside a clamped range with occasional
//! jitter. When the pointer goes idle the eye either glances somewhere
//! nearby or returns to center; a long idle spell triggers a glance. Every
//! state has a time limit so the machine can't stall.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::super::ease;
use crate::pointer::PointerView;

/// Tracked targets are clamped to this range on each axis.
pub const TRACK_CLAMP: f32 = 0.35;
/// The gaze itself never leaves this range.
pub const HARD_CLAMP: f32 = 0.5;
const JITTER_CHANCE: f64 = 0.02;
const JITTER_MAGNITUDE: f32 = 0.03;
/// Chance that losing the pointer starts a glance rather than a return.
const LOOK_CHANCE: f64 = 0.3;
const LOOK_RANGE: f32 = 0.25;
pub const LOOK_DURATION: f32 = 1.5;
pub const RETURN_DURATION: f32 = 1.0;
/// Idle seconds before the eye glances around on its own.
pub const IDLE_LOOK_DELAY: f32 = 3.0;
/// No state other than idle or pointer tracking lasts longer than this.
pub const STATE_CEILING: f32 = 8.0;
const SNAP_EPSILON: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GazeState {
    Idle,
    Tracking,
    Looking,
    Returning,
}

impl GazeState {
    /// Per-frame (60 Hz) smoothing factor.
    fn smoothing(self) -> f32 {
        match self {
            GazeState::Tracking => 0.15,
            GazeState::Returning | GazeState::Idle => 0.08,
            GazeState::Looking => 0.04,
        }
    }
}

#[derive(Debug)]
pub struct GazeController {
    rng: StdRng,
    state: GazeState,
    state_time: f32,
    gaze: [f32; 2],
    target: [f32; 2],
}

impl GazeController {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            state: GazeState::Idle,
            state_time: 0.0,
            gaze: [0.0, 0.0],
            target: [0.0, 0.0],
        }
    }

    pub fn state(&self) -> GazeState {
        self.state
    }

    /// Seconds spent in the current state.
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    pub fn gaze(&self) -> [f32; 2] {
        self.gaze
    }

    pub fn target(&self) -> [f32; 2] {
        self.target
    }

    fn enter(&mut self, state: GazeState) {
        tracing::trace!(from = ?self.state, to = ?state, "gaze transition");
        self.state = state;
        self.state_time = 0.0;
    }

    fn start_look(&mut self) {
        self.target = [
            self.rng.gen_range(-LOOK_RANGE..=LOOK_RANGE),
            self.rng.gen_range(-LOOK_RANGE..=LOOK_RANGE),
        ];
        self.enter(GazeState::Looking);
    }

    fn start_return(&mut self) {
        self.target = [0.0, 0.0];
        self.enter(GazeState::Returning);
    }

    /// Advance by `dt` seconds and return the new gaze, y-up in
    /// `[-HARD_CLAMP, HARD_CLAMP]`.
    pub fn update(&mut self, dt: f32, pointer: &PointerView) -> [f32; 2] {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.state_time += dt;

        if pointer.active {
            if self.state != GazeState::Tracking {
                self.enter(GazeState::Tracking);
            }
            self.target = pointer.signed.map(|v| v.clamp(-TRACK_CLAMP, TRACK_CLAMP));
            if self.rng.gen_bool(JITTER_CHANCE) {
                for axis in &mut self.target {
                    *axis += self.rng.gen_range(-JITTER_MAGNITUDE..=JITTER_MAGNITUDE);
                }
            }
        } else {
            match self.state {
                GazeState::Tracking => {
                    if self.rng.gen_bool(LOOK_CHANCE) {
                        self.start_look();
                    } else {
                        self.start_return();
                    }
                }
                GazeState::Idle if self.state_time >= IDLE_LOOK_DELAY => self.start_look(),
                GazeState::Looking if self.state_time >= LOOK_DURATION => self.start_return(),
                GazeState::Returning if self.state_time >= RETURN_DURATION => self.enter(GazeState::Idle),
                _ => {}
            }
            if self.state != GazeState::Idle && self.state_time > STATE_CEILING {
                self.start_return();
            }
        }

        let factor = self.state.smoothing();
        for axis in 0..2 {
            let eased = ease(self.gaze[axis], self.target[axis], factor, dt);
            self.gaze[axis] = if (self.target[axis] - eased).abs() < SNAP_EPSILON {
                self.target[axis]
            } else {
                eased
            };
        }
        self.gaze = self.gaze.map(|v| v.clamp(-HARD_CLAMP, HARD_CLAMP));

        if !self.gaze.iter().chain(&self.target).all(|v| v.is_finite()) {
            tracing::warn!(state = ?self.state, "non-finite gaze, recentering");
            self.gaze = [0.0, 0.0];
            self.target = [0.0, 0.0];
            self.enter(GazeState::Idle);
        }
        self.gaze
    }
}
