//! GPU bio-mechanical eye.
//!
//! The shader draws the eye; [`GazeController`] decides where it looks.
//! Blinks are scheduled at random intervals and suppressed entirely under
//! reduced motion.

mod gaze;

pub use gaze::{GazeController, GazeState, HARD_CLAMP, TRACK_CLAMP};

use folio_common::{Color, ColorSet, ThemeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ease;
use crate::animation::{SceneFrame, ShaderScene};
use crate::shader::{ShaderError, UniformWriter};

const FRAGMENT: &str = include_str!("../../../shaders/eye.wgsl");

const INTENSITY: f32 = 0.85;
const PUPIL_RELAXED: f32 = 0.5;
const PUPIL_FOCUSED: f32 = 0.38;
const PUPIL_EASE: f32 = 0.05;
pub const BLINK_DURATION: f32 = 0.18;
const BLINK_GAP: std::ops::Range<f32> = 2.5..6.0;

#[derive(Debug)]
pub struct EyeScene {
    gaze: GazeController,
    rng: StdRng,
    pupil: f32,
    until_blink: f32,
    blink_phase: Option<f32>,
    blinks: u32,
}

impl EyeScene {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed ^ 0xb11c);
        let until_blink = rng.gen_range(BLINK_GAP);
        Self {
            gaze: GazeController::new(seed),
            rng,
            pupil: PUPIL_RELAXED,
            until_blink,
            blink_phase: None,
            blinks: 0,
        }
    }

    pub fn gaze(&self) -> &GazeController {
        &self.gaze
    }

    pub fn pupil_size(&self) -> f32 {
        self.pupil
    }

    /// Blinks started so far.
    pub fn blinks(&self) -> u32 {
        self.blinks
    }

    /// Lid closure in `[0, 1]` after advancing by `dt`.
    fn advance_blink(&mut self, dt: f32, reduced_motion: bool) -> f32 {
        if reduced_motion {
            self.blink_phase = None;
            return 0.0;
        }
        match self.blink_phase {
            Some(phase) => {
                let phase = phase + dt;
                if phase >= BLINK_DURATION {
                    self.blink_phase = None;
                    self.until_blink = self.rng.gen_range(BLINK_GAP);
                    0.0
                } else {
                    self.blink_phase = Some(phase);
                    1.0 - (2.0 * phase / BLINK_DURATION - 1.0).abs()
                }
            }
            None => {
                self.until_blink -= dt;
                if self.until_blink <= 0.0 {
                    self.blink_phase = Some(0.0);
                    self.blinks += 1;
                }
                0.0
            }
        }
    }
}

impl Default for EyeScene {
    fn default() -> Self {
        Self::new(crate::animation::DEFAULT_SEED)
    }
}

impl ShaderScene for EyeScene {
    fn theme(&self) -> ThemeId {
        ThemeId::Eye
    }

    fn fragment_source(&self) -> &'static str {
        FRAGMENT
    }

    fn uniforms(&self) -> &'static [&'static str] {
        &[
            "gaze",
            "pupil_size",
            "blink",
            "intensity",
            "color_iris",
            "color_pupil",
            "color_sclera",
            "color_accent",
            "color_background",
        ]
    }

    fn apply_colors(&mut self, colors: &ColorSet, uniforms: &mut UniformWriter<'_>) -> Result<(), ShaderError> {
        let iris = colors.get_or("iris", colors.get_or("primary", Color::WHITE));
        uniforms.color("color_iris", iris)?;
        uniforms.color("color_pupil", colors.get_or("pupil", Color::BLACK))?;
        uniforms.color("color_sclera", colors.get_or("sclera", iris.scale(0.3)))?;
        uniforms.color("color_accent", colors.get_or("accent", iris))?;
        uniforms.color("color_background", colors.get_or("background", Color::BLACK))?;
        uniforms.f32("intensity", INTENSITY)?;
        uniforms.f32("pupil_size", self.pupil)?;
        uniforms.f32("blink", 0.0)
    }

    fn update(&mut self, frame: &SceneFrame, uniforms: &mut UniformWriter<'_>) -> Result<(), ShaderError> {
        let dt = frame.delta();
        let gaze = self.gaze.update(dt, &frame.pointer);
        let pupil_target = if self.gaze.state() == GazeState::Tracking {
            PUPIL_FOCUSED
        } else {
            PUPIL_RELAXED
        };
        self.pupil = ease(self.pupil, pupil_target, PUPIL_EASE, dt);
        let blink = self.advance_blink(dt, frame.reduced_motion);

        uniforms.vec2("gaze", gaze)?;
        uniforms.f32("pupil_size", self.pupil)?;
        uniforms.f32("blink", blink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::PointerView;

    const DT: f32 = 1.0 / 60.0;

    fn active(signed: [f32; 2]) -> PointerView {
        PointerView {
            unit: [(signed[0] + 1.0) / 2.0, (1.0 - signed[1]) / 2.0],
            signed,
            present: true,
            active: true,
        }
    }

    #[test]
    fn tracking_clamps_the_target() {
        let mut gaze = GazeController::new(7);
        for _ in 0..240 {
            gaze.update(DT, &active([1.0, -1.0]));
        }
        assert_eq!(gaze.state(), GazeState::Tracking);
        let [x, y] = gaze.gaze();
        let bound = TRACK_CLAMP + 0.03 + 1e-4;
        assert!(x > 0.3 && x <= bound, "x = {x}");
        assert!(y < -0.3 && y >= -bound, "y = {y}");
    }

    #[test]
    fn idle_eye_cycles_through_look_and_return() {
        let mut gaze = GazeController::new(42);
        let idle = PointerView::centered();
        let mut seen = std::collections::HashSet::new();
        let mut transitions = Vec::new();
        let mut last = gaze.state();
        for _ in 0..(60 * 60) {
            gaze.update(DT, &idle);
            let [x, y] = gaze.gaze();
            assert!(x.abs() <= HARD_CLAMP && y.abs() <= HARD_CLAMP);
            assert!(gaze.state_time() <= gaze::STATE_CEILING + DT);
            if gaze.state() != last {
                transitions.push((last, gaze.state()));
                last = gaze.state();
            }
            seen.insert(gaze.state());
        }
        assert!(seen.contains(&GazeState::Looking));
        assert!(seen.contains(&GazeState::Returning));
        assert!(!seen.contains(&GazeState::Tracking));
        assert!(transitions.contains(&(GazeState::Idle, GazeState::Looking)));
        assert!(transitions.contains(&(GazeState::Looking, GazeState::Returning)));
        assert!(transitions.contains(&(GazeState::Returning, GazeState::Idle)));
    }

    #[test]
    fn losing_the_pointer_leaves_tracking() {
        let mut gaze = GazeController::new(3);
        for _ in 0..30 {
            gaze.update(DT, &active([0.2, 0.2]));
        }
        gaze.update(DT, &PointerView::centered());
        assert!(matches!(gaze.state(), GazeState::Looking | GazeState::Returning));
    }

    #[test]
    fn non_finite_pointer_recenters() {
        let mut gaze = GazeController::new(1);
        for _ in 0..10 {
            gaze.update(DT, &active([0.3, 0.3]));
        }
        let out = gaze.update(DT, &active([f32::NAN, 0.1]));
        assert_eq!(out, [0.0, 0.0]);
        assert_eq!(gaze.state(), GazeState::Idle);
    }

    #[test]
    fn zero_delta_holds_the_gaze() {
        let mut gaze = GazeController::new(9);
        let out = gaze.update(0.0, &active([0.3, 0.3]));
        assert_eq!(out, [0.0, 0.0]);
    }

    #[test]
    fn blinks_happen_unless_motion_is_reduced() {
        let mut eye = EyeScene::new(11);
        let mut peak = 0.0f32;
        for _ in 0..(60 * 10) {
            peak = peak.max(eye.advance_blink(DT, false));
        }
        assert!(eye.blinks() >= 1);
        assert!(peak > 0.5);

        let mut still = EyeScene::new(11);
        for _ in 0..(60 * 10) {
            assert_eq!(still.advance_blink(DT, true), 0.0);
        }
        assert_eq!(still.blinks(), 0);
    }
}
