//! Animation trait, shared frame data, and errors.

use folio_common::{ColorSet, Rect, ThemeId};
use folio_config::FolioConfig;

use crate::clock::{FrameScheduler, FrameTime, FrameToken};
use crate::pointer::{PointerEvent, PointerSettings, PointerView};
use crate::shader::ShaderError;
use crate::surface::{ContextError, SurfaceError, SurfaceHost, SurfaceSize, Viewport};

/// Seed for every animation's random source unless configured otherwise.
pub const DEFAULT_SEED: u64 = 0x5eed_f011;

/// Errors that abort a mount or a frame.
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("draw failed: {0}")]
    Draw(#[from] ContextError),

    #[error("animation is already mounted")]
    AlreadyMounted,
}

/// Tunables passed to every animation constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSettings {
    pub time_scale: f64,
    /// Elapsed seconds reported to the single reduced-motion frame.
    pub static_elapsed: f64,
    pub pointer: PointerSettings,
    pub seed: u64,
}

impl AnimationSettings {
    pub fn from_config(config: &FolioConfig) -> Self {
        Self {
            time_scale: config.clock.time_scale,
            static_elapsed: config.clock.static_elapsed,
            pointer: PointerSettings::from_config(&config.pointer),
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            static_elapsed: 0.0,
            pointer: PointerSettings::default(),
            seed: DEFAULT_SEED,
        }
    }
}

/// Everything a scene reads to produce one frame.
#[derive(Debug, Clone, Copy)]
pub struct SceneFrame {
    pub time: FrameTime,
    pub size: SurfaceSize,
    pub pointer: PointerView,
    pub reduced_motion: bool,
}

impl SceneFrame {
    pub fn elapsed(&self) -> f32 {
        self.time.elapsed as f32
    }

    pub fn delta(&self) -> f32 {
        self.time.delta as f32
    }

    /// Pointer position in CSS pixels, if a smoothed sample exists.
    pub fn pointer_px(&self) -> Option<(f32, f32)> {
        self.pointer.present.then(|| {
            (
                self.pointer.unit[0] * self.size.css_width,
                self.pointer.unit[1] * self.size.css_height,
            )
        })
    }
}

/// A mountable page background.
///
/// `mount` acquires a surface, builds any GPU program, subscribes to the
/// pointer, and starts the clock. `dispose` undoes all of that; it is the
/// disposer handed back by a mount, safe to call more than once and after
/// a failed mount.
pub trait BackgroundAnimation {
    fn theme(&self) -> ThemeId;

    fn mount(
        &mut self,
        container: &mut dyn SurfaceHost,
        colors: &ColorSet,
        reduced_motion: bool,
        scheduler: &mut dyn FrameScheduler,
        now: f64,
    ) -> Result<(), AnimationError>;

    /// Handle a frame callback. Returns `Ok(false)` for stale tokens.
    fn frame(
        &mut self,
        token: FrameToken,
        now: f64,
        bounds: Rect,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<bool, AnimationError>;

    /// Apply a viewport change before the next frame reads resolution.
    fn resize(&mut self, viewport: Viewport) -> Result<(), AnimationError>;

    fn pointer_move(&mut self, event: PointerEvent);

    fn dispose(&mut self, scheduler: &mut dyn FrameScheduler);

    fn is_mounted(&self) -> bool;

    fn frames_rendered(&self) -> u64;
}
