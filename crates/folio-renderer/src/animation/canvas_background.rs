//! 2D raster backgrounds.

use folio_common::{ColorSet, Rect, ThemeId};

use super::types::{AnimationError, AnimationSettings, BackgroundAnimation, SceneFrame};
use crate::clock::{AnimationClock, ClockMode, FrameScheduler, FrameToken};
use crate::pointer::{PointerEvent, PointerTracker};
use crate::surface::{RasterContext, RenderSurface, SurfaceHost, SurfaceSize, Viewport};

/// The per-theme part of a canvas background.
pub trait CanvasScene {
    fn theme(&self) -> ThemeId;

    /// Take the palette and build initial state for `size`.
    fn setup(&mut self, colors: &ColorSet, size: SurfaceSize);

    fn resize(&mut self, _size: SurfaceSize) {}

    fn draw(&mut self, frame: &SceneFrame, canvas: &mut dyn RasterContext);
}

/// Drives a [`CanvasScene`] with its own raster surface, clock and pointer
/// subscription.
pub struct CanvasBackground<S: CanvasScene> {
    scene: S,
    settings: AnimationSettings,
    surface: Option<RenderSurface<dyn RasterContext>>,
    clock: Option<AnimationClock>,
    pointer: PointerTracker,
    reduced_motion: bool,
    frames: u64,
}

impl<S: CanvasScene> CanvasBackground<S> {
    pub fn new(scene: S, settings: AnimationSettings) -> Self {
        let pointer = PointerTracker::new(settings.pointer);
        Self {
            scene,
            settings,
            surface: None,
            clock: None,
            pointer,
            reduced_motion: false,
            frames: 0,
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }
}

impl<S: CanvasScene> BackgroundAnimation for CanvasBackground<S> {
    fn theme(&self) -> ThemeId {
        self.scene.theme()
    }

    fn mount(
        &mut self,
        container: &mut dyn SurfaceHost,
        colors: &ColorSet,
        reduced_motion: bool,
        scheduler: &mut dyn FrameScheduler,
        now: f64,
    ) -> Result<(), AnimationError> {
        if self.surface.is_some() {
            return Err(AnimationError::AlreadyMounted);
        }
        let surface = self.surface.insert(RenderSurface::acquire_raster(container)?);
        self.scene.setup(colors, surface.size());

        self.reduced_motion = reduced_motion;
        self.pointer.subscribe(container.bounds());
        let mode = if reduced_motion {
            ClockMode::Static
        } else {
            ClockMode::Continuous
        };
        let clock = self.clock.insert(AnimationClock::new(
            mode,
            self.settings.time_scale,
            self.settings.static_elapsed,
        ));
        clock.start(now, scheduler);

        tracing::info!(theme = %self.scene.theme(), reduced_motion, "canvas background mounted");
        Ok(())
    }

    fn frame(
        &mut self,
        token: FrameToken,
        now: f64,
        bounds: Rect,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<bool, AnimationError> {
        let Some(clock) = self.clock.as_mut() else {
            return Ok(false);
        };
        let Some(time) = clock.begin_frame(token, now) else {
            return Ok(false);
        };
        let Some(surface) = self.surface.as_mut() else {
            return Ok(false);
        };

        self.pointer.update(now);
        let frame = SceneFrame {
            time,
            size: surface.size(),
            pointer: self.pointer.view(bounds, now),
            reduced_motion: self.reduced_motion,
        };
        let canvas = surface.context_mut()?;
        self.scene.draw(&frame, canvas);
        canvas.present();
        self.frames += 1;

        clock.finish_frame(scheduler);
        Ok(true)
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), AnimationError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let size = surface.resize(viewport)?;
        self.scene.resize(size);
        Ok(())
    }

    fn pointer_move(&mut self, event: PointerEvent) {
        self.pointer.record(event);
    }

    fn dispose(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(clock) = self.clock.as_mut() {
            clock.cancel(scheduler);
        }
        self.pointer.unsubscribe();
        if let Some(mut surface) = self.surface.take() {
            surface.release();
            tracing::info!(theme = %self.scene.theme(), frames = self.frames, "canvas background disposed");
        }
    }

    fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    fn frames_rendered(&self) -> u64 {
        self.frames
    }
}
