//! Full-screen fragment shader backgrounds.

use folio_common::{ColorSet, Rect, ThemeId};

use super::types::{AnimationError, AnimationSettings, BackgroundAnimation, SceneFrame};
use crate::clock::{AnimationClock, ClockMode, FrameScheduler, FrameToken};
use crate::pointer::{PointerEvent, PointerTracker};
use crate::shader::{ShaderError, ShaderProgram, UniformValue, UniformWriter, FULLSCREEN_VERTEX};
use crate::surface::{GpuContext, RenderSurface, SurfaceHost, Viewport};

/// Uniforms every shader scene declares and [`ShaderBackground`] writes.
pub const COMMON_UNIFORMS: [&str; 2] = ["resolution", "time"];

/// The per-theme part of a shader background.
pub trait ShaderScene {
    fn theme(&self) -> ThemeId;

    fn fragment_source(&self) -> &'static str;

    /// Uniform names the scene writes, in addition to [`COMMON_UNIFORMS`].
    fn uniforms(&self) -> &'static [&'static str];

    /// Write palette-derived uniforms once after linking.
    fn apply_colors(&mut self, colors: &ColorSet, uniforms: &mut UniformWriter<'_>) -> Result<(), ShaderError>;

    /// Write this frame's uniforms.
    fn update(&mut self, frame: &SceneFrame, uniforms: &mut UniformWriter<'_>) -> Result<(), ShaderError>;
}

/// Drives a [`ShaderScene`]: owns the GPU surface, the linked program, the
/// clock and the pointer subscription.
pub struct ShaderBackground<S: ShaderScene> {
    scene: S,
    settings: AnimationSettings,
    surface: Option<RenderSurface<dyn GpuContext>>,
    program: Option<ShaderProgram>,
    clock: Option<AnimationClock>,
    pointer: PointerTracker,
    reduced_motion: bool,
    frames: u64,
}

impl<S: ShaderScene> ShaderBackground<S> {
    pub fn new(scene: S, settings: AnimationSettings) -> Self {
        let pointer = PointerTracker::new(settings.pointer);
        Self {
            scene,
            settings,
            surface: None,
            program: None,
            clock: None,
            pointer,
            reduced_motion: false,
            frames: 0,
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    fn link(&mut self, colors: &ColorSet) -> Result<(), AnimationError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let resolution = surface.size().resolution();
        let ctx = surface.context_mut()?;

        let mut names: Vec<&str> = COMMON_UNIFORMS.to_vec();
        names.extend_from_slice(self.scene.uniforms());
        let program = ShaderProgram::compile(ctx, FULLSCREEN_VERTEX, self.scene.fragment_source(), &names, &[])?;

        // Stored before the uniform writes so a failure below still frees it.
        let program = self.program.insert(program);
        let mut writer = UniformWriter::new(program, ctx);
        writer.vec2("resolution", resolution)?;
        self.scene.apply_colors(colors, &mut writer)?;
        Ok(())
    }
}

impl<S: ShaderScene> BackgroundAnimation for ShaderBackground<S> {
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
        self.surface = Some(RenderSurface::acquire_gpu(container)?);
        if let Err(e) = self.link(colors) {
            self.dispose(scheduler);
            return Err(e);
        }

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

        tracing::info!(theme = %self.scene.theme(), reduced_motion, "shader background mounted");
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
        let (Some(surface), Some(program)) = (self.surface.as_mut(), self.program.as_ref()) else {
            return Ok(false);
        };

        self.pointer.update(now);
        let frame = SceneFrame {
            time,
            size: surface.size(),
            pointer: self.pointer.view(bounds, now),
            reduced_motion: self.reduced_motion,
        };

        let ctx = surface.context_mut()?;
        {
            let mut writer = UniformWriter::new(program, &mut *ctx);
            writer.vec2("resolution", frame.size.resolution())?;
            writer.f32("time", frame.elapsed())?;
            self.scene.update(&frame, &mut writer)?;
        }
        program.draw(ctx)?;
        self.frames += 1;

        clock.finish_frame(scheduler);
        Ok(true)
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), AnimationError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let size = surface.resize(viewport)?;
        if let Some(program) = self.program.as_ref() {
            program.set(surface.context_mut()?, "resolution", UniformValue::Vec2(size.resolution()))?;
        }
        Ok(())
    }

    fn pointer_move(&mut self, event: PointerEvent) {
        self.pointer.record(event);
    }

    fn dispose(&mut self, scheduler: &mut dyn FrameScheduler) {
        let was_mounted = self.surface.is_some();
        if let Some(clock) = self.clock.as_mut() {
            clock.cancel(scheduler);
        }
        self.pointer.unsubscribe();
        if let Some(mut program) = self.program.take() {
            if let Some(ctx) = self.surface.as_mut().and_then(|s| s.context_mut().ok()) {
                program.release(ctx);
            }
        }
        if let Some(mut surface) = self.surface.take() {
            surface.release();
        }
        if was_mounted {
            tracing::info!(theme = %self.scene.theme(), frames = self.frames, "shader background disposed");
        }
    }

    fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    fn frames_rendered(&self) -> u64 {
        self.frames
    }
}
