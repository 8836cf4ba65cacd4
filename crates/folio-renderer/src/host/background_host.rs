use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use folio_common::{ColorSet, FolioError, Section, ThemeId};
use folio_config::{FolioConfig, PaletteResolver};

use super::types::{BuiltInPalettes, FallbackView, HostError, HostView, PaletteSource};
use crate::animation::{AnimationError, AnimationSettings, BackgroundAnimation};
use crate::clock::FrameQueue;
use crate::perf::FrameTimer;
use crate::pointer::PointerEvent;
use crate::registry::BackgroundRegistry;
use crate::surface::{SurfaceHost, Viewport};

/// Owns the current theme and the one mounted animation.
///
/// Every failure inside an animation, including a panic, is contained
/// here: it is logged, the animation is torn down and a static
/// [`FallbackView`] takes its place until the next theme, section or
/// motion change. Failed mounts are never retried on their own.
pub struct BackgroundHost {
    container: Box<dyn SurfaceHost>,
    registry: BackgroundRegistry,
    palette: Box<dyn PaletteSource>,
    settings: AnimationSettings,
    scheduler: FrameQueue,
    theme: String,
    section: Section,
    reduced_motion: bool,
    mounted: Option<Box<dyn BackgroundAnimation>>,
    view: HostView,
    timer: FrameTimer,
}

impl BackgroundHost {
    pub fn new(container: Box<dyn SurfaceHost>, registry: BackgroundRegistry, settings: AnimationSettings) -> Self {
        Self {
            container,
            registry,
            palette: Box::new(BuiltInPalettes),
            settings,
            scheduler: FrameQueue::new(),
            theme: ThemeId::default().id().to_string(),
            section: Section::default(),
            reduced_motion: false,
            mounted: None,
            view: HostView::Empty,
            timer: FrameTimer::new(),
        }
    }

    /// Host with built-in themes and the palette, theme, section and
    /// motion preference from `config`. Nothing is mounted yet.
    pub fn from_config(container: Box<dyn SurfaceHost>, config: &FolioConfig) -> Result<Self, FolioError> {
        let palette = PaletteResolver::from_config(&config.palette)?;
        let mut host = Self::new(
            container,
            BackgroundRegistry::with_builtins(),
            AnimationSettings::from_config(config),
        )
        .with_palette(Box::new(palette));
        host.theme = config.background.theme.clone();
        host.section = config.background.section;
        host.reduced_motion = config.background.reduced_motion;
        Ok(host)
    }

    pub fn with_palette(mut self, palette: Box<dyn PaletteSource>) -> Self {
        self.palette = palette;
        self
    }

    /// Tear down whatever is mounted and mount the current theme.
    pub fn mount(&mut self, now: f64) -> &HostView {
        self.teardown();

        let constructor = self.registry.resolve(&self.theme);
        let settings = self.settings.clone();
        let mut animation = match guarded("construct", || Ok(constructor(&settings))) {
            Ok(animation) => animation,
            Err(e) => {
                let theme = ThemeId::from_id(&self.theme).unwrap_or_default();
                self.fall_back(theme, e);
                return &self.view;
            }
        };

        let theme = animation.theme();
        let colors = match self.colors(theme) {
            Ok(colors) => colors,
            Err(e) => {
                dispose_quietly(animation.as_mut(), &mut self.scheduler);
                self.fall_back(theme, e);
                return &self.view;
            }
        };
        let container = self.container.as_mut();
        let scheduler = &mut self.scheduler;
        let reduced_motion = self.reduced_motion;
        let mounted = guarded("mount", || {
            animation.mount(container, &colors, reduced_motion, scheduler, now)?;
            Ok(())
        });

        match mounted {
            Ok(()) => {
                tracing::info!(
                    requested = %self.theme,
                    theme = %theme,
                    section = %self.section.id(),
                    reduced_motion,
                    "background mounted"
                );
                self.view = HostView::Animated { theme };
                self.mounted = Some(animation);
            }
            Err(e) => {
                dispose_quietly(animation.as_mut(), &mut self.scheduler);
                self.fall_back(theme, e);
            }
        }
        &self.view
    }

    /// Switch theme; remounts only when the id actually changes.
    pub fn set_theme(&mut self, theme: &str, now: f64) {
        let theme = theme.trim().to_lowercase();
        if theme != self.theme {
            tracing::info!(from = %self.theme, to = %theme, "theme switch");
            self.theme = theme;
            self.mount(now);
        }
    }

    pub fn set_section(&mut self, section: Section, now: f64) {
        if section != self.section {
            self.section = section;
            self.mount(now);
        }
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool, now: f64) {
        if reduced_motion != self.reduced_motion {
            self.reduced_motion = reduced_motion;
            self.mount(now);
        }
    }

    /// Deliver every frame callback due at `now` (milliseconds). Returns
    /// the number of frames drawn.
    pub fn tick(&mut self, now: f64) -> usize {
        let due = self.scheduler.take_due();
        let Some(animation) = self.mounted.as_mut() else {
            return 0;
        };

        let bounds = self.container.bounds();
        let mut drawn = 0;
        let mut failure = None;
        for token in due {
            let scheduler = &mut self.scheduler;
            match guarded("frame", || Ok(animation.frame(token, now, bounds, scheduler)?)) {
                Ok(true) => drawn += 1,
                Ok(false) => {}
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if drawn > 0 {
            self.timer.begin_frame(now);
        }
        if let Some(e) = failure {
            self.fail_mounted(e);
        }
        drawn
    }

    /// Apply a viewport change to the container and the mounted animation.
    pub fn resize(&mut self, viewport: Viewport) {
        self.container.resize(viewport);
        let Some(animation) = self.mounted.as_mut() else {
            return;
        };
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            pixel_ratio = viewport.pixel_ratio,
            "background resize"
        );
        if let Err(e) = guarded("resize", || Ok(animation.resize(viewport)?)) {
            self.fail_mounted(e);
        }
    }

    pub fn pointer_move(&mut self, event: PointerEvent) {
        if let Some(animation) = self.mounted.as_mut() {
            animation.pointer_move(event);
        }
    }

    /// Dispose the mounted animation. Idempotent.
    pub fn unmount(&mut self) {
        self.teardown();
    }

    pub fn view(&self) -> &HostView {
        &self.view
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn registry_mut(&mut self) -> &mut BackgroundRegistry {
        &mut self.registry
    }

    pub fn scheduler(&self) -> &FrameQueue {
        &self.scheduler
    }

    /// Frames drawn by the currently mounted animation.
    pub fn frames_rendered(&self) -> u64 {
        self.mounted.as_ref().map_or(0, |a| a.frames_rendered())
    }

    pub fn fps(&self) -> f64 {
        self.timer.fps()
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.timer.frame_time_ms()
    }

    fn teardown(&mut self) {
        if let Some(mut animation) = self.mounted.take() {
            dispose_quietly(animation.as_mut(), &mut self.scheduler);
            tracing::info!(theme = %animation.theme(), "background unmounted");
        }
        self.view = HostView::Empty;
        self.timer.reset();
    }

    fn fail_mounted(&mut self, error: HostError) {
        if let Some(mut animation) = self.mounted.take() {
            dispose_quietly(animation.as_mut(), &mut self.scheduler);
            self.fall_back(animation.theme(), error);
        }
    }

    /// Palette lookup inside the failure boundary; user overrides are
    /// arbitrary input.
    fn colors(&self, theme: ThemeId) -> Result<ColorSet, HostError> {
        let palette = self.palette.as_ref();
        let section = self.section;
        guarded("palette", || Ok(palette.colors(theme, section)))
    }

    fn fall_back(&mut self, theme: ThemeId, error: HostError) {
        let colors = self.colors(theme).unwrap_or_default();
        let fallback = FallbackView::from_colors(&colors);
        tracing::error!(theme = %theme, error = %error, "background failed, showing static fallback");
        self.view = HostView::Fallback(fallback);
    }
}

impl Drop for BackgroundHost {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Run `f`, turning a panic into a [`HostError`].
fn guarded<T>(stage: &'static str, f: impl FnOnce() -> Result<T, AnimationError>) -> Result<T, HostError> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result.map_err(HostError::from),
        Err(payload) => Err(HostError::Panicked {
            stage,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn dispose_quietly(animation: &mut dyn BackgroundAnimation, scheduler: &mut FrameQueue) {
    if let Err(e) = guarded("dispose", || {
        animation.dispose(scheduler);
        Ok(())
    }) {
        tracing::warn!(error = %e, "background dispose failed");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
