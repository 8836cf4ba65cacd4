use std::sync::Arc;

use folio_common::{Color, ColorSet, Rect, Section, ThemeId};
use folio_config::{get_colors, FolioConfig, PaletteResolver};

use super::*;
use crate::animation::{AnimationError, AnimationSettings, BackgroundAnimation};
use crate::clock::{FrameScheduler, FrameToken};
use crate::headless::HeadlessHost;
use crate::pointer::PointerEvent;
use crate::registry::BackgroundRegistry;
use crate::surface::{SurfaceHost, Viewport};

const FRAME_MS: f64 = 16.0;

fn host_with(container: &HeadlessHost) -> BackgroundHost {
    BackgroundHost::new(
        Box::new(container.clone()),
        BackgroundRegistry::with_builtins(),
        AnimationSettings::default(),
    )
}

fn run(host: &mut BackgroundHost, from: f64, frames: usize) -> (usize, f64) {
    let mut drawn = 0;
    let mut now = from;
    for _ in 0..frames {
        now += FRAME_MS;
        drawn += host.tick(now);
    }
    (drawn, now)
}

/// Panics at the stage it is told to.
struct Faulty {
    panic_in_mount: bool,
    mounted: bool,
}

impl BackgroundAnimation for Faulty {
    fn theme(&self) -> ThemeId {
        ThemeId::Waves
    }

    fn mount(
        &mut self,
        _container: &mut dyn SurfaceHost,
        _colors: &ColorSet,
        _reduced_motion: bool,
        scheduler: &mut dyn FrameScheduler,
        _now: f64,
    ) -> Result<(), AnimationError> {
        if self.panic_in_mount {
            panic!("mount exploded");
        }
        self.mounted = true;
        scheduler.request_frame();
        Ok(())
    }

    fn frame(
        &mut self,
        _token: FrameToken,
        _now: f64,
        _bounds: Rect,
        _scheduler: &mut dyn FrameScheduler,
    ) -> Result<bool, AnimationError> {
        panic!("frame exploded");
    }

    fn resize(&mut self, _viewport: Viewport) -> Result<(), AnimationError> {
        Ok(())
    }

    fn pointer_move(&mut self, _event: PointerEvent) {}

    fn dispose(&mut self, _scheduler: &mut dyn FrameScheduler) {
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn frames_rendered(&self) -> u64 {
        0
    }
}

#[test]
fn mounts_the_default_theme() {
    let container = HeadlessHost::new(Viewport::new(320.0, 200.0, 1.0));
    let mut host = host_with(&container);
    assert_eq!(host.view(), &HostView::Empty);
    assert_eq!(
        host.mount(0.0),
        &HostView::Animated {
            theme: ThemeId::Starfield
        }
    );
    let (drawn, _) = run(&mut host, 0.0, 10);
    assert_eq!(drawn, 10);
    assert_eq!(host.frames_rendered(), 10);
    assert!(container.stats().frames_presented >= 10);
    assert!(host.fps() > 0.0);
}

#[test]
fn unknown_theme_falls_back_to_default() {
    let container = HeadlessHost::new(Viewport::default());
    let mut host = host_with(&container);
    host.set_theme("vaporwave", 0.0);
    assert_eq!(
        host.view(),
        &HostView::Animated {
            theme: ThemeId::Starfield
        }
    );
}

#[test]
fn missing_gpu_shows_fallback_without_drawing() {
    let container = HeadlessHost::new(Viewport::default()).without_gpu();
    let mut host = host_with(&container);
    host.set_theme("aurora", 0.0);

    let expected = FallbackView::from_colors(&get_colors(ThemeId::Aurora, Section::All));
    assert_eq!(host.view(), &HostView::Fallback(expected));
    let (drawn, _) = run(&mut host, 0.0, 5);
    assert_eq!(drawn, 0);
    assert_eq!(container.stats().draw_calls(), 0);
    // No retry: nothing was ever scheduled.
    assert_eq!(host.scheduler().requested(), 0);
    assert!(host.view().is_fallback());
}

#[test]
fn theme_switch_tears_down_the_previous_animation() {
    let container = HeadlessHost::new(Viewport::new(320.0, 200.0, 1.0));
    let mut host = host_with(&container);
    host.mount(0.0);
    let (_, now) = run(&mut host, 0.0, 3);

    host.set_theme("Cityscape", now);
    assert_eq!(
        host.view(),
        &HostView::Animated {
            theme: ThemeId::Cityscape
        }
    );
    let stats = container.stats();
    assert_eq!(stats.raster_contexts, 1);
    assert_eq!(stats.gpu_contexts, 1);
    assert_eq!(stats.live_contexts(), 1);
    assert_eq!(host.scheduler().pending(), 1);
    assert_eq!(host.frames_rendered(), 0);

    let (drawn, _) = run(&mut host, now, 2);
    assert_eq!(drawn, 2);
    assert!(container.stats().gpu_draw_calls >= 2);
}

#[test]
fn same_theme_does_not_remount() {
    let container = HeadlessHost::new(Viewport::new(320.0, 200.0, 1.0));
    let mut host = host_with(&container);
    host.mount(0.0);
    let (_, now) = run(&mut host, 0.0, 3);
    host.set_theme("starfield", now);
    assert_eq!(host.frames_rendered(), 3);
    assert_eq!(container.stats().raster_contexts, 1);
}

#[test]
fn section_change_remounts_with_new_colors() {
    let container = HeadlessHost::new(Viewport::new(320.0, 200.0, 1.0));
    let mut host = host_with(&container);
    host.mount(0.0);
    host.set_section(Section::About, 0.0);
    assert_eq!(host.section(), Section::About);
    assert_eq!(container.stats().raster_contexts, 2);
    assert_eq!(container.stats().live_contexts(), 1);
}

#[test]
fn reduced_motion_draws_once() {
    let container = HeadlessHost::new(Viewport::new(320.0, 200.0, 1.0));
    let mut host = host_with(&container);
    host.set_reduced_motion(true, 0.0);
    let (drawn, _) = run(&mut host, 0.0, 20);
    assert_eq!(drawn, 1);
    assert_eq!(host.scheduler().requested(), 1);
}

#[test]
fn panicking_mount_is_contained() {
    let container = HeadlessHost::new(Viewport::default());
    let mut host = host_with(&container);
    host.registry_mut().register(
        "faulty",
        Arc::new(|_: &AnimationSettings| {
            Box::new(Faulty {
                panic_in_mount: true,
                mounted: false,
            }) as Box<dyn BackgroundAnimation>
        }),
    );
    host.set_theme("faulty", 0.0);
    assert!(host.view().is_fallback());
    assert_eq!(host.tick(FRAME_MS), 0);
}

#[test]
fn panicking_frame_is_contained() {
    let container = HeadlessHost::new(Viewport::default());
    let mut host = host_with(&container);
    host.registry_mut().register(
        "faulty",
        Arc::new(|_: &AnimationSettings| {
            Box::new(Faulty {
                panic_in_mount: false,
                mounted: false,
            }) as Box<dyn BackgroundAnimation>
        }),
    );
    host.set_theme("faulty", 0.0);
    assert_eq!(host.view(), &HostView::Animated { theme: ThemeId::Waves });

    assert_eq!(host.tick(FRAME_MS), 0);
    assert!(host.view().is_fallback());
    assert_eq!(host.tick(2.0 * FRAME_MS), 0);
}

#[test]
fn resize_reaches_container_and_animation() {
    let container = HeadlessHost::new(Viewport::new(800.0, 600.0, 1.0));
    let mut host = host_with(&container);
    host.set_theme("blackhole", 0.0);
    host.tick(FRAME_MS);

    host.resize(Viewport::new(640.0, 360.0, 1.0));
    assert_eq!(container.viewport().width, 640.0);
    host.tick(2.0 * FRAME_MS);
    assert_eq!(container.stats().last_uniforms["resolution"], vec![640.0, 360.0]);
}

#[test]
fn pointer_reaches_the_animation() {
    let container = HeadlessHost::new(Viewport::new(800.0, 600.0, 1.0));
    let mut host = host_with(&container);
    host.set_theme("aurora", 0.0);
    for i in 0..5 {
        host.pointer_move(PointerEvent::new(800.0, 0.0, i as f64 * FRAME_MS));
    }
    run(&mut host, 5.0 * FRAME_MS, 30);
    let pointer = &container.stats().last_uniforms["pointer"];
    assert!(pointer[0] > 0.5 && pointer[1] > 0.5, "{pointer:?}");
}

#[test]
fn unmount_is_idempotent_and_drop_releases() {
    let container = HeadlessHost::new(Viewport::new(320.0, 200.0, 1.0));
    let mut host = host_with(&container);
    host.mount(0.0);
    host.unmount();
    host.unmount();
    assert_eq!(host.view(), &HostView::Empty);
    assert_eq!(container.stats().live_contexts(), 0);
    assert_eq!(host.scheduler().pending(), 0);

    host.set_theme("eye", 0.0);
    assert_eq!(container.stats().live_contexts(), 1);
    drop(host);
    let stats = container.stats();
    assert_eq!(stats.live_contexts(), 0);
    assert_eq!(stats.live_programs, 0);
}

#[test]
fn from_config_reads_background_settings() {
    let container = HeadlessHost::new(Viewport::default());
    let mut config = FolioConfig::default();
    config.background.theme = "rain".into();
    config.background.section = Section::Portfolio;
    config.background.reduced_motion = true;
    let mut host = BackgroundHost::from_config(Box::new(container.clone()), &config).unwrap();
    assert_eq!(host.theme(), "rain");
    assert!(host.reduced_motion());
    assert_eq!(host.mount(0.0), &HostView::Animated { theme: ThemeId::Rain });
}

#[test]
fn fallback_prefers_a_gradient() {
    let colors = ColorSet::new()
        .with("background", Color::BLACK)
        .with("primary", Color::WHITE);
    match FallbackView::from_colors(&colors) {
        FallbackView::Gradient { from, to } => {
            assert_eq!(from, Color::BLACK);
            assert!(to.r > 0 && to.r < 255);
        }
        other => panic!("expected gradient, got {other:?}"),
    }
}

#[test]
fn fallback_with_a_single_color_is_solid() {
    let colors = ColorSet::new().with("background", Color::WHITE);
    assert_eq!(FallbackView::from_colors(&colors), FallbackView::Solid(Color::WHITE));
    assert_eq!(
        FallbackView::from_colors(&ColorSet::new()),
        FallbackView::Solid(Color::BLACK)
    );
}

/// Panics on every lookup.
struct BrokenPalette;

impl PaletteSource for BrokenPalette {
    fn colors(&self, _theme: ThemeId, _section: Section) -> ColorSet {
        panic!("palette exploded");
    }
}

#[test]
fn non_ascii_palette_override_is_skipped() {
    let overrides =
        folio_config::palette::parse_overrides("starfield:\n  star: \"#\u{e9}a\"\n").unwrap();
    let container = HeadlessHost::new(Viewport::new(320.0, 240.0, 1.0));
    let mut host = host_with(&container)
        .with_palette(Box::new(PaletteResolver::with_overrides(overrides)));

    assert_eq!(
        host.mount(0.0),
        &HostView::Animated {
            theme: ThemeId::Starfield
        }
    );
    let (drawn, _) = run(&mut host, 0.0, 3);
    assert_eq!(drawn, 3);
}

#[test]
fn panicking_palette_is_contained() {
    let container = HeadlessHost::new(Viewport::new(320.0, 240.0, 1.0));
    let mut host = host_with(&container).with_palette(Box::new(BrokenPalette));

    let view = host.mount(0.0).clone();
    assert_eq!(view, HostView::Fallback(FallbackView::Solid(Color::BLACK)));
    assert_eq!(host.frames_rendered(), 0);
    assert_eq!(container.stats().live_contexts(), 0);
}
