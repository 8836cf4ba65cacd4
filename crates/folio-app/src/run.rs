//! Drive a [`BackgroundHost`] through a fixed number of simulated display
//! refreshes and export the result.

use std::path::{Path, PathBuf};

use folio_common::{Color, FolioError};
use folio_config::FolioConfig;
use folio_renderer::headless::{HeadlessHost, HeadlessStats};
use folio_renderer::host::{BackgroundHost, FallbackView, HostView};
use folio_renderer::surface::{SurfaceHost, SurfaceSize, Viewport};
use image::{Rgba, RgbaImage};

use crate::cli::Args;

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub view: HostView,
    pub frames_drawn: usize,
    pub fps: f64,
    pub stats: HeadlessStats,
    pub output: Option<PathBuf>,
}

/// The container the host renders into.
enum Backend {
    Headless(HeadlessHost),
    #[cfg(feature = "gpu")]
    Wgpu(folio_renderer::gpu::WgpuHost),
}

impl Backend {
    fn open(use_gpu: bool, viewport: Viewport) -> Result<Self, FolioError> {
        if use_gpu {
            #[cfg(feature = "gpu")]
            {
                let host = folio_renderer::gpu::WgpuHost::new(viewport)
                    .map_err(|e| FolioError::Renderer(e.to_string()))?;
                tracing::info!(adapter = %host.adapter_name(), "using wgpu backend");
                return Ok(Backend::Wgpu(host));
            }
            #[cfg(not(feature = "gpu"))]
            tracing::warn!("built without the `gpu` feature, using the headless backend");
        }
        Ok(Backend::Headless(HeadlessHost::new(viewport)))
    }

    fn container(&self) -> Box<dyn SurfaceHost> {
        match self {
            Backend::Headless(host) => Box::new(host.clone()),
            #[cfg(feature = "gpu")]
            Backend::Wgpu(host) => Box::new(host.clone()),
        }
    }

    fn stats(&self) -> HeadlessStats {
        match self {
            Backend::Headless(host) => host.stats(),
            #[cfg(feature = "gpu")]
            Backend::Wgpu(host) => host.stats(),
        }
    }

    fn save_png(&self, path: &Path) -> Result<(), FolioError> {
        match self {
            Backend::Headless(host) => host.save_png(path),
            #[cfg(feature = "gpu")]
            Backend::Wgpu(host) => host.save_png(path),
        }
    }
}

/// Fold command-line overrides into the loaded config.
pub fn apply_overrides(config: &mut FolioConfig, args: &Args) {
    let background = &mut config.background;
    if let Some(theme) = &args.theme {
        background.theme = theme.clone();
    }
    if let Some(section) = args.section {
        background.section = section;
    }
    if args.reduced_motion {
        background.reduced_motion = true;
    }
    if let Some((width, height)) = args.size {
        background.width = width;
        background.height = height;
    }
    if let Some(ratio) = args.pixel_ratio {
        background.pixel_ratio = ratio;
    }
}

/// Apply `args` to `config`, then render. Overrides go through the same
/// range checks as the config file.
pub fn run(args: &Args, mut config: FolioConfig) -> Result<RunSummary, FolioError> {
    apply_overrides(&mut config, args);
    folio_config::validation::validate(&config)?;
    let background = &config.background;
    let viewport = Viewport::new(
        background.width as f32,
        background.height as f32,
        background.pixel_ratio as f32,
    );

    let backend = Backend::open(args.gpu, viewport)?;
    let mut host = BackgroundHost::from_config(backend.container(), &config)?;
    let view = host.mount(0.0).clone();

    let interval = 1000.0 / f64::from(config.clock.frame_rate.max(1));
    let mut frames_drawn = 0;
    for i in 1..=args.frames {
        frames_drawn += host.tick(f64::from(i) * interval);
    }
    let view = if host.view().is_fallback() { host.view().clone() } else { view };

    let summary = RunSummary {
        view,
        frames_drawn,
        fps: host.fps(),
        stats: backend.stats(),
        output: args.output.clone(),
    };
    tracing::info!(
        theme = %host.theme(),
        frames_drawn,
        fps = summary.fps,
        draw_calls = summary.stats.draw_calls(),
        "run complete"
    );

    if let Some(path) = &args.output {
        match &summary.view {
            HostView::Fallback(fallback) => {
                paint_fallback(fallback, SurfaceSize::from_viewport(viewport))
                    .save_with_format(path, image::ImageFormat::Png)
                    .map_err(|e| FolioError::Export(e.to_string()))?;
            }
            _ => backend.save_png(path)?,
        }
        tracing::info!(path = %path.display(), "frame exported");
    }
    Ok(summary)
}

/// Rasterize a fallback at backing resolution.
pub fn paint_fallback(fallback: &FallbackView, size: SurfaceSize) -> RgbaImage {
    let (width, height) = (size.backing_width, size.backing_height);
    RgbaImage::from_fn(width, height, |_, y| {
        let color = match fallback {
            FallbackView::Solid(color) => *color,
            FallbackView::Gradient { from, to } => {
                let t = if height > 1 { y as f32 / (height - 1) as f32 } else { 0.0 };
                from.lerp(to, t)
            }
        };
        to_pixel(color)
    })
}

fn to_pixel(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}
