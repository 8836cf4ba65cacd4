use std::fmt;

/// Which kind of drawing context a surface is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// Programmable pipeline (shader programs, uniforms, draw calls).
    Gpu,
    /// Immediate-mode 2D raster canvas.
    Raster,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKind::Gpu => f.write_str("gpu"),
            ContextKind::Raster => f.write_str("raster"),
        }
    }
}

/// Errors raised while acquiring or using a render surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("{kind} context unavailable")]
    Unavailable { kind: ContextKind },

    #[error("surface already released")]
    Released,
}

/// Viewport signal delivered by the host: CSS size plus device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

/// Displayed and backing dimensions of a surface.
///
/// The displayed (CSS) size is what layout sees; the backing size is the
/// number of physical pixels actually rendered, scaled by the pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub css_width: f32,
    pub css_height: f32,
    pub backing_width: u32,
    pub backing_height: u32,
    pub pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn from_viewport(viewport: Viewport) -> Self {
        let ratio = if viewport.pixel_ratio.is_finite() && viewport.pixel_ratio > 0.0 {
            viewport.pixel_ratio
        } else {
            1.0
        };
        let css_width = viewport.width.max(0.0);
        let css_height = viewport.height.max(0.0);
        Self {
            css_width,
            css_height,
            backing_width: ((css_width * ratio).round() as u32).max(1),
            backing_height: ((css_height * ratio).round() as u32).max(1),
            pixel_ratio: ratio,
        }
    }

    /// Backing resolution as the `[width, height]` pair shaders expect.
    pub fn resolution(&self) -> [f32; 2] {
        [self.backing_width as f32, self.backing_height as f32]
    }
}
