//! Software raster context over an RGBA image buffer.

use std::cell::RefCell;
use std::rc::Rc;

use folio_common::Color;
use image::{Rgba, RgbaImage};

use super::HeadlessStats;
use crate::surface::{ContextKind, RasterContext, SurfaceContext};

/// Always-on stroke down the middle column of every glyph (3x5 grid).
const GLYPH_SPINE: u32 = 0b010_010_010_010_010;

/// A [`RasterContext`] that draws with source-over blending into a shared
/// [`RgbaImage`].
pub struct PixelCanvas {
    stats: Rc<RefCell<HeadlessStats>>,
    frame: Rc<RefCell<RgbaImage>>,
    scale: f32,
    released: bool,
}

impl PixelCanvas {
    pub(crate) fn new(stats: Rc<RefCell<HeadlessStats>>, frame: Rc<RefCell<RgbaImage>>) -> Self {
        stats.borrow_mut().raster_contexts += 1;
        Self {
            stats,
            frame,
            scale: 1.0,
            released: false,
        }
    }

    fn record(&self) -> bool {
        if self.released {
            return false;
        }
        self.stats.borrow_mut().raster_draw_calls += 1;
        true
    }

    /// Visit every backing pixel whose center lies in the CSS-space box,
    /// blending `color` with the coverage returned by `coverage`.
    fn shade<F>(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color, coverage: F)
    where
        F: Fn(f32, f32) -> f32,
    {
        let mut frame = self.frame.borrow_mut();
        let (width, height) = frame.dimensions();
        let s = self.scale;
        let px0 = ((x0 * s).floor().max(0.0) as u32).min(width);
        let py0 = ((y0 * s).floor().max(0.0) as u32).min(height);
        let px1 = ((x1 * s).ceil().max(0.0) as u32).min(width);
        let py1 = ((y1 * s).ceil().max(0.0) as u32).min(height);

        for py in py0..py1 {
            for px in px0..px1 {
                // Pixel center back in CSS units.
                let cx = (px as f32 + 0.5) / s;
                let cy = (py as f32 + 0.5) / s;
                let cover = coverage(cx, cy);
                if cover > 0.0 {
                    blend(frame.get_pixel_mut(px, py), color, cover.min(1.0));
                }
            }
        }
    }
}

fn blend(dst: &mut Rgba<u8>, color: Color, coverage: f32) {
    let alpha = color.a as f32 / 255.0 * coverage;
    if alpha <= 0.0 {
        return;
    }
    let src = [color.r, color.g, color.b];
    for (channel, value) in dst.0.iter_mut().take(3).zip(src) {
        *channel = (value as f32 * alpha + *channel as f32 * (1.0 - alpha)).round() as u8;
    }
    let dst_alpha = dst.0[3] as f32 / 255.0;
    dst.0[3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
}

fn glyph_bits(glyph: char) -> u32 {
    let hashed = (glyph as u32).wrapping_mul(2_654_435_761) >> 13;
    (hashed & 0x7fff) | GLYPH_SPINE
}

impl SurfaceContext for PixelCanvas {
    fn kind(&self) -> ContextKind {
        ContextKind::Raster
    }

    fn set_backing_size(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        *self.frame.borrow_mut() = RgbaImage::new(width.max(1), height.max(1));
        self.scale = pixel_ratio;
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.stats.borrow_mut().released_contexts += 1;
    }
}

impl RasterContext for PixelCanvas {
    fn clear(&mut self, color: Color) {
        if !self.record() {
            return;
        }
        let pixel = Rgba([color.r, color.g, color.b, color.a]);
        for p in self.frame.borrow_mut().pixels_mut() {
            *p = pixel;
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        if !self.record() || width <= 0.0 || height <= 0.0 {
            return;
        }
        self.shade(x, y, x + width, y + height, color, |_, _| 1.0);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if !self.record() || radius <= 0.0 {
            return;
        }
        let scale = self.scale;
        self.shade(cx - radius, cy - radius, cx + radius, cy + radius, color, |x, y| {
            let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            ((radius - d) * scale + 0.5).clamp(0.0, 1.0)
        });
    }

    fn glow(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if !self.record() || radius <= 0.0 {
            return;
        }
        self.shade(cx - radius, cy - radius, cx + radius, cy + radius, color, |x, y| {
            let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            let falloff = (1.0 - d / radius).max(0.0);
            falloff * falloff
        });
    }

    fn stroke_ring(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Color) {
        if !self.record() || radius <= 0.0 || width <= 0.0 {
            return;
        }
        let outer = radius + width;
        let scale = self.scale;
        self.shade(cx - outer, cy - outer, cx + outer, cy + outer, color, |x, y| {
            let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            ((width * 0.5 - (d - radius).abs()) * scale + 0.5).clamp(0.0, 1.0)
        });
    }

    fn fill_glyph(&mut self, glyph: char, x: f32, y: f32, size: f32, color: Color) {
        if !self.record() || size <= 0.0 {
            return;
        }
        let bits = glyph_bits(glyph);
        let cell_w = size * 0.6 / 3.0;
        let cell_h = size / 5.0;
        self.shade(x, y, x + cell_w * 3.0, y + size, color, |px, py| {
            let col = ((px - x) / cell_w) as u32;
            let row = ((py - y) / cell_h) as u32;
            if col < 3 && row < 5 && bits & (1 << (row * 3 + col)) != 0 {
                1.0
            } else {
                0.0
            }
        });
    }

    fn present(&mut self) {
        if self.released {
            return;
        }
        self.stats.borrow_mut().frames_presented += 1;
    }
}

impl Drop for PixelCanvas {
    fn drop(&mut self) {
        self.release();
    }
}
