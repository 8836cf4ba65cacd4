//! Headless backends: a container, GPU context and raster canvas that run
//! without a window or a graphics device.
//!
//! All handles cloned from one [`HeadlessHost`] share the same statistics
//! and frame buffer, so a caller can keep a handle while a
//! [`crate::host::BackgroundHost`] owns another.

mod canvas;
mod gpu;

pub use canvas::*;
pub use gpu::*;

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use folio_common::{FolioError, Rect};
use image::RgbaImage;

use crate::surface::{GpuContext, RasterContext, SurfaceHost, Viewport};

/// Counters recorded by the headless contexts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessStats {
    pub gpu_contexts: u32,
    pub raster_contexts: u32,
    pub released_contexts: u32,
    pub gpu_draw_calls: u64,
    pub raster_draw_calls: u64,
    pub frames_presented: u64,
    pub live_shaders: usize,
    pub live_programs: usize,
    /// Uniform values read back at the most recent GPU draw.
    pub last_uniforms: BTreeMap<String, Vec<f32>>,
}

impl HeadlessStats {
    pub fn draw_calls(&self) -> u64 {
        self.gpu_draw_calls + self.raster_draw_calls
    }

    pub fn live_contexts(&self) -> u32 {
        self.gpu_contexts + self.raster_contexts - self.released_contexts
    }
}

/// An in-memory container.
#[derive(Clone)]
pub struct HeadlessHost {
    viewport: Rc<Cell<Viewport>>,
    origin: (f64, f64),
    gpu_available: bool,
    raster_available: bool,
    stats: Rc<RefCell<HeadlessStats>>,
    frame: Rc<RefCell<RgbaImage>>,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Rc::new(Cell::new(viewport)),
            origin: (0.0, 0.0),
            gpu_available: true,
            raster_available: true,
            stats: Rc::new(RefCell::new(HeadlessStats::default())),
            frame: Rc::new(RefCell::new(RgbaImage::new(1, 1))),
        }
    }

    /// Refuse GPU contexts, as a browser without WebGL would.
    pub fn without_gpu(mut self) -> Self {
        self.gpu_available = false;
        self
    }

    pub fn without_raster(mut self) -> Self {
        self.raster_available = false;
        self
    }

    /// Place the container's top-left corner at `(x, y)` in client coordinates.
    pub fn at_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn stats(&self) -> HeadlessStats {
        self.stats.borrow().clone()
    }

    /// Copy of the raster frame buffer.
    pub fn snapshot(&self) -> RgbaImage {
        self.frame.borrow().clone()
    }

    pub(crate) fn stats_handle(&self) -> Rc<RefCell<HeadlessStats>> {
        self.stats.clone()
    }

    pub(crate) fn frame_handle(&self) -> Rc<RefCell<RgbaImage>> {
        self.frame.clone()
    }

    pub fn save_png(&self, path: &Path) -> Result<(), FolioError> {
        self.frame
            .borrow()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| FolioError::Export(e.to_string()))
    }
}

impl SurfaceHost for HeadlessHost {
    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn bounds(&self) -> Rect {
        let viewport = self.viewport.get();
        Rect::new(
            self.origin.0,
            self.origin.1,
            viewport.width as f64,
            viewport.height as f64,
        )
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport.set(viewport);
    }

    fn create_gpu_context(&mut self) -> Option<Box<dyn GpuContext>> {
        if !self.gpu_available {
            return None;
        }
        Some(Box::new(HeadlessGpu::new(self.stats.clone())))
    }

    fn create_raster_context(&mut self) -> Option<Box<dyn RasterContext>> {
        if !self.raster_available {
            return None;
        }
        Some(Box::new(PixelCanvas::new(self.stats.clone(), self.frame.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::Color;

    #[test]
    fn clones_share_stats_and_viewport() {
        let host = HeadlessHost::new(Viewport::new(100.0, 80.0, 1.0));
        let mut owned = host.clone();
        let _ctx = owned.create_raster_context().unwrap();
        owned.resize(Viewport::new(50.0, 40.0, 2.0));
        assert_eq!(host.stats().raster_contexts, 1);
        assert_eq!(host.viewport().width, 50.0);
    }

    #[test]
    fn bounds_follow_origin_and_viewport() {
        let host = HeadlessHost::new(Viewport::new(200.0, 100.0, 2.0)).at_origin(10.0, 20.0);
        let bounds = host.bounds();
        assert_eq!(bounds, Rect::new(10.0, 20.0, 200.0, 100.0));
    }

    #[test]
    fn unavailable_contexts() {
        let mut host = HeadlessHost::new(Viewport::default()).without_gpu().without_raster();
        assert!(host.create_gpu_context().is_none());
        assert!(host.create_raster_context().is_none());
        assert_eq!(host.stats().live_contexts(), 0);
    }

    #[test]
    fn canvas_draws_into_shared_frame() {
        let mut host = HeadlessHost::new(Viewport::new(20.0, 10.0, 2.0));
        let mut canvas = host.create_raster_context().unwrap();
        canvas.set_backing_size(40, 20, 2.0);
        canvas.clear(Color::BLACK);
        canvas.fill_rect(0.0, 0.0, 5.0, 5.0, Color::WHITE);
        canvas.present();

        let frame = host.snapshot();
        assert_eq!(frame.dimensions(), (40, 20));
        // 5 CSS px at ratio 2 covers backing pixels 0..10.
        assert_eq!(frame.get_pixel(9, 9).0, [255, 255, 255, 255]);
        assert_eq!(frame.get_pixel(10, 10).0, [0, 0, 0, 255]);

        let stats = host.stats();
        assert_eq!(stats.raster_draw_calls, 2);
        assert_eq!(stats.frames_presented, 1);
    }

    #[test]
    fn canvas_blends_translucent_fill() {
        let mut host = HeadlessHost::new(Viewport::new(4.0, 4.0, 1.0));
        let mut canvas = host.create_raster_context().unwrap();
        canvas.set_backing_size(4, 4, 1.0);
        canvas.clear(Color::BLACK);
        canvas.fill_rect(0.0, 0.0, 4.0, 4.0, Color::from_rgba(255, 255, 255, 128));
        let px = host.snapshot().get_pixel(1, 1).0;
        assert!((126..=130).contains(&px[0]));
        assert_eq!(px[3], 255);
    }

    #[test]
    fn circle_and_glow_stay_inside_radius() {
        let mut host = HeadlessHost::new(Viewport::new(40.0, 40.0, 1.0));
        let mut canvas = host.create_raster_context().unwrap();
        canvas.set_backing_size(40, 40, 1.0);
        canvas.clear(Color::BLACK);
        canvas.fill_circle(20.0, 20.0, 5.0, Color::WHITE);
        canvas.glow(20.0, 20.0, 12.0, Color::from_rgba(255, 0, 0, 255));
        let frame = host.snapshot();
        assert!(frame.get_pixel(20, 20).0[0] > 200);
        assert_eq!(frame.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(frame.get_pixel(39, 20).0, [0, 0, 0, 255]);
    }

    #[test]
    fn glyph_draws_something() {
        let mut host = HeadlessHost::new(Viewport::new(20.0, 20.0, 1.0));
        let mut canvas = host.create_raster_context().unwrap();
        canvas.set_backing_size(20, 20, 1.0);
        canvas.clear(Color::BLACK);
        canvas.fill_glyph('7', 0.0, 0.0, 15.0, Color::WHITE);
        let lit = host.snapshot().pixels().filter(|p| p.0[0] > 0).count();
        assert!(lit > 0);
    }

    #[test]
    fn released_canvas_ignores_draws() {
        let mut host = HeadlessHost::new(Viewport::new(4.0, 4.0, 1.0));
        let mut canvas = host.create_raster_context().unwrap();
        canvas.release();
        canvas.clear(Color::WHITE);
        canvas.release();
        let stats = host.stats();
        assert_eq!(stats.raster_draw_calls, 0);
        assert_eq!(stats.released_contexts, 1);
    }

    #[test]
    fn save_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut host = HeadlessHost::new(Viewport::new(8.0, 8.0, 1.0));
        let mut canvas = host.create_raster_context().unwrap();
        canvas.set_backing_size(8, 8, 1.0);
        canvas.clear(Color::from_rgba(10, 20, 30, 255));
        host.save_png(&path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(3, 3).0, [10, 20, 30, 255]);
    }
}
