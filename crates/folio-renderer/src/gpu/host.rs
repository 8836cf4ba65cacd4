use std::path::Path;
use std::rc::Rc;

use folio_common::{FolioError, Rect};
use image::RgbaImage;

use super::context::WgpuContext;
use super::device::WgpuDevice;
use super::types::GpuError;
use crate::headless::{HeadlessHost, HeadlessStats};
use crate::surface::{GpuContext, RasterContext, SurfaceHost, Viewport};

/// A container whose GPU contexts render with wgpu. Raster contexts and
/// statistics come from an inner [`HeadlessHost`], so both kinds of theme
/// land in the same frame buffer.
#[derive(Clone)]
pub struct WgpuHost {
    inner: HeadlessHost,
    gpu: Rc<WgpuDevice>,
}

impl WgpuHost {
    pub fn new(viewport: Viewport) -> Result<Self, GpuError> {
        Ok(Self {
            inner: HeadlessHost::new(viewport),
            gpu: Rc::new(WgpuDevice::new()?),
        })
    }

    pub fn adapter_name(&self) -> &str {
        self.gpu.adapter_name()
    }

    pub fn stats(&self) -> HeadlessStats {
        self.inner.stats()
    }

    pub fn snapshot(&self) -> RgbaImage {
        self.inner.snapshot()
    }

    pub fn save_png(&self, path: &Path) -> Result<(), FolioError> {
        self.inner.save_png(path)
    }
}

impl SurfaceHost for WgpuHost {
    fn viewport(&self) -> Viewport {
        self.inner.viewport()
    }

    fn bounds(&self) -> Rect {
        self.inner.bounds()
    }

    fn resize(&mut self, viewport: Viewport) {
        self.inner.resize(viewport);
    }

    fn create_gpu_context(&mut self) -> Option<Box<dyn GpuContext>> {
        Some(Box::new(WgpuContext::new(
            self.gpu.clone(),
            self.inner.stats_handle(),
            self.inner.frame_handle(),
        )))
    }

    fn create_raster_context(&mut self) -> Option<Box<dyn RasterContext>> {
        self.inner.create_raster_context()
    }
}
