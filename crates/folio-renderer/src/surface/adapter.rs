//! Exclusive ownership of one drawing context bound to a viewport.

use super::context::{GpuContext, RasterContext, SurfaceContext, SurfaceHost};
use super::types::{ContextKind, SurfaceError, SurfaceSize, Viewport};

/// A drawing context owned by exactly one animation.
///
/// Created on mount, resized on viewport changes, released on unmount.
/// Releasing twice is harmless, and dropping an unreleased surface
/// releases it.
pub struct RenderSurface<C: ?Sized + SurfaceContext> {
    context: Box<C>,
    size: SurfaceSize,
    released: bool,
}

impl RenderSurface<dyn GpuContext> {
    /// Acquire a GPU context from the container.
    pub fn acquire_gpu(host: &mut dyn SurfaceHost) -> Result<Self, SurfaceError> {
        let context = host.create_gpu_context().ok_or(SurfaceError::Unavailable {
            kind: ContextKind::Gpu,
        })?;
        Ok(Self::bind(context, host.viewport()))
    }
}

impl RenderSurface<dyn RasterContext> {
    /// Acquire a 2D raster context from the container.
    pub fn acquire_raster(host: &mut dyn SurfaceHost) -> Result<Self, SurfaceError> {
        let context = host
            .create_raster_context()
            .ok_or(SurfaceError::Unavailable {
                kind: ContextKind::Raster,
            })?;
        Ok(Self::bind(context, host.viewport()))
    }
}

impl<C: ?Sized + SurfaceContext> RenderSurface<C> {
    fn bind(mut context: Box<C>, viewport: Viewport) -> Self {
        let size = SurfaceSize::from_viewport(viewport);
        context.set_backing_size(size.backing_width, size.backing_height, size.pixel_ratio);
        tracing::debug!(
            kind = %context.kind(),
            width = size.backing_width,
            height = size.backing_height,
            "surface acquired"
        );
        Self {
            context,
            size,
            released: false,
        }
    }

    /// Apply a new viewport: backing buffer and displayed size update together.
    pub fn resize(&mut self, viewport: Viewport) -> Result<SurfaceSize, SurfaceError> {
        if self.released {
            return Err(SurfaceError::Released);
        }
        let size = SurfaceSize::from_viewport(viewport);
        if size != self.size {
            self.context
                .set_backing_size(size.backing_width, size.backing_height, size.pixel_ratio);
            self.size = size;
            tracing::debug!(
                width = size.backing_width,
                height = size.backing_height,
                ratio = size.pixel_ratio,
                "surface resized"
            );
        }
        Ok(size)
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn kind(&self) -> ContextKind {
        self.context.kind()
    }

    pub fn context_mut(&mut self) -> Result<&mut C, SurfaceError> {
        if self.released {
            return Err(SurfaceError::Released);
        }
        Ok(&mut *self.context)
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Free the context. Idempotent.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.context.release();
        self.released = true;
        tracing::debug!(kind = %self.context.kind(), "surface released");
    }
}

impl<C: ?Sized + SurfaceContext> Drop for RenderSurface<C> {
    fn drop(&mut self) {
        self.release();
    }
}
