//! Context traits implemented by every rendering backend.

use folio_common::{Color, Rect};

use super::types::{ContextKind, Viewport};
use crate::shader::{ShaderStage, UniformLocation, UniformValue};

/// Errors reported by a context for a single operation.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("context lost")]
    Lost,

    #[error("invalid {0} handle")]
    InvalidHandle(&'static str),

    #[error("uniform `{name}` expects {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("program is not linked")]
    NotLinked,

    #[error("backend error: {0}")]
    Backend(String),
}

/// Opaque shader object handle issued by a [`GpuContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// Opaque program object handle issued by a [`GpuContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// The element a background mounts into.
///
/// Hands out drawing contexts and reports the current viewport and the
/// container's bounding box in client coordinates.
pub trait SurfaceHost {
    fn viewport(&self) -> Viewport;

    fn bounds(&self) -> Rect;

    /// Apply a new viewport signal to the container.
    fn resize(&mut self, viewport: Viewport);

    /// Create a GPU context, or `None` if the platform cannot provide one.
    fn create_gpu_context(&mut self) -> Option<Box<dyn GpuContext>>;

    /// Create a 2D raster context, or `None` if the platform cannot provide one.
    fn create_raster_context(&mut self) -> Option<Box<dyn RasterContext>>;
}

/// Behaviour shared by every context kind.
pub trait SurfaceContext {
    fn kind(&self) -> ContextKind;

    /// Resize the backing store. `pixel_ratio` maps CSS units to backing pixels.
    fn set_backing_size(&mut self, width: u32, height: u32, pixel_ratio: f32);

    /// Free every backend resource. Further calls must be harmless.
    fn release(&mut self);
}

/// A programmable-pipeline context modelled on shader-object APIs.
///
/// `compile_shader` and `link_program` return the backend diagnostic log on
/// failure.
pub trait GpuContext: SurfaceContext {
    fn create_shader(&mut self, stage: ShaderStage) -> Option<ShaderId>;

    fn compile_shader(&mut self, shader: ShaderId, source: &str) -> Result<(), String>;

    fn delete_shader(&mut self, shader: ShaderId);

    fn create_program(&mut self) -> Option<ProgramId>;

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId);

    fn link_program(&mut self, program: ProgramId) -> Result<(), String>;

    fn delete_program(&mut self, program: ProgramId);

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    fn attribute_location(&self, program: ProgramId, name: &str) -> Option<u32>;

    fn set_uniform(
        &mut self,
        program: ProgramId,
        location: &UniformLocation,
        value: UniformValue,
    ) -> Result<(), ContextError>;

    /// Draw one full-screen triangle with `program`.
    fn draw(&mut self, program: ProgramId) -> Result<(), ContextError>;
}

/// An immediate-mode 2D context. Coordinates are CSS pixels; the context
/// applies the pixel ratio given to [`SurfaceContext::set_backing_size`].
pub trait RasterContext: SurfaceContext {
    /// Replace every pixel with `color`.
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);

    /// Radial glow fading from `color` at the center to transparent at `radius`.
    fn glow(&mut self, cx: f32, cy: f32, radius: f32, color: Color);

    fn stroke_ring(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Color);

    /// Draw a single glyph cell with its top-left corner at `(x, y)`.
    fn fill_glyph(&mut self, glyph: char, x: f32, y: f32, size: f32, color: Color);

    /// Mark the end of a frame.
    fn present(&mut self);
}
