use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use image::RgbaImage;

use super::device::WgpuDevice;
use super::pipeline::ProgramPipeline;
use super::target::RenderTarget;
use crate::headless::{HeadlessGpu, HeadlessStats};
use crate::shader::{ShaderStage, UniformLocation, UniformValue};
use crate::surface::{ContextError, ContextKind, GpuContext, ProgramId, ShaderId, SurfaceContext};

/// A [`GpuContext`] that renders with wgpu into an offscreen target.
///
/// Object bookkeeping, naga validation and uniform staging are shared with
/// [`HeadlessGpu`]; this type adds a real pipeline per linked program and
/// reads every drawn frame back into the host's frame buffer.
pub struct WgpuContext {
    gpu: Rc<WgpuDevice>,
    objects: HeadlessGpu,
    pipelines: HashMap<u32, ProgramPipeline>,
    target: Option<RenderTarget>,
    frame: Rc<RefCell<RgbaImage>>,
    size: (u32, u32),
}

impl WgpuContext {
    pub(crate) fn new(
        gpu: Rc<WgpuDevice>,
        stats: Rc<RefCell<HeadlessStats>>,
        frame: Rc<RefCell<RgbaImage>>,
    ) -> Self {
        Self {
            gpu,
            objects: HeadlessGpu::new(stats),
            pipelines: HashMap::new(),
            target: None,
            frame,
            size: (1, 1),
        }
    }

    fn ensure_target(&mut self) {
        if self.target.as_ref().is_some_and(|t| t.size() == self.size) {
            return;
        }
        tracing::debug!(width = self.size.0, height = self.size.1, "allocating render target");
        self.target = Some(RenderTarget::new(&self.gpu, self.size.0, self.size.1));
    }
}

impl SurfaceContext for WgpuContext {
    fn kind(&self) -> ContextKind {
        ContextKind::Gpu
    }

    fn set_backing_size(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.size = (width.max(1), height.max(1));
        self.objects.set_backing_size(width, height, pixel_ratio);
    }

    fn release(&mut self) {
        self.pipelines.clear();
        self.target = None;
        self.objects.release();
    }
}

impl GpuContext for WgpuContext {
    fn create_shader(&mut self, stage: ShaderStage) -> Option<ShaderId> {
        self.objects.create_shader(stage)
    }

    fn compile_shader(&mut self, shader: ShaderId, source: &str) -> Result<(), String> {
        self.objects.compile_shader(shader, source)
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.objects.delete_shader(shader);
    }

    fn create_program(&mut self) -> Option<ProgramId> {
        self.objects.create_program()
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        self.objects.attach_shader(program, shader);
    }

    fn link_program(&mut self, program: ProgramId) -> Result<(), String> {
        self.objects.link_program(program)?;
        let (vertex, fragment) = self
            .objects
            .attached_stages(program)
            .ok_or_else(|| "error: program lost its stages".to_string())?;
        let (layout, _) = self
            .objects
            .staged_uniforms(program)
            .ok_or_else(|| "error: program is not linked".to_string())?;
        let pipeline = ProgramPipeline::new(&self.gpu, vertex, fragment, layout).map_err(|e| e.to_string())?;
        self.pipelines.insert(program.0, pipeline);
        Ok(())
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.pipelines.remove(&program.0);
        self.objects.delete_program(program);
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.objects.uniform_location(program, name)
    }

    fn attribute_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        self.objects.attribute_location(program, name)
    }

    fn set_uniform(
        &mut self,
        program: ProgramId,
        location: &UniformLocation,
        value: UniformValue,
    ) -> Result<(), ContextError> {
        self.objects.set_uniform(program, location, value)
    }

    fn draw(&mut self, program: ProgramId) -> Result<(), ContextError> {
        self.objects.draw(program)?;
        self.ensure_target();
        let (Some(pipeline), Some(target)) = (self.pipelines.get(&program.0), self.target.as_ref()) else {
            return Err(ContextError::NotLinked);
        };
        let (_, uniform_data) = self.objects.staged_uniforms(program).ok_or(ContextError::NotLinked)?;

        pipeline.render(&self.gpu, target, uniform_data);
        let image = target.read(&self.gpu).map_err(|e| ContextError::Backend(e.to_string()))?;
        *self.frame.borrow_mut() = image;
        Ok(())
    }
}

impl Drop for WgpuContext {
    fn drop(&mut self) {
        self.release();
    }
}
