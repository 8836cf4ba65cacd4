//! CPU-side GPU context: naga compile/link, staged uniform bytes, recorded draws.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::HeadlessStats;
use crate::shader::reflect::{compile_stage, link_stages, CompiledStage, ProgramLayout};
use crate::shader::{ShaderStage, UniformLocation, UniformValue};
use crate::surface::{ContextError, ContextKind, GpuContext, ProgramId, ShaderId, SurfaceContext};

struct ShaderObject {
    stage: ShaderStage,
    compiled: Option<CompiledStage>,
}

struct ProgramObject {
    attached: Vec<u32>,
    layout: Option<ProgramLayout>,
    uniform_data: Vec<u8>,
}

/// A [`GpuContext`] that validates everything but rasterizes nothing.
pub struct HeadlessGpu {
    stats: Rc<RefCell<HeadlessStats>>,
    next_id: u32,
    shaders: HashMap<u32, ShaderObject>,
    programs: HashMap<u32, ProgramObject>,
    size: (u32, u32),
    released: bool,
}

impl HeadlessGpu {
    pub(crate) fn new(stats: Rc<RefCell<HeadlessStats>>) -> Self {
        stats.borrow_mut().gpu_contexts += 1;
        Self {
            stats,
            next_id: 1,
            shaders: HashMap::new(),
            programs: HashMap::new(),
            size: (1, 1),
            released: false,
        }
    }

    pub fn backing_size(&self) -> (u32, u32) {
        self.size
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn stages(&self, program: ProgramId) -> Result<(&CompiledStage, &CompiledStage), String> {
        let object = self
            .programs
            .get(&program.0)
            .ok_or_else(|| "error: invalid program handle".to_string())?;

        let mut vertex = None;
        let mut fragment = None;
        for id in &object.attached {
            let shader = self
                .shaders
                .get(id)
                .ok_or_else(|| "error: attached shader was deleted".to_string())?;
            let compiled = shader
                .compiled
                .as_ref()
                .ok_or_else(|| format!("error: {} shader is not compiled", shader.stage))?;
            match shader.stage {
                ShaderStage::Vertex => vertex = Some(compiled),
                ShaderStage::Fragment => fragment = Some(compiled),
            }
        }
        let vertex = vertex.ok_or_else(|| "error: no vertex shader attached".to_string())?;
        let fragment = fragment.ok_or_else(|| "error: no fragment shader attached".to_string())?;
        Ok((vertex, fragment))
    }

    /// Compiled vertex and fragment stages attached to `program`.
    pub(crate) fn attached_stages(&self, program: ProgramId) -> Option<(&CompiledStage, &CompiledStage)> {
        self.stages(program).ok()
    }

    /// Layout and staged uniform bytes of a linked program.
    pub(crate) fn staged_uniforms(&self, program: ProgramId) -> Option<(&ProgramLayout, &[u8])> {
        let object = self.programs.get(&program.0)?;
        Some((object.layout.as_ref()?, object.uniform_data.as_slice()))
    }

    fn linked(&self, program: ProgramId) -> Result<&ProgramObject, ContextError> {
        if self.released {
            return Err(ContextError::Lost);
        }
        let object = self
            .programs
            .get(&program.0)
            .ok_or(ContextError::InvalidHandle("program"))?;
        if object.layout.is_none() {
            return Err(ContextError::NotLinked);
        }
        Ok(object)
    }
}

impl SurfaceContext for HeadlessGpu {
    fn kind(&self) -> ContextKind {
        ContextKind::Gpu
    }

    fn set_backing_size(&mut self, width: u32, height: u32, _pixel_ratio: f32) {
        self.size = (width, height);
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        let mut stats = self.stats.borrow_mut();
        stats.live_shaders -= self.shaders.len();
        stats.live_programs -= self.programs.len();
        stats.released_contexts += 1;
        self.shaders.clear();
        self.programs.clear();
        self.released = true;
    }
}

impl GpuContext for HeadlessGpu {
    fn create_shader(&mut self, stage: ShaderStage) -> Option<ShaderId> {
        if self.released {
            return None;
        }
        let id = self.allocate();
        self.shaders.insert(id, ShaderObject { stage, compiled: None });
        self.stats.borrow_mut().live_shaders += 1;
        Some(ShaderId(id))
    }

    fn compile_shader(&mut self, shader: ShaderId, source: &str) -> Result<(), String> {
        let object = self
            .shaders
            .get_mut(&shader.0)
            .ok_or_else(|| "error: invalid shader handle".to_string())?;
        let compiled = compile_stage(object.stage, source)?;
        object.compiled = Some(compiled);
        Ok(())
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        if self.shaders.remove(&shader.0).is_some() {
            self.stats.borrow_mut().live_shaders -= 1;
        }
    }

    fn create_program(&mut self) -> Option<ProgramId> {
        if self.released {
            return None;
        }
        let id = self.allocate();
        self.programs.insert(
            id,
            ProgramObject {
                attached: Vec::new(),
                layout: None,
                uniform_data: Vec::new(),
            },
        );
        self.stats.borrow_mut().live_programs += 1;
        Some(ProgramId(id))
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        if let Some(object) = self.programs.get_mut(&program.0) {
            if !object.attached.contains(&shader.0) {
                object.attached.push(shader.0);
            }
        }
    }

    fn link_program(&mut self, program: ProgramId) -> Result<(), String> {
        let (vertex, fragment) = self.stages(program)?;
        let layout = link_stages(vertex, fragment)?;

        if let Some(object) = self.programs.get_mut(&program.0) {
            object.uniform_data = vec![0; layout.uniform_size as usize];
            object.layout = Some(layout);
        }
        Ok(())
    }

    fn delete_program(&mut self, program: ProgramId) {
        if self.programs.remove(&program.0).is_some() {
            self.stats.borrow_mut().live_programs -= 1;
        }
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.programs
            .get(&program.0)?
            .layout
            .as_ref()?
            .uniforms
            .get(name)
            .cloned()
    }

    fn attribute_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        self.programs
            .get(&program.0)?
            .layout
            .as_ref()?
            .attributes
            .get(name)
            .copied()
    }

    fn set_uniform(
        &mut self,
        program: ProgramId,
        location: &UniformLocation,
        value: UniformValue,
    ) -> Result<(), ContextError> {
        self.linked(program)?;
        if value.kind() != location.kind {
            return Err(ContextError::TypeMismatch {
                name: location.name.clone(),
                expected: location.kind.name(),
            });
        }
        let object = self
            .programs
            .get_mut(&program.0)
            .ok_or(ContextError::InvalidHandle("program"))?;
        let bytes: &[u8] = bytemuck::cast_slice(value.components());
        let start = location.offset as usize;
        let slot = object
            .uniform_data
            .get_mut(start..start + bytes.len())
            .ok_or_else(|| ContextError::Backend(format!("uniform `{}` out of range", location.name)))?;
        slot.copy_from_slice(bytes);
        Ok(())
    }

    fn draw(&mut self, program: ProgramId) -> Result<(), ContextError> {
        let object = self.linked(program)?;
        let Some(layout) = object.layout.as_ref() else {
            return Err(ContextError::NotLinked);
        };
        let uniforms = layout
            .uniforms
            .iter()
            .map(|(name, location)| (name.clone(), read_floats(&object.uniform_data, location)))
            .collect();

        let mut stats = self.stats.borrow_mut();
        stats.gpu_draw_calls += 1;
        stats.last_uniforms = uniforms;
        Ok(())
    }
}

impl Drop for HeadlessGpu {
    fn drop(&mut self) {
        self.release();
    }
}

fn read_floats(data: &[u8], location: &UniformLocation) -> Vec<f32> {
    let start = location.offset as usize;
    let end = start + location.kind.components() * 4;
    data.get(start..end)
        .map(|bytes| {
            bytes
                .chunks_exact(4)
                .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                .collect()
        })
        .unwrap_or_default()
}
