//! Shader program construction and uniform upload.

use std::collections::HashMap;

use folio_common::Color;

use super::types::{ShaderError, ShaderStage, UniformLocation, UniformValue};
use crate::surface::{ContextError, GpuContext, ProgramId, ShaderId};

/// A fully linked program with every declared location resolved.
///
/// Construction either yields a complete program or fails; partially built
/// objects are deleted before the error is returned.
#[derive(Debug)]
pub struct ShaderProgram {
    program: ProgramId,
    shaders: [ShaderId; 2],
    uniforms: HashMap<String, UniformLocation>,
    attributes: HashMap<String, u32>,
    released: bool,
}

impl ShaderProgram {
    /// Compile `vertex` and `fragment`, link them, and resolve the named
    /// uniforms and attributes.
    pub fn compile(
        ctx: &mut dyn GpuContext,
        vertex: &str,
        fragment: &str,
        uniforms: &[&str],
        attributes: &[&str],
    ) -> Result<Self, ShaderError> {
        let vs = create_shader(ctx, ShaderStage::Vertex)?;
        let fs = match create_shader(ctx, ShaderStage::Fragment) {
            Ok(fs) => fs,
            Err(e) => {
                ctx.delete_shader(vs);
                return Err(e);
            }
        };

        for (shader, stage, source) in [
            (vs, ShaderStage::Vertex, vertex),
            (fs, ShaderStage::Fragment, fragment),
        ] {
            if let Err(log) = ctx.compile_shader(shader, source) {
                ctx.delete_shader(vs);
                ctx.delete_shader(fs);
                return Err(ShaderError::Compile {
                    stage,
                    log: non_empty(log),
                });
            }
        }

        let Some(program) = ctx.create_program() else {
            ctx.delete_shader(vs);
            ctx.delete_shader(fs);
            return Err(ShaderError::Link {
                log: "could not create program object".to_string(),
            });
        };
        ctx.attach_shader(program, vs);
        ctx.attach_shader(program, fs);

        let mut built = Self {
            program,
            shaders: [vs, fs],
            uniforms: HashMap::new(),
            attributes: HashMap::new(),
            released: false,
        };

        if let Err(log) = ctx.link_program(program) {
            built.release(ctx);
            return Err(ShaderError::Link {
                log: non_empty(log),
            });
        }

        for &name in uniforms {
            match ctx.uniform_location(program, name) {
                Some(location) => {
                    built.uniforms.insert(name.to_string(), location);
                }
                None => {
                    built.release(ctx);
                    return Err(ShaderError::UniformNotFound {
                        name: name.to_string(),
                    });
                }
            }
        }
        for &name in attributes {
            match ctx.attribute_location(program, name) {
                Some(location) => {
                    built.attributes.insert(name.to_string(), location);
                }
                None => {
                    built.release(ctx);
                    return Err(ShaderError::UniformNotFound {
                        name: name.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            uniforms = built.uniforms.len(),
            attributes = built.attributes.len(),
            "shader program linked"
        );
        Ok(built)
    }

    pub fn id(&self) -> ProgramId {
        self.program
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformLocation> {
        self.uniforms.get(name)
    }

    pub fn attribute(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }

    /// Write one uniform. Only names resolved at construction can be set.
    pub fn set(&self, ctx: &mut dyn GpuContext, name: &str, value: UniformValue) -> Result<(), ShaderError> {
        let location = self.uniforms.get(name).ok_or_else(|| ShaderError::UniformNotFound {
            name: name.to_string(),
        })?;
        ctx.set_uniform(self.program, location, value)?;
        Ok(())
    }

    pub fn draw(&self, ctx: &mut dyn GpuContext) -> Result<(), ContextError> {
        if self.released {
            return Err(ContextError::InvalidHandle("program"));
        }
        ctx.draw(self.program)
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Delete the program and its shader objects. Idempotent.
    pub fn release(&mut self, ctx: &mut dyn GpuContext) {
        if self.released {
            return;
        }
        ctx.delete_program(self.program);
        for shader in self.shaders {
            ctx.delete_shader(shader);
        }
        self.released = true;
    }
}

fn create_shader(ctx: &mut dyn GpuContext, stage: ShaderStage) -> Result<ShaderId, ShaderError> {
    ctx.create_shader(stage).ok_or_else(|| ShaderError::Compile {
        stage,
        log: format!("could not create {stage} shader object"),
    })
}

fn non_empty(log: String) -> String {
    if log.trim().is_empty() {
        "no diagnostic log available".to_string()
    } else {
        log
    }
}

/// Borrowed program plus context, for writing a frame's uniforms.
pub struct UniformWriter<'a> {
    program: &'a ShaderProgram,
    ctx: &'a mut dyn GpuContext,
}

impl<'a> UniformWriter<'a> {
    pub fn new(program: &'a ShaderProgram, ctx: &'a mut dyn GpuContext) -> Self {
        Self { program, ctx }
    }

    pub fn f32(&mut self, name: &str, value: f32) -> Result<(), ShaderError> {
        self.program.set(self.ctx, name, UniformValue::F32(value))
    }

    pub fn vec2(&mut self, name: &str, value: [f32; 2]) -> Result<(), ShaderError> {
        self.program.set(self.ctx, name, UniformValue::Vec2(value))
    }

    pub fn vec4(&mut self, name: &str, value: [f32; 4]) -> Result<(), ShaderError> {
        self.program.set(self.ctx, name, UniformValue::Vec4(value))
    }

    pub fn color(&mut self, name: &str, color: Color) -> Result<(), ShaderError> {
        self.vec4(name, color.to_unit())
    }
}
