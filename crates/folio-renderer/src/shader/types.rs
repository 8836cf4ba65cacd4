use std::fmt;

use crate::surface::ContextError;

/// Pipeline stage a shader object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors from building or driving a shader program.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("program failed to link: {log}")]
    Link { log: String },

    #[error("uniform or attribute `{name}` not found")]
    UniformNotFound { name: String },

    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Shape of a settable uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformKind {
    F32,
    Vec2,
    Vec3,
    Vec4,
}

impl UniformKind {
    pub(crate) fn from_type(inner: &naga::TypeInner) -> Option<Self> {
        match inner {
            naga::TypeInner::Scalar(scalar) if *scalar == naga::Scalar::F32 => Some(UniformKind::F32),
            naga::TypeInner::Vector { size, scalar } if *scalar == naga::Scalar::F32 => {
                Some(match size {
                    naga::VectorSize::Bi => UniformKind::Vec2,
                    naga::VectorSize::Tri => UniformKind::Vec3,
                    naga::VectorSize::Quad => UniformKind::Vec4,
                })
            }
            _ => None,
        }
    }

    /// Component count.
    pub fn components(self) -> usize {
        match self {
            UniformKind::F32 => 1,
            UniformKind::Vec2 => 2,
            UniformKind::Vec3 => 3,
            UniformKind::Vec4 => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UniformKind::F32 => "f32",
            UniformKind::Vec2 => "vec2<f32>",
            UniformKind::Vec3 => "vec3<f32>",
            UniformKind::Vec4 => "vec4<f32>",
        }
    }
}

/// A resolved uniform: byte offset into the program's uniform block.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformLocation {
    pub name: String,
    pub offset: u32,
    pub kind: UniformKind,
}

/// A value written to a uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    F32(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::F32(_) => UniformKind::F32,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
        }
    }

    pub fn components(&self) -> &[f32] {
        match self {
            UniformValue::F32(v) => std::slice::from_ref(v),
            UniformValue::Vec2(v) => v,
            UniformValue::Vec3(v) => v,
            UniformValue::Vec4(v) => v,
        }
    }
}
