//! WGSL front end shared by the backends.
//!
//! "Compiling" a stage parses and validates it with naga. "Linking" checks
//! that the fragment inputs are produced by the vertex stage and that both
//! stages agree on the uniform block layout, then reflects the uniform and
//! attribute tables.

use std::collections::BTreeMap;

use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{AddressSpace, Binding, Handle, Module, Type, TypeInner};

use super::types::{ShaderStage, UniformKind, UniformLocation};

/// Uniforms must live in a single block at this group and binding.
pub const UNIFORM_GROUP: u32 = 0;
pub const UNIFORM_BINDING: u32 = 0;

/// A parsed and validated shader stage.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    pub stage: ShaderStage,
    pub source: String,
    pub entry_point: String,
    module: Module,
}

/// Interface tables produced by a successful link.
#[derive(Debug, Clone, Default)]
pub struct ProgramLayout {
    pub uniforms: BTreeMap<String, UniformLocation>,
    pub attributes: BTreeMap<String, u32>,
    /// Size in bytes of the uniform block, rounded up to 16.
    pub uniform_size: u32,
    pub vertex_entry: String,
    pub fragment_entry: String,
}

/// Parse and validate one stage. The error is a human-readable log.
pub fn compile_stage(stage: ShaderStage, source: &str) -> Result<CompiledStage, String> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| e.emit_to_string(source))?;

    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::default());
    validator
        .validate(&module)
        .map_err(|e| e.emit_to_string(source))?;

    let entry_point = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.naga_stage())
        .map(|ep| ep.name.clone())
        .ok_or_else(|| format!("error: no @{stage} entry point in module"))?;

    Ok(CompiledStage {
        stage,
        source: source.to_string(),
        entry_point,
        module,
    })
}

/// Link a vertex and fragment stage into a program layout.
pub fn link_stages(vertex: &CompiledStage, fragment: &CompiledStage) -> Result<ProgramLayout, String> {
    if vertex.stage != ShaderStage::Vertex {
        return Err("error: no vertex shader attached".to_string());
    }
    if fragment.stage != ShaderStage::Fragment {
        return Err("error: no fragment shader attached".to_string());
    }

    let outputs = stage_outputs(vertex);
    let inputs = stage_inputs(fragment);
    for (location, inner) in &inputs {
        match outputs.get(location) {
            None => {
                return Err(format!(
                    "error: fragment input @location({location}) is not written by the vertex stage"
                ))
            }
            Some(out) if out != inner => {
                return Err(format!(
                    "error: @location({location}) has different types in the vertex and fragment stages"
                ))
            }
            Some(_) => {}
        }
    }

    let mut layout = ProgramLayout {
        vertex_entry: vertex.entry_point.clone(),
        fragment_entry: fragment.entry_point.clone(),
        ..Default::default()
    };
    collect_uniforms(&vertex.module, &mut layout)?;
    collect_uniforms(&fragment.module, &mut layout)?;
    layout.uniform_size = layout.uniform_size.div_ceil(16) * 16;

    if let Some(ep) = entry(vertex) {
        for arg in &ep.function.arguments {
            collect_attributes(&vertex.module, arg.name.as_deref(), arg.ty, arg.binding.as_ref(), &mut layout.attributes);
        }
    }

    Ok(layout)
}

fn entry(stage: &CompiledStage) -> Option<&naga::EntryPoint> {
    stage
        .module
        .entry_points
        .iter()
        .find(|ep| ep.name == stage.entry_point)
}

fn stage_outputs(stage: &CompiledStage) -> BTreeMap<u32, TypeInner> {
    let mut out = BTreeMap::new();
    if let Some(result) = entry(stage).and_then(|ep| ep.function.result.as_ref()) {
        interface_locations(&stage.module, result.ty, result.binding.as_ref(), &mut out);
    }
    out
}

fn stage_inputs(stage: &CompiledStage) -> BTreeMap<u32, TypeInner> {
    let mut out = BTreeMap::new();
    if let Some(ep) = entry(stage) {
        for arg in &ep.function.arguments {
            interface_locations(&stage.module, arg.ty, arg.binding.as_ref(), &mut out);
        }
    }
    out
}

fn interface_locations(
    module: &Module,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    out: &mut BTreeMap<u32, TypeInner>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => {
            out.insert(*location, module.types[ty].inner.clone());
        }
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    interface_locations(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

fn collect_attributes(
    module: &Module,
    name: Option<&str>,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    out: &mut BTreeMap<String, u32>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => {
            if let Some(name) = name {
                out.insert(name.to_string(), *location);
            }
        }
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_attributes(module, member.name.as_deref(), member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

fn collect_uniforms(module: &Module, layout: &mut ProgramLayout) -> Result<(), String> {
    for (_, global) in module.global_variables.iter() {
        if global.space != AddressSpace::Uniform {
            continue;
        }
        let name = global.name.as_deref().unwrap_or("<unnamed>");
        let Some(binding) = &global.binding else {
            continue;
        };
        if binding.group != UNIFORM_GROUP || binding.binding != UNIFORM_BINDING {
            return Err(format!(
                "error: uniform `{name}` must be bound at @group({UNIFORM_GROUP}) @binding({UNIFORM_BINDING})"
            ));
        }

        match &module.types[global.ty].inner {
            TypeInner::Struct { members, span } => {
                layout.uniform_size = layout.uniform_size.max(*span);
                for member in members {
                    let (Some(member_name), Some(kind)) = (
                        member.name.as_deref(),
                        UniformKind::from_type(&module.types[member.ty].inner),
                    ) else {
                        continue;
                    };
                    insert_uniform(layout, member_name, member.offset, kind)?;
                }
            }
            inner => {
                if let Some(kind) = UniformKind::from_type(inner) {
                    layout.uniform_size = layout.uniform_size.max(kind.components() as u32 * 4);
                    insert_uniform(layout, name, 0, kind)?;
                }
            }
        }
    }
    Ok(())
}

fn insert_uniform(layout: &mut ProgramLayout, name: &str, offset: u32, kind: UniformKind) -> Result<(), String> {
    let location = UniformLocation {
        name: name.to_string(),
        offset,
        kind,
    };
    match layout.uniforms.get(name) {
        Some(existing) if *existing != location => Err(format!(
            "error: uniform `{name}` is declared with different layouts in the vertex and fragment stages"
        )),
        Some(_) => Ok(()),
        None => {
            layout.uniforms.insert(name.to_string(), location);
            Ok(())
        }
    }
}
