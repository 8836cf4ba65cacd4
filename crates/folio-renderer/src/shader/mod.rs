//! Shader program compiler.
//!
//! [`ShaderProgram::compile`] runs the fixed sequence: create both shader
//! objects, compile each (stopping at the first failure), create and link
//! the program, then resolve every declared uniform and attribute.

mod program;
pub mod reflect;
mod types;

pub use program::*;
pub use types::*;

/// Vertex stage shared by every full-screen shader background.
pub const FULLSCREEN_VERTEX: &str = include_str!("../shaders/fullscreen.wgsl");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;
    use crate::surface::{ContextError, SurfaceHost, Viewport};

    const TINT_FRAGMENT: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

struct Uniforms {
    resolution: vec2<f32>,
    time: f32,
    tint: vec4<f32>,
};

@group(0) @binding(0) var<uniform> u: Uniforms;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.uv, sin(u.time), 1.0) * u.tint;
}
"#;

    const ATTRIBUTE_VERTEX: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@location(0) corner: vec2<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.position = vec4<f32>(corner, 0.0, 1.0);
    out.uv = corner * 0.5 + vec2<f32>(0.5, 0.5);
    return out;
}
"#;

    const MISMATCHED_FRAGMENT: &str = r#"
@fragment
fn fs_main(@location(3) shade: f32) -> @location(0) vec4<f32> {
    return vec4<f32>(shade, shade, shade, 1.0);
}
"#;

    fn host() -> HeadlessHost {
        HeadlessHost::new(Viewport::new(64.0, 64.0, 1.0))
    }

    #[test]
    fn compiles_and_resolves_uniforms() {
        let mut host = host();
        let mut ctx = host.create_gpu_context().unwrap();
        let program = ShaderProgram::compile(
            ctx.as_mut(),
            FULLSCREEN_VERTEX,
            TINT_FRAGMENT,
            &["resolution", "time", "tint"],
            &[],
        )
        .unwrap();

        let time = program.uniform("time").unwrap();
        assert_eq!(time.offset, 8);
        assert_eq!(time.kind, UniformKind::F32);
        let tint = program.uniform("tint").unwrap();
        assert_eq!(tint.offset, 16);
        assert_eq!(tint.kind, UniformKind::Vec4);
        assert_eq!(host.stats().live_programs, 1);
        assert_eq!(host.stats().live_shaders, 2);
    }

    #[test]
    fn unmatched_brace_fails_fragment_compile() {
        let mut host = host();
        let mut ctx = host.create_gpu_context().unwrap();
        let broken = format!("{TINT_FRAGMENT}\nfn dangling() {{\n");
        let err = ShaderProgram::compile(ctx.as_mut(), FULLSCREEN_VERTEX, &broken, &[], &[]).unwrap_err();
        match err {
            ShaderError::Compile { stage, log } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!log.trim().is_empty());
            }
            other => panic!("expected compile error, got {other:?}"),
        }
        assert_eq!(host.stats().live_shaders, 0);
        assert_eq!(host.stats().live_programs, 0);
    }

    #[test]
    fn vertex_failure_reported_before_fragment() {
        let mut host = host();
        let mut ctx = host.create_gpu_context().unwrap();
        let err = ShaderProgram::compile(ctx.as_mut(), "@vertex fn vs_main( {", "also broken", &[], &[])
            .unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Compile {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
    }

    #[test]
    fn missing_entry_point_is_a_compile_error() {
        let mut host = host();
        let mut ctx = host.create_gpu_context().unwrap();
        // A fragment-only module handed to the vertex stage.
        let err = ShaderProgram::compile(ctx.as_mut(), TINT_FRAGMENT, TINT_FRAGMENT, &[], &[]).unwrap_err();
        match err {
            ShaderError::Compile { stage, log } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(log.contains("entry point"));
            }
            other => panic!("expected compile error, got {other:?}"),
        }
    }

    #[test]
    fn unwritten_fragment_input_fails_link() {
        let mut host = host();
        let mut ctx = host.create_gpu_context().unwrap();
        let err = ShaderProgram::compile(ctx.as_mut(), FULLSCREEN_VERTEX, MISMATCHED_FRAGMENT, &[], &[])
            .unwrap_err();
        match err {
            ShaderError::Link { log } => assert!(log.contains("@location(3)")),
            other => panic!("expected link error, got {other:?}"),
        }
        assert_eq!(host.stats().live_programs, 0);
        assert_eq!(host.stats().live_shaders, 0);
    }

    #[test]
    fn unknown_uniform_fails_and_cleans_up() {
        let mut host = host();
        let mut ctx = host.create_gpu_context().unwrap();
        let err = ShaderProgram::compile(
            ctx.as_mut(),
            FULLSCREEN_VERTEX,
            TINT_FRAGMENT,
            &["time", "missing_uniform"],
            &[],
        )
        .unwrap_err();
        match err {
            ShaderError::UniformNotFound { name } => assert_eq!(name, "missing_uniform"),
            other => panic!("expected uniform error, got {other:?}"),
        }
        assert_eq!(host.stats().live_programs, 0);
        assert_eq!(host.stats().live_shaders, 0);
    }

    #[test]
    fn resolves_vertex_attributes() {
        let mut host = host();
        let mut ctx = host.create_gpu_context().unwrap();
        let program =
            ShaderProgram::compile(ctx.as_mut(), ATTRIBUTE_VERTEX, TINT_FRAGMENT, &[], &["corner"]).unwrap();
        assert_eq!(program.attribute("corner"), Some(0));

        let err = ShaderProgram::compile(ctx.as_mut(), ATTRIBUTE_VERTEX, TINT_FRAGMENT, &[], &["normal"])
            .unwrap_err();
        assert!(matches!(err, ShaderError::UniformNotFound { .. }));
    }

    #[test]
    fn set_rejects_wrong_kind() {
        let mut host = host();
        let mut ctx = host.create_gpu_context().unwrap();
        let program =
            ShaderProgram::compile(ctx.as_mut(), FULLSCREEN_VERTEX, TINT_FRAGMENT, &["time"], &[]).unwrap();
        program.set(ctx.as_mut(), "time", UniformValue::F32(1.5)).unwrap();
        let err = program
            .set(ctx.as_mut(), "time", UniformValue::Vec2([1.0, 2.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Context(ContextError::TypeMismatch { .. })
        ));
        // Not resolved at construction, so not settable.
        let err = program
            .set(ctx.as_mut(), "tint", UniformValue::Vec4([1.0; 4]))
            .unwrap_err();
        assert!(matches!(err, ShaderError::UniformNotFound { .. }));
    }

    #[test]
    fn draw_records_uniform_values() {
        let mut host = host();
        let mut ctx = host.create_gpu_context().unwrap();
        let program =
            ShaderProgram::compile(ctx.as_mut(), FULLSCREEN_VERTEX, TINT_FRAGMENT, &["time", "tint"], &[])
                .unwrap();
        let mut writer = UniformWriter::new(&program, ctx.as_mut());
        writer.f32("time", 2.0).unwrap();
        writer.vec4("tint", [0.5, 0.25, 1.0, 1.0]).unwrap();
        program.draw(ctx.as_mut()).unwrap();

        let stats = host.stats();
        assert_eq!(stats.gpu_draw_calls, 1);
        assert_eq!(stats.last_uniforms.get("time"), Some(&vec![2.0]));
        assert_eq!(stats.last_uniforms.get("tint"), Some(&vec![0.5, 0.25, 1.0, 1.0]));
    }

    #[test]
    fn release_is_idempotent() {
        let mut host = host();
        let mut ctx = host.create_gpu_context().unwrap();
        let mut program =
            ShaderProgram::compile(ctx.as_mut(), FULLSCREEN_VERTEX, TINT_FRAGMENT, &[], &[]).unwrap();
        program.release(ctx.as_mut());
        program.release(ctx.as_mut());
        assert!(program.is_released());
        assert_eq!(host.stats().live_programs, 0);
        assert!(program.draw(ctx.as_mut()).is_err());
    }

    #[test]
    fn error_display() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "expected `}`".into(),
        };
        assert_eq!(err.to_string(), "fragment shader failed to compile: expected `}`");
        let err = ShaderError::UniformNotFound { name: "gaze".into() };
        assert_eq!(err.to_string(), "uniform or attribute `gaze` not found");
    }
}
