//! GPU fractal-noise aurora.

use folio_common::{Color, ColorSet, ThemeId};

use super::ease;
use crate::animation::{SceneFrame, ShaderScene};
use crate::shader::{ShaderError, UniformWriter};

const FRAGMENT: &str = include_str!("../../shaders/aurora.wgsl");

const INTENSITY: f32 = 0.9;
const SPEED: f32 = 1.0;
/// Per-frame (60 Hz) easing of the pointer influence.
const POINTER_EASE: f32 = 0.08;

#[derive(Debug, Default)]
pub struct AuroraScene {
    pointer_active: f32,
}

impl AuroraScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShaderScene for AuroraScene {
    fn theme(&self) -> ThemeId {
        ThemeId::Aurora
    }

    fn fragment_source(&self) -> &'static str {
        FRAGMENT
    }

    fn uniforms(&self) -> &'static [&'static str] {
        &[
            "pointer",
            "intensity",
            "speed",
            "pointer_active",
            "color_primary",
            "color_secondary",
            "color_accent",
            "color_background",
        ]
    }

    fn apply_colors(&mut self, colors: &ColorSet, uniforms: &mut UniformWriter<'_>) -> Result<(), ShaderError> {
        let primary = colors.get_or("primary", Color::WHITE);
        let secondary = colors.get_or("secondary", primary);
        uniforms.color("color_primary", primary)?;
        uniforms.color("color_secondary", secondary)?;
        uniforms.color("color_accent", colors.get_or("accent", secondary))?;
        uniforms.color("color_background", colors.get_or("background", Color::BLACK))?;
        uniforms.f32("intensity", INTENSITY)?;
        uniforms.f32("speed", SPEED)
    }

    fn update(&mut self, frame: &SceneFrame, uniforms: &mut UniformWriter<'_>) -> Result<(), ShaderError> {
        let target = if frame.pointer.active { 1.0 } else { 0.0 };
        self.pointer_active = ease(self.pointer_active, target, POINTER_EASE, frame.delta());
        uniforms.vec2("pointer", frame.pointer.signed)?;
        uniforms.f32("pointer_active", self.pointer_active)
    }
}
