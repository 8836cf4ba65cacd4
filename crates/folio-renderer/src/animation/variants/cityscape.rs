//! GPU procedural night skyline.

use folio_common::{Color, ColorSet, ThemeId};

use super::ease;
use crate::animation::{SceneFrame, ShaderScene};
use crate::shader::{ShaderError, UniformWriter};

const FRAGMENT: &str = include_str!("../../shaders/cityscape.wgsl");

/// Buildings per viewport height on the back layer.
const DENSITY: f32 = 6.0;
const SPEED: f32 = 1.0;
const POINTER_EASE: f32 = 0.06;

#[derive(Debug, Default)]
pub struct CityscapeScene {
    pointer_active: f32,
}

impl CityscapeScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShaderScene for CityscapeScene {
    fn theme(&self) -> ThemeId {
        ThemeId::Cityscape
    }

    fn fragment_source(&self) -> &'static str {
        FRAGMENT
    }

    fn uniforms(&self) -> &'static [&'static str] {
        &[
            "pointer",
            "density",
            "speed",
            "pointer_active",
            "color_sky",
            "color_building",
            "color_window",
            "color_accent",
            "color_background",
        ]
    }

    fn apply_colors(&mut self, colors: &ColorSet, uniforms: &mut UniformWriter<'_>) -> Result<(), ShaderError> {
        let background = colors.get_or("background", Color::BLACK);
        let window = colors.get_or("window", Color::WHITE);
        uniforms.color("color_background", background)?;
        uniforms.color("color_sky", colors.get_or("sky", background))?;
        uniforms.color("color_building", colors.get_or("building", background))?;
        uniforms.color("color_window", window)?;
        uniforms.color("color_accent", colors.get_or("accent", window))?;
        uniforms.f32("density", DENSITY)?;
        uniforms.f32("speed", SPEED)
    }

    fn update(&mut self, frame: &SceneFrame, uniforms: &mut UniformWriter<'_>) -> Result<(), ShaderError> {
        let target = if frame.pointer.active { 1.0 } else { 0.0 };
        self.pointer_active = ease(self.pointer_active, target, POINTER_EASE, frame.delta());
        uniforms.vec2("pointer", frame.pointer.signed)?;
        uniforms.f32("pointer_active", self.pointer_active)
    }
}
