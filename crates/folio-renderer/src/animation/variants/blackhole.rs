//! GPU black hole with gravitational lensing and an accretion disk.

use folio_common::{Color, ColorSet, ThemeId};

use super::ease;
use crate::animation::{SceneFrame, ShaderScene};
use crate::shader::{ShaderError, UniformWriter};

const FRAGMENT: &str = include_str!("../../shaders/blackhole.wgsl");

const MASS: f32 = 1.0;
const SPIN: f32 = 0.6;
const POINTER_EASE: f32 = 0.05;

#[derive(Debug, Default)]
pub struct BlackholeScene {
    pointer_active: f32,
}

impl BlackholeScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShaderScene for BlackholeScene {
    fn theme(&self) -> ThemeId {
        ThemeId::Blackhole
    }

    fn fragment_source(&self) -> &'static str {
        FRAGMENT
    }

    fn uniforms(&self) -> &'static [&'static str] {
        &[
            "pointer",
            "mass",
            "spin",
            "pointer_active",
            "color_disk",
            "color_glow",
            "color_accent",
            "color_background",
        ]
    }

    fn apply_colors(&mut self, colors: &ColorSet, uniforms: &mut UniformWriter<'_>) -> Result<(), ShaderError> {
        let disk = colors.get_or("disk", Color::WHITE);
        uniforms.color("color_disk", disk)?;
        uniforms.color("color_glow", colors.get_or("glow", disk))?;
        uniforms.color("color_accent", colors.get_or("accent", disk))?;
        uniforms.color("color_background", colors.get_or("background", Color::BLACK))?;
        uniforms.f32("mass", MASS)?;
        uniforms.f32("spin", SPIN)
    }

    fn update(&mut self, frame: &SceneFrame, uniforms: &mut UniformWriter<'_>) -> Result<(), ShaderError> {
        let target = if frame.pointer.present { 1.0 } else { 0.0 };
        self.pointer_active = ease(self.pointer_active, target, POINTER_EASE, frame.delta());
        uniforms.vec2("pointer", frame.pointer.signed)?;
        uniforms.f32("pointer_active", self.pointer_active)
    }
}
