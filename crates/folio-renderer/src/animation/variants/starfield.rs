//! Twinkling starfield whose stars brighten and swell near the pointer.

use folio_common::{Color, ColorSet, ThemeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{CanvasScene, SceneFrame};
use crate::surface::{RasterContext, SurfaceSize};

/// CSS px² of viewport per star.
const STAR_DENSITY: f32 = 3_000.0;
const MIN_STARS: usize = 60;
const MAX_STARS: usize = 600;

/// Pointer influence radius in CSS pixels.
pub const GLOW_RADIUS: f32 = 140.0;
const BRIGHTNESS_GAIN: f32 = 1.2;
const SIZE_GAIN: f32 = 1.5;

#[derive(Debug, Clone)]
pub struct Star {
    /// Position as a fraction of the viewport.
    pub x: f32,
    pub y: f32,
    pub base_size: f32,
    pub base_brightness: f32,
    /// Values used for the last drawn frame, after pointer boost.
    pub size: f32,
    pub brightness: f32,
    twinkle_speed: f32,
    phase: f32,
}

pub struct StarfieldScene {
    rng: StdRng,
    stars: Vec<Star>,
    background: Color,
    star: Color,
    glow: Color,
    accent: Color,
}

impl StarfieldScene {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            stars: Vec::new(),
            background: Color::BLACK,
            star: Color::WHITE,
            glow: Color::WHITE,
            accent: Color::WHITE,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    fn star_count(size: SurfaceSize) -> usize {
        ((size.css_width * size.css_height / STAR_DENSITY) as usize).clamp(MIN_STARS, MAX_STARS)
    }

    fn spawn(&mut self) -> Star {
        let base_size = self.rng.gen_range(0.6..1.8);
        let base_brightness = self.rng.gen_range(0.3..0.85);
        Star {
            x: self.rng.gen(),
            y: self.rng.gen(),
            base_size,
            base_brightness,
            size: base_size,
            brightness: base_brightness,
            twinkle_speed: self.rng.gen_range(0.5..2.5),
            phase: self.rng.gen_range(0.0..std::f32::consts::TAU),
        }
    }

    fn populate(&mut self, size: SurfaceSize) {
        let count = Self::star_count(size);
        self.stars.truncate(count);
        while self.stars.len() < count {
            let star = self.spawn();
            self.stars.push(star);
        }
    }
}

/// Proximity boost in `0..=1`: quadratic falloff to zero at [`GLOW_RADIUS`].
fn proximity_boost(distance: f32) -> f32 {
    if distance >= GLOW_RADIUS {
        return 0.0;
    }
    let t = 1.0 - distance / GLOW_RADIUS;
    t * t
}

impl CanvasScene for StarfieldScene {
    fn theme(&self) -> ThemeId {
        ThemeId::Starfield
    }

    fn setup(&mut self, colors: &ColorSet, size: SurfaceSize) {
        self.background = colors.get_or("background", Color::BLACK);
        self.star = colors.get_or("star", Color::WHITE);
        self.glow = colors.get_or("glow", self.star);
        self.accent = colors.get_or("accent", self.glow);
        self.populate(size);
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.populate(size);
    }

    fn draw(&mut self, frame: &SceneFrame, canvas: &mut dyn RasterContext) {
        let width = frame.size.css_width;
        let height = frame.size.css_height;
        let pointer = frame.pointer_px();
        let t = frame.elapsed();

        canvas.clear(self.background);
        if let Some((px, py)) = pointer {
            canvas.glow(px, py, GLOW_RADIUS * 0.6, self.accent.with_alpha(0.08));
        }

        for star in &mut self.stars {
            let sx = star.x * width;
            let sy = star.y * height;
            let boost = pointer
                .map(|(px, py)| proximity_boost((sx - px).hypot(sy - py)))
                .unwrap_or(0.0);
            star.brightness = (star.base_brightness * (1.0 + BRIGHTNESS_GAIN * boost)).min(1.0);
            star.size = star.base_size * (1.0 + SIZE_GAIN * boost);

            let twinkle = if frame.reduced_motion {
                1.0
            } else {
                0.75 + 0.25 * (t * star.twinkle_speed + star.phase).sin()
            };
            let alpha = star.brightness * twinkle;
            if boost > 0.05 {
                canvas.glow(sx, sy, star.size * 6.0, self.glow.with_alpha(alpha * boost * 0.6));
            }
            canvas.fill_circle(sx, sy, star.size, self.star.with_alpha(alpha));
        }
    }
}
