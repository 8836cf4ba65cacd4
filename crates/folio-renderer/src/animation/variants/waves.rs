//! Layered sine waves under slowly drifting glow orbs.

use std::f32::consts::TAU;

use folio_common::{Color, ColorSet, ThemeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{CanvasScene, SceneFrame};
use crate::surface::{RasterContext, SurfaceSize};

const ORB_COUNT: usize = 4;
/// Width of one wave column in CSS pixels.
const COLUMN: f32 = 4.0;
/// Pointer parallax for orbs, in CSS pixels at full deflection.
const PARALLAX: f32 = 24.0;

struct WaveLayer {
    amplitude: f32,
    wavelength: f32,
    speed: f32,
    /// Resting height as a fraction of the viewport.
    baseline: f32,
}

const LAYERS: [WaveLayer; 3] = [
    WaveLayer {
        amplitude: 28.0,
        wavelength: 520.0,
        speed: 0.35,
        baseline: 0.62,
    },
    WaveLayer {
        amplitude: 22.0,
        wavelength: 380.0,
        speed: 0.5,
        baseline: 0.7,
    },
    WaveLayer {
        amplitude: 16.0,
        wavelength: 260.0,
        speed: 0.7,
        baseline: 0.8,
    },
];

struct Orb {
    phase: f32,
    speed: f32,
    /// Radius relative to the shorter viewport side.
    scale: f32,
    color: Color,
}

pub struct WavesScene {
    rng: StdRng,
    orbs: Vec<Orb>,
    background: Color,
    primary: Color,
    secondary: Color,
    accent: Color,
}

impl WavesScene {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            orbs: Vec::new(),
            background: Color::BLACK,
            primary: Color::WHITE,
            secondary: Color::WHITE,
            accent: Color::WHITE,
        }
    }

    pub fn orb_count(&self) -> usize {
        self.orbs.len()
    }

    /// Orb center in CSS pixels at time `t`.
    fn orb_center(orb: &Orb, index: usize, t: f32, frame: &SceneFrame) -> (f32, f32) {
        let k = (index + 1) as f32;
        let w = frame.size.css_width;
        let h = frame.size.css_height;
        let x = w * (0.5 + 0.35 * (t * 0.13 * k * orb.speed + orb.phase).sin());
        let y = h * (0.4 + 0.22 * (t * 0.11 * k * orb.speed + orb.phase * 1.3).cos());
        // Signed y points up, screen y points down.
        let [sx, sy] = frame.pointer.signed;
        (x + sx * PARALLAX * k * 0.5, y - sy * PARALLAX * k * 0.5)
    }
}

impl CanvasScene for WavesScene {
    fn theme(&self) -> ThemeId {
        ThemeId::Waves
    }

    fn setup(&mut self, colors: &ColorSet, _size: SurfaceSize) {
        self.background = colors.get_or("background", Color::BLACK);
        self.primary = colors.get_or("primary", Color::WHITE);
        self.secondary = colors.get_or("secondary", self.primary);
        self.accent = colors.get_or("accent", self.secondary);

        let palette = [self.primary, self.secondary, self.accent, self.primary];
        self.orbs = (0..ORB_COUNT)
            .map(|i| Orb {
                phase: self.rng.gen_range(0.0..TAU),
                speed: self.rng.gen_range(0.7..1.3),
                scale: self.rng.gen_range(0.25..0.42),
                color: palette[i % palette.len()],
            })
            .collect();
    }

    fn draw(&mut self, frame: &SceneFrame, canvas: &mut dyn RasterContext) {
        let t = frame.elapsed();
        let width = frame.size.css_width;
        let height = frame.size.css_height;

        let short_side = width.min(height);

        canvas.clear(self.background);

        for (i, orb) in self.orbs.iter().enumerate() {
            let (x, y) = Self::orb_center(orb, i, t, frame);
            canvas.glow(x, y, short_side * orb.scale, orb.color.with_alpha(0.35));
        }

        let last = (LAYERS.len() - 1) as f32;
        for (i, layer) in LAYERS.iter().enumerate() {
            let mix = i as f32 / last;
            let color = self
                .primary
                .lerp(&self.secondary, mix)
                .with_alpha(0.25 + 0.1 * i as f32);
            let offset = t * layer.speed + i as f32;
            let mut x = 0.0;
            while x < width {
                let phase = x / layer.wavelength * TAU + offset;
                let y = height * layer.baseline
                    + layer.amplitude * phase.sin()
                    + layer.amplitude * 0.4 * (phase * 2.1 + offset * 0.5).sin();
                canvas.fill_rect(x, y, COLUMN, height - y, color);
                x += COLUMN;
            }
        }

        // Crest highlight on the front layer.
        let front = &LAYERS[LAYERS.len() - 1];
        let highlight = self.accent.with_alpha(0.5);
        let offset = t * front.speed + last;
        let mut x = 0.0;
        while x < width {
            let phase = x / front.wavelength * TAU + offset;
            let y = height * front.baseline
                + front.amplitude * phase.sin()
                + front.amplitude * 0.4 * (phase * 2.1 + offset * 0.5).sin();
            canvas.fill_rect(x, y, COLUMN, 1.5, highlight);
            x += COLUMN;
        }
    }
}
