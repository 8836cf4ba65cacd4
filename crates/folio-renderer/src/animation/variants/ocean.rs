//! Deep water with expanding ripples and rising bioluminescent particles.

use std::f32::consts::{PI, TAU};

use folio_common::{Color, ColorSet, ThemeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{CanvasScene, SceneFrame};
use crate::surface::{RasterContext, SurfaceSize};

/// CSS px² of viewport per particle.
const PARTICLE_DENSITY: f32 = 9_000.0;
const MIN_PARTICLES: usize = 30;
const MAX_PARTICLES: usize = 220;
const DEPTH_BANDS: usize = 6;
/// Seconds between ambient ripples.
const RIPPLE_INTERVAL: f32 = 1.2;
/// Minimum seconds between pointer-spawned ripples.
const POINTER_RIPPLE_INTERVAL: f32 = 0.25;
const MAX_RIPPLES: usize = 24;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Upward speed in CSS px per second.
    pub rise: f32,
    pub age: f32,
    pub lifetime: f32,
    size: f32,
    sway: f32,
}

impl Particle {
    pub fn remaining(&self) -> f32 {
        (self.lifetime - self.age).max(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct Ripple {
    pub x: f32,
    pub y: f32,
    pub age: f32,
    pub lifetime: f32,
    max_radius: f32,
}

pub struct OceanScene {
    rng: StdRng,
    particles: Vec<Particle>,
    ripples: Vec<Ripple>,
    since_ripple: f32,
    since_pointer_ripple: f32,
    respawns: u64,
    background: Color,
    water: Color,
    particle: Color,
    ripple: Color,
}

impl OceanScene {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            particles: Vec::new(),
            ripples: Vec::new(),
            since_ripple: 0.0,
            since_pointer_ripple: POINTER_RIPPLE_INTERVAL,
            respawns: 0,
            background: Color::BLACK,
            water: Color::BLACK,
            particle: Color::WHITE,
            ripple: Color::WHITE,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn respawns(&self) -> u64 {
        self.respawns
    }

    fn spawn_particle(&mut self, width: f32, y: f32) -> Particle {
        Particle {
            x: self.rng.gen_range(0.0..width.max(1.0)),
            y,
            rise: self.rng.gen_range(8.0..28.0),
            age: 0.0,
            lifetime: self.rng.gen_range(6.0..14.0),
            size: self.rng.gen_range(0.8..2.4),
            sway: self.rng.gen_range(0.0..TAU),
        }
    }

    fn spawn_ripple(&mut self, x: f32, y: f32, size: SurfaceSize) {
        if self.ripples.len() >= MAX_RIPPLES {
            self.ripples.remove(0);
        }
        let short_side = size.css_width.min(size.css_height);
        self.ripples.push(Ripple {
            x,
            y,
            age: 0.0,
            lifetime: self.rng.gen_range(2.0..3.5),
            max_radius: short_side * self.rng.gen_range(0.08..0.18),
        });
    }

    fn populate(&mut self, size: SurfaceSize) {
        let count = ((size.css_width * size.css_height / PARTICLE_DENSITY) as usize)
            .clamp(MIN_PARTICLES, MAX_PARTICLES);
        self.particles.truncate(count);
        while self.particles.len() < count {
            let y = self.rng.gen_range(0.0..size.css_height.max(1.0));
            let mut particle = self.spawn_particle(size.css_width, y);
            particle.age = self.rng.gen_range(0.0..particle.lifetime);
            self.particles.push(particle);
        }
    }

    fn step(&mut self, frame: &SceneFrame) {
        let dt = frame.delta();
        let width = frame.size.css_width;
        let height = frame.size.css_height;

        self.since_ripple += dt;
        if self.since_ripple >= RIPPLE_INTERVAL {
            self.since_ripple = 0.0;
            let x = self.rng.gen_range(0.0..width.max(1.0));
            let y = self.rng.gen_range(0.0..height.max(1.0));
            self.spawn_ripple(x, y, frame.size);
        }
        self.since_pointer_ripple += dt;
        if let (true, Some((px, py))) = (frame.pointer.active, frame.pointer_px()) {
            if self.since_pointer_ripple >= POINTER_RIPPLE_INTERVAL {
                self.since_pointer_ripple = 0.0;
                self.spawn_ripple(px, py, frame.size);
            }
        }

        for ripple in &mut self.ripples {
            ripple.age += dt;
        }
        self.ripples.retain(|r| r.age < r.lifetime);

        let t = frame.elapsed();
        for i in 0..self.particles.len() {
            let p = &mut self.particles[i];
            p.age += dt;
            p.y -= p.rise * dt;
            p.x += (t * 0.6 + p.sway).sin() * 6.0 * dt;

            let escaped = p.y < -p.size * 4.0 || p.x < -10.0 || p.x > width + 10.0;
            if escaped || p.age >= p.lifetime {
                let below = height + self.rng.gen_range(0.0..20.0);
                let replacement = self.spawn_particle(width, below);
                self.particles[i] = replacement;
                self.respawns += 1;
            }
        }
    }
}

impl CanvasScene for OceanScene {
    fn theme(&self) -> ThemeId {
        ThemeId::Ocean
    }

    fn setup(&mut self, colors: &ColorSet, size: SurfaceSize) {
        self.background = colors.get_or("background", Color::BLACK);
        self.water = colors.get_or("water", self.background);
        self.particle = colors.get_or("particle", Color::WHITE);
        self.ripple = colors.get_or("ripple", self.particle);
        self.particles.clear();
        self.ripples.clear();
        self.respawns = 0;
        self.populate(size);
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.populate(size);
    }

    fn draw(&mut self, frame: &SceneFrame, canvas: &mut dyn RasterContext) {
        if !frame.reduced_motion {
            self.step(frame);
        }
        let width = frame.size.css_width;
        let height = frame.size.css_height;

        canvas.clear(self.background);
        let band = height / DEPTH_BANDS as f32;
        for i in 0..DEPTH_BANDS {
            let alpha = 0.04 + 0.03 * i as f32;
            canvas.fill_rect(0.0, band * i as f32, width, band + 1.0, self.water.with_alpha(alpha));
        }

        for ripple in &self.ripples {
            let progress = ripple.age / ripple.lifetime;
            let radius = ripple.max_radius * progress;
            canvas.stroke_ring(
                ripple.x,
                ripple.y,
                radius.max(0.5),
                1.5,
                self.ripple.with_alpha((1.0 - progress) * 0.5),
            );
        }

        for p in &self.particles {
            // Fade in and out over the lifetime.
            let alpha = (PI * (p.age / p.lifetime).clamp(0.0, 1.0)).sin();
            canvas.glow(p.x, p.y, p.size * 4.0, self.particle.with_alpha(alpha * 0.4));
            canvas.fill_circle(p.x, p.y, p.size, self.particle.with_alpha(alpha));
        }
    }
}
