//! Columns of falling glyphs with fading trails.

use folio_common::{Color, ColorSet, ThemeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{CanvasScene, SceneFrame};
use crate::surface::{RasterContext, SurfaceSize};

/// Glyph cell size in CSS pixels.
pub const FONT_SIZE: f32 = 16.0;
/// A drop whose lifetime has run out respawns only when a roll exceeds
/// this, which staggers the columns.
pub const RESPAWN_THRESHOLD: f64 = 0.975;
/// Rows per second.
const MIN_SPEED: f32 = 10.0;
const MAX_SPEED: f32 = 22.0;
const TRAIL_LENGTH: usize = 6;
const GLYPH_SWAP_CHANCE: f64 = 0.05;

const GLYPHS: &[char] = &[
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾁ', 'ﾂ', 'ﾃ', 'ﾄ', '0',
    '1', '2', '3', '4', '5', '6', '7', '8', '9', 'Z', ':', '=', '*', '+', '<', '>',
];

#[derive(Debug, Clone)]
pub struct RainDrop {
    pub column: usize,
    /// Head position in rows from the top; fractional while falling.
    pub row: f32,
    pub speed: f32,
    /// Seconds since the head was at row 0.
    pub age: f32,
    /// Seconds the head takes to cross the screen.
    pub lifetime: f32,
    glyphs: [char; TRAIL_LENGTH],
}

impl RainDrop {
    pub fn remaining(&self) -> f32 {
        (self.lifetime - self.age).max(0.0)
    }
}

pub struct RainScene {
    rng: StdRng,
    drops: Vec<RainDrop>,
    respawns: u64,
    background: Color,
    glyph: Color,
    head: Color,
    trail: Color,
}

impl RainScene {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            drops: Vec::new(),
            respawns: 0,
            background: Color::BLACK,
            glyph: Color::WHITE,
            head: Color::WHITE,
            trail: Color::BLACK,
        }
    }

    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    /// Drops recycled to the top since setup.
    pub fn respawns(&self) -> u64 {
        self.respawns
    }

    fn random_glyph(&mut self) -> char {
        GLYPHS[self.rng.gen_range(0..GLYPHS.len())]
    }

    fn new_drop(&mut self, column: usize, row: f32, rows: f32) -> RainDrop {
        let mut glyphs = [' '; TRAIL_LENGTH];
        for g in &mut glyphs {
            *g = self.random_glyph();
        }
        let speed = self.rng.gen_range(MIN_SPEED..MAX_SPEED);
        RainDrop {
            column,
            row,
            speed,
            age: row / speed,
            lifetime: rows / speed,
            glyphs,
        }
    }

    fn populate(&mut self, size: SurfaceSize) {
        let columns = (size.css_width / FONT_SIZE).ceil().max(1.0) as usize;
        let rows = visible_rows(size);
        self.drops.retain(|d| d.column < columns);
        for drop in &mut self.drops {
            drop.lifetime = rows / drop.speed;
        }
        for column in self.drops.len()..columns {
            // Spread initial heads over the screen so the first frame is
            // already populated.
            let row = self.rng.gen_range(0.0..rows);
            let drop = self.new_drop(column, row, rows);
            self.drops.push(drop);
        }
    }
}

impl CanvasScene for RainScene {
    fn theme(&self) -> ThemeId {
        ThemeId::Rain
    }

    fn setup(&mut self, colors: &ColorSet, size: SurfaceSize) {
        self.background = colors.get_or("background", Color::BLACK);
        self.glyph = colors.get_or("glyph", Color::WHITE);
        self.head = colors.get_or("head", self.glyph);
        self.trail = colors.get_or("trail", self.background.with_alpha(0.1));
        self.drops.clear();
        self.respawns = 0;
        self.populate(size);
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.populate(size);
    }

    fn draw(&mut self, frame: &SceneFrame, canvas: &mut dyn RasterContext) {
        let width = frame.size.css_width;
        let height = frame.size.css_height;
        let rows = visible_rows(frame.size);
        let dt = frame.delta();

        // Translucent wash leaves the previous frames as a fading trail.
        if frame.time.index == 0 || frame.reduced_motion {
            canvas.clear(self.background);
        } else {
            canvas.fill_rect(0.0, 0.0, width, height, self.trail);
        }

        for i in 0..self.drops.len() {
            let head_row = self.drops[i].row.floor();
            let x = self.drops[i].column as f32 * FONT_SIZE;
            for (k, glyph) in self.drops[i].glyphs.iter().enumerate() {
                let y = (head_row - k as f32) * FONT_SIZE;
                if y < -FONT_SIZE || y > height {
                    continue;
                }
                let color = if k == 0 {
                    self.head
                } else {
                    self.glyph.with_alpha(1.0 - k as f32 / TRAIL_LENGTH as f32)
                };
                canvas.fill_glyph(*glyph, x, y, FONT_SIZE, color);
            }

            if frame.reduced_motion {
                continue;
            }
            let before = self.drops[i].row.floor();
            self.drops[i].row += self.drops[i].speed * dt;
            self.drops[i].age += dt;
            if self.drops[i].row.floor() > before {
                // New head glyph, trail shifts down by one.
                let fresh = self.random_glyph();
                let drop = &mut self.drops[i];
                drop.glyphs.rotate_right(1);
                drop.glyphs[0] = fresh;
            } else if self.rng.gen_bool(GLYPH_SWAP_CHANCE) {
                let fresh = self.random_glyph();
                self.drops[i].glyphs[0] = fresh;
            }

            if self.drops[i].remaining() <= 0.0 && self.rng.gen::<f64>() > RESPAWN_THRESHOLD {
                let column = self.drops[i].column;
                let drop = self.new_drop(column, 0.0, rows);
                self.drops[i] = drop;
                self.respawns += 1;
            }
        }
    }
}

fn visible_rows(size: SurfaceSize) -> f32 {
    (size.css_height / FONT_SIZE).ceil().max(1.0)
}
