//! `(theme, section) -> ColorSet` resolution.

use folio_common::{ColorSet, ConfigError, Section, ThemeId};
use std::path::Path;
use tracing::warn;

use super::overrides::{load_overrides_from_path, PaletteOverrides};
use super::tables::table_for;
use crate::colors::parse_color;
use crate::schema::PaletteConfig;

/// Resolve the built-in palette for a theme and section.
///
/// Pure: the same inputs always produce the same set.
pub fn get_colors(theme: ThemeId, section: Section) -> ColorSet {
    let mut set = ColorSet::new();
    for (role, value) in table_for(theme) {
        match parse_color(value) {
            Ok(color) => set.insert(role, color),
            Err(e) => warn!("built-in palette {theme} role {role}: {e}"),
        }
    }
    apply_section(set, section)
}

/// Palette resolver with optional user overrides layered on the built-ins.
#[derive(Debug, Clone, Default)]
pub struct PaletteResolver {
    overrides: PaletteOverrides,
}

impl PaletteResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: PaletteOverrides) -> Self {
        Self { overrides }
    }

    /// Build from config; an empty `overrides` path means built-ins only.
    pub fn from_config(config: &PaletteConfig) -> Result<Self, ConfigError> {
        if config.overrides.trim().is_empty() {
            return Ok(Self::new());
        }
        let overrides = load_overrides_from_path(Path::new(config.overrides.trim()))?;
        Ok(Self::with_overrides(overrides))
    }

    /// Colors for `theme` in `section`. Overrides replace built-in roles
    /// before the section adjustment runs; unparseable override values are
    /// skipped.
    pub fn resolve(&self, theme: ThemeId, section: Section) -> ColorSet {
        let mut base = get_colors(theme, Section::All);
        if let Some(roles) = self.overrides.for_theme(theme) {
            for (role, value) in roles {
                match parse_color(value) {
                    Ok(color) => base.insert(role, color),
                    Err(e) => warn!("ignoring palette override {theme}.{role}: {e}"),
                }
            }
        }
        apply_section(base, section)
    }
}

/// Per-section tweaks: the hero keeps full intensity, "about" dims the
/// foreground roles, "portfolio" pulls the accent toward the primary role.
fn apply_section(set: ColorSet, section: Section) -> ColorSet {
    match section {
        Section::Hero | Section::All => set,
        Section::About => {
            let mut out = ColorSet::new();
            for (role, color) in set.roles() {
                let color = if role == "background" {
                    color
                } else {
                    color.scale(ABOUT_DIM)
                };
                out.insert(role, color);
            }
            out
        }
        Section::Portfolio => {
            let anchor = set
                .get("primary")
                .or_else(|| set.roles().find(|(r, _)| *r != "background").map(|(_, c)| c));
            let mut out = set.clone();
            if let (Some(accent), Some(anchor)) = (set.get("accent"), anchor) {
                out.insert("accent", accent.lerp(&anchor, PORTFOLIO_ACCENT_SHIFT));
            }
            out
        }
    }
}

const ABOUT_DIM: f32 = 0.8;
const PORTFOLIO_ACCENT_SHIFT: f32 = 0.35;
