use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::color::Color;

/// Visual themes a user can pick for the page background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    /// Twinkling stars that glow near the pointer
    #[default]
    Starfield,
    /// Layered sine waves with drifting orbs
    Waves,
    /// Fractal-noise curtains of light
    Aurora,
    /// Gravitational lensing around an event horizon
    Blackhole,
    /// Bio-mechanical eye that follows the pointer
    Eye,
    /// Falling glyph columns
    Rain,
    /// Ripples and rising bioluminescent particles
    Ocean,
    /// Procedural skyline at night
    Cityscape,
}

impl ThemeId {
    pub fn all() -> &'static [ThemeId] {
        &[
            ThemeId::Starfield,
            ThemeId::Waves,
            ThemeId::Aurora,
            ThemeId::Blackhole,
            ThemeId::Eye,
            ThemeId::Rain,
            ThemeId::Ocean,
            ThemeId::Cityscape,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            ThemeId::Starfield => "starfield",
            ThemeId::Waves => "waves",
            ThemeId::Aurora => "aurora",
            ThemeId::Blackhole => "blackhole",
            ThemeId::Eye => "eye",
            ThemeId::Rain => "rain",
            ThemeId::Ocean => "ocean",
            ThemeId::Cityscape => "cityscape",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeId::Starfield => "Starfield",
            ThemeId::Waves => "Waves & Orbs",
            ThemeId::Aurora => "Aurora",
            ThemeId::Blackhole => "Black Hole",
            ThemeId::Eye => "Bio-Mechanical Eye",
            ThemeId::Rain => "Glyph Rain",
            ThemeId::Ocean => "Bioluminescent Ocean",
            ThemeId::Cityscape => "Cityscape",
        }
    }

    /// Parse from string ID (case-insensitive).
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_lowercase();
        Self::all().iter().copied().find(|t| t.id() == id)
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Page section currently in view; palettes shift slightly per section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Hero,
    About,
    Portfolio,
    #[default]
    All,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[Section::Hero, Section::About, Section::Portfolio, Section::All]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::About => "about",
            Section::Portfolio => "portfolio",
            Section::All => "all",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_lowercase();
        Self::all().iter().copied().find(|s| s.id() == id)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Semantic color roles ("primary", "accent", "background", ...) for one
/// theme/section pair. The set of roles differs between theme families.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSet {
    roles: BTreeMap<String, Color>,
}

impl ColorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, role: &str, color: Color) -> Self {
        self.insert(role, color);
        self
    }

    pub fn insert(&mut self, role: &str, color: Color) {
        self.roles.insert(role.to_string(), color);
    }

    pub fn get(&self, role: &str) -> Option<Color> {
        self.roles.get(role).copied()
    }

    pub fn get_or(&self, role: &str, fallback: Color) -> Color {
        self.get(role).unwrap_or(fallback)
    }

    pub fn roles(&self) -> impl Iterator<Item = (&str, Color)> {
        self.roles.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
