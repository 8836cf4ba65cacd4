//! Palette override configuration.

use serde::{Deserialize, Serialize};

/// Palette customization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Path to a YAML file with per-theme role overrides. Empty = built-in palettes only.
    pub overrides: String,
}
