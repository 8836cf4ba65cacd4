//! User palette overrides loaded from YAML.
//!
//! ```yaml
//! aurora:
//!   primary: "#ff00ff"
//! rain:
//!   glyph: "rgb(0, 255, 170)"
//! ```

use folio_common::{ConfigError, ThemeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Role overrides keyed by theme, then role name. Values are color strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteOverrides {
    pub themes: BTreeMap<ThemeId, BTreeMap<String, String>>,
}

impl PaletteOverrides {
    /// Overrides for one theme, if any were given.
    pub fn for_theme(&self, theme: ThemeId) -> Option<&BTreeMap<String, String>> {
        self.themes.get(&theme)
    }

    pub fn is_empty(&self) -> bool {
        self.themes.values().all(|roles| roles.is_empty())
    }
}

/// Parse overrides from a YAML string.
pub fn parse_overrides(content: &str) -> Result<PaletteOverrides, ConfigError> {
    serde_yaml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse palette YAML: {e}")))
}

/// Load overrides from a YAML file.
pub fn load_overrides_from_path(path: &Path) -> Result<PaletteOverrides, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to read palette file {}: {e}",
            path.display()
        ))
    })?;

    let overrides = parse_overrides(&content)?;
    info!("loaded palette overrides from {}", path.display());
    Ok(overrides)
}
