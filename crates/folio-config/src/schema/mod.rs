//! Configuration schema types for the backdrop.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod background;
mod clock;
mod palette;
mod system;

pub use background::*;
pub use clock::*;
pub use palette::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// All options have sensible defaults. Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct FolioConfig {
    pub background: BackgroundConfig,
    pub clock: ClockConfig,
    pub pointer: PointerConfig,
    pub palette: PaletteConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::Section;

    #[test]
    fn default_config_background() {
        let config = FolioConfig::default();
        assert_eq!(config.background.theme, "starfield");
        assert_eq!(config.background.section, Section::All);
        assert!(!config.background.reduced_motion);
        assert_eq!(config.background.width, 1280);
        assert_eq!(config.background.height, 720);
        assert!((config.background.pixel_ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_config_clock_and_pointer() {
        let config = FolioConfig::default();
        assert!((config.clock.time_scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.clock.frame_rate, 60);
        assert!((config.pointer.damping - 0.12).abs() < f64::EPSILON);
        assert_eq!(config.pointer.idle_timeout_ms, 1500);
    }

    #[test]
    fn default_config_has_no_palette_overrides() {
        let config = FolioConfig::default();
        assert!(config.palette.overrides.is_empty());
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml_str = r#"
[background]
theme = "aurora"
section = "hero"
"#;
        let config: FolioConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.background.theme, "aurora");
        assert_eq!(config.background.section, Section::Hero);
        assert_eq!(config.background.width, 1280);
        assert_eq!(config.clock.frame_rate, 60);
    }

    #[test]
    fn log_level_deserializes_uppercase() {
        let toml_str = r#"
[logging]
level = "WARNING"
"#;
        let config: FolioConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, LogLevel::Warning);
        assert_eq!(config.logging.level.as_directive(), "warn");
    }

    #[test]
    fn invalid_section_is_a_parse_error() {
        let toml_str = r#"
[background]
section = "contact"
"#;
        assert!(toml::from_str::<FolioConfig>(toml_str).is_err());
    }
}
