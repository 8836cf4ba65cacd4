//! Backdrop configuration system.
//!
//! Provides TOML-based configuration, validation, color parsing and the
//! theme-to-palette resolver. All config sections use sensible defaults so
//! partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use folio_config::{load_config, palette::get_colors};
//! use folio_common::{Section, ThemeId};
//!
//! let config = load_config(None).expect("failed to load config");
//! let colors = get_colors(ThemeId::Aurora, Section::Hero);
//! println!("{} roles for {}", colors.len(), config.background.theme);
//! ```

pub mod colors;
pub mod palette;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use palette::{get_colors, PaletteResolver, BUILT_IN_PALETTES};
pub use schema::{FolioConfig, CONFIG_SCHEMA_VERSION};

use folio_common::ConfigError;
use std::path::Path;

/// Load config from `path`, or from the platform default location when `None`.
///
/// The result is validated; unlike [`toml_loader::load_from_path`] an invalid
/// config is an error here.
pub fn load_config(path: Option<&Path>) -> Result<FolioConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}
