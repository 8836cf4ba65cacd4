//! Theme-to-palette resolution.
//!
//! Every theme ships a built-in role table. Users can layer overrides from a
//! YAML file; the page section then nudges the result.

mod overrides;
mod resolve;
mod tables;

pub use overrides::{load_overrides_from_path, parse_overrides, PaletteOverrides};
pub use resolve::{get_colors, PaletteResolver};
pub use tables::{table_for, PaletteTable, BUILT_IN_PALETTES};
