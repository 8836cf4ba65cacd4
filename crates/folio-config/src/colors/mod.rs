//! Color parsing for config values and palette tables.
//!
//! Supports `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r,g,b)` and `rgba(r,g,b,a)`.

mod parse;

#[cfg(test)]
mod tests;

use folio_common::types::Color;
use folio_common::ConfigError;

use parse::{parse_func, parse_hex, FUNC_RE, HEX_RE};

/// Parse a color string into a [`Color`].
pub fn parse_color(s: &str) -> Result<Color, ConfigError> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex(s)
            .ok_or_else(|| ConfigError::ParseError(format!("invalid hex color: {s}")));
    }

    if s.starts_with("rgba(") || s.starts_with("rgb(") {
        return parse_func(s)
            .ok_or_else(|| ConfigError::ParseError(format!("invalid rgb color: {s}")));
    }

    Err(ConfigError::ParseError(format!(
        "unrecognized color format: {s}"
    )))
}

/// Whether `s` is syntactically a color this module can parse.
pub fn validate_color(s: &str) -> bool {
    let s = s.trim();
    if s.starts_with('#') {
        return HEX_RE.is_match(s);
    }
    if s.starts_with("rgba(") || s.starts_with("rgb(") {
        return FUNC_RE.is_match(s);
    }
    false
}
