//! Low-level color string parsing.

use folio_common::types::Color;
use regex::Regex;
use std::sync::LazyLock;

/// `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
pub(crate) static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

/// `rgb(r,g,b)` or `rgba(r,g,b,a)`; alpha is optional for both spellings.
pub(crate) static FUNC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$",
    )
    .unwrap()
});

pub(super) fn parse_hex(s: &str) -> Option<Color> {
    if !HEX_RE.is_match(s) {
        return None;
    }
    let hex = s.strip_prefix('#')?;
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Color::from_rgba(r * 17, g * 17, b * 17, 255))
        }
        6 | 8 => Color::from_hex(s),
        _ => None,
    }
}

/// Parse the functional notation. A fractional alpha is CSS-style 0.0-1.0,
/// an integer alpha is 0-255, a missing alpha is opaque.
pub(super) fn parse_func(s: &str) -> Option<Color> {
    let caps = FUNC_RE.captures(s)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;

    let a = match caps.get(4).map(|m| m.as_str()) {
        None => 255,
        Some(a_str) if a_str.contains('.') => {
            let a_float: f64 = a_str.parse().ok()?;
            if !(0.0..=1.0).contains(&a_float) {
                return None;
            }
            (a_float * 255.0).round() as u8
        }
        Some(a_str) => {
            let a_int: u32 = a_str.parse().ok()?;
            u8::try_from(a_int).ok()?
        }
    };

    Some(Color::from_rgba(r, g, b, a))
}
