//! Built-in palette tables, one role map per theme.

use folio_common::ThemeId;

/// Role name → color string, per theme.
pub type PaletteTable = &'static [(&'static str, &'static str)];

pub const BUILT_IN_PALETTES: &[(ThemeId, PaletteTable)] = &[
    (
        ThemeId::Starfield,
        &[
            ("background", "#05060f"),
            ("star", "#e8ecff"),
            ("glow", "#7dd3fc"),
            ("accent", "#a78bfa"),
        ],
    ),
    (
        ThemeId::Waves,
        &[
            ("background", "#0b1020"),
            ("primary", "#38bdf8"),
            ("secondary", "#818cf8"),
            ("accent", "#f472b6"),
        ],
    ),
    (
        ThemeId::Aurora,
        &[
            ("background", "#020617"),
            ("primary", "#34d399"),
            ("secondary", "#22d3ee"),
            ("accent", "#c084fc"),
        ],
    ),
    (
        ThemeId::Blackhole,
        &[
            ("background", "#000000"),
            ("disk", "#f59e0b"),
            ("glow", "#fde68a"),
            ("accent", "#ef4444"),
        ],
    ),
    (
        ThemeId::Eye,
        &[
            ("background", "#07030a"),
            ("iris", "#dc2626"),
            ("pupil", "#0a0a0a"),
            ("sclera", "#3f3f46"),
            ("accent", "#fb923c"),
        ],
    ),
    (
        ThemeId::Rain,
        &[
            ("background", "#000000"),
            ("glyph", "#22c55e"),
            ("head", "#d9f99d"),
            ("trail", "rgba(0,0,0,0.08)"),
        ],
    ),
    (
        ThemeId::Ocean,
        &[
            ("background", "#020b1a"),
            ("water", "#0e7490"),
            ("particle", "#5eead4"),
            ("ripple", "#67e8f9"),
        ],
    ),
    (
        ThemeId::Cityscape,
        &[
            ("background", "#0f0a1e"),
            ("sky", "#312e81"),
            ("building", "#111827"),
            ("window", "#fcd34d"),
            ("accent", "#ec4899"),
        ],
    ),
];

/// Built-in table for `theme`.
pub fn table_for(theme: ThemeId) -> PaletteTable {
    BUILT_IN_PALETTES
        .iter()
        .find(|(t, _)| *t == theme)
        .map(|(_, table)| *table)
        .unwrap_or(&[])
}
