use folio_common::{Color, ColorSet, Section, ThemeId};
use folio_config::{get_colors, PaletteResolver};
use serde::Serialize;

use crate::animation::AnimationError;

/// Why a mounted background was replaced by the fallback.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error("background panicked during {stage}: {message}")]
    Panicked { stage: &'static str, message: String },
}

/// Where the host gets colors from.
pub trait PaletteSource {
    fn colors(&self, theme: ThemeId, section: Section) -> ColorSet;
}

/// The built-in tables with no overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltInPalettes;

impl PaletteSource for BuiltInPalettes {
    fn colors(&self, theme: ThemeId, section: Section) -> ColorSet {
        get_colors(theme, section)
    }
}

impl PaletteSource for PaletteResolver {
    fn colors(&self, theme: ThemeId, section: Section) -> ColorSet {
        self.resolve(theme, section)
    }
}

/// Static background shown when an animation can't run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FallbackView {
    Solid(Color),
    /// Vertical gradient, `from` at the top.
    Gradient { from: Color, to: Color },
}

impl FallbackView {
    /// A gradient from the background role toward the theme's main color,
    /// or a solid color when the palette has only one of them.
    pub fn from_colors(colors: &ColorSet) -> Self {
        let background = colors.get("background");
        let tint = colors
            .get("primary")
            .or_else(|| colors.get("accent"))
            .or_else(|| colors.roles().find(|(role, _)| *role != "background").map(|(_, c)| c));
        match (background, tint) {
            (Some(from), Some(tint)) => FallbackView::Gradient {
                from,
                to: from.lerp(&tint, 0.35),
            },
            (Some(color), None) | (None, Some(color)) => FallbackView::Solid(color),
            (None, None) => FallbackView::Solid(Color::BLACK),
        }
    }
}

/// What the host's container is currently showing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HostView {
    Empty,
    Animated { theme: ThemeId },
    Fallback(FallbackView),
}

impl HostView {
    pub fn is_fallback(&self) -> bool {
        matches!(self, HostView::Fallback(_))
    }
}
