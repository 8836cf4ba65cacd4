//! Background section validation.

use crate::schema::FolioConfig;
use folio_common::ThemeId;

use super::helpers::{validate_range, validate_range_f64};

/// Validate viewport size and pixel ratio. An unknown theme id is only
/// worth a warning: the registry resolves it to the default animation, and
/// callers may register custom ids after loading.
pub(crate) fn validate_background(errors: &mut Vec<String>, config: &FolioConfig) {
    let bg = &config.background;
    validate_range(errors, "background.width", bg.width, 1, 8192);
    validate_range(errors, "background.height", bg.height, 1, 8192);
    validate_range_f64(errors, "background.pixel_ratio", bg.pixel_ratio, 0.5, 4.0);

    if ThemeId::from_id(&bg.theme).is_none() {
        tracing::warn!(
            theme = %bg.theme,
            fallback = %ThemeId::default(),
            "background.theme is not a built-in theme"
        );
    }
}
