//! Background selection and viewport configuration types.

use folio_common::Section;
use serde::{Deserialize, Serialize};

/// Which animated background to mount and on what surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Theme identifier (e.g. "aurora"). Unknown ids fall back to the default theme.
    pub theme: String,
    /// Page section whose palette variant is used.
    pub section: Section,
    /// Render a single static frame instead of animating.
    pub reduced_motion: bool,
    /// Layout width in CSS pixels.
    pub width: u32,
    /// Layout height in CSS pixels.
    pub height: u32,
    /// Device pixel ratio applied to the backing buffer.
    pub pixel_ratio: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            theme: "starfield".into(),
            section: Section::All,
            reduced_motion: false,
            width: 1280,
            height: 720,
            pixel_ratio: 1.0,
        }
    }
}
