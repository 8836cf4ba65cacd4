//! Animation clock and pointer tracking configuration types.

use serde::{Deserialize, Serialize};

/// Frame clock settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Multiplier applied to wall-clock time before it reaches the animation.
    pub time_scale: f64,
    /// Elapsed seconds reported to the single frame rendered in reduced-motion mode.
    pub static_elapsed: f64,
    /// Simulated display refresh rate used by the CLI driver.
    pub frame_rate: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            static_elapsed: 0.0,
            frame_rate: 60,
        }
    }
}

/// Largest accepted `pointer.damping`. At 1.0 a single sample would land
/// on the target with no smoothing at all.
pub const MAX_POINTER_DAMPING: f64 = 0.95;

/// Pointer smoothing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Fraction of the remaining distance covered per update (0.01-0.95).
    pub damping: f64,
    /// Milliseconds without pointer events before the tracker goes idle.
    pub idle_timeout_ms: u32,
    /// Distance in CSS pixels under which the smoothed position snaps to the target.
    pub snap_epsilon: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            damping: 0.12,
            idle_timeout_ms: 1500,
            snap_epsilon: 0.05,
        }
    }
}
