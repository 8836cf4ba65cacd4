use folio_config::schema::{PointerConfig, MAX_POINTER_DAMPING};

/// A raw pointer-move sample in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    /// Event time in milliseconds, on the same timeline as frame timestamps.
    pub timestamp: f64,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64, timestamp: f64) -> Self {
        Self {
            client_x,
            client_y,
            timestamp,
        }
    }
}

/// Coordinate range a normalized position is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// `[0, 1]` on both axes, y pointing down.
    Unit,
    /// `[-1, 1]` on both axes, y pointing up.
    Signed,
}

impl Normalization {
    pub fn center(self) -> [f32; 2] {
        match self {
            Normalization::Unit => [0.5, 0.5],
            Normalization::Signed => [0.0, 0.0],
        }
    }
}

const MIN_DAMPING: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSettings {
    /// Fraction of the remaining distance covered per step.
    pub damping: f64,
    pub idle_timeout_ms: f64,
    /// Distance in CSS pixels under which the position snaps to the target.
    pub snap_epsilon: f64,
}

impl PointerSettings {
    /// Damping is clamped into `[MIN_DAMPING, MAX_POINTER_DAMPING]` so a
    /// step never lands on the target except through the epsilon snap.
    pub fn from_config(config: &PointerConfig) -> Self {
        Self {
            damping: config.damping.clamp(MIN_DAMPING, MAX_POINTER_DAMPING),
            idle_timeout_ms: config.idle_timeout_ms as f64,
            snap_epsilon: config.snap_epsilon.max(0.0),
        }
    }
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self::from_config(&PointerConfig::default())
    }
}

/// What an animation sees of the pointer on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerView {
    pub unit: [f32; 2],
    pub signed: [f32; 2],
    /// A smoothed position exists (some sample since the last idle reset).
    pub present: bool,
    /// The pointer moved within the idle timeout.
    pub active: bool,
}

impl PointerView {
    pub fn centered() -> Self {
        Self {
            unit: Normalization::Unit.center(),
            signed: Normalization::Signed.center(),
            present: false,
            active: false,
        }
    }
}
