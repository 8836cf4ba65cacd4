use folio_common::Rect;

use super::types::{Normalization, PointerEvent, PointerSettings, PointerView};

/// Smoothed pointer signal scoped to one container.
///
/// Positions are stored in client pixels and normalized against the
/// container bounds only when read. Each sample moves the target
/// immediately and the current position one damped step toward it;
/// [`update`](Self::update) takes a further step per frame.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    settings: PointerSettings,
    target: Option<(f64, f64)>,
    current: Option<(f64, f64)>,
    last_move: Option<f64>,
    rest: (f64, f64),
    subscribed: bool,
}

impl PointerTracker {
    pub fn new(settings: PointerSettings) -> Self {
        Self {
            settings,
            target: None,
            current: None,
            last_move: None,
            rest: (0.0, 0.0),
            subscribed: false,
        }
    }

    /// Start listening. Smoothing of the first sample starts from the
    /// center of `bounds`.
    pub fn subscribe(&mut self, bounds: Rect) {
        self.subscribed = true;
        self.rest = bounds.center();
    }

    /// Stop listening and forget every sample. Idempotent.
    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
        self.reset();
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Feed a pointer-move sample. Returns `false` if it was ignored.
    pub fn record(&mut self, event: PointerEvent) -> bool {
        if !self.subscribed || !event.client_x.is_finite() || !event.client_y.is_finite() {
            return false;
        }
        let target = (event.client_x, event.client_y);
        let from = self.current.unwrap_or(self.rest);
        self.target = Some(target);
        self.current = Some(self.step(from, target));
        self.last_move = Some(event.timestamp);
        true
    }

    /// Per-frame advance. Past the idle timeout the signal resets to
    /// nothing, which reads as the neutral center.
    pub fn update(&mut self, now: f64) {
        if let Some(last) = self.last_move {
            if now - last > self.settings.idle_timeout_ms {
                self.reset();
                return;
            }
        }
        if let (Some(current), Some(target)) = (self.current, self.target) {
            self.current = Some(self.step(current, target));
        }
    }

    fn step(&self, current: (f64, f64), target: (f64, f64)) -> (f64, f64) {
        let dx = target.0 - current.0;
        let dy = target.1 - current.1;
        if dx.hypot(dy) <= self.settings.snap_epsilon {
            return target;
        }
        let k = self.settings.damping;
        (current.0 + dx * k, current.1 + dy * k)
    }

    fn reset(&mut self) {
        self.target = None;
        self.current = None;
        self.last_move = None;
    }

    pub fn is_active(&self, now: f64) -> bool {
        self.last_move
            .is_some_and(|last| now - last <= self.settings.idle_timeout_ms)
    }

    pub fn target(&self) -> Option<(f64, f64)> {
        self.target
    }

    pub fn current(&self) -> Option<(f64, f64)> {
        self.current
    }

    /// Smoothed position normalized against `bounds`, clamped to range.
    pub fn position(&self, bounds: Rect, mode: Normalization) -> Option<[f32; 2]> {
        let (x, y) = self.current?;
        if bounds.is_empty() {
            return None;
        }
        let u = ((x - bounds.x) / bounds.width).clamp(0.0, 1.0) as f32;
        let v = ((y - bounds.y) / bounds.height).clamp(0.0, 1.0) as f32;
        Some(match mode {
            Normalization::Unit => [u, v],
            Normalization::Signed => [u * 2.0 - 1.0, 1.0 - v * 2.0],
        })
    }

    pub fn position_or_center(&self, bounds: Rect, mode: Normalization) -> [f32; 2] {
        self.position(bounds, mode).unwrap_or(mode.center())
    }

    /// Snapshot for one frame.
    pub fn view(&self, bounds: Rect, now: f64) -> PointerView {
        let unit = self.position(bounds, Normalization::Unit);
        PointerView {
            unit: unit.unwrap_or(Normalization::Unit.center()),
            signed: self.position_or_center(bounds, Normalization::Signed),
            present: unit.is_some(),
            active: self.is_active(now),
        }
    }
}
