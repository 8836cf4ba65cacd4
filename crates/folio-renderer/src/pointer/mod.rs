//! Pointer input tracking: smoothing, idle detection, normalization.

mod tracker;
mod types;

pub use tracker::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::Rect;

    fn settings() -> PointerSettings {
        PointerSettings {
            damping: 0.2,
            idle_timeout_ms: 1_000.0,
            snap_epsilon: 0.05,
        }
    }

    fn tracker() -> PointerTracker {
        let mut tracker = PointerTracker::new(settings());
        tracker.subscribe(Rect::new(0.0, 0.0, 200.0, 100.0));
        tracker
    }

    fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
        (a.0 - b.0).hypot(a.1 - b.1)
    }

    #[test]
    fn full_damping_from_config_still_smooths() {
        let config = folio_config::schema::PointerConfig {
            damping: 1.0,
            ..Default::default()
        };
        let settings = PointerSettings::from_config(&config);
        assert!(settings.damping < 1.0);

        let mut tracker = PointerTracker::new(settings);
        tracker.subscribe(Rect::new(0.0, 0.0, 200.0, 100.0));
        tracker.record(PointerEvent::new(200.0, 50.0, 0.0));
        let target = tracker.target().unwrap();
        let current = tracker.current().unwrap();
        assert!(distance(current, target) > 1.0);
    }

    #[test]
    fn samples_ignored_until_subscribed() {
        let mut tracker = PointerTracker::new(settings());
        assert!(!tracker.record(PointerEvent::new(10.0, 10.0, 0.0)));
        assert!(tracker.current().is_none());
    }

    #[test]
    fn sample_sets_target_but_damps_current() {
        let mut tracker = tracker();
        tracker.record(PointerEvent::new(200.0, 50.0, 0.0));
        assert_eq!(tracker.target(), Some((200.0, 50.0)));
        // Starts from the container center (100, 50) and covers 20%.
        let (x, y) = tracker.current().unwrap();
        assert!((x - 120.0).abs() < 1e-9);
        assert!((y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn smoothing_converges_strictly() {
        let mut tracker = tracker();
        let samples = [(150.0, 20.0), (160.0, 30.0), (40.0, 90.0), (45.0, 80.0)];
        for (i, (x, y)) in samples.into_iter().enumerate() {
            tracker.record(PointerEvent::new(x, y, i as f64 * 16.0));
            let current = tracker.current().unwrap();
            assert_ne!(current, (x, y), "a single sample must not reach its target");
        }

        let target = tracker.target().unwrap();
        let mut previous = distance(tracker.current().unwrap(), target);
        let mut snapped = false;
        for frame in 0..200 {
            tracker.update(64.0 + frame as f64);
            let current = tracker.current().unwrap();
            let d = distance(current, target);
            if current == target {
                // Only ever reached through the epsilon snap.
                assert!(previous <= settings().snap_epsilon);
                snapped = true;
                break;
            }
            assert!(d < previous);
            previous = d;
        }
        assert!(snapped);
    }

    #[test]
    fn idle_timeout_resets_to_center() {
        let mut tracker = tracker();
        let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
        tracker.record(PointerEvent::new(190.0, 10.0, 0.0));
        assert!(tracker.is_active(500.0));
        tracker.update(500.0);
        assert!(tracker.position(bounds, Normalization::Unit).is_some());

        tracker.update(1_500.0);
        assert!(!tracker.is_active(1_500.0));
        assert!(tracker.current().is_none());
        assert_eq!(tracker.position_or_center(bounds, Normalization::Signed), [0.0, 0.0]);
        assert_eq!(tracker.position_or_center(bounds, Normalization::Unit), [0.5, 0.5]);
    }

    #[test]
    fn normalization_uses_bounds_at_read_time() {
        let mut tracker = tracker();
        for i in 0..200 {
            tracker.record(PointerEvent::new(150.0, 75.0, i as f64));
        }
        let small = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(tracker.position(small, Normalization::Unit), Some([0.75, 0.75]));
        assert_eq!(tracker.position(small, Normalization::Signed), Some([0.5, -0.5]));

        // Same sample, container moved and grown.
        let moved = Rect::new(50.0, 25.0, 400.0, 200.0);
        assert_eq!(tracker.position(moved, Normalization::Unit), Some([0.25, 0.25]));
    }

    #[test]
    fn positions_outside_bounds_are_clamped() {
        let mut tracker = tracker();
        for i in 0..200 {
            tracker.record(PointerEvent::new(-500.0, 900.0, i as f64));
        }
        let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(tracker.position(bounds, Normalization::Signed), Some([-1.0, -1.0]));
    }

    #[test]
    fn non_finite_samples_ignored() {
        let mut tracker = tracker();
        assert!(!tracker.record(PointerEvent::new(f64::NAN, 1.0, 0.0)));
        assert!(tracker.current().is_none());
    }

    #[test]
    fn unsubscribe_forgets_samples() {
        let mut tracker = tracker();
        tracker.record(PointerEvent::new(10.0, 10.0, 0.0));
        tracker.unsubscribe();
        tracker.unsubscribe();
        assert!(!tracker.is_subscribed());
        assert!(tracker.current().is_none());
        assert!(!tracker.record(PointerEvent::new(10.0, 10.0, 1.0)));
    }

    #[test]
    fn view_reports_presence_and_activity() {
        let mut tracker = tracker();
        let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(tracker.view(bounds, 0.0), PointerView::centered());
        tracker.record(PointerEvent::new(100.0, 50.0, 0.0));
        let view = tracker.view(bounds, 10.0);
        assert!(view.present);
        assert!(view.active);
        assert_eq!(view.unit, [0.5, 0.5]);
    }
}
