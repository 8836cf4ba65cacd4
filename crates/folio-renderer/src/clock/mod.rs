//! Frame scheduling with explicit tokens, and the per-animation clock.

mod driver;
mod scheduler;

pub use driver::*;
pub use scheduler::*;

#[cfg(test)]
mod tests {
    use super::*;

    /// Drain the queue once, feeding every token to the clock.
    fn pump(clock: &mut AnimationClock, queue: &mut FrameQueue, now: f64) -> Vec<FrameTime> {
        let mut frames = Vec::new();
        for token in queue.take_due() {
            if let Some(time) = clock.begin_frame(token, now) {
                frames.push(time);
                clock.finish_frame(queue);
            }
        }
        frames
    }

    #[test]
    fn continuous_clock_reschedules_each_frame() {
        let mut queue = FrameQueue::new();
        let mut clock = AnimationClock::new(ClockMode::Continuous, 1.0, 0.0);
        clock.start(1_000.0, &mut queue);
        assert_eq!(queue.pending(), 1);

        for i in 1..=5 {
            let frames = pump(&mut clock, &mut queue, 1_000.0 + i as f64 * 16.0);
            assert_eq!(frames.len(), 1);
            assert_eq!(queue.pending(), 1);
        }
        assert_eq!(clock.frames(), 5);
        assert_eq!(queue.requested(), 6);
    }

    #[test]
    fn elapsed_is_scaled_wall_clock_seconds() {
        let mut queue = FrameQueue::new();
        let mut clock = AnimationClock::new(ClockMode::Continuous, 0.5, 0.0);
        clock.start(2_000.0, &mut queue);
        let frames = pump(&mut clock, &mut queue, 4_000.0);
        assert!((frames[0].elapsed - 1.0).abs() < 1e-9);
        assert_eq!(frames[0].index, 0);
    }

    #[test]
    fn delta_is_clamped() {
        let mut queue = FrameQueue::new();
        let mut clock = AnimationClock::new(ClockMode::Continuous, 1.0, 0.0);
        clock.start(0.0, &mut queue);
        let frames = pump(&mut clock, &mut queue, 16.0);
        assert!((frames[0].delta - 0.016).abs() < 1e-9);
        let frames = pump(&mut clock, &mut queue, 60_000.0);
        assert_eq!(frames[0].delta, MAX_FRAME_DELTA);
    }

    #[test]
    fn static_clock_renders_once() {
        let mut queue = FrameQueue::new();
        let mut clock = AnimationClock::new(ClockMode::Static, 1.0, 2.5);
        clock.start(0.0, &mut queue);

        let mut rendered = Vec::new();
        for i in 0..10 {
            rendered.extend(pump(&mut clock, &mut queue, i as f64 * 16.0));
        }
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].elapsed, 2.5);
        assert_eq!(rendered[0].delta, 0.0);
        assert_eq!(queue.requested(), 1);
        assert!(!clock.is_running());
    }

    #[test]
    fn cancel_makes_queued_token_stale() {
        let mut queue = FrameQueue::new();
        let mut clock = AnimationClock::new(ClockMode::Continuous, 1.0, 0.0);
        clock.start(0.0, &mut queue);
        let token = clock.outstanding().unwrap();

        // Another scheduler that does not honour cancellation still
        // delivers the old token.
        let mut ignorant = FrameQueue::new();
        clock.cancel(&mut ignorant);
        assert!(clock.begin_frame(token, 16.0).is_none());
        assert!(queue.is_pending(token));
        assert_eq!(pump(&mut clock, &mut queue, 32.0).len(), 0);
    }

    #[test]
    fn cancel_withdraws_request() {
        let mut queue = FrameQueue::new();
        let mut clock = AnimationClock::new(ClockMode::Continuous, 1.0, 0.0);
        clock.start(0.0, &mut queue);
        clock.cancel(&mut queue);
        clock.cancel(&mut queue);
        assert_eq!(queue.pending(), 0);
        assert_eq!(queue.cancelled(), 1);
        assert!(clock.outstanding().is_none());
    }

    #[test]
    fn duplicate_token_is_ignored() {
        let mut queue = FrameQueue::new();
        let mut clock = AnimationClock::new(ClockMode::Continuous, 1.0, 0.0);
        clock.start(0.0, &mut queue);
        let token = clock.outstanding().unwrap();
        assert!(clock.begin_frame(token, 16.0).is_some());
        assert!(clock.begin_frame(token, 16.0).is_none());
    }

    #[test]
    fn start_twice_keeps_single_token() {
        let mut queue = FrameQueue::new();
        let mut clock = AnimationClock::new(ClockMode::Continuous, 1.0, 0.0);
        clock.start(0.0, &mut queue);
        clock.start(5.0, &mut queue);
        assert_eq!(queue.pending(), 1);
    }
}
