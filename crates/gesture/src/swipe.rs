use std::time::{Duration, Instant};

/// Minimum displacement (in logical pixels) for a touch to count as a swipe.
pub const MIN_SWIPE_DISTANCE: f64 = 50.0;

/// Minimum velocity (pixels per millisecond) for a short flick to qualify.
pub const MIN_SWIPE_VELOCITY: f64 = 0.5;

/// A touch position in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

/// A completed touch gesture with its measured displacement and velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    /// Straight-line displacement between touch start and touch end, in pixels.
    pub distance: f64,
    /// Displacement over elapsed time, in pixels per millisecond.
    pub velocity: f64,
}

impl Swipe {
    /// Whether this gesture is deliberate enough to act on.
    ///
    /// A long drag qualifies by distance alone; a short flick qualifies by
    /// velocity. Either is enough.
    pub fn qualifies(&self) -> bool {
        self.distance > MIN_SWIPE_DISTANCE || self.velocity > MIN_SWIPE_VELOCITY
    }
}

/// Tracks one in-flight touch at a time.
///
/// `begin` records the touch-down position and timestamp; `end` measures the
/// gesture. Ending without a matching begin returns `None`, as does a second
/// `end` in a row, so callers don't have to guard against out-of-order
/// touch events.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<(TouchPoint, Instant)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of a touch. Replaces any unfinished touch.
    pub fn begin(&mut self, point: TouchPoint) {
        self.start = Some((point, Instant::now()));
    }

    /// Complete the touch and measure the gesture, if one was in flight.
    pub fn end(&mut self, point: TouchPoint) -> Option<Swipe> {
        let (start, started_at) = self.start.take()?;
        let swipe = classify(start, point, started_at.elapsed());
        log::debug!(
            "swipe: distance={:.1}px velocity={:.2}px/ms qualifies={}",
            swipe.distance,
            swipe.velocity,
            swipe.qualifies()
        );
        Some(swipe)
    }

    /// Drop any unfinished touch (e.g. the page is being torn down).
    pub fn reset(&mut self) {
        self.start = None;
    }
}

/// Measure a gesture from its endpoints and duration.
pub fn classify(start: TouchPoint, end: TouchPoint, elapsed: Duration) -> Swipe {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let distance = (dx * dx + dy * dy).sqrt();

    // Clamp to 1ms so an instantaneous event can't divide by zero.
    let elapsed_ms = (elapsed.as_millis() as f64).max(1.0);

    Swipe {
        distance,
        velocity: distance / elapsed_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> TouchPoint {
        TouchPoint { x, y }
    }

    #[test]
    fn long_drag_qualifies_by_distance() {
        // 60px over 50ms: velocity 1.2px/ms, distance 60px - both over threshold
        let swipe = classify(point(0.0, 0.0), point(60.0, 0.0), Duration::from_millis(50));
        assert!((swipe.distance - 60.0).abs() < 1e-9);
        assert!((swipe.velocity - 1.2).abs() < 1e-9);
        assert!(swipe.qualifies());
    }

    #[test]
    fn slow_long_drag_still_qualifies() {
        // 51px over 2 seconds: velocity far below threshold, distance carries it
        let swipe = classify(point(0.0, 0.0), point(0.0, 51.0), Duration::from_millis(2000));
        assert!(swipe.velocity < MIN_SWIPE_VELOCITY);
        assert!(swipe.qualifies());
    }

    #[test]
    fn fast_flick_qualifies_by_velocity() {
        // 30px in 20ms: 1.5px/ms, under the distance threshold
        let swipe = classify(point(0.0, 0.0), point(30.0, 0.0), Duration::from_millis(20));
        assert!(swipe.distance < MIN_SWIPE_DISTANCE);
        assert!(swipe.qualifies());
    }

    #[test]
    fn short_slow_drag_does_not_qualify() {
        let swipe = classify(point(0.0, 0.0), point(10.0, 5.0), Duration::from_millis(300));
        assert!(!swipe.qualifies());
    }

    #[test]
    fn diagonal_distance_is_euclidean() {
        let swipe = classify(point(0.0, 0.0), point(30.0, 40.0), Duration::from_millis(100));
        assert!((swipe.distance - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_does_not_panic() {
        let swipe = classify(point(0.0, 0.0), point(100.0, 0.0), Duration::ZERO);
        assert!(swipe.velocity.is_finite());
        assert!(swipe.qualifies());
    }

    #[test]
    fn end_without_begin_is_none() {
        let mut tracker = SwipeTracker::new();
        assert!(tracker.end(point(10.0, 10.0)).is_none());
    }

    #[test]
    fn end_consumes_the_touch() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(point(0.0, 0.0));
        assert!(tracker.end(point(80.0, 0.0)).is_some());
        assert!(tracker.end(point(160.0, 0.0)).is_none());
    }

    #[test]
    fn reset_drops_in_flight_touch() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(point(0.0, 0.0));
        tracker.reset();
        assert!(tracker.end(point(80.0, 0.0)).is_none());
    }
}
