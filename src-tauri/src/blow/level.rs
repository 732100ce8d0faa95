//! Loudness measurement for the blow detector.
//!
//! The capture callback feeds normalized samples into a rolling window; the
//! sampler reads the most recent full window once per display frame and
//! compares its RMS against a fixed threshold. A one-shot latch guarantees
//! the crossing fires at most once per session.

use std::collections::VecDeque;

/// Analysis window size in samples, matching the 256-bin capture buffer.
pub const ANALYSIS_WINDOW: usize = 256;

/// RMS loudness above which a frame counts as a blow.
///
/// Samples are normalized to [-1, 1]; normal room noise sits well below
/// this, a direct breath onto the microphone comfortably above.
pub const BLOW_RMS_THRESHOLD: f32 = 0.07;

/// Root-mean-square amplitude of a window of normalized samples.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_of_squares: f32 = samples.iter().map(|&s| s * s).sum();
    (sum_of_squares / samples.len() as f32).sqrt()
}

/// Rolling buffer that keeps the most recent `capacity` samples.
#[derive(Debug)]
pub struct SampleWindow {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append samples, discarding the oldest beyond capacity.
    pub fn extend(&mut self, samples: &[f32]) {
        for &sample in samples {
            if self.samples.len() == self.capacity {
                self.samples.pop_front();
            }
            self.samples.push_back(sample);
        }
    }

    /// A copy of the current window, or `None` until it has filled once.
    pub fn snapshot(&self) -> Option<Vec<f32>> {
        if self.samples.len() < self.capacity {
            return None;
        }
        Some(self.samples.iter().copied().collect())
    }
}

/// One-shot threshold latch.
///
/// `check` reports a crossing only the first time the level exceeds the
/// threshold; after that the latch stays closed for the session.
#[derive(Debug, Default)]
pub struct BlowLatch {
    triggered: bool,
}

impl BlowLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// Returns true exactly once: on the first level above the threshold.
    pub fn check(&mut self, level: f32) -> bool {
        if self.triggered || level <= BLOW_RMS_THRESHOLD {
            return false;
        }
        self.triggered = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_of_silence_is_zero() {
        assert_eq!(rms(&[0.0; 256]), 0.0);
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn rms_of_constant_amplitude() {
        let window = vec![0.5; 256];
        assert!((rms(&window) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rms_of_full_scale_square_wave() {
        let window: Vec<f32> = (0..256)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        assert!((rms(&window) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rms_is_sign_independent() {
        let positive = vec![0.3; 128];
        let negative = vec![-0.3; 128];
        assert!((rms(&positive) - rms(&negative)).abs() < 1e-6);
    }

    #[test]
    fn window_reports_nothing_until_full() {
        let mut window = SampleWindow::new(4);
        window.extend(&[0.1, 0.2, 0.3]);
        assert!(window.snapshot().is_none());

        window.extend(&[0.4]);
        assert_eq!(window.snapshot(), Some(vec![0.1, 0.2, 0.3, 0.4]));
    }

    #[test]
    fn window_keeps_only_the_latest_samples() {
        let mut window = SampleWindow::new(4);
        window.extend(&[0.1, 0.2, 0.3, 0.4]);
        window.extend(&[0.5, 0.6]);
        assert_eq!(window.snapshot(), Some(vec![0.3, 0.4, 0.5, 0.6]));
    }

    #[test]
    fn latch_stays_closed_below_threshold() {
        let mut latch = BlowLatch::new();
        for _ in 0..100 {
            assert!(!latch.check(0.05));
        }
        assert!(!latch.triggered());
    }

    #[test]
    fn latch_ignores_exact_threshold() {
        let mut latch = BlowLatch::new();
        assert!(!latch.check(BLOW_RMS_THRESHOLD));
    }

    #[test]
    fn latch_fires_exactly_once() {
        let mut latch = BlowLatch::new();
        assert!(latch.check(0.09));
        assert!(latch.triggered());

        // Louder samples afterwards are no-ops
        assert!(!latch.check(0.5));
        assert!(!latch.check(0.09));
    }

    #[test]
    fn quiet_window_then_loud_window_crosses_once() {
        let mut latch = BlowLatch::new();

        let quiet = vec![0.02; ANALYSIS_WINDOW];
        assert!(!latch.check(rms(&quiet)));

        let loud = vec![0.09; ANALYSIS_WINDOW];
        assert!(latch.check(rms(&loud)));
        assert!(!latch.check(rms(&loud)));
    }
}
