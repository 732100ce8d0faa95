//! Touch swipe classification.
//!
//! This crate decides whether a touch sequence counts as a deliberate swipe.
//! It is deliberately tiny: the caller reports where a touch started and
//! where it ended, and gets back the displacement and velocity of the
//! gesture so it can be matched against the exit thresholds.
//!
//! # Example
//!
//! ```
//! use candela_gesture::{SwipeTracker, TouchPoint};
//!
//! let mut tracker = SwipeTracker::new();
//! tracker.begin(TouchPoint { x: 100.0, y: 300.0 });
//! if let Some(swipe) = tracker.end(TouchPoint { x: 180.0, y: 310.0 }) {
//!     if swipe.qualifies() {
//!         // navigate away
//!     }
//! }
//! ```

mod swipe;

pub use swipe::{Swipe, SwipeTracker, TouchPoint, MIN_SWIPE_DISTANCE, MIN_SWIPE_VELOCITY};
