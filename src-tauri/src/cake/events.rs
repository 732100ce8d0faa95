//! Typesafe events emitted to the webview.
//!
//! The frontend is a pure renderer: it plays whatever stage it is told and
//! never decides timing or ordering itself. Every visual or audible change
//! on the cake page is driven by one of these events.

use serde::{Deserialize, Serialize};

/// The cake page entered a new visual stage.
#[derive(Debug, Clone, Serialize, Deserialize, specta::Type, tauri_specta::Event)]
#[serde(tag = "stage", rename_all = "camelCase")]
pub enum CakeStageChanged {
    /// Intro finished; the flame is lit and waiting.
    #[serde(rename = "blowReady")]
    BlowReady,
    /// A blow registered; play the flame-out visual.
    #[serde(rename = "candleOut")]
    CandleOut,
    /// Flame settled; confetti and the first speech bubble.
    #[serde(rename = "celebration")]
    Celebration,
    /// The second speech bubble was revealed by a tap.
    #[serde(rename = "secondBubble")]
    SecondBubble,
    /// Exit gestures are armed.
    #[serde(rename = "exitArmed")]
    ExitArmed,
    /// Exit transition started.
    #[serde(rename = "exiting")]
    Exiting,
}

/// Audio cue for the frontend's players.
///
/// The fade curve itself runs in the frontend; Rust only decides when each
/// cue fires and with which parameters.
#[derive(Debug, Clone, Serialize, Deserialize, specta::Type, tauri_specta::Event)]
#[serde(tag = "cue", rename_all = "camelCase")]
pub enum PlaybackCue {
    /// Pause the background track immediately.
    PauseBackground,
    /// Play the blow sound effect once.
    PlayBlowEffect,
    /// Resume the background track at `from` volume and step it up to `to`.
    FadeBackground {
        from: f32,
        to: f32,
        #[serde(rename = "durationMs")]
        duration_ms: u32,
        steps: u32,
    },
}

/// Ask the router to navigate to another page.
#[derive(Debug, Clone, Serialize, Deserialize, specta::Type, tauri_specta::Event)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRequested {
    pub target: String,
}
