use candela_gesture::TouchPoint;

/// Commands for driving the cake page session
/// These are sent through channels (NOT Tauri events) for zero-overhead internal communication
///
/// Page lifecycle and raw touch positions are handled by the controller
/// itself; the rest map onto state machine events once the controller has
/// resolved them (e.g. a touch release only becomes a Swipe event if the
/// gesture qualifies).
#[derive(Debug, Clone)]
pub enum CakeCommand {
    /// The cake page mounted; start a fresh session
    Enter,
    /// The cake page is being torn down; cancel timers, release the monitor
    Leave,
    /// Screen tap
    Tap,
    /// Touch down at a position
    TouchStart(TouchPoint),
    /// Touch up at a position
    TouchEnd(TouchPoint),
    /// Pointer movement
    PointerMove,

    // Internal ticks, scheduled by the controller
    /// Mascot intro has played out (5.6s after Enter)
    IntroElapsed,
    /// Arm the blow monitor (4.6s after Enter, ahead of the state change)
    ArmMonitor,
    /// The monitor latched a loud frame
    BlowDetected,
    /// Flame-out visual has settled (0.4s after the blow)
    FlameSettled,
    /// Arm pointer-hover exit detection (1.0s after the second bubble)
    HoverArmDue,
    /// Arm swipe exit detection (2.0s after the second bubble)
    SwipeArmDue,
    /// Resume the background track quietly and fade it back up (5.0s after the blow)
    FadeBackgroundDue,
    /// Exit transition finished; hand off to the router (0.96s after the gesture)
    NavigateDue,
}
