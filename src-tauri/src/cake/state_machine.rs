//! State machine for the cake page.
//!
//! ```text
//!   Intro ──IntroFinished──> AwaitingBlow ──BlowDetected──> Extinguishing
//!     │                                                          │
//!     └──BlowDetected (early, once the monitor is armed)─────────┤
//!                                                                │
//!                                                           FlameSettled
//!                                                                │
//!                                                                v
//!   Exiting <──Swipe / PointerMoved── AwaitingExit <──arming── Celebration
//!      │                                                (Tap latches the
//!      └──NavigationDue──> router handoff ("hub")        second bubble)
//! ```
//!
//! Progression is strictly forward; there is no path back to an earlier
//! state. Timer events that arrive for a phase the machine has already left
//! are ignored rather than rejected - with one-shot timers racing user
//! input, stale ticks are normal, not bugs.

use serde::{Deserialize, Serialize};

/// Everything that can happen on the cake page, from the machine's point
/// of view. Timers and user input both funnel into this one enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, specta::Type, strum::Display)]
pub enum CakeEvent {
    /// The mascot intro has played out (5.6s after entry).
    IntroFinished,
    /// The microphone latched a loud frame (armed 4.6s after entry).
    BlowDetected,
    /// The flame-out visual has settled (0.4s after the blow).
    FlameSettled,
    /// The user tapped the screen.
    Tap,
    /// Pointer-hover exit detection armed (1.0s after the second bubble).
    HoverArmed,
    /// Swipe exit detection armed (2.0s after the second bubble).
    SwipeArmed,
    /// A qualifying swipe completed.
    Swipe,
    /// The pointer moved.
    PointerMoved,
    /// The exit transition finished (0.96s after the exit gesture).
    NavigationDue,
}

/// Side effects the controller must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CakeAction {
    /// Stop the monitor, persist completion, cue the blow audio.
    ExtinguishFlame,
    /// Reveal the second speech bubble and start the exit arming timers.
    ShowSecondBubble,
    /// Start the exit transition and schedule navigation.
    BeginExit,
    /// Hand off to the router.
    Navigate,
}

/// Phases of the cake page, in narrative order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    specta::Type,
    strum::Display,
)]
pub enum CakeState {
    /// Black overlay fading, mascot speaking.
    Intro,
    /// Flame lit, waiting for a blow.
    AwaitingBlow,
    /// Blow registered, flame-out visual playing.
    Extinguishing,
    /// Confetti; taps can reveal the second bubble.
    Celebration,
    /// At least one exit gesture is armed.
    AwaitingExit,
    /// Exit transition playing, navigation scheduled.
    Exiting,
}

/// Outcome of a successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionResult {
    Changed {
        from: CakeState,
        to: CakeState,
        action: Option<CakeAction>,
    },
    /// The state did not move, but the event may still have latched
    /// something (a tap revealing the bubble, the navigation tick).
    Unchanged { action: Option<CakeAction> },
}

/// An event that cannot occur in the current state.
///
/// Only raised for events that are impossible rather than merely stale,
/// e.g. a navigation tick before any exit began.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{attempted_event} event rejected in {current_state} state")]
pub struct TransitionRejection {
    pub current_state: CakeState,
    pub attempted_event: CakeEvent,
}

/// The cake page machine: current phase plus the one-shot latches that
/// gate repeatable events.
#[derive(Debug)]
pub struct CakeStateMachine {
    state: CakeState,
    flame_out: bool,
    second_bubble_shown: bool,
    swipe_armed: bool,
    hover_armed: bool,
    navigating: bool,
}

impl Default for CakeStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CakeStateMachine {
    pub fn new() -> Self {
        Self {
            state: CakeState::Intro,
            flame_out: false,
            second_bubble_shown: false,
            swipe_armed: false,
            hover_armed: false,
            navigating: false,
        }
    }

    pub fn state(&self) -> CakeState {
        self.state
    }

    pub fn flame_out(&self) -> bool {
        self.flame_out
    }

    pub fn second_bubble_shown(&self) -> bool {
        self.second_bubble_shown
    }

    pub fn swipe_armed(&self) -> bool {
        self.swipe_armed
    }

    pub fn hover_armed(&self) -> bool {
        self.hover_armed
    }

    pub fn navigating(&self) -> bool {
        self.navigating
    }

    /// Feed one event through the machine.
    ///
    /// Stale-but-plausible events return `Unchanged`; impossible events
    /// return a [`TransitionRejection`].
    pub fn transition(
        &mut self,
        event: CakeEvent,
    ) -> Result<TransitionResult, TransitionRejection> {
        let current = self.state;

        let Some((new_state, action)) = compute_transition(self, event) else {
            return Err(TransitionRejection {
                current_state: current,
                attempted_event: event,
            });
        };

        debug_assert!(new_state >= current, "state must never regress");

        self.state = new_state;
        self.apply_latches(event, action);

        if new_state == current {
            Ok(TransitionResult::Unchanged { action })
        } else {
            Ok(TransitionResult::Changed {
                from: current,
                to: new_state,
                action,
            })
        }
    }

    fn apply_latches(&mut self, event: CakeEvent, action: Option<CakeAction>) {
        match event {
            CakeEvent::SwipeArmed => self.swipe_armed = true,
            CakeEvent::HoverArmed => self.hover_armed = true,
            _ => {}
        }

        match action {
            Some(CakeAction::ExtinguishFlame) => self.flame_out = true,
            Some(CakeAction::ShowSecondBubble) => self.second_bubble_shown = true,
            Some(CakeAction::BeginExit) => self.navigating = true,
            _ => {}
        }
    }
}

/// Pure transition table.
///
/// Returns the next state and an optional action, or `None` for an event
/// that is impossible in the current state. A `(current, None)` entry means
/// "plausible but stale or not yet armed: ignore".
fn compute_transition(
    machine: &CakeStateMachine,
    event: CakeEvent,
) -> Option<(CakeState, Option<CakeAction>)> {
    use CakeEvent::*;
    use CakeState::*;

    let current = machine.state;

    match current {
        Intro => match event {
            IntroFinished => Some((AwaitingBlow, None)),
            // The monitor arms a second before the intro timer, so a blow
            // can legitimately land while the mascot is still talking.
            BlowDetected => Some((Extinguishing, Some(CakeAction::ExtinguishFlame))),
            Tap | Swipe | PointerMoved => Some((current, None)),
            FlameSettled | HoverArmed | SwipeArmed | NavigationDue => None,
        },
        AwaitingBlow => match event {
            BlowDetected => Some((Extinguishing, Some(CakeAction::ExtinguishFlame))),
            IntroFinished | Tap | Swipe | PointerMoved => Some((current, None)),
            FlameSettled | HoverArmed | SwipeArmed | NavigationDue => None,
        },
        Extinguishing => match event {
            FlameSettled => Some((Celebration, None)),
            // A stale intro timer or a second latched blow is a no-op.
            IntroFinished | BlowDetected | Tap | Swipe | PointerMoved => Some((current, None)),
            HoverArmed | SwipeArmed | NavigationDue => None,
        },
        Celebration => match event {
            Tap if !machine.second_bubble_shown => {
                Some((current, Some(CakeAction::ShowSecondBubble)))
            }
            Tap => Some((current, None)),
            // Either arming timer moves the page into its exit-ready phase.
            HoverArmed | SwipeArmed => Some((AwaitingExit, None)),
            IntroFinished | BlowDetected | FlameSettled | Swipe | PointerMoved => {
                Some((current, None))
            }
            NavigationDue => None,
        },
        AwaitingExit => match event {
            Swipe if machine.swipe_armed && !machine.navigating => {
                Some((Exiting, Some(CakeAction::BeginExit)))
            }
            PointerMoved if machine.hover_armed && !machine.navigating => {
                Some((Exiting, Some(CakeAction::BeginExit)))
            }
            Swipe | PointerMoved | HoverArmed | SwipeArmed | Tap | IntroFinished
            | BlowDetected | FlameSettled => Some((current, None)),
            NavigationDue => None,
        },
        Exiting => match event {
            NavigationDue => Some((current, Some(CakeAction::Navigate))),
            _ => Some((current, None)),
        },
    }
}
