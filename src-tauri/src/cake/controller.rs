use std::sync::Arc;
use std::time::Duration;
use tauri_specta::Event;
use tokio::sync::mpsc::{Receiver, Sender};

use candela_gesture::SwipeTracker;

use crate::blow::{BlowMonitor, BlowSession};
use crate::cake::events::{CakeStageChanged, NavigationRequested, PlaybackCue};
use crate::cake::{
    CakeAction, CakeCommand, CakeEvent, CakeState, CakeStateMachine, Timers, TransitionResult,
};
use crate::progress::{Progress, ProgressField};

/// Mascot intro length.
const INTRO_DURATION: Duration = Duration::from_millis(5600);
/// The monitor arms a second before the intro timer: the black screen has
/// faded by then and an eager blow should already count.
const MONITOR_ARM_OFFSET: Duration = Duration::from_millis(4600);
/// Flame-out visual length.
const FLAME_SETTLE: Duration = Duration::from_millis(400);
/// Hover exit arms this long after the second bubble.
const HOVER_ARM_DELAY: Duration = Duration::from_millis(1000);
/// Swipe exit arms this long after the second bubble.
const SWIPE_ARM_DELAY: Duration = Duration::from_millis(2000);
/// Exit transition length before the router handoff.
const EXIT_NAVIGATION_DELAY: Duration = Duration::from_millis(960);
/// Background track resumes this long after the blow.
const FADE_CUE_DELAY: Duration = Duration::from_millis(5000);

const FADE_FROM_VOLUME: f32 = 0.15;
const FADE_TO_VOLUME: f32 = 0.3;
const FADE_DURATION_MS: u32 = 2000;
const FADE_STEPS: u32 = 40;

const EXIT_TARGET: &str = "hub";

/// Everything that exists only while the cake page is mounted.
struct Session {
    machine: CakeStateMachine,
    timers: Timers,
    monitor: Option<BlowSession>,
    touch: SwipeTracker,
}

/// Drives the cake page: owns the state machine, the timers, and the live
/// microphone session for the duration of a page visit.
pub struct Controller {
    command_rx: Receiver<CakeCommand>,
    command_tx: Sender<CakeCommand>,
    app_handle: tauri::AppHandle,
    progress: Arc<Progress>,
}

impl Controller {
    pub fn new(
        command_rx: Receiver<CakeCommand>,
        command_tx: Sender<CakeCommand>,
        app_handle: tauri::AppHandle,
        progress: Arc<Progress>,
    ) -> Self {
        Self {
            command_rx,
            command_tx,
            app_handle,
            progress,
        }
    }

    /// Main control loop - consumes self, runs in a blocking thread.
    ///
    /// The microphone stream is not `Send`, so the session lives and dies
    /// on this thread.
    pub fn run(mut self) {
        let mut session: Option<Session> = None;

        while let Some(command) = self.command_rx.blocking_recv() {
            match command {
                CakeCommand::Enter => self.handle_enter(&mut session),
                CakeCommand::Leave => self.handle_leave(&mut session),
                CakeCommand::ArmMonitor => self.handle_arm_monitor(&mut session),
                CakeCommand::BlowDetected => self.handle_blow(&mut session),
                CakeCommand::TouchStart(point) => {
                    if let Some(s) = session.as_mut() {
                        s.touch.begin(point);
                    }
                }
                CakeCommand::TouchEnd(point) => self.handle_touch_end(&mut session, point),
                CakeCommand::FadeBackgroundDue => {
                    if session.is_some() {
                        self.emit_cue(PlaybackCue::FadeBackground {
                            from: FADE_FROM_VOLUME,
                            to: FADE_TO_VOLUME,
                            duration_ms: FADE_DURATION_MS,
                            steps: FADE_STEPS,
                        });
                    }
                }
                CakeCommand::Tap => self.dispatch(&mut session, CakeEvent::Tap),
                CakeCommand::PointerMove => self.dispatch(&mut session, CakeEvent::PointerMoved),
                CakeCommand::IntroElapsed => self.dispatch(&mut session, CakeEvent::IntroFinished),
                CakeCommand::FlameSettled => self.dispatch(&mut session, CakeEvent::FlameSettled),
                CakeCommand::HoverArmDue => self.dispatch(&mut session, CakeEvent::HoverArmed),
                CakeCommand::SwipeArmDue => self.dispatch(&mut session, CakeEvent::SwipeArmed),
                CakeCommand::NavigateDue => self.dispatch(&mut session, CakeEvent::NavigationDue),
            }
        }

        // Channel closed: the app is shutting down.
        if let Some(mut s) = session.take() {
            s.timers.cancel_all();
            release_monitor(&mut s);
        }
        log::info!("Cake controller stopped");
    }

    fn handle_enter(&self, session: &mut Option<Session>) {
        if let Some(mut old) = session.take() {
            log::warn!("Cake page re-entered without leaving; resetting session");
            old.timers.cancel_all();
            release_monitor(&mut old);
        }

        let timers = Timers::new(self.command_tx.clone());
        timers.schedule(MONITOR_ARM_OFFSET, CakeCommand::ArmMonitor);
        timers.schedule(INTRO_DURATION, CakeCommand::IntroElapsed);

        *session = Some(Session {
            machine: CakeStateMachine::new(),
            timers,
            monitor: None,
            touch: SwipeTracker::new(),
        });
        log::info!("Cake session started");
    }

    fn handle_leave(&self, session: &mut Option<Session>) {
        if let Some(mut s) = session.take() {
            s.timers.cancel_all();
            release_monitor(&mut s);
            log::info!("Cake session ended in {} state", s.machine.state());
        }
    }

    fn handle_arm_monitor(&self, session: &mut Option<Session>) {
        let Some(s) = session.as_mut() else { return };

        // A very eager blow can't happen before arming, but a re-entered
        // page can race its own stale tick.
        if s.machine.flame_out() || s.monitor.is_some() {
            return;
        }

        let tx = self.command_tx.clone();
        match BlowMonitor::start(move || {
            if tx.blocking_send(CakeCommand::BlowDetected).is_err() {
                log::warn!("Blow detected after the controller shut down");
            }
        }) {
            Ok(monitor) => s.monitor = Some(monitor),
            Err(e) => {
                // Non-fatal: the candle just can't be blown out by voice.
                log::warn!("Microphone unavailable, blow detection disabled: {}", e);
            }
        }
    }

    /// Release the input device before any downstream side effect runs.
    fn handle_blow(&self, session: &mut Option<Session>) {
        if let Some(s) = session.as_mut() {
            release_monitor(s);
        }
        self.dispatch(session, CakeEvent::BlowDetected);
    }

    fn handle_touch_end(&self, session: &mut Option<Session>, point: candela_gesture::TouchPoint) {
        let qualifies = match session.as_mut() {
            Some(s) => s.touch.end(point).is_some_and(|swipe| swipe.qualifies()),
            None => return,
        };

        if qualifies {
            self.dispatch(session, CakeEvent::Swipe);
        }
    }

    fn dispatch(&self, session: &mut Option<Session>, event: CakeEvent) {
        let Some(s) = session.as_mut() else {
            log::debug!("{} ignored: no active cake session", event);
            return;
        };

        self.dispatch_event(s, event);
    }

    fn dispatch_event(&self, session: &mut Session, event: CakeEvent) {
        match session.machine.transition(event) {
            Ok(TransitionResult::Changed { to, action, .. }) => {
                self.emit_stage(to);
                if let Some(action) = action {
                    self.execute_action(session, action);
                }
            }
            Ok(TransitionResult::Unchanged { action }) => {
                if let Some(action) = action {
                    self.execute_action(session, action);
                }
            }
            Err(rejection) => log::warn!("{}", rejection),
        }
    }

    fn execute_action(&self, session: &mut Session, action: CakeAction) {
        match action {
            CakeAction::ExtinguishFlame => {
                // Safety net: the early-blow path releases before dispatch,
                // but the flame can also go out on a re-dispatched event.
                release_monitor(session);
                self.progress.set(ProgressField::CakeCompleted, true);
                self.emit_cue(PlaybackCue::PauseBackground);
                self.emit_cue(PlaybackCue::PlayBlowEffect);
                session
                    .timers
                    .schedule(FLAME_SETTLE, CakeCommand::FlameSettled);
                session
                    .timers
                    .schedule(FADE_CUE_DELAY, CakeCommand::FadeBackgroundDue);
            }
            CakeAction::ShowSecondBubble => {
                self.emit_stage_event(CakeStageChanged::SecondBubble);
                session
                    .timers
                    .schedule(HOVER_ARM_DELAY, CakeCommand::HoverArmDue);
                session
                    .timers
                    .schedule(SWIPE_ARM_DELAY, CakeCommand::SwipeArmDue);
            }
            CakeAction::BeginExit => {
                session
                    .timers
                    .schedule(EXIT_NAVIGATION_DELAY, CakeCommand::NavigateDue);
            }
            CakeAction::Navigate => {
                let event = NavigationRequested {
                    target: EXIT_TARGET.to_string(),
                };
                if let Err(e) = event.emit(&self.app_handle) {
                    log::error!("Failed to emit navigation request: {}", e);
                }
            }
        }
    }

    fn emit_stage(&self, state: CakeState) {
        let event = match state {
            CakeState::Intro => return,
            CakeState::AwaitingBlow => CakeStageChanged::BlowReady,
            CakeState::Extinguishing => CakeStageChanged::CandleOut,
            CakeState::Celebration => CakeStageChanged::Celebration,
            CakeState::AwaitingExit => CakeStageChanged::ExitArmed,
            CakeState::Exiting => CakeStageChanged::Exiting,
        };
        self.emit_stage_event(event);
    }

    fn emit_stage_event(&self, event: CakeStageChanged) {
        if let Err(e) = event.emit(&self.app_handle) {
            log::error!("Failed to emit stage change: {}", e);
        }
    }

    fn emit_cue(&self, cue: PlaybackCue) {
        if let Err(e) = cue.emit(&self.app_handle) {
            log::error!("Failed to emit playback cue: {}", e);
        }
    }
}

/// The single release routine every monitor shutdown path goes through.
fn release_monitor(session: &mut Session) {
    if let Some(mut monitor) = session.monitor.take() {
        monitor.stop();
    }
}
