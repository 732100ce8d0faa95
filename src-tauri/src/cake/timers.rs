use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;

use super::commands::CakeCommand;

/// One-shot timer scheduler for a single page session.
///
/// Each scheduled command races its delay against the session token; on
/// cancellation the command is simply never delivered. A cancelled token
/// stays cancelled, so each page session gets a fresh scheduler.
pub struct Timers {
    token: CancellationToken,
    tx: Sender<CakeCommand>,
}

impl Timers {
    pub fn new(tx: Sender<CakeCommand>) -> Self {
        Self {
            token: CancellationToken::new(),
            tx,
        }
    }

    /// Deliver `command` to the controller after `delay`, unless the
    /// session is cancelled first.
    pub fn schedule(&self, delay: Duration, command: CakeCommand) {
        let token = self.token.child_token();
        let tx = self.tx.clone();

        tauri::async_runtime::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if tx.send(command).await.is_err() {
                        log::debug!("Timer fired after the controller shut down");
                    }
                }
            }
        });
    }

    /// Cancel every pending timer of this session.
    pub fn cancel_all(&self) {
        self.token.cancel();
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn scheduled_command_is_delivered() {
        let (tx, mut rx) = mpsc::channel(8);
        let timers = Timers::new(tx);

        timers.schedule(Duration::from_millis(10), CakeCommand::IntroElapsed);

        let command = rx.recv().await.expect("command should arrive");
        assert!(matches!(command, CakeCommand::IntroElapsed));
    }

    #[tokio::test]
    async fn cancel_all_suppresses_pending_timers() {
        let (tx, mut rx) = mpsc::channel(8);
        let timers = Timers::new(tx);

        timers.schedule(Duration::from_millis(20), CakeCommand::IntroElapsed);
        timers.schedule(Duration::from_millis(20), CakeCommand::ArmMonitor);
        timers.cancel_all();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn timers_fire_in_offset_order() {
        let (tx, mut rx) = mpsc::channel(8);
        let timers = Timers::new(tx);

        timers.schedule(Duration::from_millis(40), CakeCommand::IntroElapsed);
        timers.schedule(Duration::from_millis(10), CakeCommand::ArmMonitor);

        let first = rx.recv().await.expect("first command");
        assert!(matches!(first, CakeCommand::ArmMonitor));
        let second = rx.recv().await.expect("second command");
        assert!(matches!(second, CakeCommand::IntroElapsed));
    }

    #[tokio::test]
    async fn drop_cancels_pending_timers() {
        let (tx, mut rx) = mpsc::channel(8);
        {
            let timers = Timers::new(tx);
            timers.schedule(Duration::from_millis(20), CakeCommand::IntroElapsed);
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
    }
}
