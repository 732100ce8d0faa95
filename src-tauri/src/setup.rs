use log::info;
use std::sync::Arc;
use tauri::Manager;
use tauri_plugin_store::StoreExt;
use tokio::sync::mpsc;

use crate::cake::{CakeCommand, Controller};
use crate::gift::GiftQuiz;
use crate::progress::{ProgressTracker, StoreBackend};
use crate::specta;

/// Sender the IPC commands use to reach the cake controller.
pub struct CakeCommandSender {
    pub sender: mpsc::Sender<CakeCommand>,
}

pub fn setup_app(app: &mut tauri::App<tauri::Wry>) -> Result<(), Box<dyn std::error::Error>> {
    info!("Candela v{}", env!("CARGO_PKG_VERSION"));

    // Setup Specta for type-safe TypeScript bindings and event emission
    specta::setup(app.handle());

    // Load persisted progress; a missing or corrupt entry starts fresh
    let store = app.store("progress.json")?;
    let progress = Arc::new(ProgressTracker::load(StoreBackend::new(store)));
    let record = progress.snapshot();
    info!(
        "Progress loaded: started={} cake={} gift={}",
        record.has_started, record.cake_completed, record.gift_unlocked
    );

    // Create channel for cake page commands (IPC layer → Controller)
    let (command_tx, command_rx) = mpsc::channel::<CakeCommand>(64);

    let controller = Controller::new(
        command_rx,
        command_tx.clone(),
        app.app_handle().clone(),
        Arc::clone(&progress),
    );

    // Spawn controller in blocking thread (cpal::Stream is not Send)
    std::thread::spawn(move || {
        controller.run();
    });

    app.manage(CakeCommandSender { sender: command_tx });
    app.manage(progress);
    app.manage(GiftQuiz::new());

    Ok(())
}
