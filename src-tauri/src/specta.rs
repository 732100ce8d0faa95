use tauri_specta::{collect_events, Builder};

use crate::cake::events::{CakeStageChanged, NavigationRequested, PlaybackCue};

/// Builder over every command and event crossing the IPC boundary.
fn builder() -> Builder<tauri::Wry> {
    Builder::<tauri::Wry>::new()
        .commands(crate::with_commands!(tauri_specta::collect_commands))
        .events(collect_events![
            CakeStageChanged,
            PlaybackCue,
            NavigationRequested
        ])
}

/// Export the TypeScript bindings for the frontend.
pub fn export_typescript(
    path: impl AsRef<std::path::Path>,
) -> Result<(), specta_typescript::ExportError> {
    builder().export(specta_typescript::Typescript::default(), path)
}

/// Wire up Specta: export TypeScript bindings in debug builds and mount
/// the event system.
pub fn setup(app_handle: &tauri::AppHandle) {
    #[cfg(debug_assertions)]
    if let Err(e) = export_typescript("../src/bindings.ts") {
        log::error!("Failed to export TypeScript bindings: {}", e);
    }

    builder().mount_events(app_handle);
}
