mod blow;
mod cake;
mod commands;
mod gift;
mod logging;
mod progress;
mod setup;
pub mod specta;

pub fn run() {
    tauri::Builder::default()
        .plugin(logging::create_plugin().build())
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(crate::with_commands!(tauri::generate_handler))
        .setup(|app| setup::setup_app(app))
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
