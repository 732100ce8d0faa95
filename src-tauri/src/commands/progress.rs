use std::sync::Arc;
use tauri::State;

use crate::progress::{Progress, ProgressField, ProgressRecord};

#[tauri::command]
#[specta::specta]
pub fn load_progress(progress: State<Arc<Progress>>) -> ProgressRecord {
    progress.snapshot()
}

#[tauri::command]
#[specta::specta]
pub fn update_progress(field: ProgressField, value: bool, progress: State<Arc<Progress>>) {
    progress.set(field, value);
}
