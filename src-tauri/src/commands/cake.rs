use tauri::State;

use candela_gesture::TouchPoint;

use crate::cake::CakeCommand;
use crate::setup::CakeCommandSender;

fn send(sender: &CakeCommandSender, command: CakeCommand) -> Result<(), String> {
    sender
        .sender
        .blocking_send(command)
        .map_err(|e| format!("Failed to send cake command: {}", e))
}

#[tauri::command]
#[specta::specta]
pub fn enter_cake(sender: State<CakeCommandSender>) -> Result<(), String> {
    send(&sender, CakeCommand::Enter)
}

#[tauri::command]
#[specta::specta]
pub fn leave_cake(sender: State<CakeCommandSender>) -> Result<(), String> {
    send(&sender, CakeCommand::Leave)
}

#[tauri::command]
#[specta::specta]
pub fn cake_tap(sender: State<CakeCommandSender>) -> Result<(), String> {
    send(&sender, CakeCommand::Tap)
}

#[tauri::command]
#[specta::specta]
pub fn cake_touch_start(x: f64, y: f64, sender: State<CakeCommandSender>) -> Result<(), String> {
    send(&sender, CakeCommand::TouchStart(TouchPoint { x, y }))
}

#[tauri::command]
#[specta::specta]
pub fn cake_touch_end(x: f64, y: f64, sender: State<CakeCommandSender>) -> Result<(), String> {
    send(&sender, CakeCommand::TouchEnd(TouchPoint { x, y }))
}

#[tauri::command]
#[specta::specta]
pub fn cake_pointer_move(sender: State<CakeCommandSender>) -> Result<(), String> {
    send(&sender, CakeCommand::PointerMove)
}
