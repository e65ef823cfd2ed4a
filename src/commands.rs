// Tauri command handlers
use tauri::State;

use crate::outbox::WebviewOutbox;
use crate::player::PlayerSnapshot;
use crate::remote::MediaReport;
use crate::state::AppState;

pub type DesktopState = AppState<WebviewOutbox>;

#[tauri::command]
pub fn register_controls(ids: Vec<String>, state: State<'_, DesktopState>) {
    state.register_controls(&ids);
}

#[tauri::command]
pub fn start_audio(state: State<'_, DesktopState>) -> Result<(), String> {
    state
        .start()
        .map(|_| ())
        .map_err(|e| format!("Failed to start playback: {}", e))
}

#[tauri::command]
pub fn start_or_resume_audio(state: State<'_, DesktopState>) -> Result<(), String> {
    state
        .start_or_resume()
        .map_err(|e| format!("Failed to start playback: {}", e))
}

#[tauri::command]
pub fn stop_audio(state: State<'_, DesktopState>) {
    state.pause();
}

#[tauri::command]
pub fn play_audio(state: State<'_, DesktopState>) {
    state.resume();
}

#[tauri::command]
pub fn restart_audio(state: State<'_, DesktopState>) {
    state.restart();
}

// ===== Seek Bar =====

#[tauri::command]
pub fn seek_pressed(state: State<'_, DesktopState>) {
    state.seek_pressed();
}

#[tauri::command]
pub fn seek_released(state: State<'_, DesktopState>) {
    state.seek_released();
}

#[tauri::command]
pub fn seek_committed(value: f64, state: State<'_, DesktopState>) {
    state.seek_committed(value);
}

// ===== Audio Element =====

#[tauri::command]
pub fn media_report(report: MediaReport, state: State<'_, DesktopState>) {
    state.media_report(&report);
}

#[tauri::command]
pub fn get_player_state(state: State<'_, DesktopState>) -> PlayerSnapshot {
    state.snapshot()
}
