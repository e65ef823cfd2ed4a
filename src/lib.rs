// Clipdeck - single clip audio player widget
// Module declarations
#[cfg(feature = "desktop")]
mod commands;
pub mod error;
pub mod logging;
pub mod outbox;
pub mod player;
pub mod remote;
pub mod settings;
pub mod state;
pub mod surface;

// Test support (only available with test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

/// Event carrying [`surface::ControlUpdate`]s to the page
pub const CONTROL_EVENT: &str = "controls-update";
/// Event carrying [`remote::MediaCommand`]s to the page's audio element
pub const MEDIA_EVENT: &str = "media-command";

#[cfg(feature = "desktop")]
fn build_state(app: &tauri::App) -> anyhow::Result<commands::DesktopState> {
    use anyhow::Context;
    use std::sync::Arc;
    use tauri::Manager;

    let app_dir = app
        .path()
        .app_data_dir()
        .context("Failed to get app data directory")?;
    let settings = settings::AppSettings::load(&app_dir).context("Failed to load settings")?;
    logging::init(&settings.logging.filter);

    let handle = app.handle().clone();
    let controls = outbox::WebviewOutbox::new(handle.clone(), CONTROL_EVENT);
    let media = Arc::new(outbox::WebviewOutbox::new(handle, MEDIA_EVENT));

    Ok(state::AppState::new(settings, app_dir, controls, media))
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    tauri::Builder::default()
        .setup(|app| {
            let app_state = build_state(app)?;
            tracing::info!(source = %app_state.settings.media.source, "Player ready");
            app.manage(app_state);
            Ok(())
        })
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::Destroyed = event {
                window.state::<commands::DesktopState>().teardown();
            }
        })
        .invoke_handler(tauri::generate_handler![
            commands::register_controls,
            commands::start_audio,
            commands::start_or_resume_audio,
            commands::stop_audio,
            commands::play_audio,
            commands::restart_audio,
            commands::seek_pressed,
            commands::seek_released,
            commands::seek_committed,
            commands::media_report,
            commands::get_player_state,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
