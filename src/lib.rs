mod commands;
mod error;
mod models;
mod services;

use services::platform::PlatformConventions;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .setup(|app| {
            // Platform policy is decided once here; every command reads it
            // from managed state instead of branching on the OS.
            app.manage(PlatformConventions::host());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::cards::list_camera_volumes,
            commands::cards::scan_device,
            commands::transfer::copy_files,
            commands::transfer::create_offload_folder,
            commands::previews::get_preview,
            commands::folders::locate_folder,
            commands::folders::reveal_in_file_manager,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
