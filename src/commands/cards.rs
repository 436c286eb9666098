use crate::error::AppError;
use crate::models::media_types::{ScanReport, Volume};
use crate::services::platform::PlatformConventions;
use crate::services::{scan_service, volume_service};
use tauri::State;

#[tauri::command]
pub fn list_camera_volumes(
    conventions: State<'_, PlatformConventions>,
) -> Result<Vec<Volume>, AppError> {
    Ok(volume_service::list_camera_volumes(*conventions.inner()))
}

#[tauri::command]
pub async fn scan_device(device_path: String, scan_date: String) -> Result<ScanReport, AppError> {
    // Card I/O can stall on a flaky reader; keep it off the IPC thread.
    tokio::task::spawn_blocking(move || scan_service::scan_device(&device_path, &scan_date))
        .await
        .map_err(|e| AppError::io(format!("scan task failed: {}", e)))?
}
