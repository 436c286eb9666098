use crate::error::AppError;
use crate::models::media_types::CopyOutcome;
use crate::services::copy_service;
use std::path::{Path, PathBuf};

#[tauri::command]
pub async fn copy_files(paths: Vec<String>, target_dir: String) -> Result<CopyOutcome, AppError> {
    tokio::task::spawn_blocking(move || copy_service::copy_files(&paths, Path::new(&target_dir)))
        .await
        .map_err(|e| AppError::io(format!("copy task failed: {}", e)))?
}

/// Create a destination folder, defaulting to the user's desktop (where
/// the offload folder traditionally lives), with the same numeric-suffix
/// collision policy as file copies. Returns the realized path so the
/// frontend can pass it straight to `copy_files`.
#[tauri::command]
pub fn create_offload_folder(name: String, parent: Option<String>) -> Result<String, AppError> {
    let parent = match parent {
        Some(p) => PathBuf::from(p),
        None => dirs::desktop_dir()
            .ok_or_else(|| AppError::io("no desktop directory on this system"))?,
    };
    let created = copy_service::create_unique_folder(&parent, &name)?;
    Ok(created.to_string_lossy().to_string())
}
