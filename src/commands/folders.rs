use crate::error::AppError;
use crate::models::media_types::{FolderMatch, FolderQuery};
use crate::services::locator_service;
use crate::services::platform::PlatformConventions;
use std::path::Path;
use tauri::State;

/// Best-effort folder lookup by name plus optional mtime/size fingerprint.
/// `None` means "not found" and is advisory; the frontend falls back to
/// asking the user for the path.
#[tauri::command]
pub fn locate_folder(
    name: String,
    modified: Option<i64>,
    size: Option<u64>,
    conventions: State<'_, PlatformConventions>,
) -> Result<Option<FolderMatch>, AppError> {
    let query = FolderQuery { name, modified, size };
    Ok(locator_service::locate_folder(*conventions.inner(), &query))
}

#[tauri::command]
pub fn reveal_in_file_manager(path: String) -> Result<(), AppError> {
    let target = Path::new(&path);
    if !target.exists() {
        return Err(AppError::not_found(format!("file does not exist: {}", path)));
    }
    tauri_plugin_opener::reveal_item_in_dir(target)
        .map_err(|e| AppError::io(format!("could not reveal {}: {}", path, e)))
}
