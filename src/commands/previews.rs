use crate::error::AppError;
use crate::services::platform::PlatformConventions;
use crate::services::thumbnail_service::{self, PREVIEW_MAX_HEIGHT, PREVIEW_MAX_WIDTH};
use base64::Engine;
use std::path::Path;
use tauri::State;

/// Returns the asset's preview as a JPEG data URI, or `None` when no
/// preview can be produced (unsupported type, clip without a vendor
/// thumbnail, broken file). `None` tells the frontend to render its
/// placeholder; only a missing asset is an actual error.
#[tauri::command]
pub fn get_preview(
    path: String,
    conventions: State<'_, PlatformConventions>,
) -> Result<Option<String>, AppError> {
    let asset = Path::new(&path);
    if !asset.exists() {
        return Err(AppError::not_found(format!("file does not exist: {}", path)));
    }

    let bytes = thumbnail_service::render_preview(
        *conventions.inner(),
        asset,
        PREVIEW_MAX_WIDTH,
        PREVIEW_MAX_HEIGHT,
    );
    Ok(bytes.map(|b| {
        format!(
            "data:image/jpeg;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(b)
        )
    }))
}
