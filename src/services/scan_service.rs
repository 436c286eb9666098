use crate::error::AppError;
use crate::models::media_types::{Asset, ScanReport};
use crate::services::platform::{join_subdir, CLIP_SUBDIR, PHOTO_SUBDIR};
use chrono::{DateTime, Local, NaiveDate};
use std::cmp::Reverse;
use std::path::Path;

pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "raw", "arw"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mxf"];

pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Scan a card for assets whose modification date falls on `date_str`
/// (local time, `YYYY-MM-DD`). Photos and videos come from the fixed
/// vendor subdirectories; a missing subdirectory just yields an empty
/// list. Listing errors are reported in the result next to whatever was
/// collected before they hit.
pub fn scan_device(volume_path: &str, date_str: &str) -> Result<ScanReport, AppError> {
    let root = Path::new(volume_path);
    if !root.exists() {
        return Err(AppError::invalid_input(format!(
            "device path does not exist: {}",
            volume_path
        )));
    }
    let target = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
        AppError::invalid_input(format!("scan date must be YYYY-MM-DD, got '{}'", date_str))
    })?;

    let (photos, photo_err) =
        collect_assets(&join_subdir(root, PHOTO_SUBDIR), PHOTO_EXTENSIONS, target);
    let (videos, video_err) =
        collect_assets(&join_subdir(root, CLIP_SUBDIR), VIDEO_EXTENSIONS, target);

    let mut report = ScanReport {
        photos,
        videos,
        error: merge_errors(photo_err, video_err),
    };

    // Newest first. The sort is stable, so entries sharing a timestamp
    // keep their directory-listing order.
    report.photos.sort_by_key(|a| Reverse(a.modified));
    report.videos.sort_by_key(|a| Reverse(a.modified));

    if let Some(err) = &report.error {
        log::warn!("scan of {} finished with error: {}", volume_path, err);
    }
    Ok(report)
}

fn merge_errors(a: Option<String>, b: Option<String>) -> Option<String> {
    match (a, b) {
        (Some(a), Some(b)) => Some(format!("{}; {}", a, b)),
        (a, b) => a.or(b),
    }
}

/// List one vendor subdirectory, keeping files that match the extension
/// set and the target local calendar day. Per-entry metadata failures skip
/// that entry; a listing failure is returned alongside whatever was
/// already collected.
fn collect_assets(dir: &Path, extensions: &[&str], day: NaiveDate) -> (Vec<Asset>, Option<String>) {
    if !dir.exists() {
        return (Vec::new(), None);
    }

    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => return (Vec::new(), Some(format!("cannot read {}: {}", dir.display(), e))),
    };

    let mut assets = Vec::new();
    let mut error = None;
    for entry in read_dir {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                error = Some(format!("listing {} failed: {}", dir.display(), e));
                continue;
            }
        };

        let path = entry.path();
        if !has_extension(&path, extensions) {
            continue;
        }

        let meta = match entry.metadata() {
            Ok(m) => m,
            Err(_) => continue,
        };
        if !meta.is_file() {
            continue;
        }
        let modified_at = match meta.modified() {
            Ok(t) => t,
            Err(_) => continue,
        };

        let modified: DateTime<Local> = modified_at.into();
        if modified.date_naive() != day {
            continue;
        }

        assets.push(Asset {
            name: entry.file_name().to_string_lossy().to_string(),
            path: path.to_string_lossy().to_string(),
            size: meta.len(),
            modified: modified.timestamp(),
        });
    }
    (assets, error)
}
