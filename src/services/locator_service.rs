use crate::models::media_types::{FolderMatch, FolderQuery};
use crate::services::platform::PlatformConventions;
use filetime::FileTime;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Bounds on the per-root walk. The original tool walked unbounded, which
/// can take minutes on a deep volume; anything a user dragged out of a
/// desktop or drive root sits well within these limits.
const MAX_WALK_DEPTH: usize = 8;
const MAX_VISITED_PER_ROOT: usize = 100_000;

/// Best-effort recovery of a folder's full path from its name, e.g. when
/// the UI only received a bare name from a drag-and-drop. `None` is the
/// expected miss outcome, not an error.
pub fn locate_folder(conventions: PlatformConventions, query: &FolderQuery) -> Option<FolderMatch> {
    locate_in_roots(&conventions.desktop_roots(), query)
}

/// Walk each root in order, depth-first and sorted by file name so a given
/// filesystem snapshot always yields the same match. The first directory
/// whose name equals the query and whose fingerprint checks pass wins.
pub fn locate_in_roots(roots: &[PathBuf], query: &FolderQuery) -> Option<FolderMatch> {
    for root in roots {
        let mut visited = 0usize;
        for entry in WalkDir::new(root)
            .max_depth(MAX_WALK_DEPTH)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            visited += 1;
            if visited > MAX_VISITED_PER_ROOT {
                log::warn!("folder search under {} hit the visit cap", root.display());
                break;
            }
            if !entry.file_type().is_dir() {
                continue;
            }
            if entry.file_name().to_str() != Some(query.name.as_str()) {
                continue;
            }
            if fingerprint_matches(entry.path(), query) {
                return Some(FolderMatch {
                    path: entry.path().to_string_lossy().to_string(),
                });
            }
        }
    }
    None
}

/// Verify a structural name match against the provided fingerprint:
/// modification time within one second, size exactly. Absent fields are
/// not checked.
fn fingerprint_matches(path: &Path, query: &FolderQuery) -> bool {
    if query.modified.is_none() && query.size.is_none() {
        return true;
    }
    let meta = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(_) => return false,
    };
    if let Some(expected) = query.modified {
        let actual = FileTime::from_last_modification_time(&meta).unix_seconds();
        if (actual - expected).abs() > 1 {
            return false;
        }
    }
    if let Some(expected) = query.size {
        if meta.len() != expected {
            return false;
        }
    }
    true
}
