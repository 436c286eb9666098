use crate::models::media_types::{Volume, VolumeKind};
use crate::services::platform::{join_subdir, PlatformConventions, CAMERA_MARKERS};
use std::path::Path;
use sysinfo::Disks;

/// Enumerate mounted camera-storage volumes. Never fails as a whole: a
/// partition that can't be probed (permissions, dying card reader) is
/// simply absent from the result.
pub fn list_camera_volumes(conventions: PlatformConventions) -> Vec<Volume> {
    let disks = Disks::new_with_refreshed_list();

    let mut volumes = Vec::new();
    for disk in disks.list() {
        let mount = disk.mount_point();
        if !conventions.is_removable_mount_candidate(mount) {
            continue;
        }
        if !has_camera_markers(mount) {
            continue;
        }

        let total = disk.total_space();
        let free = disk.available_space();
        volumes.push(Volume {
            name: conventions.volume_label(mount),
            path: mount.to_string_lossy().to_string(),
            total,
            used: total.saturating_sub(free),
            free,
            kind: VolumeKind::CameraCard,
        });
    }

    log::debug!("volume enumeration found {} camera card(s)", volumes.len());
    volumes
}

/// A mount is camera storage iff it exposes one of the marker layouts.
/// `is_dir` reports false on permission or I/O errors, so an unreadable
/// mount is excluded rather than aborting enumeration.
pub fn has_camera_markers(mount: &Path) -> bool {
    CAMERA_MARKERS
        .iter()
        .any(|marker| join_subdir(mount, marker).is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn dcim_marker_classifies_as_camera_storage() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("DCIM")).unwrap();
        assert!(has_camera_markers(dir.path()));
    }

    #[test]
    fn clip_marker_classifies_as_camera_storage() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("PRIVATE/M4ROOT/CLIP")).unwrap();
        assert!(has_camera_markers(dir.path()));
    }

    #[test]
    fn mount_without_markers_is_excluded() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Documents")).unwrap();
        assert!(!has_camera_markers(dir.path()));
    }

    #[test]
    fn marker_must_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("DCIM"), b"not a directory").unwrap();
        assert!(!has_camera_markers(dir.path()));
    }
}
