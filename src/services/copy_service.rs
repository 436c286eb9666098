use crate::error::AppError;
use crate::models::media_types::{CopiedFile, CopyOutcome, FailedFile};
use filetime::FileTime;
use std::fs;
use std::path::{Path, PathBuf};

/// Copy every source into `target_dir`, renaming on collision. The target
/// directory must already exist; that is the only operation-level failure.
/// Everything per-file lands in the outcome instead: each input path shows
/// up exactly once, as a success or a failure, and one bad file never
/// aborts the rest of the batch.
pub fn copy_files(sources: &[String], target_dir: &Path) -> Result<CopyOutcome, AppError> {
    if !target_dir.is_dir() {
        return Err(AppError::invalid_input(format!(
            "target directory does not exist: {}",
            target_dir.display()
        )));
    }

    let mut outcome = CopyOutcome::default();
    for source_str in sources {
        let source = Path::new(source_str);
        if !source.exists() {
            outcome.failed.push(FailedFile {
                source: source_str.clone(),
                reason: "source not found".to_string(),
            });
            continue;
        }
        match copy_one(source, target_dir) {
            Ok(target) => outcome.success.push(CopiedFile {
                source: source_str.clone(),
                target: target.to_string_lossy().to_string(),
            }),
            Err(e) => {
                log::warn!("copy of {} failed: {}", source_str, e);
                outcome.failed.push(FailedFile {
                    source: source_str.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(outcome)
}

fn copy_one(source: &Path, target_dir: &Path) -> Result<PathBuf, AppError> {
    let file_name = source.file_name().ok_or_else(|| {
        AppError::invalid_input(format!("invalid file path: {}", source.display()))
    })?;
    let target = unique_file_path(target_dir, &file_name.to_string_lossy());

    fs::copy(source, &target)?;

    // fs::copy carries permissions; timestamps need an explicit pass.
    // Best-effort: the contents arrived, so a filesystem that refuses
    // utimes doesn't demote the copy to a failure.
    if let Ok(meta) = fs::metadata(source) {
        let atime = FileTime::from_last_access_time(&meta);
        let mtime = FileTime::from_last_modification_time(&meta);
        if let Err(e) = filetime::set_file_times(&target, atime, mtime) {
            log::warn!("could not preserve timestamps on {}: {}", target.display(), e);
        }
    }
    Ok(target)
}

/// First non-colliding name in `dir` for `file_name`: the name itself,
/// then name_1.ext, name_2.ext, ... Existence is probed fresh at each
/// increment. Concurrent copies into the same directory can still race
/// between probe and write; that window is accepted.
pub fn unique_file_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = split_name(file_name);
    let mut counter = 1u32;
    loop {
        let next = match ext {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        let candidate = dir.join(next);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

fn split_name(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    }
}

/// The "create folder then copy" variant: create a folder under `parent`
/// using the same numeric-suffix policy as file copies (name, name_1,
/// name_2, ...). The parent is created if absent.
pub fn create_unique_folder(parent: &Path, name: &str) -> Result<PathBuf, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::invalid_input("folder name is empty"));
    }
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let mut candidate = parent.join(name);
    let mut counter = 1u32;
    while candidate.exists() {
        candidate = parent.join(format!("{}_{}", name, counter));
        counter += 1;
    }
    fs::create_dir(&candidate)?;
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_strings(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn collision_probes_until_free_name() {
        let src_dir = tempfile::tempdir().unwrap();
        let dst_dir = tempfile::tempdir().unwrap();
        let src = src_dir.path().join("photo.jpg");
        fs::write(&src, b"fresh bytes").unwrap();
        fs::write(dst_dir.path().join("photo.jpg"), b"old").unwrap();
        fs::write(dst_dir.path().join("photo_1.jpg"), b"older").unwrap();

        let outcome = copy_files(&to_strings(&[src.clone()]), dst_dir.path()).unwrap();
        assert_eq!(outcome.success.len(), 1);
        assert!(outcome.success[0].target.ends_with("photo_2.jpg"));
        assert_eq!(
            fs::read(dst_dir.path().join("photo_2.jpg")).unwrap(),
            b"fresh bytes"
        );
        // Nothing was overwritten, and the source is untouched.
        assert_eq!(fs::read(dst_dir.path().join("photo.jpg")).unwrap(), b"old");
        assert_eq!(
            fs::read(dst_dir.path().join("photo_1.jpg")).unwrap(),
            b"older"
        );
        assert_eq!(fs::read(&src).unwrap(), b"fresh bytes");
    }

    #[test]
    fn missing_source_fails_without_aborting_batch() {
        let src_dir = tempfile::tempdir().unwrap();
        let dst_dir = tempfile::tempdir().unwrap();
        let a = src_dir.path().join("a.jpg");
        let c = src_dir.path().join("c.jpg");
        fs::write(&a, b"a").unwrap();
        fs::write(&c, b"c").unwrap();
        let missing = src_dir.path().join("b.jpg");

        let sources = to_strings(&[a, missing, c]);
        let outcome = copy_files(&sources, dst_dir.path()).unwrap();
        assert_eq!(outcome.success.len(), 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].reason, "source not found");
        assert!(outcome.failed[0].source.ends_with("b.jpg"));
        assert!(dst_dir.path().join("c.jpg").is_file());
    }

    #[test]
    fn missing_target_dir_is_invalid_input() {
        let err = copy_files(&[], Path::new("/nonexistent/backup")).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn timestamps_survive_the_copy() {
        let src_dir = tempfile::tempdir().unwrap();
        let dst_dir = tempfile::tempdir().unwrap();
        let src = src_dir.path().join("clip.mp4");
        fs::write(&src, b"movie").unwrap();
        filetime::set_file_mtime(&src, FileTime::from_unix_time(1_714_500_000, 0)).unwrap();

        let outcome = copy_files(&to_strings(&[src]), dst_dir.path()).unwrap();
        let target = Path::new(&outcome.success[0].target);
        let meta = fs::metadata(target).unwrap();
        assert_eq!(
            FileTime::from_last_modification_time(&meta).unix_seconds(),
            1_714_500_000
        );
    }

    #[test]
    fn extensionless_names_get_plain_suffix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README"), b"x").unwrap();
        let next = unique_file_path(dir.path(), "README");
        assert_eq!(next.file_name().unwrap(), "README_1");
    }

    #[test]
    fn folder_creation_applies_suffix_policy() {
        let dir = tempfile::tempdir().unwrap();
        let first = create_unique_folder(dir.path(), "backup").unwrap();
        let second = create_unique_folder(dir.path(), "backup").unwrap();
        let third = create_unique_folder(dir.path(), "backup").unwrap();
        assert_eq!(first.file_name().unwrap(), "backup");
        assert_eq!(second.file_name().unwrap(), "backup_1");
        assert_eq!(third.file_name().unwrap(), "backup_2");
        assert!(third.is_dir());
    }

    #[test]
    fn folder_creation_makes_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("nested/offload");
        let created = create_unique_folder(&parent, "2024-05-01").unwrap();
        assert!(created.is_dir());
        assert_eq!(created.parent().unwrap(), parent);
    }

    #[test]
    fn empty_folder_name_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_unique_folder(dir.path(), "  ").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
