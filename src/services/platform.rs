use std::path::{Path, PathBuf};

/// Fixed Sony-style card layout. Stills and clips live under these paths on
/// every card this app understands; the layout is not configurable.
pub const PHOTO_SUBDIR: &[&str] = &["DCIM", "100MSDCF"];
pub const CLIP_SUBDIR: &[&str] = &["PRIVATE", "M4ROOT", "CLIP"];

/// Marker directories whose presence classifies a mount as camera storage.
pub const CAMERA_MARKERS: &[&[&str]] = &[&["DCIM"], CLIP_SUBDIR];

const THUMBNAIL_DIR: &str = "THMBNL";
const THUMBNAIL_MARKER: &str = "T01";
const THUMBNAIL_EXT: &str = "JPG";

/// Removable-volume parents checked on POSIX hosts. macOS mounts external
/// media under /Volumes; Linux desktops use /media or /run/media.
const POSIX_VOLUME_PARENTS: &[&str] = &["/Volumes", "/media", "/run/media"];

/// Common localized names for the desktop/downloads folders, probed under
/// the home directory in addition to what the OS reports.
const DESKTOP_FOLDER_NAMES: &[&str] = &["Desktop", "桌面"];
const DOWNLOADS_FOLDER_NAMES: &[&str] = &["Downloads", "下载"];

pub fn join_subdir(root: &Path, parts: &[&str]) -> PathBuf {
    let mut path = root.to_path_buf();
    for part in parts {
        path.push(part);
    }
    path
}

/// Platform policy, selected once at startup and kept in managed state.
/// Everything OS-specific about mount points, labels, and well-known
/// directories lives here; no other module branches on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformConventions {
    Posix,
    Windows,
}

impl PlatformConventions {
    pub fn host() -> Self {
        if cfg!(windows) {
            PlatformConventions::Windows
        } else {
            PlatformConventions::Posix
        }
    }

    /// Whether a mount point looks like removable media worth probing for
    /// camera markers. POSIX: lives directly under a removable-volume
    /// parent. Windows: is a bare drive-letter root.
    pub fn is_removable_mount_candidate(&self, mount: &Path) -> bool {
        match self {
            PlatformConventions::Posix => POSIX_VOLUME_PARENTS.iter().any(|parent| {
                mount.starts_with(parent) && mount != Path::new(parent)
            }),
            PlatformConventions::Windows => is_drive_root(mount),
        }
    }

    /// Display name for a mount: the leaf directory on POSIX, a
    /// "Drive (X:)" label on Windows.
    pub fn volume_label(&self, mount: &Path) -> String {
        match self {
            PlatformConventions::Posix => mount
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| mount.to_string_lossy().to_string()),
            PlatformConventions::Windows => match drive_letter(mount) {
                Some(letter) => format!("Drive ({}:)", letter),
                None => mount.to_string_lossy().to_string(),
            },
        }
    }

    /// Roots searched by the folder locator: the user's desktop and
    /// downloads directories (OS-reported plus common localized names under
    /// home), then all present drive roots.
    pub fn desktop_roots(&self) -> Vec<PathBuf> {
        let mut roots = Vec::new();
        let mut push = |candidate: Option<PathBuf>| {
            if let Some(path) = candidate {
                if path.is_dir() && !roots.contains(&path) {
                    roots.push(path);
                }
            }
        };

        push(dirs::desktop_dir());
        push(dirs::download_dir());
        if let Some(home) = dirs::home_dir() {
            for name in DESKTOP_FOLDER_NAMES.iter().chain(DOWNLOADS_FOLDER_NAMES) {
                push(Some(home.join(name)));
            }
        }
        for root in self.drive_roots() {
            push(Some(root));
        }
        roots
    }

    /// All currently-present drive roots (Windows) or the removable-volume
    /// parents that exist on this host (POSIX).
    pub fn drive_roots(&self) -> Vec<PathBuf> {
        match self {
            PlatformConventions::Posix => POSIX_VOLUME_PARENTS
                .iter()
                .map(PathBuf::from)
                .filter(|p| p.is_dir())
                .collect(),
            PlatformConventions::Windows => list_windows_drive_roots(),
        }
    }

    /// Derive the vendor thumbnail path paired with a video clip: only
    /// videos under PRIVATE/M4ROOT/CLIP have one, at the sibling
    /// PRIVATE/M4ROOT/THMBNL/<stem>T01.JPG. Pure path transformation; the
    /// existence guard lives in the thumbnail service.
    pub fn thumbnail_sibling_path(&self, video: &Path) -> Option<PathBuf> {
        let clip_dir = video.parent()?;
        let m4root = clip_dir.parent()?;
        let private = m4root.parent()?;
        if clip_dir.file_name()? != "CLIP"
            || m4root.file_name()? != "M4ROOT"
            || private.file_name()? != "PRIVATE"
        {
            return None;
        }
        let stem = video.file_stem()?.to_str()?;
        Some(m4root.join(THUMBNAIL_DIR).join(format!(
            "{}{}.{}",
            stem, THUMBNAIL_MARKER, THUMBNAIL_EXT
        )))
    }
}

/// "X:", "X:\" or "X:/" for a single ASCII drive letter.
fn is_drive_root(path: &Path) -> bool {
    drive_letter(path).is_some()
}

fn drive_letter(path: &Path) -> Option<char> {
    let s = path.to_str()?;
    let bytes = s.as_bytes();
    let rooted = match bytes.len() {
        2 => true,
        3 => bytes[2] == b'\\' || bytes[2] == b'/',
        _ => false,
    };
    if rooted && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        Some(bytes[0].to_ascii_uppercase() as char)
    } else {
        None
    }
}

#[cfg(windows)]
fn list_windows_drive_roots() -> Vec<PathBuf> {
    use windows::Win32::Storage::FileSystem::GetLogicalDriveStringsW;

    let mut buffer = [0u16; 256];
    let len = unsafe { GetLogicalDriveStringsW(Some(&mut buffer)) };
    if len == 0 {
        return Vec::new();
    }

    let mut roots = Vec::new();
    let mut start = 0;
    for i in 0..len as usize {
        if buffer[i] == 0 {
            if i > start {
                let drive = String::from_utf16_lossy(&buffer[start..i]);
                roots.push(PathBuf::from(drive));
            }
            start = i + 1;
        }
    }
    roots
}

#[cfg(not(windows))]
fn list_windows_drive_roots() -> Vec<PathBuf> {
    Vec::new()
}
