use serde::{Deserialize, Serialize};

/// A mounted camera-storage volume. Rebuilt on every enumeration call,
/// never persisted.
#[derive(Debug, Serialize, Clone)]
pub struct Volume {
    pub name: String,
    pub path: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub kind: VolumeKind,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VolumeKind {
    CameraCard,
}

/// Read-only view over one media file on a card. `modified` is the file's
/// last-modification time in Unix seconds; cameras set it at capture time.
#[derive(Debug, Serialize, Clone)]
pub struct Asset {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub modified: i64,
}

/// Result of a date-filtered card scan. Both lists are sorted newest-first.
/// A listing error that hit after partial collection lands in `error`
/// without discarding what was already found.
#[derive(Debug, Serialize, Clone, Default)]
pub struct ScanReport {
    pub photos: Vec<Asset>,
    pub videos: Vec<Asset>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CopiedFile {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct FailedFile {
    pub source: String,
    pub reason: String,
}

/// Per-file outcome of a batch copy. Every input path appears exactly once,
/// in `success` or in `failed`.
#[derive(Debug, Serialize, Clone, Default)]
pub struct CopyOutcome {
    pub success: Vec<CopiedFile>,
    pub failed: Vec<FailedFile>,
}

/// Query for recovering a folder's full path from its name, optionally
/// verified against a modification-time/size fingerprint.
#[derive(Debug, Deserialize, Clone)]
pub struct FolderQuery {
    pub name: String,
    pub modified: Option<i64>,
    pub size: Option<u64>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FolderMatch {
    pub path: String,
}
