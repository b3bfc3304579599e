use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use strum::AsRefStr as StrumAsRefStr;
use webhdfs_lib::Permission;
use webhdfs_lib::serde::{millis, permission_str, hex_bytes};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "lowercase")]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

/// metadata of a single entry as reported by the namenode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStatus {
    #[serde(with = "millis")]
    pub access_time: DateTime<Utc>,
    pub block_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_num: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<u64>,
    pub group: String,
    pub length: u64,
    #[serde(with = "millis")]
    pub modification_time: DateTime<Utc>,
    pub owner: String,
    /// name relative to the requested path, empty when the status is for
    /// the requested path itself
    pub path_suffix: String,
    #[serde(with = "permission_str")]
    pub permission: Permission,
    pub replication: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_policy: Option<u8>,
    #[serde(rename = "type")]
    pub file_type: FileType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symlink: Option<String>,
}

impl FileStatus {
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type == FileType::Symlink
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStatuses {
    #[serde(rename = "FileStatus", default)]
    pub file_status: Vec<FileStatus>,
}

/// aggregate counts for everything under a path. quotas are `-1` when not
/// set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub directory_count: u64,
    pub file_count: u64,
    pub length: u64,
    pub quota: i64,
    pub space_consumed: u64,
    pub space_quota: i64,
}

impl ContentSummary {
    pub fn quota(&self) -> Option<u64> {
        u64::try_from(self.quota).ok()
    }

    pub fn space_quota(&self) -> Option<u64> {
        u64::try_from(self.space_quota).ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChecksum {
    pub algorithm: String,
    #[serde(with = "hex_bytes")]
    pub bytes: Vec<u8>,
    pub length: u64,
}

impl FileChecksum {
    pub fn hex(&self) -> String {
        hex_bytes::encode(&self.bytes)
    }
}
