use serde::{Serialize, Deserialize};

use crate::fs::{FileStatus, FileStatuses, ContentSummary, FileChecksum};

/// json envelope wrapping the result of an operation.
///
/// every webhdfs response nests its result under a single named key, the
/// implementors unwrap that key.
pub trait Payload {
    type Output;

    fn into_output(self) -> Self::Output;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BooleanBody {
    pub boolean: bool,
}

impl Payload for BooleanBody {
    type Output = bool;

    fn into_output(self) -> bool {
        self.boolean
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileStatusBody {
    #[serde(rename = "FileStatus")]
    pub file_status: FileStatus,
}

impl Payload for FileStatusBody {
    type Output = FileStatus;

    fn into_output(self) -> FileStatus {
        self.file_status
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileStatusesBody {
    #[serde(rename = "FileStatuses")]
    pub file_statuses: FileStatuses,
}

impl Payload for FileStatusesBody {
    type Output = Vec<FileStatus>;

    fn into_output(self) -> Vec<FileStatus> {
        self.file_statuses.file_status
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentSummaryBody {
    #[serde(rename = "ContentSummary")]
    pub content_summary: ContentSummary,
}

impl Payload for ContentSummaryBody {
    type Output = ContentSummary;

    fn into_output(self) -> ContentSummary {
        self.content_summary
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileChecksumBody {
    #[serde(rename = "FileChecksum")]
    pub file_checksum: FileChecksum,
}

impl Payload for FileChecksumBody {
    type Output = FileChecksum;

    fn into_output(self) -> FileChecksum {
        self.file_checksum
    }
}
