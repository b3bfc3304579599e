use strum::{AsRefStr as StrumAsRefStr, EnumIter};

/// value of the `op` query parameter for each webhdfs operation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    StrumAsRefStr, EnumIter
)]
pub enum Op {
    #[strum(serialize = "OPEN")]
    Open,
    #[strum(serialize = "GETFILESTATUS")]
    GetFileStatus,
    #[strum(serialize = "LISTSTATUS")]
    ListStatus,
    #[strum(serialize = "GETCONTENTSUMMARY")]
    GetContentSummary,
    #[strum(serialize = "GETFILECHECKSUM")]
    GetFileChecksum,
    #[strum(serialize = "GETHOMEDIRECTORY")]
    GetHomeDirectory,

    #[strum(serialize = "CREATE")]
    Create,
    #[strum(serialize = "MKDIRS")]
    MkDirs,
    #[strum(serialize = "CREATESYMLINK")]
    CreateSymlink,
    #[strum(serialize = "RENAME")]
    Rename,
    #[strum(serialize = "SETREPLICATION")]
    SetReplication,
    #[strum(serialize = "SETOWNER")]
    SetOwner,
    #[strum(serialize = "SETPERMISSION")]
    SetPermission,
    #[strum(serialize = "SETTIMES")]
    SetTimes,

    #[strum(serialize = "APPEND")]
    Append,

    #[strum(serialize = "DELETE")]
    Delete,
}

/// http verbs used by webhdfs
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumAsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Put,
    Post,
    Delete,
}

impl Op {
    pub fn verb(&self) -> Verb {
        match self {
            Op::Open |
            Op::GetFileStatus |
            Op::ListStatus |
            Op::GetContentSummary |
            Op::GetFileChecksum |
            Op::GetHomeDirectory => Verb::Get,
            Op::Create |
            Op::MkDirs |
            Op::CreateSymlink |
            Op::Rename |
            Op::SetReplication |
            Op::SetOwner |
            Op::SetPermission |
            Op::SetTimes => Verb::Put,
            Op::Append => Verb::Post,
            Op::Delete => Verb::Delete,
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}
