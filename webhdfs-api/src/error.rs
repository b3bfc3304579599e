use serde::{Serialize, Deserialize};
use strum::{AsRefStr as StrumAsRefStr, EnumString};

/// java exception names the namenode reports in a `RemoteException`
#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr, EnumString,
)]
pub enum ExceptionKind {
    FileNotFoundException,
    FileAlreadyExistsException,
    ParentNotDirectoryException,
    PathIsNotEmptyDirectoryException,
    AccessControlException,
    SecurityException,
    IllegalArgumentException,
    UnsupportedOperationException,
    InvalidPathException,
    SafeModeException,
    StandbyException,
    RetriableException,
    IOException,

    #[strum(default)]
    Other(String),
}

impl ExceptionKind {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExceptionKind::FileNotFoundException)
    }

    pub fn is_permission(&self) -> bool {
        matches!(
            self,
            ExceptionKind::AccessControlException |
            ExceptionKind::SecurityException
        )
    }
}

impl std::fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExceptionKind::Other(name) => f.write_str(name),
            known => std::fmt::Display::fmt(known.as_ref(), f),
        }
    }
}

/// error payload returned by the namenode or datanode on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteException {
    exception: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    java_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl RemoteException {
    pub fn new<E>(exception: E) -> Self
    where
        E: Into<String>
    {
        RemoteException {
            exception: exception.into(),
            java_class_name: None,
            message: None,
        }
    }

    pub fn with_message<M>(mut self, msg: M) -> Self
    where
        M: Into<String>
    {
        self.message = Some(msg.into());
        self
    }

    pub fn kind(&self) -> ExceptionKind {
        // the default variant catches anything unknown
        self.exception.parse().unwrap_or_else(|_| ExceptionKind::Other(self.exception.clone()))
    }

    pub fn exception(&self) -> &str {
        &self.exception
    }

    pub fn java_class_name(&self) -> Option<&str> {
        self.java_class_name.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl std::fmt::Display for RemoteException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.exception)?;

        if let Some(msg) = &self.message {
            write!(f, ": {}", msg)?;
        }

        Ok(())
    }
}

impl std::error::Error for RemoteException {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteExceptionBody {
    #[serde(rename = "RemoteException")]
    pub remote_exception: RemoteException,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_remote_exception() {
        let json = r#"{"RemoteException":{
            "exception":"FileNotFoundException",
            "javaClassName":"java.io.FileNotFoundException",
            "message":"File does not exist: /foo/a.patch"
        }}"#;

        let err = serde_json::from_str::<RemoteExceptionBody>(json)
            .expect("failed to parse remote exception")
            .remote_exception;

        assert_eq!(err.kind(), ExceptionKind::FileNotFoundException);
        assert!(err.kind().is_not_found());
        assert_eq!(err.java_class_name(), Some("java.io.FileNotFoundException"));
        assert_eq!(err.message(), Some("File does not exist: /foo/a.patch"));
        assert_eq!(err.to_string(), "FileNotFoundException: File does not exist: /foo/a.patch");
    }

    #[test]
    fn unknown_exception() {
        let err = RemoteException::new("QuotaExceededException")
            .with_message("quota exceeded");

        assert_eq!(err.kind(), ExceptionKind::Other(String::from("QuotaExceededException")));
        assert_eq!(err.kind().to_string(), "QuotaExceededException");
        assert!(!err.kind().is_permission());
    }

    #[test]
    fn known_kinds() {
        let known = [
            ("AccessControlException", ExceptionKind::AccessControlException),
            ("SecurityException", ExceptionKind::SecurityException),
            ("IllegalArgumentException", ExceptionKind::IllegalArgumentException),
            ("IOException", ExceptionKind::IOException),
        ];

        for (name, kind) in known {
            let parsed = RemoteException::new(name).kind();

            assert_eq!(parsed, kind, "unexpected kind for {}", name);
            assert_eq!(parsed.to_string(), name);
        }
    }
}
