use std::fmt;

use serde::{Serialize, Deserialize};

/// name of a resource on the remote filesystem.
///
/// no validation is done on creation, an empty name is representable so that
/// operations can reject it before sending a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HdfsPath {
    name: String,
}

impl HdfsPath {
    pub fn new<N>(name: N) -> Self
    where
        N: Into<String>
    {
        HdfsPath { name: name.into() }
    }

    pub fn root() -> Self {
        HdfsPath { name: String::from("/") }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// non empty components of the path, repeated separators are skipped
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.name.split('/').filter(|v| !v.is_empty())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    pub fn parent(&self) -> Option<HdfsPath> {
        let mut segments: Vec<&str> = self.segments().collect();

        segments.pop()?;

        Some(HdfsPath::new(format!("/{}", segments.join("/"))))
    }

    /// appends a child name, as found in `FileStatus::path_suffix`
    pub fn join<C>(&self, child: C) -> HdfsPath
    where
        C: AsRef<str>
    {
        let child = child.as_ref().trim_start_matches('/');

        if child.is_empty() {
            return self.clone();
        }

        if self.name.ends_with('/') {
            HdfsPath::new(format!("{}{}", self.name, child))
        } else {
            HdfsPath::new(format!("{}/{}", self.name, child))
        }
    }
}

impl fmt::Display for HdfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for HdfsPath {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl From<&str> for HdfsPath {
    fn from(name: &str) -> Self {
        HdfsPath::new(name)
    }
}

impl From<String> for HdfsPath {
    fn from(name: String) -> Self {
        HdfsPath { name }
    }
}

impl std::str::FromStr for HdfsPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(HdfsPath::new(s))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn segments() {
        let path = HdfsPath::new("/user//hadoop/data.csv");

        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["user", "hadoop", "data.csv"]);
        assert_eq!(path.file_name(), Some("data.csv"));
        assert_eq!(path.parent(), Some(HdfsPath::new("/user/hadoop")));

        let root = HdfsPath::root();

        assert_eq!(root.segments().count(), 0);
        assert_eq!(root.file_name(), None);
        assert_eq!(root.parent(), None);
        assert_eq!(HdfsPath::new("/user").parent(), Some(HdfsPath::root()));
    }

    #[test]
    fn join() {
        assert_eq!(HdfsPath::root().join("tmp").name(), "/tmp");
        assert_eq!(HdfsPath::new("/user/").join("/hadoop").name(), "/user/hadoop");
        assert_eq!(HdfsPath::new("/user").join("hadoop").name(), "/user/hadoop");
        assert_eq!(HdfsPath::new("/user/a.txt").join("").name(), "/user/a.txt");
    }
}
