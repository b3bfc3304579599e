use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::blocking::Body;
use webhdfs_lib::Permission;

use crate::client::error::RequestError;
use crate::client::{self, ApiClient, Params};
use crate::{HdfsPath, Op};
use crate::fs::{FileStatus, ContentSummary, FileChecksum};
use crate::payload::{
    BooleanBody,
    FileStatusBody,
    FileStatusesBody,
    ContentSummaryBody,
    FileChecksumBody,
};

pub struct Rename {
    source: HdfsPath,
    destination: HdfsPath,
}

impl Rename {
    pub fn paths<S, D>(source: S, destination: D) -> Self
    where
        S: Into<HdfsPath>,
        D: Into<HdfsPath>,
    {
        Rename {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn params(&self) -> Result<Params, RequestError> {
        if self.source.is_empty() || self.destination.is_empty() {
            return Err(RequestError::Validation(String::from(
                "Rename() - params source and destination cannot be empty"
            )));
        }

        client::check_path(&self.destination)?;

        Ok(Params::from([
            ("destination", self.destination.name().to_owned())
        ]))
    }

    pub fn send(self, client: &ApiClient) -> Result<bool, RequestError> {
        let params = self.params()?;
        let url = client.request_url(&self.source, Op::Rename, params)?;
        let res = client.send(Op::Rename, url, None)?;

        client::payload::<BooleanBody>(res)
    }
}

pub struct MkDirs {
    path: HdfsPath,
    permission: Permission,
}

impl MkDirs {
    /// a mode of zero or above 1777 (octal) is replaced with 0700
    pub fn path<P>(path: P, mode: u32) -> Self
    where
        P: Into<HdfsPath>
    {
        MkDirs {
            path: path.into(),
            permission: Permission::dir_or_default(mode),
        }
    }

    pub fn params(&self) -> Params {
        Params::from([
            ("permission", self.permission.to_string())
        ])
    }

    pub fn send(self, client: &ApiClient) -> Result<bool, RequestError> {
        let url = client.request_url(&self.path, Op::MkDirs, self.params())?;
        let res = client.send(Op::MkDirs, url, None)?;

        client::payload::<BooleanBody>(res)
    }
}

/// creates `link` pointing at `destination`
pub struct CreateSymlink {
    destination: HdfsPath,
    link: HdfsPath,
    create_parent: bool,
}

impl CreateSymlink {
    pub fn paths<D, L>(destination: D, link: L) -> Self
    where
        D: Into<HdfsPath>,
        L: Into<HdfsPath>,
    {
        CreateSymlink {
            destination: destination.into(),
            link: link.into(),
            create_parent: false,
        }
    }

    /// creates missing parent directories of the link
    pub fn create_parent(&mut self, create_parent: bool) -> &mut Self {
        self.create_parent = create_parent;
        self
    }

    pub fn params(&self) -> Result<Params, RequestError> {
        if self.destination.is_empty() || self.link.is_empty() {
            return Err(RequestError::Validation(String::from(
                "CreateSymlink() - params dest and link cannot be empty"
            )));
        }

        client::check_path(&self.destination)?;

        Ok(Params::from([
            ("destination", self.destination.name().to_owned()),
            ("createParent", self.create_parent.to_string()),
        ]))
    }

    /// the response body is not inspected, any success status counts
    pub fn send(self, client: &ApiClient) -> Result<bool, RequestError> {
        let params = self.params()?;
        let url = client.request_url(&self.link, Op::CreateSymlink, params)?;
        let res = client.send(Op::CreateSymlink, url, None)?;

        if res.status().is_success() {
            Ok(true)
        } else {
            Err(client::error_from_response(res))
        }
    }
}

pub struct RetrieveStatus {
    path: HdfsPath,
}

impl RetrieveStatus {
    pub fn path<P>(path: P) -> Self
    where
        P: Into<HdfsPath>
    {
        RetrieveStatus { path: path.into() }
    }

    pub fn send(self, client: &ApiClient) -> Result<FileStatus, RequestError> {
        let url = client.request_url(&self.path, Op::GetFileStatus, Params::new())?;
        let res = client.send_read(Op::GetFileStatus, url)?;

        client::payload::<FileStatusBody>(res)
    }
}

pub struct ListStatus {
    path: HdfsPath,
}

impl ListStatus {
    pub fn path<P>(path: P) -> Self
    where
        P: Into<HdfsPath>
    {
        ListStatus { path: path.into() }
    }

    pub fn send(self, client: &ApiClient) -> Result<Vec<FileStatus>, RequestError> {
        let url = client.request_url(&self.path, Op::ListStatus, Params::new())?;
        let res = client.send_read(Op::ListStatus, url)?;

        client::payload::<FileStatusesBody>(res)
    }
}

pub struct RetrieveContentSummary {
    path: HdfsPath,
}

impl RetrieveContentSummary {
    pub fn path<P>(path: P) -> Self
    where
        P: Into<HdfsPath>
    {
        RetrieveContentSummary { path: path.into() }
    }

    pub fn send(self, client: &ApiClient) -> Result<ContentSummary, RequestError> {
        let url = client.request_url(&self.path, Op::GetContentSummary, Params::new())?;
        let res = client.send_read(Op::GetContentSummary, url)?;

        client::payload::<ContentSummaryBody>(res)
    }
}

pub struct RetrieveChecksum {
    path: HdfsPath,
}

impl RetrieveChecksum {
    pub fn path<P>(path: P) -> Self
    where
        P: Into<HdfsPath>
    {
        RetrieveChecksum { path: path.into() }
    }

    pub fn send(self, client: &ApiClient) -> Result<FileChecksum, RequestError> {
        let url = client.request_url(&self.path, Op::GetFileChecksum, Params::new())?;
        let res = client.send_read(Op::GetFileChecksum, url)?;

        client::payload::<FileChecksumBody>(res)
    }
}

/// reads the contents of a file, optionally a byte range of it
pub struct Open {
    path: HdfsPath,
    offset: Option<u64>,
    length: Option<u64>,
    buffer_size: Option<u32>,
}

impl Open {
    pub fn path<P>(path: P) -> Self
    where
        P: Into<HdfsPath>
    {
        Open {
            path: path.into(),
            offset: None,
            length: None,
            buffer_size: None,
        }
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    pub fn length(&mut self, length: u64) -> &mut Self {
        self.length = Some(length);
        self
    }

    pub fn buffer_size(&mut self, size: u32) -> &mut Self {
        self.buffer_size = Some(size);
        self
    }

    pub fn params(&self) -> Params {
        let mut params = Params::new();

        if let Some(offset) = self.offset {
            params.insert("offset", offset.to_string());
        }

        if let Some(length) = self.length {
            params.insert("length", length.to_string());
        }

        if let Some(size) = self.buffer_size {
            params.insert("buffersize", size.to_string());
        }

        params
    }

    fn response(self, client: &ApiClient) -> Result<reqwest::blocking::Response, RequestError> {
        let url = client.request_url(&self.path, Op::Open, self.params())?;
        let res = client.send_read(Op::Open, url)?;

        if res.status().is_success() {
            Ok(res)
        } else {
            Err(client::error_from_response(res))
        }
    }

    /// streams the file contents into the given writer, returning the number
    /// of bytes written
    pub fn send_to<W>(self, client: &ApiClient, writer: &mut W) -> Result<u64, RequestError>
    where
        W: std::io::Write + ?Sized
    {
        let mut res = self.response(client)?;

        Ok(std::io::copy(&mut res, writer)?)
    }

    pub fn bytes(self, client: &ApiClient) -> Result<Bytes, RequestError> {
        Ok(self.response(client)?.bytes()?)
    }
}

enum SendMode {
    Create,
    Append,
}

/// writes data from a reader to a new file or to the end of an existing
/// one.
///
/// the namenode is asked first without a body, the data is then sent to the
/// datanode it redirects to.
pub struct SendReadable<R> {
    path: HdfsPath,
    reader: R,
    mode: SendMode,
    overwrite: Option<bool>,
    block_size: Option<u64>,
    replication: Option<u16>,
    permission: Option<Permission>,
    buffer_size: Option<u32>,
    content_length: Option<u64>,
}

impl<R> SendReadable<R> {
    pub fn create<P>(path: P, reader: R) -> SendReadable<R>
    where
        P: Into<HdfsPath>
    {
        SendReadable {
            path: path.into(),
            reader,
            mode: SendMode::Create,
            overwrite: None,
            block_size: None,
            replication: None,
            permission: None,
            buffer_size: None,
            content_length: None,
        }
    }

    pub fn append<P>(path: P, reader: R) -> SendReadable<R>
    where
        P: Into<HdfsPath>
    {
        SendReadable {
            mode: SendMode::Append,
            ..SendReadable::create(path, reader)
        }
    }

    /// only applies when creating
    pub fn overwrite(&mut self, overwrite: bool) -> &mut Self {
        self.overwrite = Some(overwrite);
        self
    }

    /// only applies when creating
    pub fn block_size(&mut self, size: u64) -> &mut Self {
        self.block_size = Some(size);
        self
    }

    /// only applies when creating
    pub fn replication(&mut self, replication: u16) -> &mut Self {
        self.replication = Some(replication);
        self
    }

    /// only applies when creating
    pub fn permission(&mut self, permission: Permission) -> &mut Self {
        self.permission = Some(permission);
        self
    }

    pub fn buffer_size(&mut self, size: u32) -> &mut Self {
        self.buffer_size = Some(size);
        self
    }

    pub fn content_length(&mut self, length: u64) -> &mut Self {
        self.content_length = Some(length);
        self
    }

    pub fn op(&self) -> Op {
        match self.mode {
            SendMode::Create => Op::Create,
            SendMode::Append => Op::Append,
        }
    }

    pub fn params(&self) -> Params {
        let mut params = Params::new();

        if let SendMode::Create = self.mode {
            if let Some(overwrite) = self.overwrite {
                params.insert("overwrite", overwrite.to_string());
            }

            if let Some(size) = self.block_size {
                params.insert("blocksize", size.to_string());
            }

            if let Some(replication) = self.replication {
                params.insert("replication", replication.to_string());
            }

            if let Some(permission) = &self.permission {
                params.insert("permission", permission.to_string());
            }
        }

        if let Some(size) = self.buffer_size {
            params.insert("buffersize", size.to_string());
        }

        params
    }
}

impl<R> SendReadable<R>
where
    R: std::io::Read + Send + 'static
{
    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let op = self.op();
        let url = client.request_url(&self.path, op, self.params())?;
        let res = client.send(op, url, None)?;

        if !res.status().is_redirection() {
            return if res.status().is_success() {
                Err(RequestError::UnexpectedStatus(res.status()))
            } else {
                Err(client::error_from_response(res))
            };
        }

        let location = client::redirect_location(&res)?;

        tracing::trace!("sending {} data to {}", op, location);

        let body = match self.content_length {
            Some(length) => Body::sized(self.reader, length),
            None => Body::new(self.reader),
        };

        let res = client.send(op, location, Some(body))?;

        match self.mode {
            SendMode::Create => client::expect_status(res, StatusCode::CREATED),
            SendMode::Append => client::expect_status(res, StatusCode::OK),
        }
    }
}

impl ApiClient {
    /// renames `source` to `destination`, both must be non empty
    pub fn rename(&self, source: &HdfsPath, destination: &HdfsPath) -> Result<bool, RequestError> {
        Rename::paths(source.clone(), destination.clone()).send(self)
    }

    pub fn mkdirs(&self, path: &HdfsPath, mode: u32) -> Result<bool, RequestError> {
        MkDirs::path(path.clone(), mode).send(self)
    }

    pub fn create_symlink(
        &self,
        destination: &HdfsPath,
        link: &HdfsPath,
        create_parent: bool
    ) -> Result<bool, RequestError> {
        let mut builder = CreateSymlink::paths(destination.clone(), link.clone());
        builder.create_parent(create_parent);
        builder.send(self)
    }

    pub fn get_file_status(&self, path: &HdfsPath) -> Result<FileStatus, RequestError> {
        RetrieveStatus::path(path.clone()).send(self)
    }

    pub fn list_status(&self, path: &HdfsPath) -> Result<Vec<FileStatus>, RequestError> {
        ListStatus::path(path.clone()).send(self)
    }

    pub fn get_content_summary(&self, path: &HdfsPath) -> Result<ContentSummary, RequestError> {
        RetrieveContentSummary::path(path.clone()).send(self)
    }

    pub fn get_file_checksum(&self, path: &HdfsPath) -> Result<FileChecksum, RequestError> {
        RetrieveChecksum::path(path.clone()).send(self)
    }

    pub fn delete(&self, _path: &HdfsPath, _recursive: bool) -> Result<bool, RequestError> {
        Err(RequestError::Unimplemented("Delete"))
    }

    pub fn set_permission(&self, _path: &HdfsPath, _permission: Permission) -> Result<bool, RequestError> {
        Err(RequestError::Unimplemented("SetPermission"))
    }

    pub fn set_owner(&self, _path: &HdfsPath, _owner: &str, _group: &str) -> Result<bool, RequestError> {
        Err(RequestError::Unimplemented("SetOwner"))
    }

    pub fn set_replication(&self, _path: &HdfsPath, _replication: u16) -> Result<bool, RequestError> {
        Err(RequestError::Unimplemented("SetReplication"))
    }

    pub fn set_times(
        &self,
        _path: &HdfsPath,
        _access_time: DateTime<Utc>,
        _modification_time: DateTime<Utc>
    ) -> Result<bool, RequestError> {
        Err(RequestError::Unimplemented("SetTimes"))
    }

    pub fn get_home_directory(&self) -> Result<HdfsPath, RequestError> {
        Err(RequestError::Unimplemented("GetHomeDirectory"))
    }
}
