use std::path::PathBuf;
use std::io::Write;

use clap::Args;
use webhdfs_api::HdfsPath;
use webhdfs_api::client::ApiClient;
use webhdfs_api::client::fs::{Open, SendReadable};
use webhdfs_lib::Permission;

use crate::error::{self, Context};

use super::parse_path;

fn open_local(path: &PathBuf) -> error::Result<(std::fs::File, u64)> {
    let file = std::fs::OpenOptions::new()
        .read(true)
        .open(path)
        .context(format!("failed to open file: {}", path.display()))?;

    let metadata = file.metadata()
        .context("failed to retrieve metadata for file")?;

    if !metadata.is_file() {
        return Err(error::Error::new()
            .context("requested file path is not a file"));
    }

    Ok((file, metadata.len()))
}

#[derive(Debug, Args)]
pub struct CatArgs {
    /// the file to read
    #[arg(value_parser(parse_path))]
    path: HdfsPath,

    /// byte offset to start reading from
    #[arg(long)]
    offset: Option<u64>,

    /// number of bytes to read
    #[arg(long)]
    length: Option<u64>,

    /// buffer size used by the datanode
    #[arg(long)]
    buffer_size: Option<u32>,

    /// writes to a local file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cat(client: &ApiClient, args: CatArgs) -> error::Result {
    let mut builder = Open::path(args.path);

    if let Some(offset) = args.offset {
        builder.offset(offset);
    }

    if let Some(length) = args.length {
        builder.length(length);
    }

    if let Some(size) = args.buffer_size {
        builder.buffer_size(size);
    }

    let written = if let Some(output) = args.output {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&output)
            .context(format!("failed to create file: {}", output.display()))?;

        builder.send_to(client, &mut file)?
    } else {
        let mut stdout = std::io::stdout().lock();
        let written = builder.send_to(client, &mut stdout)?;

        stdout.flush().context("failed to flush stdout")?;

        written
    };

    tracing::debug!("read {} bytes", written);

    Ok(())
}

#[derive(Debug, Args)]
pub struct PutArgs {
    /// the local file to upload
    local: PathBuf,

    /// the remote path to create
    #[arg(value_parser(parse_path))]
    path: HdfsPath,

    /// replaces the remote file if it exists
    #[arg(short = 'f', long)]
    overwrite: bool,

    /// replication factor of the new file
    #[arg(short, long)]
    replication: Option<u16>,

    /// block size of the new file in bytes
    #[arg(short, long)]
    block_size: Option<u64>,

    /// octal permission of the new file
    #[arg(short, long)]
    permission: Option<Permission>,

    /// buffer size used by the datanode
    #[arg(long)]
    buffer_size: Option<u32>,
}

pub fn put(client: &ApiClient, args: PutArgs) -> error::Result {
    let (file, length) = open_local(&args.local)?;

    let mut builder = SendReadable::create(args.path, file);
    builder.content_length(length)
        .overwrite(args.overwrite);

    if let Some(replication) = args.replication {
        builder.replication(replication);
    }

    if let Some(size) = args.block_size {
        builder.block_size(size);
    }

    if let Some(permission) = args.permission {
        builder.permission(permission);
    }

    if let Some(size) = args.buffer_size {
        builder.buffer_size(size);
    }

    builder.send(client)?;

    tracing::debug!("uploaded {} bytes", length);

    Ok(())
}

#[derive(Debug, Args)]
pub struct AppendArgs {
    /// the local file to read from
    local: PathBuf,

    /// the remote file to append to
    #[arg(value_parser(parse_path))]
    path: HdfsPath,

    /// buffer size used by the datanode
    #[arg(long)]
    buffer_size: Option<u32>,
}

pub fn append(client: &ApiClient, args: AppendArgs) -> error::Result {
    let (file, length) = open_local(&args.local)?;

    let mut builder = SendReadable::append(args.path, file);
    builder.content_length(length);

    if let Some(size) = args.buffer_size {
        builder.buffer_size(size);
    }

    builder.send(client)?;

    tracing::debug!("appended {} bytes", length);

    Ok(())
}
