use clap::Args;
use webhdfs_api::HdfsPath;
use webhdfs_api::client::ApiClient;
use webhdfs_api::client::fs::{MkDirs, CreateSymlink};
use webhdfs_lib::Permission;

use crate::error::{self, Context};
use crate::formatting::{self, OutputOptions, TextTable, Column};

use super::parse_path;

fn parse_mode(given: &str) -> Result<u32, String> {
    u32::from_str_radix(given, 8)
        .map_err(|_| format!("\"{}\" is not an octal mode", given))
}

fn report(action: &str, applied: bool) {
    if !applied {
        println!("{} was not applied", action);
    }
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    /// the path to rename
    #[arg(value_parser(parse_path))]
    source: HdfsPath,

    /// the new path
    #[arg(value_parser(parse_path))]
    destination: HdfsPath,
}

pub fn rename(client: &ApiClient, args: RenameArgs) -> error::Result {
    let applied = client.rename(&args.source, &args.destination)?;

    report("rename", applied);

    Ok(())
}

#[derive(Debug, Args)]
pub struct MkdirsArgs {
    /// the directory to create
    #[arg(value_parser(parse_path))]
    path: HdfsPath,

    /// octal permission for the new directories
    ///
    /// values of 0 or above 1777 fall back to 700
    #[arg(short, long, value_parser(parse_mode))]
    mode: Option<u32>,
}

pub fn mkdirs(client: &ApiClient, args: MkdirsArgs) -> error::Result {
    let mode = args.mode.unwrap_or(u32::from(Permission::default().mode()));
    let applied = MkDirs::path(args.path, mode).send(client)?;

    report("mkdirs", applied);

    Ok(())
}

#[derive(Debug, Args)]
pub struct SymlinkArgs {
    /// the path the link will point to
    #[arg(value_parser(parse_path))]
    destination: HdfsPath,

    /// the path of the link
    #[arg(value_parser(parse_path))]
    link: HdfsPath,

    /// creates missing parent directories of the link
    #[arg(short, long)]
    parents: bool,
}

pub fn symlink(client: &ApiClient, args: SymlinkArgs) -> error::Result {
    let mut builder = CreateSymlink::paths(args.destination, args.link);
    builder.create_parent(args.parents);

    report("symlink", builder.send(client)?);

    Ok(())
}

#[derive(Debug, Args)]
pub struct StatArgs {
    /// the path to retrieve
    #[arg(value_parser(parse_path))]
    path: HdfsPath,

    #[command(flatten)]
    output_options: OutputOptions,
}

pub fn stat(client: &ApiClient, args: StatArgs) -> error::Result {
    let status = client.get_file_status(&args.path)?;
    let mut stdout = std::io::stdout();

    formatting::write_file_status(&mut stdout, args.path.as_ref(), &status, &args.output_options)
        .context("failed to output to stdout")?;

    Ok(())
}

#[derive(Debug, Args)]
pub struct LsArgs {
    /// the directory to list
    #[arg(value_parser(parse_path))]
    path: HdfsPath,

    /// includes a header row
    #[arg(long)]
    header: bool,

    #[command(flatten)]
    output_options: OutputOptions,
}

pub fn ls(client: &ApiClient, args: LsArgs) -> error::Result {
    let list = client.list_status(&args.path)?;

    let mut table = TextTable::with_columns([
        Column::left("mode"),
        Column::right("rep"),
        Column::left("owner"),
        Column::left("group"),
        Column::right("size"),
        Column::left("modified"),
        Column::left("name"),
    ]);

    for status in &list {
        let name = if status.path_suffix.is_empty() {
            // a file path lists itself with an empty suffix
            args.path.file_name().unwrap_or("/").to_owned()
        } else {
            status.path_suffix.clone()
        };

        let name = match &status.symlink {
            Some(target) => format!("{} -> {}", name, target),
            None => name,
        };

        let replication = if status.is_file() {
            status.replication.to_string()
        } else {
            String::from("-")
        };

        table.add_row([
            formatting::mode_string(status),
            replication,
            status.owner.clone(),
            status.group.clone(),
            formatting::bytes_to_unit(status.length, &args.output_options.size_format),
            formatting::datetime_to_string(&status.modification_time, &args.output_options.ts_format),
            name,
        ]);
    }

    if table.is_empty() {
        return Ok(());
    }

    let mut stdout = std::io::stdout();

    table.write(&mut stdout, args.header)
        .context("failed to output to stdout")?;

    Ok(())
}

#[derive(Debug, Args)]
pub struct DuArgs {
    /// the path to summarize
    #[arg(value_parser(parse_path))]
    path: HdfsPath,

    #[command(flatten)]
    output_options: OutputOptions,
}

pub fn du(client: &ApiClient, args: DuArgs) -> error::Result {
    let summary = client.get_content_summary(&args.path)?;
    let mut stdout = std::io::stdout();

    formatting::write_content_summary(&mut stdout, args.path.as_ref(), &summary, &args.output_options)
        .context("failed to output to stdout")?;

    Ok(())
}

#[derive(Debug, Args)]
pub struct ChecksumArgs {
    /// the file to checksum
    #[arg(value_parser(parse_path))]
    path: HdfsPath,
}

pub fn checksum(client: &ApiClient, args: ChecksumArgs) -> error::Result {
    let checksum = client.get_file_checksum(&args.path)?;
    let mut stdout = std::io::stdout();

    formatting::write_checksum(&mut stdout, args.path.as_ref(), &checksum)
        .context("failed to output to stdout")?;

    Ok(())
}
