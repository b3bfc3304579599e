use chrono::{DateTime, Utc};
use clap::Args;
use webhdfs_api::HdfsPath;
use webhdfs_api::client::ApiClient;
use webhdfs_lib::Permission;

use crate::error;

use super::parse_path;

fn parse_timestamp(given: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(given)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("invalid rfc3339 timestamp: {}", err))
}

#[derive(Debug, Args)]
pub struct RmArgs {
    /// the path to delete
    #[arg(value_parser(parse_path))]
    path: HdfsPath,

    /// deletes directories and their contents
    #[arg(short, long)]
    recursive: bool,
}

pub fn rm(client: &ApiClient, args: RmArgs) -> error::Result {
    client.delete(&args.path, args.recursive)?;

    Ok(())
}

#[derive(Debug, Args)]
pub struct ChmodArgs {
    /// octal permission to apply
    permission: Permission,

    /// the path to update
    #[arg(value_parser(parse_path))]
    path: HdfsPath,
}

pub fn chmod(client: &ApiClient, args: ChmodArgs) -> error::Result {
    client.set_permission(&args.path, args.permission)?;

    Ok(())
}

#[derive(Debug, Args)]
pub struct ChownArgs {
    /// the new owner
    owner: String,

    /// the path to update
    #[arg(value_parser(parse_path))]
    path: HdfsPath,

    /// the new group
    #[arg(short, long, default_value = "")]
    group: String,
}

pub fn chown(client: &ApiClient, args: ChownArgs) -> error::Result {
    client.set_owner(&args.path, &args.owner, &args.group)?;

    Ok(())
}

#[derive(Debug, Args)]
pub struct SetrepArgs {
    /// the replication factor to apply
    replication: u16,

    /// the file to update
    #[arg(value_parser(parse_path))]
    path: HdfsPath,
}

pub fn setrep(client: &ApiClient, args: SetrepArgs) -> error::Result {
    client.set_replication(&args.path, args.replication)?;

    Ok(())
}

#[derive(Debug, Args)]
pub struct TouchArgs {
    /// the path to update
    #[arg(value_parser(parse_path))]
    path: HdfsPath,

    /// rfc3339 access time, defaults to now
    #[arg(long, value_parser(parse_timestamp))]
    access: Option<DateTime<Utc>>,

    /// rfc3339 modification time, defaults to now
    #[arg(long, value_parser(parse_timestamp))]
    modified: Option<DateTime<Utc>>,
}

pub fn touch(client: &ApiClient, args: TouchArgs) -> error::Result {
    let now = Utc::now();

    client.set_times(
        &args.path,
        args.access.unwrap_or(now),
        args.modified.unwrap_or(now)
    )?;

    Ok(())
}

pub fn home(client: &ApiClient) -> error::Result {
    let path = client.get_home_directory()?;

    println!("{}", path);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn timestamps() {
        let dt = parse_timestamp("2023-07-01T12:00:00+02:00").expect("failed to parse timestamp");

        assert_eq!(dt.timestamp(), 1688205600);
        assert!(parse_timestamp("yesterday").is_err());
    }
}
