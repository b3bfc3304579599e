use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;
use webhdfs_api::client::ApiClient;

use crate::config;
use crate::error::{self, Context};
use crate::input;

mod fs;
mod data;
mod admin;

/// a cli for interacting with hdfs over webhdfs.
///
/// every command maps to a single webhdfs operation. if no command is
/// provided then it will enter interactive mode.
#[derive(Debug, Parser)]
#[command(name = "webhdfs", disable_help_flag = true)]
struct Cli {
    /// display the current help information
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,

    /// config file to load, yaml or json
    #[arg(long)]
    config: Option<PathBuf>,

    /// base url of the namenode http server
    ///
    /// any path on the url is kept in front of "/webhdfs/v1" which allows
    /// for gateways. example: https://gateway.local:8443/gateway/default
    #[arg(long)]
    url: Option<Url>,

    /// host name of the namenode
    ///
    /// will be used in a url so the value must be valid for the hostname part
    /// of a url. examples: namenode.local | 10.0.0.2 | [fd34::2]
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// port of the namenode http server
    ///
    /// if no port is provided it will default to 9870
    #[arg(short, long)]
    port: Option<u16>,

    /// to use https
    #[arg(short, long)]
    secure: bool,

    /// user sent as "user.name" with every request
    ///
    /// falls back to the HADOOP_USER_NAME environment variable
    #[arg(short, long)]
    user: Option<String>,

    /// file that stores cookies handed out by the server
    #[arg(long)]
    cookies: Option<PathBuf>,

    /// request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<BaseCmds>
}

pub fn start() -> error::Result {
    let args = Cli::parse();

    let file = match args.config {
        Some(path) => config::load(path)?,
        None => config::File::default(),
    };

    let overrides = config::Overrides {
        url: args.url,
        host: args.host,
        port: args.port,
        secure: args.secure,
        user: args.user,
        cookies: args.cookies,
        timeout: args.timeout,
    };

    let mut client_builder = ApiClient::builder();

    config::apply(&mut client_builder, file, overrides)?;

    let client = client_builder.build().context("failed to create api client")?;

    let result = match args.command {
        Some(cmd) => handle(&client, cmd),
        None => Interactive::handle(&client)
    };

    let saved = client.save_session().context("failed saving cookie data");

    finish(result, saved)
}

/// a failed command takes priority over a failed cookie save
fn finish(result: error::Result, saved: error::Result<bool>) -> error::Result {
    match (result, saved) {
        (Ok(()), saved) => saved.map(|_| ()),
        (Err(err), Ok(_)) => Err(err),
        (Err(err), Err(save_err)) => {
            tracing::warn!("{}", save_err);

            Err(err)
        }
    }
}

#[derive(Debug, Parser)]
#[command(no_binary_name = true)]
enum Interactive {
    #[command(flatten)]
    Base(BaseCmds),

    /// exits interactive mode
    #[command(alias = "q", alias = "exit")]
    Quit
}

impl Interactive {
    fn handle(client: &ApiClient) -> error::Result {
        let prompt = input::prompt(
            client.info().user.as_deref(),
            client.info().url.host_str()
        );

        loop {
            let Some(given) = input::read_stdin(&prompt)? else {
                break;
            };

            let trimmed = given.trim();

            if trimmed.is_empty() {
                continue;
            }

            let Ok(args_list) = shell_words::split(trimmed) else {
                println!("failed to parse command line args");
                continue;
            };

            let cmd = match Interactive::try_parse_from(args_list) {
                Ok(c) => c,
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
            };

            let result = match cmd {
                Interactive::Base(cmd) => handle(client, cmd),
                Interactive::Quit => break,
            };

            if let Err(err) = result {
                println!("{}", err);
            }
        }

        Ok(())
    }
}

#[derive(Debug, Subcommand)]
enum BaseCmds {
    /// renames a path
    #[command(alias = "mv")]
    Rename(fs::RenameArgs),

    /// creates a directory and any missing parents
    #[command(alias = "mkdir")]
    Mkdirs(fs::MkdirsArgs),

    /// creates a symlink
    #[command(alias = "ln")]
    Symlink(fs::SymlinkArgs),

    /// shows the status of a path
    Stat(fs::StatArgs),

    /// lists the contents of a directory
    Ls(fs::LsArgs),

    /// shows the content summary of a path
    Du(fs::DuArgs),

    /// shows the checksum of a file
    Checksum(fs::ChecksumArgs),

    /// writes the contents of a file to stdout or a local file
    Cat(data::CatArgs),

    /// uploads a local file
    Put(data::PutArgs),

    /// appends a local file to a remote file
    Append(data::AppendArgs),

    /// deletes a path
    Rm(admin::RmArgs),

    /// changes the permission of a path
    Chmod(admin::ChmodArgs),

    /// changes the owner of a path
    Chown(admin::ChownArgs),

    /// changes the replication of a file
    Setrep(admin::SetrepArgs),

    /// changes the access and modification times of a path
    Touch(admin::TouchArgs),

    /// shows the home directory of the user
    Home,
}

fn handle(client: &ApiClient, command: BaseCmds) -> error::Result {
    match command {
        BaseCmds::Rename(given) => fs::rename(client, given),
        BaseCmds::Mkdirs(given) => fs::mkdirs(client, given),
        BaseCmds::Symlink(given) => fs::symlink(client, given),
        BaseCmds::Stat(given) => fs::stat(client, given),
        BaseCmds::Ls(given) => fs::ls(client, given),
        BaseCmds::Du(given) => fs::du(client, given),
        BaseCmds::Checksum(given) => fs::checksum(client, given),
        BaseCmds::Cat(given) => data::cat(client, given),
        BaseCmds::Put(given) => data::put(client, given),
        BaseCmds::Append(given) => data::append(client, given),
        BaseCmds::Rm(given) => admin::rm(client, given),
        BaseCmds::Chmod(given) => admin::chmod(client, given),
        BaseCmds::Chown(given) => admin::chown(client, given),
        BaseCmds::Setrep(given) => admin::setrep(client, given),
        BaseCmds::Touch(given) => admin::touch(client, given),
        BaseCmds::Home => admin::home(client),
    }
}

/// parses a remote path given on the command line
pub(crate) fn parse_path(given: &str) -> Result<webhdfs_api::HdfsPath, String> {
    if webhdfs_lib::validation::path_valid(given) {
        Ok(webhdfs_api::HdfsPath::new(given))
    } else {
        Err(String::from(
            "path must be absolute with no \".\" or \"..\" components, \":\" or control characters"
        ))
    }
}
