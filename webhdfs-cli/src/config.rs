use std::path::{Path, PathBuf};
use std::io::ErrorKind;
use std::time::Duration;

use serde::Deserialize;
use url::Url;
use webhdfs_api::client::ApiClientBuilder;

use crate::error::{self, Context};

/// environment variable hadoop tools read the operating user from
pub const HADOOP_USER_ENV: &str = "HADOOP_USER_NAME";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct File {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub secure: Option<bool>,
    pub user: Option<String>,
    pub cookies: Option<PathBuf>,
    /// seconds
    pub timeout: Option<u64>,
    /// seconds
    pub connect_timeout: Option<u64>,
    pub keep_alive: Option<bool>,
    pub user_agent: Option<String>,
}

/// values given on the command line, these take priority over the file
#[derive(Debug, Default)]
pub struct Overrides {
    pub url: Option<Url>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub secure: bool,
    pub user: Option<String>,
    pub cookies: Option<PathBuf>,
    pub timeout: Option<u64>,
}

pub fn resolve_path<B>(path: PathBuf, base: B) -> PathBuf
where
    B: AsRef<Path>
{
    if path.is_absolute() {
        path
    } else {
        base.as_ref().join(path)
    }
}

pub fn load(path: PathBuf) -> error::Result<File> {
    let cwd = std::env::current_dir()
        .context("failed to retrieve the current working directory")?;
    let config_path = resolve_path(path, &cwd);

    let Some(ext) = config_path.extension() else {
        return Err(error::Error::new()
            .context("failed to retrieve the file extension of the config file"));
    };

    let ext = ext.to_ascii_lowercase();
    let file = match std::fs::OpenOptions::new()
        .read(true)
        .open(&config_path) {
        Ok(f) => f,
        Err(err) => match err.kind() {
            ErrorKind::NotFound => {
                return Err(error::Error::new()
                    .context(format!("config file not found: {}", config_path.display())));
            },
            _ => {
                return Err(error::Error::new()
                    .context("failed to open the specified config file")
                    .source(err));
            }
        }
    };
    let reader = std::io::BufReader::new(file);

    let mut config: File = if ext.eq("yaml") || ext.eq("yml") {
        serde_yaml::from_reader::<_, File>(reader)
            .context("there was an error when attempting to parse the yaml config file")?
    } else if ext.eq("json") {
        serde_json::from_reader::<_, File>(reader)
            .context("there was an error when attempting to parse the json config file")?
    } else {
        return Err(error::Error::new()
            .context("the specified config type is not yaml or json"));
    };

    // relative to the config file, not the working directory
    config.cookies = config.cookies.map(|cookies| {
        let base = config_path.parent()
            .map(|p| p.to_path_buf())
            .unwrap_or(cwd);

        resolve_path(cookies, base)
    });

    Ok(config)
}

/// applies the config file and then the command line values to the builder.
/// the operating user falls back to `HADOOP_USER_NAME` when neither provide
/// one
pub fn apply(builder: &mut ApiClientBuilder, file: File, overrides: Overrides) -> error::Result {
    let url = match overrides.url {
        Some(url) => Some(url),
        None => match file.url {
            Some(given) => Some(Url::parse(&given)
                .context(format!("invalid url in config file: {}", given))?),
            None => None,
        }
    };

    if let Some(url) = url {
        builder.url(url);
    }

    if let Some(host) = overrides.host.or(file.host) {
        builder.host(host);
    }

    builder.port(overrides.port.or(file.port));
    builder.secure(overrides.secure || file.secure.unwrap_or(false));

    let user = overrides.user
        .or(file.user)
        .or_else(|| std::env::var(HADOOP_USER_ENV).ok())
        .filter(|v| !v.is_empty());

    if let Some(user) = user {
        builder.user(user);
    }

    if let Some(cookies) = overrides.cookies.or(file.cookies) {
        builder.cookie_file(cookies);
    }

    if let Some(secs) = overrides.timeout.or(file.timeout) {
        builder.timeout(Duration::from_secs(secs));
    }

    if let Some(secs) = file.connect_timeout {
        builder.connect_timeout(Duration::from_secs(secs));
    }

    if let Some(keep_alive) = file.keep_alive {
        builder.keep_alive(keep_alive);
    }

    if let Some(agent) = file.user_agent {
        builder.user_agent(agent);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use webhdfs_api::client::ApiClient;

    use super::*;

    fn write_config(ext: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(ext)
            .tempfile()
            .expect("failed to create temp config");

        file.write_all(contents.as_bytes()).expect("failed to write temp config");
        file.flush().expect("failed to flush temp config");
        file
    }

    #[test]
    fn load_yaml() {
        let file = write_config(".yaml", "host: namenode\nport: 9871\nsecure: true\nuser: hdfs\ntimeout: 30\ncookies: cookies.json\n");
        let config = load(file.path().to_path_buf()).expect("failed to load yaml config");

        assert_eq!(config.host.as_deref(), Some("namenode"));
        assert_eq!(config.port, Some(9871));
        assert_eq!(config.secure, Some(true));
        assert_eq!(config.user.as_deref(), Some("hdfs"));
        assert_eq!(config.timeout, Some(30));

        let parent = file.path().parent().expect("temp file has no parent");

        assert_eq!(config.cookies, Some(parent.join("cookies.json")));
    }

    #[test]
    fn load_json() {
        let file = write_config(".json", r#"{"url":"http://namenode:9870/","keep_alive":false}"#);
        let config = load(file.path().to_path_buf()).expect("failed to load json config");

        assert_eq!(config.url.as_deref(), Some("http://namenode:9870/"));
        assert_eq!(config.keep_alive, Some(false));
        assert!(config.host.is_none());
    }

    #[test]
    fn load_rejects_unknown() {
        let file = write_config(".toml", "host = \"namenode\"");

        assert!(load(file.path().to_path_buf()).is_err());

        let file = write_config(".yml", "hostname: namenode\n");

        assert!(load(file.path().to_path_buf()).is_err());
    }

    #[test]
    fn overrides_take_priority() {
        let file = File {
            host: Some(String::from("from-file")),
            port: Some(9870),
            user: Some(String::from("file-user")),
            ..Default::default()
        };
        let overrides = Overrides {
            host: Some(String::from("from-cli")),
            user: Some(String::from("cli-user")),
            ..Default::default()
        };

        let mut builder = ApiClient::builder();
        apply(&mut builder, file, overrides).expect("failed to apply config");

        let client = builder.build().expect("failed to build client");

        assert_eq!(client.info().url.as_str(), "http://from-cli:9870/");
        assert_eq!(client.info().user.as_deref(), Some("cli-user"));
    }
}
