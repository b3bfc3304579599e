use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Url, Method, StatusCode};
use reqwest::blocking::{Body, Response};
use reqwest_cookie_store::{CookieStore, CookieStoreRwLock};
use serde::de::DeserializeOwned;
use webhdfs_lib::validation::component_valid;

use crate::{HdfsPath, Op, Payload};
use crate::op::Verb;
use crate::error::RemoteExceptionBody;

pub mod error;
pub mod fs;

use error::{ApiClientError, RequestError};

/// query parameters of a single operation, `op` and `user.name` excluded
pub type Params = BTreeMap<&'static str, String>;

pub const DEFAULT_PORT: u16 = 9870;
pub const DEFAULT_USER_AGENT: &str = "webhdfs-api-client/0.1.0";

pub struct Info {
    pub url: Url,
    pub user: Option<String>,
}

/// blocking client for a webhdfs service.
///
/// every operation is a single request and response against the namenode,
/// data operations follow at most one redirect to a datanode. the client can
/// be shared between threads.
pub struct ApiClient {
    pub(crate) cookie_file: Option<Box<Path>>,
    pub(crate) store: Arc<CookieStoreRwLock>,
    pub(crate) client: reqwest::blocking::Client,
    pub(crate) info: Info
}

impl From<Verb> for Method {
    fn from(verb: Verb) -> Method {
        match verb {
            Verb::Get => Method::GET,
            Verb::Put => Method::PUT,
            Verb::Post => Method::POST,
            Verb::Delete => Method::DELETE,
        }
    }
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder {
            url: None,
            host: None,
            port: None,
            secure: false,
            user: None,
            timeout: None,
            connect_timeout: None,
            keep_alive: true,
            file: None,
            exists: false,
            agent: None
        }
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    /// builds `{base}/webhdfs/v1{path}?op={op}&user.name={user}&{params}`
    pub fn request_url(&self, path: &HdfsPath, op: Op, params: Params) -> Result<Url, RequestError> {
        check_path(path)?;

        let mut url = self.info.url.clone();

        {
            let mut segments = url.path_segments_mut()
                .map_err(|_| RequestError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;

            segments.pop_if_empty().extend(["webhdfs", "v1"]);

            let mut pushed = false;

            for segment in path.segments() {
                segments.push(segment);
                pushed = true;
            }

            if !pushed {
                segments.push("");
            }
        }

        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.append_pair("op", op.as_ref());

            if let Some(user) = &self.info.user {
                query.append_pair("user.name", user);
            }

            for (key, value) in params {
                query.append_pair(key, &value);
            }
        }

        Ok(url)
    }

    pub(crate) fn send(&self, op: Op, url: Url, body: Option<Body>) -> Result<Response, RequestError> {
        self.send_method(op, op.verb().into(), url, body)
    }

    pub(crate) fn send_method(&self, op: Op, method: Method, url: Url, body: Option<Body>) -> Result<Response, RequestError> {
        tracing::debug!("{} {} {}", op, method, url);

        let mut builder = self.client.request(method, url);

        if let Some(body) = body {
            builder = builder.body(body);
        }

        let res = builder.send()?;

        tracing::debug!("status {}", res.status());

        Ok(res)
    }

    /// sends a read request and follows a single redirect if the namenode
    /// hands the request off to a datanode
    pub(crate) fn send_read(&self, op: Op, url: Url) -> Result<Response, RequestError> {
        let res = self.send(op, url, None)?;

        if res.status().is_redirection() {
            let location = redirect_location(&res)?;

            tracing::trace!("following redirect for {} to {}", op, location);

            return self.send_method(op, Method::GET, location, None);
        }

        Ok(res)
    }

    pub fn save_session(&self) -> Result<bool, ApiClientError> {
        let Some(cookie_file) = &self.cookie_file else {
            return Ok(false);
        };

        let store = self.store.read()
            .map_err(|_e| ApiClientError::PoisonedLock)?;
        let file = std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(cookie_file)
            .map_err(|e| ApiClientError::StdIo(e))?;
        let mut writer = std::io::BufWriter::new(file);

        store.save_json(&mut writer)
            .map_err(|e| ApiClientError::CookieStore(e))?;

        Ok(true)
    }
}

/// rejects paths the url would silently rewrite, `.` and `..` segments are
/// dropped when pushed onto the url
pub(crate) fn check_path(path: &HdfsPath) -> Result<(), RequestError> {
    for segment in path.segments() {
        if !component_valid(segment) {
            return Err(RequestError::Validation(format!(
                "invalid path component {:?} in {:?}",
                segment,
                path.name()
            )));
        }
    }

    Ok(())
}

/// resolves the `Location` header of a redirect against the request url
pub(crate) fn redirect_location(res: &Response) -> Result<Url, RequestError> {
    let Some(value) = res.headers().get(reqwest::header::LOCATION) else {
        return Err(RequestError::MissingLocation);
    };

    let location = value.to_str()
        .map_err(|_| RequestError::MissingLocation)?;

    Ok(res.url().join(location)?)
}

fn is_json(res: &Response) -> bool {
    let Some(value) = res.headers().get(reqwest::header::CONTENT_TYPE) else {
        return true;
    };

    let Ok(value_str) = value.to_str() else {
        return false;
    };

    match value_str.parse::<mime::Mime>() {
        Ok(mime) => mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON),
        Err(_) => false,
    }
}

/// turns a failed response into an error, decoding the `RemoteException`
/// envelope when the server provided one
pub(crate) fn error_from_response(res: Response) -> RequestError {
    let status = res.status();

    if !is_json(&res) {
        return RequestError::UnexpectedStatus(status);
    }

    match res.json::<RemoteExceptionBody>() {
        Ok(body) => RequestError::Remote(body.remote_exception),
        Err(err) => {
            tracing::warn!("failed to decode error body for status {}: {}", status, err);

            RequestError::UnexpectedStatus(status)
        }
    }
}

/// decodes the json envelope of a successful response
pub(crate) fn payload<P>(res: Response) -> Result<P::Output, RequestError>
where
    P: Payload + DeserializeOwned
{
    if res.status().is_success() {
        Ok(res.json::<P>()?.into_output())
    } else {
        Err(error_from_response(res))
    }
}

/// checks for a specific success status without looking at the body
pub(crate) fn expect_status(res: Response, expected: StatusCode) -> Result<(), RequestError> {
    if res.status() == expected {
        Ok(())
    } else if res.status().is_success() {
        Err(RequestError::UnexpectedStatus(res.status()))
    } else {
        Err(error_from_response(res))
    }
}

pub struct ApiClientBuilder {
    url: Option<Url>,
    host: Option<String>,
    port: Option<u16>,
    secure: bool,
    user: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    keep_alive: bool,
    file: Option<PathBuf>,
    exists: bool,
    agent: Option<String>
}

impl ApiClientBuilder {
    /// base url of the service. any path is kept as a prefix in front of
    /// `/webhdfs/v1`, host, port and scheme are overridden by the other
    /// options when they are set
    pub fn url(&mut self, url: Url) -> &mut Self {
        self.url = Some(url);
        self
    }

    pub fn secure(&mut self, is_secure: bool) -> &mut Self {
        self.secure = is_secure;
        self
    }

    pub fn host<H>(&mut self, host: H) -> &mut Self
    where
        H: Into<String>
    {
        self.host = Some(host.into());
        self
    }

    pub fn port(&mut self, port: Option<u16>) -> &mut Self {
        self.port = port;
        self
    }

    /// value sent as `user.name` with every request
    pub fn user<U>(&mut self, user: U) -> &mut Self
    where
        U: Into<String>
    {
        self.user = Some(user.into());
        self
    }

    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// when disabled connections are not kept in the idle pool
    pub fn keep_alive(&mut self, keep_alive: bool) -> &mut Self {
        self.keep_alive = keep_alive;
        self
    }

    pub fn cookie_file(&mut self, path: PathBuf) -> &mut Self {
        self.file = Some(path);
        self
    }

    pub fn cookie_file_exists(&mut self, exists: bool) -> &mut Self {
        self.exists = exists;
        self
    }

    pub fn user_agent<U>(&mut self, user_agent: U) -> &mut Self
    where
        U: Into<String>
    {
        self.agent = Some(user_agent.into());
        self
    }

    fn build_url(&self) -> Result<Url, ApiClientError> {
        let mut url = match &self.url {
            Some(url) => url.clone(),
            None => {
                let Some(host) = &self.host else {
                    return Err(ApiClientError::InvalidUrl("namenode address not set"));
                };

                let scheme = if self.secure { "https" } else { "http" };
                let port = self.port.unwrap_or(DEFAULT_PORT);

                Url::parse(&format!("{}://{}:{}/", scheme, host, port))
                    .map_err(|_| ApiClientError::InvalidUrl("failed to parse namenode address"))?
            }
        };

        if self.url.is_some() {
            if self.secure && url.set_scheme("https").is_err() {
                return Err(ApiClientError::InvalidUrl("cannot switch url to https"));
            }

            if let Some(host) = &self.host {
                url.set_host(Some(host))
                    .map_err(|_| ApiClientError::InvalidUrl("invalid host"))?;
            }

            if self.port.is_some() && url.set_port(self.port).is_err() {
                return Err(ApiClientError::InvalidUrl("cannot set port on url"));
            }
        }

        if url.cannot_be_a_base() || url.host().is_none() {
            return Err(ApiClientError::InvalidUrl("url must have a host"));
        }

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiClientError::InvalidUrl("url scheme must be http or https"));
        }

        url.set_query(None);
        url.set_fragment(None);

        Ok(url)
    }

    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        let url = self.build_url()?;
        let user_agent = self.agent.unwrap_or(DEFAULT_USER_AGENT.into());
        let store = if let Some(path) = &self.file {
            match std::fs::OpenOptions::new()
                .read(true)
                .open(&path) {
                Ok(file) => {
                    let reader = std::io::BufReader::new(file);

                    CookieStore::load_json(reader)
                        .map_err(|e| ApiClientError::CookieStore(e))?
                },
                Err(err) => match err.kind() {
                    std::io::ErrorKind::NotFound => {
                        if self.exists {
                            return Err(ApiClientError::StdIo(err));
                        } else {
                            CookieStore::default()
                        }
                    },
                    _ => {
                        return Err(ApiClientError::StdIo(err));
                    }
                }
            }
        } else {
            CookieStore::default()
        };

        let store = Arc::new(CookieStoreRwLock::new(store));
        let mut builder = reqwest::blocking::Client::builder()
            .cookie_provider(store.clone())
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::none());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        if !self.keep_alive {
            builder = builder.pool_max_idle_per_host(0);
        }

        let client = builder.build()
            .map_err(|e| ApiClientError::Reqwest(e))?;

        tracing::debug!("webhdfs client for {}", url);

        Ok(ApiClient {
            cookie_file: self.file.map(|v| v.into_boxed_path()),
            store,
            client,
            info: Info {
                url,
                user: self.user,
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn client(url: &str, user: Option<&str>) -> ApiClient {
        let mut builder = ApiClient::builder();
        builder.url(Url::parse(url).expect("invalid test url"));

        if let Some(user) = user {
            builder.user(user);
        }

        builder.build().expect("failed to build client")
    }

    #[test]
    fn request_url_layout() {
        let client = client("http://namenode:9870", Some("hdfs"));
        let mut params = Params::new();
        params.insert("destination", String::from("/tmp/b"));

        let url = client.request_url(&HdfsPath::new("/tmp/a"), Op::Rename, params)
            .expect("failed to build url");

        assert_eq!(
            url.as_str(),
            "http://namenode:9870/webhdfs/v1/tmp/a?op=RENAME&user.name=hdfs&destination=%2Ftmp%2Fb"
        );
    }

    #[test]
    fn request_url_root_and_prefix() {
        let client = client("https://gateway.local:8443/gateway/default/?ignored=1", None);

        let url = client.request_url(&HdfsPath::root(), Op::ListStatus, Params::new())
            .expect("failed to build url");

        assert_eq!(
            url.as_str(),
            "https://gateway.local:8443/gateway/default/webhdfs/v1/?op=LISTSTATUS"
        );
    }

    #[test]
    fn request_url_encodes_segments() {
        let client = client("http://namenode:9870/", None);

        let url = client.request_url(&HdfsPath::new("//user/with space/a#b"), Op::GetFileStatus, Params::new())
            .expect("failed to build url");

        assert_eq!(
            url.as_str(),
            "http://namenode:9870/webhdfs/v1/user/with%20space/a%23b?op=GETFILESTATUS"
        );
    }

    #[test]
    fn builder_from_parts() {
        let mut builder = ApiClient::builder();
        builder.host("namenode")
            .secure(true)
            .port(Some(9871))
            .user("hdfs");

        let client = builder.build().expect("failed to build client");

        assert_eq!(client.info().url.as_str(), "https://namenode:9871/");
        assert_eq!(client.info().user.as_deref(), Some("hdfs"));

        let mut builder = ApiClient::builder();
        builder.host("namenode");

        let client = builder.build().expect("failed to build client");

        assert_eq!(client.info().url.as_str(), "http://namenode:9870/");
    }

    #[test]
    fn builder_requires_host() {
        let result = ApiClient::builder().build();

        assert!(matches!(result, Err(ApiClientError::InvalidUrl(_))));

        let mut builder = ApiClient::builder();
        builder.url(Url::parse("mailto:hdfs@example.com").expect("invalid test url"));

        assert!(matches!(builder.build(), Err(ApiClientError::InvalidUrl(_))));
    }

    #[test]
    fn request_url_rejects_dot_segments() {
        let client = client("http://namenode:9870", None);

        for name in ["/user/../etc", "/user/./hdfs", "..", "/tmp/a:b"] {
            let result = client.request_url(&HdfsPath::new(name), Op::Delete, Params::new());

            assert!(
                matches!(result, Err(RequestError::Validation(_))),
                "invalid path passed {:?}: {:?}",
                name,
                result
            );
        }

        assert!(client.request_url(&HdfsPath::new("/user/..hidden"), Op::Delete, Params::new()).is_ok());
    }

    #[test]
    fn cookie_file_missing() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("cookies.json");

        let mut builder = ApiClient::builder();
        builder.host("namenode")
            .cookie_file(path.clone());

        let client = builder.build().expect("failed to build client");

        assert_eq!(client.store.read().expect("poisoned cookie store").iter_any().count(), 0);

        let mut builder = ApiClient::builder();
        builder.host("namenode")
            .cookie_file(path.clone())
            .cookie_file_exists(true);

        assert!(matches!(builder.build(), Err(ApiClientError::StdIo(_))));
    }

    #[test]
    fn save_session_without_file() {
        let client = client("http://namenode:9870", None);

        assert!(!client.save_session().expect("failed to save session"));
    }

    #[test]
    fn save_session_creates_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("cookies.json");

        let mut builder = ApiClient::builder();
        builder.host("namenode")
            .cookie_file(path.clone());

        let client = builder.build().expect("failed to build client");

        assert!(client.save_session().expect("failed to save session"));
        assert!(path.exists());

        let mut builder = ApiClient::builder();
        builder.host("namenode")
            .cookie_file(path)
            .cookie_file_exists(true);

        assert!(builder.build().is_ok());
    }
}
