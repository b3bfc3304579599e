use webhdfs_api::client::error::{RequestError, ApiClientError};
use webhdfs_lib::context_trait;

type BoxDynError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub struct Error {
    context: Option<String>,
    src: Option<BoxDynError>,
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl Error {
    pub fn new() -> Error {
        Error {
            context: None,
            src: None,
        }
    }

    pub fn context<C>(mut self, cxt: C) -> Error
    where
        C: Into<String>
    {
        self.context = Some(cxt.into());
        self
    }

    pub fn source<S>(mut self, src: S) -> Error
    where
        S: Into<BoxDynError>
    {
        self.src = Some(src.into());
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.context, &self.src) {
            (Some(cxt), Some(src)) => write!(f, "{}: {}", cxt, src),
            (Some(cxt), None) => write!(f, "{}", cxt),
            (None, Some(src)) => write!(f, "{}", src),
            (None, None) => write!(f, "UNKNOWN ERROR"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.src.as_ref().map(|v| & **v as _)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::new().context(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::new().context(msg)
    }
}

context_trait!(Error);

macro_rules! simple_catch {
    ($e:path) => {
        impl From<$e> for Error {
            fn from(err: $e) -> Self {
                Error::new().source(err)
            }
        }
    };
}

simple_catch!(std::io::Error);
simple_catch!(url::ParseError);
simple_catch!(ApiClientError);

impl From<RequestError> for Error {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Reqwest(err) => Error::new()
                .context("error sending request")
                .source(err),
            RequestError::Remote(err) => Error::new()
                .context("server error")
                .source(err),
            err => Error::new().source(err)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn context_on_result() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing"
        ));

        let err = result.context("failed to open file").unwrap_err();

        assert_eq!(err.to_string(), "failed to open file: missing");
    }

    #[test]
    fn context_on_option() {
        let err = None::<u8>.context("value not provided").unwrap_err();

        assert_eq!(err.to_string(), "value not provided");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn unimplemented_passthrough() {
        let err = Error::from(RequestError::Unimplemented("Delete"));

        assert_eq!(err.to_string(), "method Delete() is not implemented");
    }
}
