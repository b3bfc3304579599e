use std::error::Error;
use std::fmt;

use crate::RemoteException;

#[derive(Debug)]
pub enum ApiClientError {
    PoisonedLock,
    InvalidUrl(&'static str),
    CookieStore(Box<dyn std::error::Error + Sync + Send>),
    Reqwest(reqwest::Error),
    StdIo(std::io::Error),
}

impl fmt::Display for ApiClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiClientError::PoisonedLock => write!(f, "ApiClientError::PoisonedLock"),
            ApiClientError::InvalidUrl(msg) => write!(f, "ApiClientError::InvalidUrl: {}", msg),
            ApiClientError::CookieStore(_) => write!(f, "ApiClientError::CookieStore"),
            ApiClientError::Reqwest(_) => write!(f, "ApiClientError::Reqwest"),
            ApiClientError::StdIo(_) => write!(f, "ApiClientError::StdIo"),
        }
    }
}

impl Error for ApiClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiClientError::CookieStore(v) => Some(&**v),
            ApiClientError::Reqwest(v) => Some(v),
            ApiClientError::StdIo(v) => Some(v),
            _ => None
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{0}")]
    Validation(String),

    #[error("method {0}() is not implemented")]
    Unimplemented(&'static str),

    #[error(transparent)]
    Remote(#[from] RemoteException),

    #[error("server responded with unexpected status {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("redirect response did not provide a usable location")]
    MissingLocation,

    #[error("failed to build request url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    StdIo(#[from] std::io::Error),
}

impl RequestError {
    pub fn as_remote(self) -> Result<RemoteException, RequestError> {
        match self {
            RequestError::Remote(v) => Ok(v),
            v => Err(v)
        }
    }

    pub fn is_unimplemented(&self) -> bool {
        matches!(self, RequestError::Unimplemented(_))
    }
}
