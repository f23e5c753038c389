use std::fmt;
use std::io;
use std::result;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Argument(String),
    Io(String),
    State(String),
    Protocol(String),

    // Local, pre-network checks on user input.
    Validation(String),

    // Login handshake rejections.
    Delivery(String),
    InvalidCode(String),

    // Backend answered with an error status, plus the message found in
    // the response body if any.
    Http(u16, Option<String>),

    // No response at all (unreachable, refused, timed out).
    Network(String),
    // The request could not be built.
    Request(String),
}

impl Error {
    /// HTTP status carried by backend-originated errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(status, _) => Some(*status),
            _ => None,
        }
    }

    /// The message reported by the backend, if the error came from one.
    /// Inline error messages prefer this over the generic notice text.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Http(_, msg) => msg.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Http(401, _))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Argument(msg)    => write!(f, "{}", msg),
            Error::Io(msg)          => write!(f, "{}", msg),
            Error::State(msg)       => write!(f, "{}", msg),
            Error::Protocol(msg)    => write!(f, "{}", msg),
            Error::Validation(msg)  => write!(f, "{}", msg),
            Error::Delivery(msg)    => write!(f, "{}", msg),
            Error::InvalidCode(msg) => write!(f, "{}", msg),
            Error::Http(status, Some(msg)) => write!(f, "Http error {}: {}", status, msg),
            Error::Http(status, None)      => write!(f, "Http error {}", status),
            Error::Network(msg)     => write!(f, "{}", msg),
            Error::Request(msg)     => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Protocol(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Request(format!("Invalid url: {}", err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::Request(format!("Http error: building request error {err}"))
        } else if err.is_decode() {
            Error::Protocol(format!("Http error: deserialize json error {err}"))
        } else {
            Error::Network(format!("Http error: sending http request error {err}"))
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
