use std::convert::From;
use std::error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    OutOfSupportedRange,
    CapacityExceeded,
    EmptyTitle,
    DateParse,
    ConfigParse,
    CommandParse,
    IOError(io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, ErrorKind::OutOfSupportedRange)
    }

    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self.kind, ErrorKind::CapacityExceeded)
    }

    pub fn is_empty_title(&self) -> bool {
        matches!(self.kind, ErrorKind::EmptyTitle)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::ErrorKind> for Error {
    fn from(kind: io::ErrorKind) -> Error {
        Error::from(io::Error::from(kind))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(parse_error: chrono::ParseError) -> Error {
        Error::new(
            ErrorKind::DateParse,
            format!("Could not parse date: {}", parse_error).as_str(),
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(ErrorKind::ConfigParse, &toml_error.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        if let ErrorKind::IOError(err) = err.kind {
            err
        } else {
            let msg = match err.message {
                Some(msg) => msg,
                None => err.kind.as_str(),
            };
            io::Error::new(io::ErrorKind::InvalidInput, msg)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}", msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::IOError(err) => Some(err),
            _ => None,
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::OutOfSupportedRange => "date is outside of the supported range".to_owned(),
            ErrorKind::CapacityExceeded => "too many events on this day".to_owned(),
            ErrorKind::EmptyTitle => "event title must not be empty".to_owned(),
            ErrorKind::DateParse => "invalid date format".to_owned(),
            ErrorKind::ConfigParse => "invalid configuration".to_owned(),
            ErrorKind::CommandParse => "invalid command".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}
