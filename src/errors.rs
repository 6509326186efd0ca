use std::fmt;

/// Fatal error raised by the storage layer. Anything that reaches this
/// enum terminates the process; recoverable conditions (bad statements,
/// a full table) live in their own types and never pass through here.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Storage(String),
    Encoding(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error. {}", e),
            Error::Storage(msg) => write!(f, "Storage error. {}", msg),
            Error::Encoding(msg) => write!(f, "Encoding error. {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

/// Build an [`Error`] variant from a format string.
#[macro_export]
macro_rules! err {
    ($variant:ident, $($arg:tt)*) => {
        $crate::errors::Error::$variant(format!($($arg)*))
    };
}
