//! Application errors
use std::fmt;

#[derive(Debug)]
pub struct CliError {
    pub kind: ErrorKind,
}

impl std::error::Error for CliError {}

#[derive(Debug)]
pub enum ErrorKind {
    /// Source file could not be opened.
    Io(std::io::Error),
    Logger(log::SetLoggerError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "application error: {}", self.kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Logger(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Io(err),
        }
    }
}

impl From<log::SetLoggerError> for CliError {
    fn from(err: log::SetLoggerError) -> Self {
        Self {
            kind: ErrorKind::Logger(err),
        }
    }
}
