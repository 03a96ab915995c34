use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Every condition that aborts a run. None of them are retried.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    /// No record terminator inside the lookback window ending at `offset`.
    NoTerminator { offset: u64, lookback: usize },
    /// A new key arrived after every slot of the table was claimed.
    TableFull { capacity: usize },
    /// A single record starting at `offset` does not fit the read buffer.
    RecordTooLong { offset: u64, buffer_size: usize },
    InvalidConfig(&'static str),
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::NoTerminator { offset, lookback } => write!(
                f,
                "newline not found within {lookback} bytes before offset {offset}"
            ),
            Error::TableFull { capacity } => {
                write!(f, "station table is full ({capacity} slots)")
            }
            Error::RecordTooLong {
                offset,
                buffer_size,
            } => write!(
                f,
                "record at offset {offset} does not fit a {buffer_size} byte buffer"
            ),
            Error::InvalidConfig(reason) => write!(f, "invalid config: {reason}"),
            Error::ThreadPool(err) => write!(f, "cannot start worker pool: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::ThreadPool(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadPool(err)
    }
}
