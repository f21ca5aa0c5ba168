use std::path::PathBuf;
use std::{io, result};

use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    Cancelled,
    ClientError,
    Conflict,
    ServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok | Self::Cancelled => 200,
            Self::ClientError => 400,
            Self::Conflict => 409,
            Self::ServerError => 500,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid size {0:?}")]
    InvalidSize(String),
    #[error("unknown size suffix '{0}', expected one of K, M, G, T")]
    UnknownSuffix(char),
    #[error("size {0:?} does not fit into 64 bits")]
    SizeOverflow(String),
    #[error("pattern must not be empty")]
    EmptyPattern,
    #[error("{} already exists", .0.display())]
    FileExists(PathBuf),
    #[error("failed to remove {}: {source}", .path.display())]
    Unlink { path: PathBuf, source: io::Error },
    #[error("failed to open {} for writing: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Error::InvalidSize(_)
            | Error::UnknownSuffix(_)
            | Error::SizeOverflow(_)
            | Error::EmptyPattern
            | Error::Unlink { .. } => Status::ClientError,
            Error::FileExists(_) => Status::Conflict,
            Error::Open { .. } | Error::Write(_) => Status::ServerError,
        }
    }
}

#[cfg(test)]
#[test]
fn test_error_status() {
    crate::tests_init();

    assert_eq!(Error::InvalidSize("abc".to_owned()).status().code(), 400);
    assert_eq!(Error::UnknownSuffix('X').status(), Status::ClientError);
    assert_eq!(
        Error::FileExists(PathBuf::from("a.bin")).status(),
        Status::Conflict
    );
    assert_eq!(
        Error::Open {
            path: PathBuf::from("a.bin"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        }
        .status()
        .code(),
        500
    );
    assert_eq!(Status::Cancelled.code(), 200);
}
