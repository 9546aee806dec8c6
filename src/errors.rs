//! Error types for the object-store reader
//!
//! Every failure of a refresh maps to exactly one variant so callers can
//! report a single, specific reason. Command code wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitInfoError {
    #[error("git directory {0} does not exist or is not a directory")]
    RepoNotFound(PathBuf),

    #[error("unable to read HEAD at {path}: {source}")]
    MissingHead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reference {0} not found in loose refs or packed-refs")]
    DanglingRef(String),

    #[error("invalid object id {0:?}: expected 40 lowercase hex characters")]
    InvalidHash(String),

    #[error("object {id} is corrupt: {reason}")]
    CorruptObject { id: String, reason: String },

    #[error("object {0} is not a loose object and no pack backend is configured")]
    PackObjectUnsupported(String),

    #[error("object {0} not found in the pack backend")]
    ObjectNotFound(String),

    #[error("commit has no author line")]
    MissingAuthorLine,

    #[error("invalid timestamp {0:?}: expected an integer in 0..=2147483647")]
    InvalidTimestamp(String),

    #[error("invalid timezone {0:?}: expected ±HHMM")]
    InvalidTimezone(String),

    #[error("already up to date at {0}")]
    NoChange(String),

    #[error("history store error: {0}")]
    History(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GitInfoError>;
