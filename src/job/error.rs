use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Index(#[from] crate::index::Error),

    #[error(transparent)]
    Config(#[from] crate::config::Error),

    #[error("output directory {0} already exists")]
    OutputExists(PathBuf),

    #[error("{0} worker panicked")]
    WorkerPanicked(&'static str),

    #[error("job I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
