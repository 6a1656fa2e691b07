use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read reference file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot build term index: {0}")]
    Fst(#[from] fst::Error),
}
