use std::io;

/// Errors surfaced at the boundaries of the crate.
///
/// Violations of the network's structural invariants are not represented here, they panic.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("number of elements must be an integer greater than zero, got {0}")]
    InvalidLength(i64),

    #[error("number of sequences must be a positive multiple of 8, got {sequences}")]
    VectorCountMismatch { sequences: usize },

    #[error("buffer holds {actual} elements but {required} are required")]
    BufferTooShort { required: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
