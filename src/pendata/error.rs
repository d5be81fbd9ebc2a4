use thiserror::Error;

use crate::model::Nisn;

#[derive(Error, Debug)]
pub enum PendataError {
    #[error("A student with NISN {0} is already registered")]
    DuplicateNisn(Nisn),

    #[error("No student with NISN {0} found")]
    NotFound(Nisn),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PendataError>;
