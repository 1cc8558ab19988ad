// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse '{path}' at line {line}: {details}")]
    Parse {
        path: String,
        line: usize,
        details: String,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("energy series is empty")]
    EmptySeries,

    #[error("site index {index} out of range (structure has {n_sites} sites)")]
    IndexOutOfRange { index: usize, n_sites: usize },
}

impl Error {
    pub fn parse(path: &str, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_string(),
            line,
            details: details.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
