pub mod bio;
pub mod cli;
pub mod core;
pub mod report;

pub use crate::core::kernel::{Kernel, Mismatch, Spectrum};
pub use crate::core::kmeans::KMeans;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenoclustError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown sequence label: {0}")]
    Label(String),

    #[error("Unknown representation '{0}' (expected 'string', 'list', or 'kmers')")]
    Representation(String),

    #[error("Position {position} out of range for sequence of length {length}")]
    OutOfRange { position: usize, length: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GenoclustError>;
