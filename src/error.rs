//! Error types for the file and config surfaces.
//!
//! The content pipeline itself never fails; these only come from I/O,
//! config parsing and serialisation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
