use std::result;

use metadata::error::MetadataError;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("BadRequest: {0:?}")]
    BadRequest(String),
    #[error("FileNotFound: {0:?}")]
    FileNotFound(String),
    #[error("Config: {0:?}")]
    Config(#[from] config::ConfigError),
    #[error("Metadata: {0:?}")]
    Metadata(#[from] MetadataError),
    #[error("StdIO: {0:?}")]
    StdIO(#[from] std::io::Error),
    #[error("SetGlobalDefaultError: {0:?}")]
    SetGlobalDefaultError(SetGlobalDefaultError),
}
