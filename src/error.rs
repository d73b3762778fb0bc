use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config: {0}")]
    Deserialize(#[from] toml::de::Error),
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("post {0} not found")]
    NotFound(usize),
    #[error("walk: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("watch: {0}")]
    Watch(#[from] notify::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
