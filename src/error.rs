use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::food::SpawnError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("cannot open log file {path:?}: {source}")]
    Logging { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not start a round: {0}")]
    Spawn(#[from] SpawnError),
}

pub type Result<T> = std::result::Result<T, GameError>;
