use std::fs::File;
use std::path::Path;

use env_logger::{Env, Target};

use crate::error::{GameError, Result};

/// Sends `log` output to `path`, filtered by `RUST_LOG` (default `info`).
/// The terminal itself belongs to the game.
pub fn init_logging(path: &Path) -> Result<()> {
    let file = open_log_file(path)?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

pub fn open_log_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| GameError::Logging {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn log_file_is_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snake.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn missing_directory_is_a_logging_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("snake.log");

        let err = open_log_file(&path).unwrap_err();
        assert!(matches!(err, GameError::Logging { .. }));
        assert!(err.to_string().starts_with("cannot open log file"));
    }
}
