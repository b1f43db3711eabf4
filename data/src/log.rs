use std::path::PathBuf;
use std::{fs, io};

use crate::data_path;

const LOG_FILE: &str = "trastboard-current.log";

pub fn path() -> Result<PathBuf, Error> {
    let full_path = data_path(Some(LOG_FILE));

    let parent = full_path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid log file path"))?;

    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    Ok(full_path)
}

/// Keeps one previous log around: the current file is renamed aside before
/// a fresh session starts writing.
pub fn rotate(log_path: &PathBuf) -> io::Result<()> {
    let fallback = PathBuf::from(".");
    let dir = log_path.parent().unwrap_or(&fallback);

    let previous = dir.join("trastboard-previous.log");

    if previous.exists() {
        fs::remove_file(&previous)?;
    }

    if log_path.exists() {
        fs::rename(log_path, &previous)?;
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    SetLog(#[from] log::SetLoggerError),
    #[error(transparent)]
    ParseLevel(#[from] log::ParseLevelError),
}
