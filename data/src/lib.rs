use std::path::PathBuf;

pub mod blocks;
pub mod config;
pub mod format;
pub mod log;
pub mod order;

pub use blocks::SheetKind;

#[derive(thiserror::Error, Debug, Clone)]
pub enum InternalError {
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Path under the platform data directory; `file` is appended when given.
pub fn data_path(file: Option<&str>) -> PathBuf {
    let data_dir = dirs_next::data_dir().unwrap_or_else(|| PathBuf::from("."));

    let mut path = data_dir.join("trastboard");
    if let Some(file) = file {
        path.push(file);
    }
    path
}

pub fn write_json_to_file(json: &str, path: &PathBuf) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, json)
}
