pub mod block;
pub mod client;

pub use block::{Block, CellValue};

#[derive(thiserror::Error, Debug)]
pub enum AdapterError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Parsing error: {0}")]
    Parse(String),
    #[error("{0}")]
    Server(String),
}
