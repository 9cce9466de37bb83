use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Schema error: missing required column(s) {missing:?} (available: {available:?})")]
    Schema {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("Failed to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid loader configuration: {0}")]
    InvalidConfig(String),
}
