// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Fatal outcomes of a generation run
#[derive(Debug, Error)]
pub enum CvError {
    #[error("CV data file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Could not read CV data from {}: {source:#}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("CV data file is empty or not a mapping: {}", .0.display())]
    EmptyRecord(PathBuf),

    #[error("Invalid configuration: {0:#}")]
    Config(#[source] anyhow::Error),

    #[error("CV data failed validation with {} error(s):\n  - {}", .0.len(), .0.join("\n  - "))]
    Validation(Vec<String>),

    #[error("Failed to save document: {0:#}")]
    Persist(#[source] anyhow::Error),
}
