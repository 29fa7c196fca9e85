use thiserror::Error;

/// Errors raised while discovering and parsing trade-export files.
#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("No files matched patterns {patterns:?} under {folder}")]
    NoFilesMatched {
        folder: String,
        patterns: Vec<String>,
    },

    #[error("Failed to read export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export file '{file}' is missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("Invalid file pattern '{0}'")]
    InvalidPattern(String),
}
