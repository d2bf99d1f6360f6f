use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Batch input must be a directory: {path}")]
    NotADirectory { path: String },

    #[error(transparent)]
    Library(#[from] imgcollage::Error),
}
