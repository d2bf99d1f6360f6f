//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O and codec errors, and provides semantic variants
//! for argument validation. Every variant belongs to one of two kinds, see [`ErrorKind`].
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification used by callers that only care whether the
/// failure came from the filesystem/codecs or from the caller's input.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    Io,
    Input,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Unsupported output format for {path:?}; expected .png, .jpg or .jpeg")]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Aspect string must be described as width:height, got: {0:?}")]
    InvalidAspect(String),

    #[error("At least one image is required")]
    EmptyInput,

    #[error("Unknown color: {0:?}")]
    UnknownColor(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_)
            | Error::Decode { .. }
            | Error::Encode(_)
            | Error::UnsupportedFormat { .. }
            | Error::Processing(_) => ErrorKind::Io,
            Error::InvalidArgument { .. }
            | Error::InvalidAspect(_)
            | Error::EmptyInput
            | Error::UnknownColor(_) => ErrorKind::Input,
        }
    }

    pub fn encode<E: std::fmt::Display>(e: E) -> Self {
        Error::Encode(e.to_string())
    }

    pub fn processing<E: std::fmt::Display>(e: E) -> Self {
        Error::Processing(e.to_string())
    }
}
