use thiserror::Error;

use crate::types::ErrorObject;

/// Failure reported by a [`Backend`](crate::Backend) call.
#[derive(Debug, Error)]
pub enum NativeError {
    /// The native call returned null / zero. Carries the popped error entry
    /// (or the shader message for compile and link failures).
    #[error("{function} failed: {details}")]
    Failed { function: &'static str, details: String },

    /// A handle that the backend does not (or no longer) know about.
    #[error("unknown {kind} handle {raw:#x}")]
    UnknownHandle { kind: &'static str, raw: u64 },

    /// No renderer has been initialised, or it was closed.
    #[error("no current renderer")]
    NoRenderer,

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl NativeError {
    pub fn failed(function: &'static str, details: impl Into<String>) -> Self {
        Self::Failed { function, details: details.into() }
    }

    /// Builds a `Failed` from a popped native error entry.
    pub fn from_error_object(function: &'static str, err: Option<ErrorObject>) -> Self {
        let details = match err {
            Some(e) if !e.details.is_empty() => e.details,
            Some(e) => e.error.as_str().to_owned(),
            None => "no error details".to_owned(),
        };
        Self::Failed { function, details }
    }
}

pub type Result<T> = std::result::Result<T, NativeError>;
