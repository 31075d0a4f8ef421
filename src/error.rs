//! Crate-level error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::modules::LoadError;

/// Errors that abort a walk or a registration pass.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the route directory failed.
    #[error("failed to walk route directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The route root exists but is not a directory.
    #[error("route root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// A route module could not be loaded.
    #[error("failed to load route module {}: {source}", .file.display())]
    Load {
        file: PathBuf,
        #[source]
        source: LoadError,
    },

    /// The server refused a registration.
    #[error("failed to register {method} {path}: {source}")]
    Register {
        method: &'static str,
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Writing the route table failed.
    #[error("failed to write route log: {0}")]
    Log(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn register<E>(method: &'static str, path: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Register {
            method,
            path: path.to_string(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
