//! Route module loading.
//!
//! # Data Flow
//! ```text
//! walker finds <root>/users/index.rs
//!     → RouteFile { path, relative: users/index.rs }
//!     → ModuleLoader::load
//!         table.rs    (lookup in a registration table built in code)
//!         manifest.rs (parse a TOML manifest, resolve handler names)
//!     → Exports
//! ```
//!
//! # Design Decisions
//! - Loading sits behind a trait, the walker never reads module contents
//! - Each loader fixes its own file suffix; the index file is `index` + suffix
//! - A failed load aborts the walk, there is no partial result

pub mod manifest;
pub mod table;

use std::future::Future;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::routes::Exports;

pub use manifest::{HandlerRegistry, ManifestLoader, NameResolver, Resolver};
pub use table::ModuleTable;

/// A route file discovered by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFile {
    /// Path as walked, i.e. joined onto the root the walk started from.
    pub path: PathBuf,
    /// Path relative to the walk root.
    pub relative: PathBuf,
}

impl RouteFile {
    /// Relative path with `/` separators on every platform.
    pub fn key(&self) -> String {
        self.relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Turns a route file into the exports it provides.
pub trait ModuleLoader {
    type Handler;
    type Middleware;

    /// File suffix recognized as a route module, including the dot.
    fn suffix(&self) -> &str;

    fn load(
        &self,
        file: &RouteFile,
    ) -> impl Future<Output = Result<Exports<Self::Handler, Self::Middleware>, LoadError>>;
}

/// Errors raised while loading a single route module.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no module registered for {0}")]
    NotFound(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("export `{export}` references unknown handler `{name}`")]
    UnknownHandler { export: String, name: String },

    #[error("export `{export}` references unknown middleware `{name}`")]
    UnknownMiddleware { export: String, name: String },

    #[error("export `{export}` is invalid: {reason}")]
    InvalidExport { export: String, reason: &'static str },

    #[error("export `{export}` cannot be represented as a value: {source}")]
    Value {
        export: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_uses_forward_slashes() {
        let file = RouteFile {
            path: PathBuf::from("routes").join("users").join("index.rs"),
            relative: PathBuf::from("users").join("index.rs"),
        };
        assert_eq!(file.key(), "users/index.rs");
    }
}
