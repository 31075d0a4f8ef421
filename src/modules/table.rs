//! Registration table of route modules built in code.
//!
//! The route directory only decides which modules are mounted and at which
//! path; their exports come from the table, keyed by the file's path relative
//! to the walk root (`users/index.rs`).

use std::collections::BTreeMap;

use crate::modules::{LoadError, ModuleLoader, RouteFile};
use crate::routes::Exports;

/// Suffix of table-backed route files.
pub const RUST_SUFFIX: &str = ".rs";

#[derive(Debug, Clone)]
pub struct ModuleTable<H, M> {
    suffix: String,
    modules: BTreeMap<String, Exports<H, M>>,
}

impl<H, M> Default for ModuleTable<H, M> {
    fn default() -> Self {
        Self {
            suffix: RUST_SUFFIX.to_string(),
            modules: BTreeMap::new(),
        }
    }
}

impl<H, M> ModuleTable<H, M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a suffix other than `.rs` for route files.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Register the exports of the module at `key`.
    pub fn module(mut self, key: impl Into<String>, exports: Exports<H, M>) -> Self {
        self.insert(key, exports);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, exports: Exports<H, M>) {
        self.modules.insert(key.into(), exports);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<H: Clone, M: Clone> ModuleLoader for ModuleTable<H, M> {
    type Handler = H;
    type Middleware = M;

    fn suffix(&self) -> &str {
        &self.suffix
    }

    async fn load(&self, file: &RouteFile) -> Result<Exports<H, M>, LoadError> {
        let key = file.key();
        self.modules
            .get(&key)
            .cloned()
            .ok_or(LoadError::NotFound(key))
    }
}
