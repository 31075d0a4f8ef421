//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use ordner::modules::{HandlerRegistry, ManifestLoader};

/// Create a scratch route tree. Each file is created with its parent
/// directories; contents are written verbatim.
pub fn route_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (relative, content) in files {
        write_file(dir.path(), relative, content);
    }
    dir
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Manifest loader whose handlers and middleware resolve to their own names,
/// but only for names that were declared.
pub fn manifest_loader(
    handlers: &[&'static str],
    middleware: &[&'static str],
) -> ManifestLoader<HandlerRegistry<&'static str, &'static str>> {
    let mut registry = HandlerRegistry::new();
    for name in handlers {
        registry = registry.with_handler(*name, *name);
    }
    for name in middleware {
        registry = registry.with_middleware(*name, *name);
    }
    ManifestLoader::new(registry)
}
