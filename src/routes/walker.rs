//! Directory walk that turns a route tree into sorted route entries.
//!
//! # Responsibilities
//! - Visit every entry under the root, siblings in file name order
//! - Map each route file to a path (`users/index.rs` → `/users`)
//! - Load each file through the module loader, one at a time
//! - Sort the result by path
//!
//! # Design Decisions
//! - Directories never produce a route of their own
//! - Duplicate paths (`a.rs` and `a/index.rs`) are all kept
//! - Path order compares UTF-16 code units, stable for equal paths
//! - The first read or load failure aborts the walk, a root that is not a
//!   directory fails before any entry is read

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::modules::{ModuleLoader, RouteFile};
use crate::routes::RouteEntry;

/// File stem of the module that maps to its directory's own path.
pub const INDEX_STEM: &str = "index";

/// Walk `root` and load every route module found, sorted by path.
pub async fn walk<L: ModuleLoader>(
    root: impl AsRef<Path>,
    loader: &L,
) -> Result<Vec<RouteEntry<L::Handler, L::Middleware>>> {
    let root = root.as_ref();
    let suffix = loader.suffix();
    let index = format!("{}{}", INDEX_STEM, suffix);
    let mut routes = Vec::new();

    // A missing root is left for the walk to report.
    if fs::metadata(root).is_ok_and(|meta| !meta.is_dir()) {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let entries = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in entries {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let Some(stem) = file_name.strip_suffix(suffix) else {
            continue;
        };
        let name = if file_name == index.as_str() { "" } else { stem };

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        let scope: Vec<String> = relative
            .parent()
            .into_iter()
            .flat_map(|parent| parent.components())
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let path = route_path(&scope, name);

        let file = RouteFile {
            path: entry.path().to_path_buf(),
            relative,
        };
        let exports = loader.load(&file).await.map_err(|source| Error::Load {
            file: file.path.clone(),
            source,
        })?;

        tracing::debug!(path = %path, file = %file.path.display(), "Discovered route module");
        routes.push(RouteEntry {
            path,
            file: file.path,
            exports,
        });
    }

    sort_routes(&mut routes);
    Ok(routes)
}

/// Join scope segments and a file name into a route path, skipping empty
/// segments.
pub fn route_path(scope: &[String], name: &str) -> String {
    let segments: Vec<&str> = scope
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(name))
        .filter(|segment| !segment.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}

/// Stable sort by path.
pub fn sort_routes<H, M>(routes: &mut [RouteEntry<H, M>]) {
    routes.sort_by(|a, b| compare_paths(&a.path, &b.path));
}

/// Ordinal comparison over UTF-16 code units.
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Exports;
    use std::path::PathBuf;

    fn scope(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_route_path() {
        assert_eq!(route_path(&[], ""), "/");
        assert_eq!(route_path(&[], "about"), "/about");
        assert_eq!(route_path(&scope(&["users"]), ""), "/users");
        assert_eq!(route_path(&scope(&["users"]), "get"), "/users/get");
        assert_eq!(route_path(&scope(&["api", "v1"]), "items"), "/api/v1/items");
    }

    #[test]
    fn test_compare_paths_is_ordinal() {
        assert_eq!(compare_paths("/", "/a"), Ordering::Less);
        assert_eq!(compare_paths("/B", "/a"), Ordering::Less);
        assert_eq!(compare_paths("/a/b", "/a-b"), Ordering::Greater);
        assert_eq!(compare_paths("/x", "/x"), Ordering::Equal);
    }

    #[test]
    fn test_compare_paths_uses_utf16_units() {
        // U+1F600 encodes as a surrogate pair (0xD83D ...), which sorts
        // before U+FF21 in UTF-16 but after it by code point.
        assert_eq!(compare_paths("/\u{1F600}", "/\u{FF21}"), Ordering::Less);
        assert_eq!("/\u{1F600}".cmp("/\u{FF21}"), Ordering::Greater);
    }

    #[test]
    fn test_sort_is_stable_for_equal_paths() {
        let entry = |path: &str, file: &str| RouteEntry::<(), ()> {
            path: path.to_string(),
            file: PathBuf::from(file),
            exports: Exports::new(),
        };
        let mut routes = vec![
            entry("/b", "b.rs"),
            entry("/a", "a.rs"),
            entry("/b", "b/index.rs"),
            entry("/", "index.rs"),
        ];
        sort_routes(&mut routes);

        let files: Vec<_> = routes.iter().map(|r| r.file.to_str().unwrap()).collect();
        assert_eq!(files, vec!["index.rs", "a.rs", "b.rs", "b/index.rs"]);
    }
}
