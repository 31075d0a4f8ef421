//! TOML route manifests.
//!
//! A manifest declares a module's exports by name:
//!
//! ```toml
//! get = "users::list"
//! post = "users::create"
//! useBefore = ["auth"]
//! useBeforePost = ["csrf"]
//! title = "Users"
//! ```
//!
//! Verb keys name a handler and middleware keys name a list of middleware,
//! both looked up through a [`Resolver`]. Every other key is kept as a plain
//! value.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::modules::{LoadError, ModuleLoader, RouteFile};
use crate::routes::verb::{is_middleware_key, Verb};
use crate::routes::{Export, Exports};

/// Suffix of manifest route files.
pub const MANIFEST_SUFFIX: &str = ".toml";

/// Maps names used in manifests to handler and middleware values.
pub trait Resolver {
    type Handler;
    type Middleware;

    fn handler(&self, name: &str) -> Option<Self::Handler>;

    fn middleware(&self, name: &str) -> Option<Self::Middleware>;
}

/// Named handlers and middleware registered up front.
#[derive(Debug, Clone)]
pub struct HandlerRegistry<H, M> {
    handlers: HashMap<String, H>,
    middleware: HashMap<String, M>,
}

impl<H, M> Default for HandlerRegistry<H, M> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            middleware: HashMap::new(),
        }
    }
}

impl<H, M> HandlerRegistry<H, M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler(mut self, name: impl Into<String>, handler: H) -> Self {
        self.handlers.insert(name.into(), handler);
        self
    }

    pub fn with_middleware(mut self, name: impl Into<String>, middleware: M) -> Self {
        self.middleware.insert(name.into(), middleware);
        self
    }
}

impl<H: Clone, M: Clone> Resolver for HandlerRegistry<H, M> {
    type Handler = H;
    type Middleware = M;

    fn handler(&self, name: &str) -> Option<H> {
        self.handlers.get(name).cloned()
    }

    fn middleware(&self, name: &str) -> Option<M> {
        self.middleware.get(name).cloned()
    }
}

/// Resolves every name to itself. Used to preview a route tree without
/// any handlers in hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameResolver;

impl Resolver for NameResolver {
    type Handler = String;
    type Middleware = String;

    fn handler(&self, name: &str) -> Option<String> {
        Some(name.to_string())
    }

    fn middleware(&self, name: &str) -> Option<String> {
        Some(name.to_string())
    }
}

/// Loads route modules from TOML manifests.
#[derive(Debug, Clone)]
pub struct ManifestLoader<R> {
    resolver: R,
}

impl<R: Resolver> ManifestLoader<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Build exports from manifest text read from `path`.
    pub fn parse(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<Exports<R::Handler, R::Middleware>, LoadError> {
        let table: toml::Table = toml::from_str(content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        self.resolve(table)
    }

    fn resolve(
        &self,
        table: toml::Table,
    ) -> Result<Exports<R::Handler, R::Middleware>, LoadError> {
        let mut exports = Exports::new();

        for (name, value) in table {
            let export = if Verb::from_export(&name).is_some() {
                let handler_name = value.as_str().ok_or_else(|| LoadError::InvalidExport {
                    export: name.clone(),
                    reason: "expected a handler name",
                })?;
                let handler = self.resolver.handler(handler_name).ok_or_else(|| {
                    LoadError::UnknownHandler {
                        export: name.clone(),
                        name: handler_name.to_string(),
                    }
                })?;
                Export::Handler(handler)
            } else if is_middleware_key(&name) {
                Export::Middleware(self.resolve_middleware(&name, &value)?)
            } else {
                let value = serde_json::to_value(&value).map_err(|source| LoadError::Value {
                    export: name.clone(),
                    source,
                })?;
                Export::Value(value)
            };
            exports.insert(name, export);
        }

        Ok(exports)
    }

    fn resolve_middleware(
        &self,
        export: &str,
        value: &toml::Value,
    ) -> Result<Vec<R::Middleware>, LoadError> {
        let names = value.as_array().ok_or_else(|| LoadError::InvalidExport {
            export: export.to_string(),
            reason: "expected an array of middleware names",
        })?;

        names
            .iter()
            .map(|item| {
                let name = item.as_str().ok_or_else(|| LoadError::InvalidExport {
                    export: export.to_string(),
                    reason: "middleware names must be strings",
                })?;
                self.resolver
                    .middleware(name)
                    .ok_or_else(|| LoadError::UnknownMiddleware {
                        export: export.to_string(),
                        name: name.to_string(),
                    })
            })
            .collect()
    }
}

impl<R: Resolver> ModuleLoader for ManifestLoader<R> {
    type Handler = R::Handler;
    type Middleware = R::Middleware;

    fn suffix(&self) -> &str {
        MANIFEST_SUFFIX
    }

    async fn load(
        &self,
        file: &RouteFile,
    ) -> Result<Exports<R::Handler, R::Middleware>, LoadError> {
        let content = fs::read_to_string(&file.path).map_err(|e| LoadError::io(&file.path, e))?;
        let exports = self.parse(&file.path, &content)?;
        tracing::debug!(file = %file.path.display(), exports = exports.len(), "Loaded route manifest");
        Ok(exports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> HandlerRegistry<&'static str, &'static str> {
        HandlerRegistry::new()
            .with_handler("users::list", "list")
            .with_handler("users::create", "create")
            .with_middleware("auth", "auth-mw")
            .with_middleware("csrf", "csrf-mw")
    }

    fn parse(content: &str) -> Result<Exports<&'static str, &'static str>, LoadError> {
        ManifestLoader::new(registry()).parse(Path::new("users/index.toml"), content)
    }

    #[test]
    fn test_parse_full_manifest() {
        let exports = parse(
            r#"
            get = "users::list"
            post = "users::create"
            useBefore = ["auth"]
            useBeforePost = ["csrf", "auth"]
            title = "Users"
            "#,
        )
        .unwrap();

        let verbs: Vec<(Verb, &str)> = exports.handlers().into_iter().map(|(v, h)| (v, *h)).collect();
        assert_eq!(verbs, vec![(Verb::Post, "create"), (Verb::Get, "list")]);
        assert_eq!(exports.use_before(), Some(&["auth-mw"][..]));
        assert_eq!(exports.use_before_verb(Verb::Post), Some(&["csrf-mw", "auth-mw"][..]));
        assert_eq!(
            exports.get("title"),
            Some(&Export::Value(serde_json::json!("Users")))
        );
    }

    #[test]
    fn test_exports_keep_manifest_order() {
        let exports = parse(
            r#"
            title = "Users"
            useBefore = ["auth"]
            post = "users::create"
            get = "users::list"
            "#,
        )
        .unwrap();

        let names: Vec<&str> = exports.names().collect();
        assert_eq!(names, vec!["title", "useBefore", "post", "get"]);
    }

    #[test]
    fn test_unknown_handler_fails() {
        let err = parse(r#"get = "users::missing""#).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnknownHandler { ref export, ref name } if export == "get" && name == "users::missing"
        ));
    }

    #[test]
    fn test_unknown_middleware_fails() {
        let err = parse(r#"useBeforeGet = ["nope"]"#).unwrap_err();
        assert!(matches!(err, LoadError::UnknownMiddleware { .. }));
    }

    #[test]
    fn test_verb_must_be_a_name() {
        let err = parse("get = 42").unwrap_err();
        assert!(matches!(err, LoadError::InvalidExport { .. }));
    }

    #[test]
    fn test_middleware_must_be_an_array() {
        let err = parse(r#"useBefore = "auth""#).unwrap_err();
        assert!(matches!(err, LoadError::InvalidExport { .. }));
    }

    #[test]
    fn test_syntax_error_carries_path() {
        let err = parse("get = ").unwrap_err();
        match err {
            LoadError::Parse { path, .. } => assert_eq!(path, Path::new("users/index.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_name_resolver_accepts_anything() {
        let loader = ManifestLoader::new(NameResolver);
        let exports = loader
            .parse(Path::new("index.toml"), r#"del = "whatever""#)
            .unwrap();
        assert_eq!(exports.get("del"), Some(&Export::Handler("whatever".to_string())));
        assert_eq!(loader.suffix(), ".toml");
    }
}
