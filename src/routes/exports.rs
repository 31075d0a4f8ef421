//! Named exports of a loaded route module.

use crate::routes::verb::{Verb, USE_BEFORE};

/// A single exported value.
#[derive(Debug, Clone, PartialEq)]
pub enum Export<H, M> {
    /// A request handler, registered when exported under a verb name.
    Handler(H),
    /// A middleware list, registered when exported under a `useBefore*` name.
    Middleware(Vec<M>),
    /// Anything else a module exposes. Never registered.
    Value(serde_json::Value),
}

impl<H, M> Export<H, M> {
    pub fn as_handler(&self) -> Option<&H> {
        match self {
            Export::Handler(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_middleware(&self) -> Option<&[M]> {
        match self {
            Export::Middleware(m) => Some(m),
            _ => None,
        }
    }
}

/// Export name to value mapping, kept in declaration order.
///
/// Inserting an existing name replaces its value in place, so a name appears
/// at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Exports<H, M> {
    entries: Vec<(String, Export<H, M>)>,
}

impl<H, M> Default for Exports<H, M> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H, M> Exports<H, M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an export.
    pub fn insert(&mut self, name: impl Into<String>, export: Export<H, M>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = export,
            None => self.entries.push((name, export)),
        }
    }

    /// Builder form of [`Exports::insert`].
    pub fn with(mut self, name: impl Into<String>, export: Export<H, M>) -> Self {
        self.insert(name, export);
        self
    }

    pub fn handler(self, name: impl Into<String>, handler: H) -> Self {
        self.with(name, Export::Handler(handler))
    }

    pub fn middleware(self, name: impl Into<String>, middleware: Vec<M>) -> Self {
        self.with(name, Export::Middleware(middleware))
    }

    pub fn value(self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.with(name, Export::Value(value))
    }

    pub fn get(&self, name: &str) -> Option<&Export<H, M>> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, export)| export)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Export<H, M>)> {
        self.entries.iter().map(|(key, export)| (key.as_str(), export))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verb exports in priority order, whatever order they were declared in.
    ///
    /// Verb keys whose export is not a handler are left out; names outside
    /// the verb set are ignored.
    pub fn handlers(&self) -> Vec<(Verb, &H)> {
        let mut handlers: Vec<(Verb, &H)> = self
            .iter()
            .filter_map(|(name, export)| {
                let verb = Verb::from_export(name)?;
                match export.as_handler() {
                    Some(handler) => Some((verb, handler)),
                    None => {
                        tracing::warn!(export = name, "Verb export is not a handler, skipping");
                        None
                    }
                }
            })
            .collect();
        handlers.sort_by_key(|(verb, _)| verb.priority());
        handlers
    }

    /// Path-level middleware, if present and non-empty.
    pub fn use_before(&self) -> Option<&[M]> {
        self.middleware_list(USE_BEFORE)
    }

    /// Middleware for a single verb, if present and non-empty.
    pub fn use_before_verb(&self, verb: Verb) -> Option<&[M]> {
        self.middleware_list(verb.middleware_key())
    }

    fn middleware_list(&self, name: &str) -> Option<&[M]> {
        self.get(name)
            .and_then(Export::as_middleware)
            .filter(|list| !list.is_empty())
    }
}

impl<H, M> FromIterator<(String, Export<H, M>)> for Exports<H, M> {
    fn from_iter<I: IntoIterator<Item = (String, Export<H, M>)>>(iter: I) -> Self {
        let mut exports = Exports::new();
        for (name, export) in iter {
            exports.insert(name, export);
        }
        exports
    }
}
