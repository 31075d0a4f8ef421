//! In-memory record of registrations.

use std::convert::Infallible;

use serde::Serialize;

use crate::http::server::Server;

/// One call made on a [`RouteTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Registration<H, M> {
    Middleware {
        path: String,
        middleware: Vec<M>,
    },
    Handler {
        /// Server method name (`delete`, not `del`).
        method: &'static str,
        path: String,
        handler: H,
    },
}

/// A server that only records what was registered, in order.
#[derive(Debug, Clone)]
pub struct RouteTable<H, M> {
    registrations: Vec<Registration<H, M>>,
}

impl<H, M> Default for RouteTable<H, M> {
    fn default() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }
}

impl<H, M> RouteTable<H, M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registrations(&self) -> &[Registration<H, M>] {
        &self.registrations
    }

    pub fn into_registrations(self) -> Vec<Registration<H, M>> {
        self.registrations
    }

    /// Number of handler registrations, middleware excluded.
    pub fn handler_count(&self) -> usize {
        self.registrations
            .iter()
            .filter(|r| matches!(r, Registration::Handler { .. }))
            .count()
    }

    fn handler(&mut self, method: &'static str, path: &str, handler: H) -> Result<(), Infallible> {
        self.registrations.push(Registration::Handler {
            method,
            path: path.to_string(),
            handler,
        });
        Ok(())
    }
}

impl<H, M> Server<H, M> for RouteTable<H, M> {
    type Error = Infallible;

    fn use_middleware(&mut self, path: &str, middleware: Vec<M>) -> Result<(), Infallible> {
        self.registrations.push(Registration::Middleware {
            path: path.to_string(),
            middleware,
        });
        Ok(())
    }

    fn get(&mut self, path: &str, handler: H) -> Result<(), Infallible> {
        self.handler("get", path, handler)
    }

    fn post(&mut self, path: &str, handler: H) -> Result<(), Infallible> {
        self.handler("post", path, handler)
    }

    fn put(&mut self, path: &str, handler: H) -> Result<(), Infallible> {
        self.handler("put", path, handler)
    }

    fn patch(&mut self, path: &str, handler: H) -> Result<(), Infallible> {
        self.handler("patch", path, handler)
    }

    fn delete(&mut self, path: &str, handler: H) -> Result<(), Infallible> {
        self.handler("delete", path, handler)
    }
}
