//! Registration onto an axum [`Router`].
//!
//! # Responsibilities
//! - Type-erase axum handlers and middleware so one route tree can mix them
//! - Mount verb handlers with method filters
//! - Apply path-scoped middleware in registration order
//!
//! # Design Decisions
//! - `:name` and `*name` segments become axum's `{name}` and `{*name}`,
//!   literal braces are escaped
//! - Paths axum cannot route are rejected with [`RouteError`] before they
//!   reach the router
//! - Registering a method twice on one path keeps the first handler,
//!   axum itself would panic on the overlap
//! - Middleware layers are added when the router is built, after all routes

use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    response::Response,
    routing::on_service,
    Router,
};
use futures_util::future::{BoxFuture, FutureExt};
use thiserror::Error;
use tower::util::BoxCloneSyncService;
use tower::Service;
use tower_http::trace::TraceLayer;

use crate::http::server::{in_scope, Server};
use crate::routes::Verb;

/// A clonable, type-erased request handler.
#[derive(Clone)]
pub struct Handler(BoxCloneSyncService<Request, Response, Infallible>);

impl Handler {
    /// Wrap any stateless axum handler.
    pub fn new<H, T>(handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()> + Sync,
        T: 'static,
    {
        Self(BoxCloneSyncService::new(handler.with_state(())))
    }

    /// Wrap a tower service.
    pub fn from_service<S>(service: S) -> Self
    where
        S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Future: Send + 'static,
    {
        Self(BoxCloneSyncService::new(service))
    }

    pub fn into_service(self) -> BoxCloneSyncService<Request, Response, Infallible> {
        self.0
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

type MiddlewareFn = dyn Fn(Request, Next) -> BoxFuture<'static, Response> + Send + Sync;

/// A clonable middleware function in the shape of
/// [`axum::middleware::from_fn`].
#[derive(Clone)]
pub struct Middleware(Arc<MiddlewareFn>);

impl Middleware {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self(Arc::new(
            move |req: Request, next: Next| -> BoxFuture<'static, Response> { f(req, next).boxed() },
        ))
    }

    pub fn run(&self, req: Request, next: Next) -> BoxFuture<'static, Response> {
        (self.0)(req, next)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}

/// Paths that cannot be mounted on an axum router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("catch-all segment `*{name}` must be the last segment of {path}")]
    CatchAllNotLast { path: String, name: String },

    #[error("capture `{name}` in {path} contains a brace")]
    InvalidCapture { path: String, name: String },

    #[error("capture `{name}` appears more than once in {path}")]
    DuplicateCapture { path: String, name: String },
}

/// Collects registrations and builds an axum [`Router`] from them.
#[derive(Default)]
pub struct AxumServer {
    router: Router,
    registered: HashSet<(String, Verb)>,
    middleware: Vec<(String, Middleware)>,
}

impl AxumServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the router with middleware and request tracing applied.
    pub fn into_router(self) -> Router {
        let mut router = self.router;

        // Layers wrap outside-in, so the first registered is added last.
        for (base, middleware) in self.middleware.into_iter().rev() {
            router = router.layer(from_fn(move |req: Request, next: Next| {
                let base = base.clone();
                let middleware = middleware.clone();
                async move {
                    if in_scope(&base, req.uri().path()) {
                        middleware.run(req, next).await
                    } else {
                        next.run(req).await
                    }
                }
            }));
        }

        router.layer(TraceLayer::new_for_http())
    }

    fn route(&mut self, verb: Verb, path: &str, handler: Handler) -> Result<(), RouteError> {
        let path = axum_path(path)?;
        if !self.registered.insert((path.clone(), verb)) {
            tracing::warn!(path = %path, verb = %verb, "Route already registered, keeping the first handler");
            return Ok(());
        }
        let router = std::mem::take(&mut self.router);
        self.router = router.route(&path, on_service(verb.method_filter(), handler.into_service()));
        Ok(())
    }
}

impl Server<Handler, Middleware> for AxumServer {
    type Error = RouteError;

    fn use_middleware(&mut self, path: &str, middleware: Vec<Middleware>) -> Result<(), RouteError> {
        self.middleware
            .extend(middleware.into_iter().map(|m| (path.to_string(), m)));
        Ok(())
    }

    fn get(&mut self, path: &str, handler: Handler) -> Result<(), RouteError> {
        self.route(Verb::Get, path, handler)
    }

    fn post(&mut self, path: &str, handler: Handler) -> Result<(), RouteError> {
        self.route(Verb::Post, path, handler)
    }

    fn put(&mut self, path: &str, handler: Handler) -> Result<(), RouteError> {
        self.route(Verb::Put, path, handler)
    }

    fn patch(&mut self, path: &str, handler: Handler) -> Result<(), RouteError> {
        self.route(Verb::Patch, path, handler)
    }

    fn delete(&mut self, path: &str, handler: Handler) -> Result<(), RouteError> {
        self.route(Verb::Del, path, handler)
    }
}

/// Rewrite `:name` and `*name` segments into axum captures and escape
/// literal braces.
pub fn axum_path(route: &str) -> Result<String, RouteError> {
    let segments: Vec<&str> = route.split('/').collect();
    let last = segments.len() - 1;
    let mut captures = HashSet::new();
    let mut out = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        let capture = segment
            .strip_prefix(':')
            .map(|name| (name, false))
            .or_else(|| segment.strip_prefix('*').map(|name| (name, true)))
            .filter(|(name, _)| !name.is_empty());

        let Some((name, catch_all)) = capture else {
            out.push(segment.replace('{', "{{").replace('}', "}}"));
            continue;
        };

        let (path, name) = (route.to_string(), name.to_string());
        if name.contains('{') || name.contains('}') {
            return Err(RouteError::InvalidCapture { path, name });
        }
        if catch_all && i != last {
            return Err(RouteError::CatchAllNotLast { path, name });
        }
        if !captures.insert(name.clone()) {
            return Err(RouteError::DuplicateCapture { path, name });
        }

        out.push(if catch_all {
            format!("{{*{name}}}")
        } else {
            format!("{{{name}}}")
        });
    }

    Ok(out.join("/"))
}
