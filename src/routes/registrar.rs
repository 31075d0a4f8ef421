//! Registration of route entries on a server.
//!
//! # Responsibilities
//! - Pick verb handlers out of each entry's exports
//! - Register middleware and handlers in precedence order
//! - Apply the configured hook to every handler
//! - Print the route table when logging is on
//!
//! # Ordering
//! For each entry, in route order:
//! ```text
//! useBefore                     → server.use_middleware(path, ..)
//! for verb in post, get, put, patch, del (only those exported):
//!     useBefore<Verb>           → server.use_middleware(path, ..)
//!     verb                      → server.<method>(path, hook(handler))
//! ```

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use crate::config::RegistrationConfig;
use crate::error::{Error, Result};
use crate::http::Server;
use crate::observability::logging::RouteLog;
use crate::routes::verb::Verb;
use crate::routes::RouteEntry;

/// Transformation applied to every handler before it is registered.
pub type Hook<H> = Arc<dyn Fn(H) -> H + Send + Sync>;

/// Registration options.
pub struct Options<H> {
    /// Print the route table.
    pub logging: bool,
    /// Color the route table.
    pub color: bool,
    pub hook: Option<Hook<H>>,
}

impl<H> Options<H> {
    pub fn logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(H) -> H + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }
}

impl<H> Default for Options<H> {
    fn default() -> Self {
        Self {
            logging: true,
            color: true,
            hook: None,
        }
    }
}

impl<H> Clone for Options<H> {
    fn clone(&self) -> Self {
        Self {
            logging: self.logging,
            color: self.color,
            hook: self.hook.clone(),
        }
    }
}

impl<H> fmt::Debug for Options<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("logging", &self.logging)
            .field("color", &self.color)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl<H> From<&RegistrationConfig> for Options<H> {
    fn from(config: &RegistrationConfig) -> Self {
        Options::default()
            .logging(config.logging)
            .color(config.color)
    }
}

/// Register `routes` on `server`, writing the route table to `out`.
pub fn register<H, M, S, W>(
    routes: &[RouteEntry<H, M>],
    server: &mut S,
    options: &Options<H>,
    out: W,
) -> Result<()>
where
    H: Clone,
    M: Clone,
    S: Server<H, M>,
    W: Write,
{
    let mut log = RouteLog::new(out, options.logging, options.color);
    log.blank()?;

    for route in routes {
        let path = route.path.as_str();
        let exports = &route.exports;

        if let Some(middleware) = exports.use_before() {
            log.middleware(path)?;
            server
                .use_middleware(path, middleware.to_vec())
                .map_err(|e| Error::register("use", path, e))?;
            tracing::debug!(path, count = middleware.len(), "Registered path middleware");
        }

        for (verb, handler) in exports.handlers() {
            if let Some(middleware) = exports.use_before_verb(verb) {
                log.middleware(path)?;
                server
                    .use_middleware(path, middleware.to_vec())
                    .map_err(|e| Error::register("use", path, e))?;
                tracing::debug!(path, verb = %verb, count = middleware.len(), "Registered verb middleware");
            }

            log.handler(verb, path)?;
            let handler = match &options.hook {
                Some(hook) => hook(handler.clone()),
                None => handler.clone(),
            };
            dispatch(server, verb, path, handler)
                .map_err(|e| Error::register(verb.method_name(), path, e))?;
            tracing::debug!(path, verb = %verb, "Registered handler");
        }
    }

    log.blank()?;
    log.flush()?;
    Ok(())
}

/// Call the server method matching `verb`; `del` goes to `delete`.
fn dispatch<H, M, S: Server<H, M>>(
    server: &mut S,
    verb: Verb,
    path: &str,
    handler: H,
) -> std::result::Result<(), S::Error> {
    match verb {
        Verb::Post => server.post(path, handler),
        Verb::Get => server.get(path, handler),
        Verb::Put => server.put(path, handler),
        Verb::Patch => server.patch(path, handler),
        Verb::Del => server.delete(path, handler),
    }
}
