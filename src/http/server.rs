//! The server-side seam routes are registered on.

/// Anything that can take middleware and per-verb handlers at a path.
///
/// `H` is the handler type and `M` the middleware type the server accepts.
/// Every method may fail; the first failure aborts the registration pass.
pub trait Server<H, M> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run `middleware`, in order, for requests at or below `path`.
    fn use_middleware(&mut self, path: &str, middleware: Vec<M>) -> Result<(), Self::Error>;

    fn get(&mut self, path: &str, handler: H) -> Result<(), Self::Error>;

    fn post(&mut self, path: &str, handler: H) -> Result<(), Self::Error>;

    fn put(&mut self, path: &str, handler: H) -> Result<(), Self::Error>;

    fn patch(&mut self, path: &str, handler: H) -> Result<(), Self::Error>;

    fn delete(&mut self, path: &str, handler: H) -> Result<(), Self::Error>;
}

/// Whether the request `path` falls under the middleware scope `base`.
///
/// Scopes match whole segments. `/` covers everything, a `:name` segment
/// matches any single segment and a `*name` segment matches the rest.
pub fn in_scope(base: &str, path: &str) -> bool {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    for expected in base.split('/').filter(|s| !s.is_empty()) {
        if expected.starts_with('*') {
            return true;
        }
        match segments.next() {
            Some(actual) if expected.starts_with(':') || expected == actual => {}
            _ => return false,
        }
    }
    true
}
