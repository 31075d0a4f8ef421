//! File-system routing for HTTP servers.
//!
//! A directory tree of route modules becomes route registrations: file names
//! give the path, exports named after verbs give the handlers, and
//! `useBefore*` exports give the middleware.
//!
//! ```text
//! routes/index.rs        get           → GET    /
//! routes/users/index.rs  get, post     → POST   /users, GET /users
//! routes/users/:id.rs    useBefore, del → use   /users/:id, DELETE /users/:id
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod modules;
pub mod observability;
pub mod routes;

pub use config::OrdnerConfig;
pub use error::{Error, Result};
pub use http::{AxumServer, RouteTable, Server};
pub use modules::{ManifestLoader, ModuleLoader, ModuleTable};
pub use routes::{mount, mount_to, register, walk, Export, Exports, Options, RouteEntry, Verb};
