//! Servers that route entries are registered on.
//!
//! # Data Flow
//! ```text
//! registrar
//!     → server.rs  (Server trait: use_middleware, get, post, put, patch, delete)
//!         → adapter.rs (AxumServer → axum::Router)
//!         → table.rs   (RouteTable → recorded rows, JSON)
//! ```

pub mod adapter;
pub mod server;
pub mod table;

pub use adapter::{AxumServer, Handler, Middleware, RouteError};
pub use server::Server;
pub use table::{Registration, RouteTable};
