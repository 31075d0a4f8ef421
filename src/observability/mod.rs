//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! walker / registrar / adapters
//!     → tracing events (debug: each module and registration, warn: skips)
//!     → logging.rs subscriber (fmt layer on stderr, EnvFilter)
//!
//! registrar
//!     → logging.rs RouteLog (route table on stdout, optional color)
//! ```

pub mod logging;

pub use logging::{init_tracing, RouteLog};
