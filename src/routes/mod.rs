//! Route discovery subsystem.
//!
//! # Data Flow
//! ```text
//! routes/                          walker.rs
//!   index.rs          → /          (walk, load, sort by path)
//!   about.rs          → /about         │
//!   users/index.rs    → /users         ▼
//!   users/login.rs    → /users/login  Vec<RouteEntry>
//!                                      │
//!                                      ▼
//!                                  registrar.rs
//!                                  (useBefore, verbs in fixed order, hook)
//!                                      │
//!                                      ▼
//!                                  Server (axum adapter, route table, ...)
//! ```
//!
//! # Design Decisions
//! - File names decide paths, export names decide verbs; the two never mix
//! - Route order is fully determined by the paths, not by the file system
//! - Nothing is deduplicated

pub mod exports;
pub mod registrar;
pub mod verb;
pub mod walker;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub use exports::{Export, Exports};
pub use registrar::{register, Hook, Options};
pub use verb::Verb;
pub use walker::walk;

use crate::error::Result;
use crate::http::Server;
use crate::modules::ModuleLoader;

/// One route module and the path it is mounted at.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry<H, M> {
    pub path: String,
    /// File the module was loaded from.
    pub file: PathBuf,
    pub exports: Exports<H, M>,
}

/// Walk `dir` and register every route found on `server`, printing the
/// route table to stdout.
pub async fn mount<L, S>(
    dir: impl AsRef<Path>,
    loader: &L,
    server: &mut S,
    options: Options<L::Handler>,
) -> Result<()>
where
    L: ModuleLoader,
    L::Handler: Clone,
    L::Middleware: Clone,
    S: Server<L::Handler, L::Middleware>,
{
    mount_to(dir, loader, server, options, io::stdout()).await
}

/// Same as [`mount`], writing the route table to `out`.
pub async fn mount_to<L, S, W>(
    dir: impl AsRef<Path>,
    loader: &L,
    server: &mut S,
    options: Options<L::Handler>,
    out: W,
) -> Result<()>
where
    L: ModuleLoader,
    L::Handler: Clone,
    L::Middleware: Clone,
    S: Server<L::Handler, L::Middleware>,
    W: Write,
{
    let dir = dir.as_ref();
    let routes = walk(dir, loader).await?;
    tracing::info!(dir = %dir.display(), routes = routes.len(), "Route tree loaded");
    register(&routes, server, &options, out)
}
