//! Logging.
//!
//! # Responsibilities
//! - Install the `tracing` subscriber for the binary
//! - Print the route table while routes are registered
//!
//! # Design Decisions
//! - Structured events go through `tracing`; `RUST_LOG` wins over config
//! - The route table is plain terminal output and can be turned off
//!   without touching `tracing`

use std::io::{self, Write};

use console::Style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::routes::verb::Verb;

/// Install the global subscriber, falling back to `default_level` when
/// `RUST_LOG` is unset or invalid.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ordner={default_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Route table printer used during registration.
///
/// ```text
///
///    use ~> /items
///   POST ~> /items
///    GET ~> /items
/// DELETE ~> /items/old
///
/// ```
pub struct RouteLog<W> {
    out: W,
    enabled: bool,
    middleware: Style,
    verb: Style,
}

impl<W: Write> RouteLog<W> {
    pub fn new(out: W, enabled: bool, color: bool) -> Self {
        Self {
            out,
            enabled,
            middleware: Style::new().yellow().force_styling(color),
            verb: Style::new().cyan().force_styling(color),
        }
    }

    pub fn blank(&mut self) -> io::Result<()> {
        if self.enabled {
            writeln!(self.out)?;
        }
        Ok(())
    }

    pub fn middleware(&mut self, path: &str) -> io::Result<()> {
        if self.enabled {
            writeln!(self.out, "   {} ~> {}", self.middleware.apply_to("use"), path)?;
        }
        Ok(())
    }

    pub fn handler(&mut self, verb: Verb, path: &str) -> io::Result<()> {
        if self.enabled {
            let name = format!("{:>6}", verb);
            writeln!(self.out, "{} ~> {}", self.verb.apply_to(name), path)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
