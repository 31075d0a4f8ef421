//! ordner command line.
//!
//! Walks a tree of TOML route manifests and prints the registrations it
//! produces, either as the route table or as JSON:
//!
//! ```text
//! $ ordner routes demo/routes
//!
//!    GET ~> /
//!    use ~> /users
//!    use ~> /users
//!   POST ~> /users
//!    GET ~> /users
//!    GET ~> /users/:id
//!    use ~> /users/:id
//! DELETE ~> /users/:id
//!
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ordner::config::{load_config, OrdnerConfig};
use ordner::modules::{ManifestLoader, NameResolver};
use ordner::observability::init_tracing;
use ordner::{mount, Options, RouteTable};

#[derive(Parser)]
#[command(name = "ordner")]
#[command(about = "File-system routing for HTTP servers", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the routes a manifest tree registers
    Routes {
        /// Root of the route tree [default: routes.dir from the config]
        dir: Option<PathBuf>,

        /// Print registrations as JSON instead of the route table
        #[arg(long)]
        json: bool,

        /// Print the route table without colors
        #[arg(long)]
        no_color: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => OrdnerConfig::default(),
    };
    init_tracing(&config.observability.log_level);

    match cli.command {
        Commands::Routes { dir, json, no_color } => {
            let dir = dir.unwrap_or_else(|| config.routes.dir.clone());
            let loader = ManifestLoader::new(NameResolver);
            let mut table = RouteTable::<String, String>::new();

            let options = Options::from(&config.registration)
                .logging(config.registration.logging && !json)
                .color(config.registration.color && !no_color);
            mount(&dir, &loader, &mut table, options).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(table.registrations())?);
            }
            tracing::info!(
                dir = %dir.display(),
                handlers = table.handler_count(),
                "Route tree registered"
            );
        }
    }

    Ok(())
}
