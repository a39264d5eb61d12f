//! JSON Mock API server (v1)
//!
//! Serves a fake REST backend generated from a JSON document.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────────┐
//!                        │                  JSON MOCK API                     │
//!                        │                                                    │
//!     data.json ─────────┼─▶ generator ──▶ RouteCatalogue ──▶ docs store     │
//!                        │                       │                            │
//!                        │                       ▼                            │
//!     Client Request     │  ┌──────┐    ┌────────────────┐    ┌───────────┐  │
//!     ───────────────────┼─▶│ http │───▶│ session (lock) │───▶│ simulator │  │
//!                        │  └──────┘    └────────────────┘    └─────┬─────┘  │
//!                        │                                          │        │
//!     Client Response    │                                          ▼        │
//!     ◀──────────────────┼──── status + JSON ◀──── routing + working copy    │
//!                        │                                                    │
//!                        │  config · observability · lifecycle · admin        │
//!                        └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use json_mock_api::config::validation::validate_config;
use json_mock_api::config::watcher::DocumentWatcher;
use json_mock_api::config::{load_config, load_document, ConfigError, MockConfig};
use json_mock_api::generator::generate_routes;
use json_mock_api::http::HttpServer;
use json_mock_api::lifecycle::startup::open_docs_store;
use json_mock_api::lifecycle::{bootstrap, signals, Shutdown};
use json_mock_api::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "json-mock-api", version)]
#[command(about = "Fake REST backend generated from the shape of a JSON document", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the simulated API (default)
    Serve(ServeArgs),
    /// Print the route catalogue generated for a document
    Generate {
        /// Source JSON document
        data: PathBuf,

        #[arg(short, long, default_value = "/api")]
        prefix: String,
    },
    /// Inspect or clear the stored documentation
    Docs {
        #[command(subcommand)]
        action: DocsAction,
    },
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Source JSON document (overrides `api.data_path`)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Route prefix (overrides `api.prefix`)
    #[arg(long)]
    prefix: Option<String>,

    /// Bind address (overrides `listener.bind_address`)
    #[arg(long)]
    bind: Option<String>,

    /// Reload routes when the document changes
    #[arg(long)]
    watch: bool,
}

#[derive(Subcommand)]
enum DocsAction {
    /// Print the stored documentation
    Show,
    /// Delete the stored documentation
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MockConfig::default(),
    };
    logging::init_logging(&config.observability.log_level);

    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => serve(config, args).await,
        Commands::Generate { data, prefix } => {
            let document = load_document(&data)?;
            let catalogue = generate_routes(&document, &prefix);
            println!("{}", serde_json::to_string_pretty(&catalogue)?);
            Ok(())
        }
        Commands::Docs { action } => {
            let store = open_docs_store(&config.docs);
            match action {
                DocsAction::Show => println!("{}", serde_json::to_string_pretty(&store.load())?),
                DocsAction::Clear => {
                    if store.clear() {
                        println!("Documentation cleared");
                    } else {
                        eprintln!("Error: documentation could not be cleared");
                    }
                }
            }
            Ok(())
        }
    }
}

async fn serve(mut config: MockConfig, args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(data) = args.data {
        config.api.data_path = data;
    }
    if let Some(prefix) = args.prefix {
        config.api.prefix = prefix;
    }
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    config.api.watch |= args.watch;
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::info!("json-mock-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        data_path = ?config.api.data_path,
        prefix = %config.api.prefix,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let bootstrap = bootstrap(&config)?;

    // Keep the watcher alive for the whole run.
    let (_watcher, doc_updates) = if config.api.watch {
        let current = bootstrap.session.source().clone();
        let (watcher, updates) = DocumentWatcher::new(&config.api.data_path, Some(current));
        (Some(watcher.run()?), updates)
    } else {
        let (_, updates) = mpsc::unbounded_channel();
        (None, updates)
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_on_signal(&signal_shutdown).await;
    });

    let server = HttpServer::new(&config, bootstrap);
    server.run(listener, doc_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
