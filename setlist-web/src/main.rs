//! setlist-web - public browsing service for the live-performance archive
//!
//! Serves events, setlists and songs from the archive database as JSON,
//! plus a small browsing page. Starts with zero configuration: the root
//! folder and database are created when missing.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use setlist_common::config::{
    CompiledDefaults, RootFolderInitializer, RootFolderResolver, TomlConfig,
};
use setlist_common::db::init_database;
use setlist_web::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};

const MODULE_NAME: &str = "setlist-web";

/// Command-line arguments for setlist-web
#[derive(Parser, Debug)]
#[command(name = "setlist-web")]
#[command(about = "Public browsing service for the setlist archive")]
#[command(version)]
struct Args {
    /// Root folder holding archive.db (overrides SETLIST_ROOT_FOLDER and config file)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "SETLIST_WEB_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, env = "SETLIST_WEB_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let resolver = RootFolderResolver::new(MODULE_NAME).with_cli_arg(args.root_folder.clone());
    let toml_config = resolver.load_toml().unwrap_or_default();
    let defaults = CompiledDefaults::for_current_platform();

    init_tracing(&toml_config);

    info!(
        "Starting setlist-web v{}",
        env!("CARGO_PKG_VERSION")
    );

    let root_folder = resolver.resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to create root folder")?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to open archive database")?;

    let app = build_router(AppState::new(pool));

    let bind = args
        .bind
        .or(toml_config.server.bind_address)
        .unwrap_or(defaults.bind_address);
    let port = args.port.or(toml_config.server.port).unwrap_or(defaults.port);
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", bind, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("setlist-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// RUST_LOG wins; otherwise the config file's level applies
fn init_tracing(config: &TomlConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "setlist_web={level},setlist_common={level},tower_http={level}",
            level = config.logging.level
        )
        .into()
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
