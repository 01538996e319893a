//! libris-api — book catalog REST service
//!
//! Users browse categorized books, track reading progress, and post reviews
//! once a book is fully read; administrators manage the catalog.

use anyhow::Result;
use clap::Parser;
use libris_api::{build_router, AppState};
use libris_common::config::Config;
use libris_common::db::init_database;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "libris-api", version, about = "Libris book catalog service")]
struct Args {
    /// TCP port to listen on
    #[arg(long, env = "LIBRIS_PORT")]
    port: Option<u16>,

    /// Path to the SQLite database file
    #[arg(long, env = "LIBRIS_DATABASE")]
    database: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing first so everything after it is visible
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting Libris catalog service v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = Config::resolve(args.port, args.database, args.config)?;
    info!("Database path: {}", config.database_path.display());

    let pool = init_database(&config.database_path).await?;

    let state = AppState::new(pool, config.page_size);
    let app = build_router(state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("libris-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
