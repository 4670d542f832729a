//! HTTP server command for the car API

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use carro_server::db::{create_pool, InMemoryExecutor, PgExecutor, QueryExecutor};
use carro_server::{run_server, CarController, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Extra browser origin to admit (repeatable, or comma-separated in CARRO_ALLOWED_ORIGINS)
    #[arg(long = "allow-origin", env = "CARRO_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Database URL (overrides .env)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Keep cars in process memory instead of PostgreSQL (wins over --database-url)
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let executor: Arc<dyn QueryExecutor> = if args.in_memory {
        tracing::warn!("Using in-memory store - data is lost on shutdown");
        Arc::new(InMemoryExecutor::new())
    } else {
        let database_url = args
            .database_url
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;
        let pool = create_pool(&database_url)
            .await
            .context("Failed to create database pool")?;
        Arc::new(PgExecutor::new(pool))
    };

    tracing::info!("Starting carro server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        allowed_origins: args.allowed_origins,
    };

    // Blocks until shutdown
    run_server(CarController::new(executor), config)
        .await
        .context("Server error")?;

    Ok(())
}
