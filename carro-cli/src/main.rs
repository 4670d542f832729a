//! carro CLI - serves the car records API

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(name = "carro", author, version, about = "Car records REST API")]
struct Cli {
    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["carro", "serve", "--in-memory"]).unwrap();
        let Commands::Serve(args) = cli.command;
        assert_eq!(args.bind.port(), 3030);
        assert!(args.in_memory);
        assert!(!args.cors_permissive);
        assert!(args.allowed_origins.is_empty());
    }

    #[test]
    fn serve_collects_allowed_origins() {
        let cli = Cli::try_parse_from([
            "carro",
            "serve",
            "--in-memory",
            "--allow-origin",
            "https://a.example.com,https://b.example.com",
            "--allow-origin",
            "https://c.example.com",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command;
        assert_eq!(
            args.allowed_origins,
            ["https://a.example.com", "https://b.example.com", "https://c.example.com"]
        );
    }
}
