//! ClauseCheck server CLI
//!
//! Starts the HTTP server for contract upload and analysis.

use clausecheck_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default configuration");
        eprintln!("Usage: clausecheck-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    start_server(config).await
}

fn print_help() {
    println!("ClauseCheck Server - Contract clause risk analysis");
    println!();
    println!("USAGE:");
    println!("    clausecheck-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    clausecheck-server --config config/server.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address / bind_port: listen address (default 0.0.0.0:8001)");
    println!("    - database_path: SQLite file (default clausecheck.db)");
    println!("    - cors_origins: allowed origins (default [\"*\"])");
    println!("    - [llm]: endpoint, model, api_key_env, timeout_secs");
    println!("    - [analyzer]: max_chunk_size");
    println!();
    println!("ENVIRONMENT:");
    println!("    OPENAI_API_KEY     API key (name configurable via llm.api_key_env)");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
}
