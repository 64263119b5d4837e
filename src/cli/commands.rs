//! CLI command implementations
//!
//! Boot order for `serve`:
//! 1. Load configuration from the environment
//! 2. Open the repository and ensure the `item` table exists
//! 3. Seed placeholder items (unless `--skip-seed`)
//! 4. Serve HTTP until Ctrl-C

use std::sync::Arc;

use serde_json::json;
use tokio::runtime::Runtime;

use crate::catalog::{
    seed_placeholder_items, CatalogService, InMemoryItemRepository, ItemRepository,
    SqlItemRepository,
};
use crate::config::{DatabaseConfig, ServiceConfig};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::Logger;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            host,
            port,
            memory,
            skip_seed,
        } => serve(host, port, memory, skip_seed),
        Command::Seed => seed(),
        Command::InitSchema => init_schema(),
    }
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::server_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Open the SQL repository and make sure the table exists
async fn open_sql_repository(config: &DatabaseConfig) -> CliResult<SqlItemRepository> {
    let redacted = config.redacted_url();
    let repo = SqlItemRepository::connect(config).await.map_err(|e| {
        CliError::storage_error(format!("Failed to connect to {}: {}", redacted, e))
    })?;
    repo.ensure_schema().await?;

    Logger::info(
        "SCHEMA_READY",
        &[("backend", repo.backend().as_str()), ("url", redacted.as_str())],
    );
    Ok(repo)
}

/// Serve the HTTP API
pub fn serve(
    host: Option<String>,
    port: Option<u16>,
    memory: bool,
    skip_seed: bool,
) -> CliResult<()> {
    let (mut http_config, database_config) = if memory {
        (HttpServerConfig::from_env()?, None)
    } else {
        let config = ServiceConfig::from_env()?;
        (config.http, Some(config.database))
    };
    if let Some(host) = host {
        http_config.host = host;
    }
    if let Some(port) = port {
        http_config.port = port;
    }

    let rt = runtime()?;
    rt.block_on(async {
        let repo: Arc<dyn ItemRepository> = match &database_config {
            Some(config) => Arc::new(open_sql_repository(config).await?),
            None => Arc::new(InMemoryItemRepository::new()),
        };

        if !skip_seed {
            seed_placeholder_items(repo.as_ref()).await?;
        }

        let service = Arc::new(CatalogService::new(repo));
        HttpServer::with_config(http_config, service)
            .start()
            .await
            .map_err(|e| CliError::server_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Ensure the schema, seed, report how many rows were inserted
pub fn seed() -> CliResult<()> {
    let config = DatabaseConfig::from_env()?;

    let inserted = runtime()?.block_on(async {
        let repo = open_sql_repository(&config).await?;
        let inserted = seed_placeholder_items(&repo).await?;
        repo.close().await;
        Ok::<_, CliError>(inserted)
    })?;

    println!("{}", json!({ "inserted": inserted }));
    Ok(())
}

/// Create the item table and exit
pub fn init_schema() -> CliResult<()> {
    let config = DatabaseConfig::from_env()?;

    runtime()?.block_on(async {
        let repo = open_sql_repository(&config).await?;
        repo.close().await;
        Ok::<_, CliError>(())
    })
}
