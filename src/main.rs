//! ShareBox Server: file sharing with targeted grants and public links.
//!
//! Main entry point that loads configuration, initializes logging, and
//! dispatches to the requested command.

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

use sharebox_auth::JwtEncoder;
use sharebox_core::config::{AppConfig, DatabaseBackend};
use sharebox_core::error::AppError;
use sharebox_core::types::UserId;
use sharebox_database::DatabasePool;

/// ShareBox server and maintenance commands.
#[derive(Debug, Parser)]
#[command(name = "sharebox-server", version, about)]
struct Cli {
    /// Configuration overlay to load from `config/{env}.toml`
    #[arg(long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print a signed bearer token for a user
    IssueToken {
        /// User id to put in the token subject
        #[arg(long)]
        user: Uuid,
        /// Lifetime in minutes; the configured default when omitted
        #[arg(long)]
        ttl_minutes: Option<i64>,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let env = cli
        .env
        .clone()
        .or_else(|| std::env::var("SHAREBOX_ENV").ok())
        .unwrap_or_else(|| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::IssueToken { user, ttl_minutes } => issue_token(&config, user, ttl_minutes),
        Command::Migrate => migrate(&config).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting ShareBox");
    let state = sharebox_api::build_state(config).await?;
    sharebox_api::run_server(state, shutdown_signal()).await
}

fn issue_token(config: &AppConfig, user: Uuid, ttl_minutes: Option<i64>) -> Result<(), AppError> {
    let encoder = JwtEncoder::new(&config.auth);
    let user_id = UserId::from_uuid(user);
    let issued = match ttl_minutes {
        Some(minutes) => encoder.issue_with_ttl(user_id, chrono::Duration::minutes(minutes))?,
        None => encoder.issue(user_id)?,
    };

    println!("{}", issued.token);
    tracing::info!(user_id = %user_id, expires_at = %issued.expires_at, "Token issued");
    Ok(())
}

async fn migrate(config: &AppConfig) -> Result<(), AppError> {
    if config.database.backend != DatabaseBackend::Postgres {
        return Err(AppError::configuration(
            "migrate requires database.backend = \"postgres\"",
        ));
    }

    let db = DatabasePool::connect(&config.database).await?;
    sharebox_database::migration::run_migrations(db.pool()).await?;
    db.close().await;
    println!("All migrations applied successfully.");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
