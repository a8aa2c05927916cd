//! Marketplace server
//!
//! Serves the REST API and runs the operational scripts against the same
//! configuration.

use anyhow::{bail, Context, Result};
use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use clap::{Parser, Subcommand};
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use marketplace_service::{Config, MarketplaceModule};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Environment variables read into the configuration
const ENV_KEYS: [&str; 11] = [
    "DATABASE_URL",
    "NEXT_PUBLIC_SOCKET_URL",
    "SOCKET_PATH",
    "STRIPE_SECRET_KEY",
    "STRIPE_API_BASE",
    "SESSION_SECRET",
    "BLOB_API_URL",
    "BLOB_READ_WRITE_TOKEN",
    "NODE_ENV",
    "BIND_ADDR",
    "MAX_GUEST_COUNT",
];

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// YAML configuration file, overridden by environment variables
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply pending database migrations
    Migrate,
    /// Delete every row from every table
    ResetDb {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
    /// Remove media rows whose storefront no longer exists, and their blobs
    CleanupMedia,
    /// Delete all media of one storefront, blobs included
    PurgeStorefrontMedia { storefront_id: Uuid },
    /// Show role and billing linkage of an account
    InspectUser { email: String },
    /// List applied and pending migrations; fails if any are pending
    CheckMigrations,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = load_config(cli.config.as_deref())?;
    let module = MarketplaceModule::init(config).await?;

    let result = run(&module, cli.command.unwrap_or(Command::Serve)).await;
    module.shutdown().await?;
    result
}

async fn run(module: &MarketplaceModule, command: Command) -> Result<()> {
    let service = module.service();

    match command {
        Command::Serve => serve(module).await,
        Command::Migrate => module.migrate().await,
        Command::ResetDb { yes } => {
            if !yes {
                bail!("refusing to wipe the database without --yes");
            }
            let deleted = service.reset_database().await?;
            println!("Deleted {deleted} rows");
            Ok(())
        }
        Command::CleanupMedia => {
            let report = service.cleanup_orphan_media().await?;
            println!("Removed {} orphaned media", report.succeeded.len());
            for (id, reason) in &report.failed {
                println!("  failed {id}: {reason}");
            }
            if !report.is_clean() {
                bail!("{} of {} media could not be removed", report.failed.len(), report.total());
            }
            Ok(())
        }
        Command::PurgeStorefrontMedia { storefront_id } => {
            let report = service.purge_storefront_media(storefront_id).await?;
            println!("Removed {} media from storefront {storefront_id}", report.succeeded.len());
            for (id, reason) in &report.failed {
                println!("  failed {id}: {reason}");
            }
            if !report.is_clean() {
                bail!("{} media could not be removed", report.failed.len());
            }
            Ok(())
        }
        Command::InspectUser { email } => {
            let inspection = service.inspect_user(&email).await?;
            let user = &inspection.user;
            println!("User {} <{}>", user.id, user.email);
            println!("  role:            {}", user.role.as_str());
            println!(
                "  stripe customer: {}",
                user.stripe_customer_id.as_deref().unwrap_or("(none)")
            );
            println!("  storefronts:     {}", inspection.storefront_ids.len());
            for id in &inspection.storefront_ids {
                println!("    {id}");
            }
            Ok(())
        }
        Command::CheckMigrations => {
            let states = module.check_migrations().await?;
            let mut pending = 0;
            for state in &states {
                let mark = if state.applied { "applied" } else { "pending" };
                println!("{mark:>8}  {}", state.name);
                if !state.applied {
                    pending += 1;
                }
            }
            if pending > 0 {
                bail!("{pending} migration(s) pending");
            }
            Ok(())
        }
    }
}

async fn serve(module: &MarketplaceModule) -> Result<()> {
    module.migrate().await?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));
    let app = module.router().layer(cors);

    let address = &module.config().bind_addr;
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(%address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
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
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,sea_orm=warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn figment(path: Option<&Path>) -> Figment {
    let mut figment = Figment::new();
    if let Some(path) = path {
        figment = figment.merge(Yaml::file(path));
    }
    figment.merge(Env::raw().only(&ENV_KEYS).map(|key| match key.as_str() {
        "NEXT_PUBLIC_SOCKET_URL" => "socket_url".into(),
        "NODE_ENV" => "environment".into(),
        "BLOB_READ_WRITE_TOKEN" => "blob_token".into(),
        other => other.to_ascii_lowercase().into(),
    }))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
    }
    figment(path).extract().context("invalid configuration")
}
