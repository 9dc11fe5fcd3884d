//! Server orchestration: tracing setup, configuration resolution, and the
//! daemon runtime. Binaries stay thin wrappers that only need to call
//! [`run`].

pub mod admin;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{AppConfig, Cli},
    db::{apply_migrations, establish_pool},
    http::{AppState, build_router},
};

/// Parse CLI arguments and execute the requested command or daemon.
///
/// # Errors
///
/// Returns any error emitted while resolving configuration or running the
/// requested command or daemon.
pub async fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run_with_cli(cli).await
}

/// Execute the server logic using an already parsed [`Cli`].
///
/// # Errors
///
/// Propagates any failure reported by the admin command or the daemon.
pub async fn run_with_cli(cli: Cli) -> Result<()> {
    let config = AppConfig::load(&cli.config)?;
    match cli.command {
        Some(command) => admin::run_command(command, &config).await,
        None => run_daemon(config).await,
    }
}

async fn run_daemon(config: AppConfig) -> Result<()> {
    let pool = establish_pool(&config.database)
        .await
        .context("failed to build database pool")?;
    {
        let mut conn = pool
            .get()
            .await
            .context("failed to get database connection")?;
        apply_migrations(&mut conn, &config.database)
            .await
            .context("failed to apply migrations")?;
    }
    let bind = config.bind.clone();
    let state = AppState::new(pool, config).context("invalid revalidation endpoint")?;
    let app = build_router(state);
    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!("quilld listening on {bind}");
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
