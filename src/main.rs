use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use rollbook::logging::init_tracing;
use rollbook::metrics::init_metrics;
use rollbook::state::init_app_state;
use rollbook::transport::Server;
use rollbook_config::AppConfig;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "rollbook", version, about = "Rollbook enrollment server")]
struct Args {
    /// Host to listen on (overrides ROLLBOOK_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides ROLLBOOK_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

impl Args {
    fn apply(self, config: &mut AppConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let mut config = AppConfig::from_env();
    Args::parse().apply(&mut config);

    let _log_guard = init_tracing(&config.logging)?;
    init_metrics(&config.metrics)?;

    let state = init_app_state(config).await?;
    let bind_address = state.config.server.bind_address();
    let server = Server::bind(&bind_address, state.router())
        .await
        .context("failed to start listener")?;
    info!(addr = %server.local_addr()?, "Rollbook listening");

    server.run_until(shutdown_signal()).await?;

    state.db.close().await;
    info!("Rollbook stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT"),
        () = terminate => info!("Received SIGTERM"),
    }
}
