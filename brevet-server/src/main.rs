use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use brevet_server::config::ServerConfig;
use brevet_server::remote::{ApiClient, ApiClientConfig};
use brevet_server::store::BrevetStore;
use brevet_server::web::{AppState, Backend, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let backend = match (&config.api_url, &config.snapshot_path) {
        (Some(url), snapshot) => {
            if snapshot.is_some() {
                warn!("BREVETS_SNAPSHOT is ignored while API_URL is set");
            }
            info!(%url, "storing brevets through remote API");
            Backend::Remote(ApiClient::new(ApiClientConfig::new(url))?)
        }
        (None, Some(path)) => Backend::Local(BrevetStore::open(path)?),
        (None, None) => {
            info!("storing brevets in memory only");
            Backend::Local(BrevetStore::new())
        }
    };

    let static_dir = config.static_dir.to_string_lossy();
    let app = create_router(AppState::new(backend), &static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "ACP brevet calculator listening");
    info!("  GET  /_calc_times  - Control open/close times");
    info!("  POST /submit       - Store a brevet");
    info!("  GET  /display      - Latest brevet");
    info!("  /api/brevets, /api/brevet/:id - Brevet API");

    axum::serve(listener, app).await?;
    Ok(())
}
