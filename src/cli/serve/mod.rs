//! Serve command - runs the HTTP API

use std::net::SocketAddr;

use clap::Args;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api::{create_router, AppState};
use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::StorageFactory;

/// Arguments for the serve command
#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Address to host on (overrides config)
    #[arg(long)]
    pub address: Option<String>,

    /// Port to host on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: String,
}

/// Run the API server
///
/// Fails without serving anything when the configured data store cannot be reached.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config(&args)?;
    logging::init_logging(&config.logging)?;
    info!("Starting with config {}", args.config);

    let factory = StorageFactory::create(&config.document_store.storage_config())
        .await
        .inspect_err(|e| error!("Could not create repository factory: {}", e))?;

    let state = AppState::new(factory.as_ref());
    let app = create_router(state, config.site.dir.as_deref());

    let addr = build_socket_addr(&config)?;
    let listener = TcpListener::bind(addr).await?;
    info!("httpcallback now hosting at {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Config file and environment, then command line flags on top
fn load_config(args: &ServeArgs) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(&args.config)?;

    if let Some(address) = &args.address {
        config.server.host = address.clone();
    }

    if let Some(port) = args.port {
        config.server.port = port;
    }

    Ok(config)
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
