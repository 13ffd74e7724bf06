//! Employee Gateway
//!
//! A REST gateway in front of the upstream employee API, built with Tokio,
//! Axum and reqwest.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌────────────────────────────────────────────────────┐
//!                   │                 EMPLOYEE GATEWAY                   │
//!                   │                                                    │
//!  Client Request   │  ┌──────────┐   ┌──────────┐   ┌───────────────┐   │
//!  ─────────────────┼─▶│   http   │──▶│ employee │──▶│   upstream    │───┼──▶ Upstream
//!                   │  │ handlers │   │ service  │   │    client     │   │    Employee
//!  Client Response  │  └──────────┘   └────┬─────┘   └───────────────┘   │    API
//!  ◀────────────────┼── status mapping     │                             │
//!                   │                 ┌────▼─────┐                       │
//!                   │                 │aggregate │ search / max / top 10 │
//!                   │                 └──────────┘                       │
//!                   │                                                    │
//!                   │  config · observability · lifecycle                │
//!                   └────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use employee_gateway::config::{load_config, validate_config, ConfigError, GatewayConfig};
use employee_gateway::http::HttpServer;
use employee_gateway::lifecycle::Shutdown;
use employee_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "employee-gateway")]
#[command(about = "REST gateway for the upstream employee API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(long)]
    bind: Option<String>,

    /// Override upstream.base_url.
    #[arg(long)]
    upstream_url: Option<String>,
}

impl Args {
    fn resolve_config(&self) -> Result<GatewayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GatewayConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(url) = &self.upstream_url {
            config.upstream.base_url = url.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.resolve_config()?;

    logging::init_logging(&config.observability)?;

    tracing::info!("employee-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let _signals = shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
