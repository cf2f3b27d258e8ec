//! Scribe server binary: CLI parsing, tracing setup, and lifecycle wiring.

use std::sync::Arc;

use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scribe_server::network::{NetworkConfig, NetworkModule};
use scribe_server::storage::{MemoryRecordStore, MessageHub, RecordStore};

#[derive(Parser, Debug)]
#[command(
    name = "scribe-server",
    about = "In-memory author/message API server with live creation push"
)]
struct Cli {
    /// Bind address.
    #[arg(long, env = "SCRIBE_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on. 0 means OS-assigned.
    #[arg(long, env = "SCRIBE_PORT", default_value_t = 4000)]
    port: u16,

    /// Comma-separated allowed CORS origins; "*" allows any.
    #[arg(long, env = "SCRIBE_CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    cors_origins: Vec<String>,

    /// Emit logs as JSON instead of human-readable lines.
    #[arg(long, env = "SCRIBE_LOG_JSON")]
    log_json: bool,

    /// Expose Prometheus metrics on this port.
    #[arg(long, env = "SCRIBE_METRICS_PORT")]
    metrics_port: Option<u16>,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Some(port) = cli.metrics_port {
        PrometheusBuilder::new()
            .with_http_listener(([0, 0, 0, 0], port))
            .install()?;
        info!(port, "Prometheus metrics exporter listening");
    }

    let hub = MessageHub::default();
    let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new(hub.clone()));

    let config = NetworkConfig {
        host: cli.host.clone(),
        port: cli.port,
        cors_origins: cli.cors_origins,
        ..NetworkConfig::default()
    };

    let mut module = NetworkModule::new(config, store, hub);
    let port = module.start().await?;

    info!("Running the scribe API server at http://{}:{port}", cli.host);
    info!("Subscriptions ready at ws://{}:{port}/ws", cli.host);

    module
        .serve(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("ctrl-c received; shutting down");
        })
        .await
}
