//! Recommendation service entry point.
//!
//! Initializes tracing, loads optional configuration, builds the router around
//! the built-in Option List, and serves until SIGINT/SIGTERM. Startup failures
//! (bad config, port already in use) exit with status 1.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recommendation_service::config::{AppConfig, DEFAULT_LOG_FILTER};
use recommendation_service::http::start_server;
use recommendation_service::{create_router, AppError, AppState, OptionList, LUNCH_OPTIONS};

/// Recommendation service: suggests a random lunch over HTTP
#[derive(Parser, Debug)]
#[command(name = "recommendation-service", version, about)]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Port to listen on (overrides the configuration file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level filter (e.g., "recommendation_service=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Config is loaded before tracing so the log format can be honoured
    let config = AppConfig::load_or_default(args.config.as_deref());
    let json_logs = config
        .as_ref()
        .map(|c| c.logging.is_json())
        .unwrap_or(false);
    init_tracing(args.log_level.clone(), json_logs);

    let result = match config {
        Ok(config) => run(config, args.port).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Recommendation service failed to start");
        std::process::exit(1);
    }
}

/// Initialize tracing with priority: CLI > env > default
fn init_tracing(log_level: Option<String>, json: bool) {
    let log_filter = log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run(mut config: AppConfig, port: Option<u16>) -> Result<(), AppError> {
    if let Some(port) = port {
        config.http.port = port;
    }

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        log_format = %config.logging.format,
        "Loaded configuration"
    );

    let addr = config.http.socket_addr()?;

    // Refuse to start rather than serve from an empty list
    let options = OptionList::new(LUNCH_OPTIONS)?;
    tracing::info!(options = ?options.as_slice(), "Loaded option list");

    let app = create_router(AppState::new(options));
    start_server(app, addr).await?;

    Ok(())
}
