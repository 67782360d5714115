mod app;
mod config;
mod mock_data;

use anyhow::Result;
use clap::Parser;
use hut_ssr::ServerOptions;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{app::create_server, config::Config};

/// Hut - Server-rendered team directory
#[derive(Parser, Debug)]
#[command(name = "hut")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,

    /// Fixed document title, replacing the per-member title
    #[arg(long, env = "HUT_TITLE")]
    title: Option<String>,

    /// Script URL to include in every page (repeatable)
    #[arg(long = "script")]
    scripts: Vec<String>,

    /// Stylesheet URL to include in every page (repeatable)
    #[arg(long = "style")]
    styles: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hut=debug,hut_ssr=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::debug!(?config, "Loaded configuration");

    let options = ServerOptions::default()
        .with_host(cli.host)
        .with_port(cli.port)
        .with_scripts(cli.scripts)
        .with_styles(cli.styles);
    let options = match cli.title {
        Some(title) => options.with_title(title),
        None => options.with_title(app::title()),
    };

    let mut server = create_server(&config, options)?;
    server.run().await?;

    shutdown_signal().await;

    server.stop().await?;
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
