//! Status Poller CLI

use std::path::PathBuf;

use clap::Parser;
use status_poller::{load_config, Config, PollerBuilder};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "status-poller", version)]
#[command(about = "Polls a detection backend and renders status and contacts")]
struct Args {
    /// JSON configuration file; built-in defaults apply without one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:5000
    #[arg(long)]
    backend_url: Option<String>,

    /// Cookie header sent with every backend request
    #[arg(long)]
    session_cookie: Option<String>,

    /// Status refresh period in milliseconds
    #[arg(long)]
    status_interval_ms: Option<u64>,

    /// Contacts refresh period in milliseconds
    #[arg(long)]
    contacts_interval_ms: Option<u64>,

    /// Port of the local status page
    #[arg(long, conflicts_with = "no_dashboard")]
    dashboard_port: Option<u16>,

    /// Do not serve the local status page
    #[arg(long)]
    no_dashboard: bool,

    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

impl Args {
    /// The configuration file (or defaults) with command line values on top
    fn resolve_config(&self) -> status_poller::Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if let Some(url) = &self.backend_url {
            config.backend_url = url.clone();
        }
        if let Some(cookie) = &self.session_cookie {
            config.session_cookie = Some(cookie.clone());
        }
        if let Some(ms) = self.status_interval_ms {
            config.status.interval_ms = ms;
        }
        if let Some(ms) = self.contacts_interval_ms {
            config.contacts.interval_ms = ms;
        }
        if let Some(port) = self.dashboard_port {
            config.dashboard.port = port;
        }
        if self.no_dashboard {
            config.dashboard.enabled = false;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let config = args.resolve_config()?;
    tracing::info!(
        "Polling {} (status every {} ms, contacts every {} ms)",
        config.backend_url,
        config.status.interval_ms,
        config.contacts.interval_ms
    );
    if config.dashboard.enabled {
        tracing::debug!("Status page on port {}", config.dashboard.port);
    }

    PollerBuilder::new(config).build()?.start().await?;
    Ok(())
}
