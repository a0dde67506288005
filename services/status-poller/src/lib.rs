//! Status Poller - detection dashboard polling client
//!
//! Polls a detection backend for its current status and emergency contacts,
//! renders both into named display targets, and serves the result as a page.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod io;
pub mod poller;
pub mod scheduler;
pub mod snapshot;
pub mod surface;

pub use config::{load_config, Config};
pub use error::{PollerError, Result};
pub use health::Cycle;
pub use poller::StatusPoller;
pub use scheduler::{Schedule, SchedulerHandle};
pub use surface::{DisplaySurface, MemorySurface};

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::health::HealthHandle;
use crate::io::{HttpClient, ReqwestHttpClient};

/// Assembles a [`PollerService`] from configuration, with optional
/// replacements for the HTTP client and the display surface
pub struct PollerBuilder {
    config: Config,
    http: Option<Arc<dyn HttpClient>>,
    surface: Option<Arc<MemorySurface>>,
}

impl PollerBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            surface: None,
        }
    }

    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_surface(mut self, surface: Arc<MemorySurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn build(self) -> Result<PollerService> {
        self.config.validate()?;

        let http = match self.http {
            Some(http) => http,
            None => Arc::new(ReqwestHttpClient::with_session_cookie(
                self.config.session_cookie.as_deref(),
            )?),
        };
        let surface = self
            .surface
            .unwrap_or_else(|| Arc::new(MemorySurface::with_default_targets()));
        let health = health::new_health_handle();

        let poller = Arc::new(StatusPoller::new(
            &self.config,
            http,
            Arc::clone(&surface) as Arc<dyn DisplaySurface>,
            Arc::clone(&health),
        ));

        Ok(PollerService {
            config: self.config,
            poller,
            surface,
            health,
        })
    }
}

/// A configured poller, ready to start
#[derive(Debug)]
pub struct PollerService {
    config: Config,
    poller: Arc<StatusPoller>,
    surface: Arc<MemorySurface>,
    health: HealthHandle,
}

impl PollerService {
    pub fn poller(&self) -> &Arc<StatusPoller> {
        &self.poller
    }

    pub fn surface(&self) -> &Arc<MemorySurface> {
        &self.surface
    }

    pub fn health(&self) -> &HealthHandle {
        &self.health
    }

    /// Start both cycles without the page host; the caller owns the handle
    pub fn spawn(&self, cancel: CancellationToken) -> SchedulerHandle {
        scheduler::start_with_token(
            Arc::clone(&self.poller),
            Schedule::from(&self.config),
            cancel,
        )
    }

    /// Run the cycles and the page host until ctrl-c
    pub async fn start(self) -> Result<()> {
        let cancel = CancellationToken::new();

        let cancel_for_signal = cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
            }
            cancel_for_signal.cancel();
        });

        self.run_until_cancelled(cancel).await
    }

    /// Run the cycles and the page host until `cancel` fires
    pub async fn run_until_cancelled(self, cancel: CancellationToken) -> Result<()> {
        if self.config.dashboard.enabled {
            let dashboard_port = self.config.dashboard.port;
            let router = dashboard::build_router(
                Arc::clone(&self.surface),
                Arc::clone(&self.health),
            );
            let cancel_for_dashboard = cancel.clone();

            tokio::spawn(async move {
                let addr = SocketAddr::from(([0, 0, 0, 0], dashboard_port));
                let listener = match tokio::net::TcpListener::bind(addr).await {
                    Ok(l) => l,
                    Err(e) => {
                        tracing::error!(
                            "Failed to bind dashboard to port {}: {}. Continuing without dashboard.",
                            dashboard_port,
                            e
                        );
                        return;
                    }
                };
                tracing::info!("Dashboard listening on http://{}", addr);

                if let Err(e) = axum::serve(listener, router)
                    .with_graceful_shutdown(async move {
                        cancel_for_dashboard.cancelled().await;
                    })
                    .await
                {
                    tracing::error!("{}", PollerError::Dashboard(e.to_string()));
                }

                tracing::debug!("Dashboard stopped");
            });
        }

        tracing::info!("Polling {}", self.config.backend_url);
        let handle = self.spawn(cancel);
        handle.join().await;
        tracing::info!("Status poller stopped");

        Ok(())
    }
}
