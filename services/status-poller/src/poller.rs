//! Fetch-then-render operations for the status and contacts cycles

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Config;
use crate::health::{Cycle, HealthHandle, FAILURE_WARNING_THRESHOLD};
use crate::io::HttpClient;
use crate::snapshot::{parse_contacts, ContactEntry, StatusSnapshot};
use crate::surface::{self, DisplaySurface};

/// Polls the backend and writes results into a display surface.
///
/// Every refresh replaces what the previous successful refresh of the same
/// cycle rendered. A failed refresh leaves the surface untouched.
pub struct StatusPoller {
    http: Arc<dyn HttpClient>,
    surface: Arc<dyn DisplaySurface>,
    health: HealthHandle,
    status_url: String,
    contacts_url: String,
}

impl std::fmt::Debug for StatusPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusPoller")
            .field("status_url", &self.status_url)
            .field("contacts_url", &self.contacts_url)
            .finish()
    }
}

impl StatusPoller {
    pub fn new(
        config: &Config,
        http: Arc<dyn HttpClient>,
        surface: Arc<dyn DisplaySurface>,
        health: HealthHandle,
    ) -> Self {
        let status_url = config.endpoint_url(&config.status.path);
        let contacts_url = config.endpoint_url(&config.contacts.path);
        tracing::debug!(
            "Created StatusPoller for {} and {}",
            status_url,
            contacts_url
        );

        Self {
            http,
            surface,
            health,
            status_url,
            contacts_url,
        }
    }

    pub fn health(&self) -> &HealthHandle {
        &self.health
    }

    /// Run one refresh of the given cycle
    pub async fn refresh(&self, cycle: Cycle) -> bool {
        match cycle {
            Cycle::Status => self.refresh_status().await,
            Cycle::Contacts => self.refresh_contacts().await,
        }
    }

    /// Fetch `/status` and render it. Failures are logged and swallowed;
    /// returns whether the surface was updated.
    pub async fn refresh_status(&self) -> bool {
        let result = async {
            let snapshot = self.fetch_status().await?;
            self.render_status(&snapshot).await
        }
        .await;
        self.finish(Cycle::Status, result).await
    }

    /// Fetch `/contacts` and render it. Failures are logged and swallowed;
    /// returns whether the surface was updated.
    pub async fn refresh_contacts(&self) -> bool {
        let result = async {
            let contacts = self.fetch_contacts().await?;
            self.render_contacts(&contacts).await
        }
        .await;
        self.finish(Cycle::Contacts, result).await
    }

    pub async fn fetch_status(&self) -> crate::Result<StatusSnapshot> {
        let body = self.get_body(&self.status_url).await?;
        StatusSnapshot::parse(&body)
    }

    pub async fn fetch_contacts(&self) -> crate::Result<Vec<ContactEntry>> {
        let body = self.get_body(&self.contacts_url).await?;
        parse_contacts(&body)
    }

    /// Write every status field. All targets are checked first so a missing
    /// one leaves the whole set as it was.
    pub async fn render_status(&self, snapshot: &StatusSnapshot) -> crate::Result<()> {
        let writes = [
            (surface::STATUS, snapshot.status.to_string()),
            (
                surface::ABNORMAL_DETECTIONS,
                snapshot.abnormal_detections.to_string(),
            ),
            (surface::ALERTS_COUNT, snapshot.alerts_count.to_string()),
            (surface::LAST_BEHAVIOR, snapshot.last_behavior.to_string()),
            (surface::DATETIME, snapshot.datetime.to_string()),
            (surface::GEO_TAG, snapshot.geo_tag.to_string()),
            (surface::GEO_TAG_LIVE, snapshot.location_line()),
        ];

        for (target, _) in &writes {
            if !self.surface.has_target(target).await {
                return Err(crate::PollerError::MissingTarget(target.to_string()));
            }
        }

        for (target, text) in &writes {
            self.surface.set_text(target, text).await?;
        }
        Ok(())
    }

    pub async fn render_contacts(&self, contacts: &[ContactEntry]) -> crate::Result<()> {
        let items: Vec<String> = contacts.iter().map(|c| c.to_string()).collect();
        self.surface
            .replace_items(surface::CONTACTS_LIST, &items)
            .await
    }

    async fn get_body(&self, url: &str) -> crate::Result<String> {
        let response = self.http.get(url).await?;
        if !response.is_success() {
            return Err(crate::PollerError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(response.body)
    }

    async fn finish(&self, cycle: Cycle, result: crate::Result<()>) -> bool {
        let now_ms = current_epoch_ms();
        match result {
            Ok(()) => {
                tracing::debug!("Rendered {} refresh", cycle);
                self.health.write().await.record_success(cycle, now_ms);
                true
            }
            Err(e) => {
                tracing::warn!("Error refreshing {}: {}", cycle, e);
                let failures = self
                    .health
                    .write()
                    .await
                    .record_failure(cycle, e.to_string(), now_ms);
                if failures == FAILURE_WARNING_THRESHOLD {
                    tracing::warn!(
                        "The {} cycle has {} consecutive failures; display is stale",
                        cycle,
                        failures
                    );
                }
                false
            }
        }
    }
}

fn current_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
