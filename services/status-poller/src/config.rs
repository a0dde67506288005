//! Configuration types for the status poller

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Sent as the `Cookie` header on every request
    #[serde(default)]
    pub session_cookie: Option<String>,
    #[serde(default = "default_status_cycle")]
    pub status: CycleConfig,
    #[serde(default = "default_contacts_cycle")]
    pub contacts: CycleConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            session_cookie: None,
            status: default_status_cycle(),
            contacts: default_contacts_cycle(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Config {
    /// Reject settings the scheduler cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.backend_url.trim().is_empty() {
            return Err(crate::PollerError::Config(
                "backend_url must not be empty".to_string(),
            ));
        }
        for (name, cycle) in [("status", &self.status), ("contacts", &self.contacts)] {
            if cycle.interval_ms == 0 {
                return Err(crate::PollerError::Config(format!(
                    "{} interval_ms must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Full URL of an endpoint path on the backend
    pub fn endpoint_url(&self, path: &str) -> String {
        let base = self.backend_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

/// One polling cycle: which path to fetch and how often
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleConfig {
    pub path: String,
    pub interval_ms: u64,
}

impl CycleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Page host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_dashboard_port")]
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_dashboard_port(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_status_cycle() -> CycleConfig {
    CycleConfig {
        path: "/status".to_string(),
        interval_ms: 2000,
    }
}

fn default_contacts_cycle() -> CycleConfig {
    CycleConfig {
        path: "/contacts".to_string(),
        interval_ms: 5000,
    }
}

fn default_true() -> bool {
    true
}

fn default_dashboard_port() -> u16 {
    11120
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::PollerError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
