//! Per-cycle health records

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Consecutive failures after which a cycle logs an extra warning
pub const FAILURE_WARNING_THRESHOLD: u32 = 5;

/// The two polling cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cycle {
    Status,
    Contacts,
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cycle::Status => write!(f, "status"),
            Cycle::Contacts => write!(f, "contacts"),
        }
    }
}

/// Outcome counters of one cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleHealth {
    pub consecutive_failures: u32,
    pub total_successes: u64,
    pub total_failures: u64,
    pub last_success_epoch_ms: Option<u64>,
    pub last_failure_epoch_ms: Option<u64>,
    pub last_error: Option<String>,
}

impl CycleHealth {
    /// No refresh of this cycle has completed yet
    pub fn never_refreshed(&self) -> bool {
        self.total_successes == 0 && self.total_failures == 0
    }

    fn record_success(&mut self, now_ms: u64) {
        self.consecutive_failures = 0;
        self.total_successes += 1;
        self.last_success_epoch_ms = Some(now_ms);
    }

    fn record_failure(&mut self, error: String, now_ms: u64) {
        self.consecutive_failures += 1;
        self.total_failures += 1;
        self.last_failure_epoch_ms = Some(now_ms);
        self.last_error = Some(error);
    }
}

/// Health of both cycles
#[derive(Debug)]
pub struct HealthState {
    pub status: CycleHealth,
    pub contacts: CycleHealth,
    pub started_at: Instant,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            status: CycleHealth::default(),
            contacts: CycleHealth::default(),
            started_at: Instant::now(),
        }
    }
}

impl HealthState {
    pub fn cycle(&self, cycle: Cycle) -> &CycleHealth {
        match cycle {
            Cycle::Status => &self.status,
            Cycle::Contacts => &self.contacts,
        }
    }

    fn cycle_mut(&mut self, cycle: Cycle) -> &mut CycleHealth {
        match cycle {
            Cycle::Status => &mut self.status,
            Cycle::Contacts => &mut self.contacts,
        }
    }

    pub fn record_success(&mut self, cycle: Cycle, now_ms: u64) {
        self.cycle_mut(cycle).record_success(now_ms);
    }

    /// Record a failure, returning the new consecutive failure count
    pub fn record_failure(&mut self, cycle: Cycle, error: String, now_ms: u64) -> u32 {
        let health = self.cycle_mut(cycle);
        health.record_failure(error, now_ms);
        health.consecutive_failures
    }
}

/// Thread-safe health handle
pub type HealthHandle = Arc<RwLock<HealthState>>;

pub fn new_health_handle() -> HealthHandle {
    Arc::new(RwLock::new(HealthState::default()))
}
