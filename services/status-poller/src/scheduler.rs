//! Periodic scheduling of the two refresh cycles

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::health::Cycle;
use crate::poller::StatusPoller;

/// Refresh period of each cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub status_interval: Duration,
    pub contacts_interval: Duration,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            status_interval: Duration::from_millis(2000),
            contacts_interval: Duration::from_millis(5000),
        }
    }
}

impl From<&Config> for Schedule {
    fn from(config: &Config) -> Self {
        Self {
            status_interval: config.status.interval(),
            contacts_interval: config.contacts.interval(),
        }
    }
}

/// Owns the running cycle tasks. Dropping the handle does not stop them;
/// call [`SchedulerHandle::stop`].
#[derive(Debug)]
pub struct SchedulerHandle {
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl SchedulerHandle {
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel both cycles and wait for their tasks to exit
    pub async fn stop(self) {
        self.cancel.cancel();
        self.join().await;
    }

    /// Wait until the cycles exit, which happens once the token is cancelled
    pub async fn join(self) {
        for task in self.tasks {
            if let Err(e) = task.await {
                tracing::warn!("Cycle task ended abnormally: {}", e);
            }
        }
    }
}

/// Spawn both cycles. Each refreshes immediately, then once per interval.
pub fn start(poller: Arc<StatusPoller>, schedule: Schedule) -> SchedulerHandle {
    start_with_token(poller, schedule, CancellationToken::new())
}

/// Spawn both cycles, stopping when `cancel` fires
pub fn start_with_token(
    poller: Arc<StatusPoller>,
    schedule: Schedule,
    cancel: CancellationToken,
) -> SchedulerHandle {
    let tasks = [
        (Cycle::Status, schedule.status_interval),
        (Cycle::Contacts, schedule.contacts_interval),
    ]
    .into_iter()
    .map(|(cycle, period)| {
        let poller = Arc::clone(&poller);
        let cancel = cancel.clone();
        tokio::spawn(async move {
            cycle_loop(poller, cycle, period, cancel).await;
        })
    })
    .collect();

    tracing::info!(
        "Started status cycle every {:?} and contacts cycle every {:?}",
        schedule.status_interval,
        schedule.contacts_interval
    );

    SchedulerHandle { cancel, tasks }
}

async fn cycle_loop(
    poller: Arc<StatusPoller>,
    cycle: Cycle,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = cancel.cancelled() => break,
        }

        tokio::select! {
            _ = poller.refresh(cycle) => {}
            _ = cancel.cancelled() => break,
        }
    }

    tracing::debug!("The {} cycle stopped", cycle);
}
