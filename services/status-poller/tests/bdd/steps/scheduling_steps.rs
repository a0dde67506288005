//! BDD step definitions for the scheduling feature

use std::time::Duration;

use cucumber::{then, when};

use status_poller::scheduler::{self, Schedule};

use crate::world::PollerWorld;

#[when("the cycles start with the default schedule")]
fn cycles_start(world: &mut PollerWorld) {
    let poller = world.poller();
    world.scheduler = Some(scheduler::start(poller, Schedule::default()));
}

#[when(expr = "the cycles start with status every {int} ms and contacts every {int} ms")]
fn cycles_start_with_intervals(world: &mut PollerWorld, status_ms: u64, contacts_ms: u64) {
    let schedule = Schedule {
        status_interval: Duration::from_millis(status_ms),
        contacts_interval: Duration::from_millis(contacts_ms),
    };
    let poller = world.poller();
    world.scheduler = Some(scheduler::start(poller, schedule));
}

#[when("the cycles are stopped")]
async fn cycles_stopped(world: &mut PollerWorld) {
    let handle = world.scheduler.take().expect("cycles not started");
    handle.stop().await;
}

#[when(expr = "{int} milliseconds pass")]
async fn milliseconds_pass(_world: &mut PollerWorld, millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

#[then(expr = "the {string} endpoint was requested {int} time(s)")]
fn endpoint_requested(world: &mut PollerWorld, path: String, expected: usize) {
    assert_eq!(world.backend.request_count(&path), expected, "path {path}");
}
