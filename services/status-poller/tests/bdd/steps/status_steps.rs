//! BDD step definitions for the status refresh feature

use cucumber::gherkin::Step;
use cucumber::{given, then, when};

use status_poller::surface::STATUS_TARGETS;
use status_poller::DisplaySurface;

use crate::world::{Canned, PollerWorld};

#[given("a page with every display target")]
fn page_with_every_target(world: &mut PollerWorld) {
    world.surface();
}

#[given(expr = "a page without the {string} target")]
async fn page_without_target(world: &mut PollerWorld, target: String) {
    world.surface().remove_target(&target).await;
}

#[given(expr = "every status target shows {string}")]
async fn every_status_target_shows(world: &mut PollerWorld, text: String) {
    let surface = world.surface();
    for target in STATUS_TARGETS {
        surface.set_text(target, &text).await.unwrap();
    }
}

#[given("the backend serves status:")]
fn backend_serves_status(world: &mut PollerWorld, step: &Step) {
    let body = step.docstring.as_ref().expect("status body docstring");
    world.backend.serve("/status", 200, body);
}

#[given(expr = "the backend answers status with HTTP {int}")]
fn backend_answers_status_with(world: &mut PollerWorld, status: u16) {
    world.backend.serve("/status", status, "Internal Server Error");
}

#[given(expr = "the backend answers status with the body {string}")]
fn backend_answers_status_body(world: &mut PollerWorld, body: String) {
    world.backend.serve("/status", 200, &body);
}

#[given("the status endpoint is unreachable")]
fn status_unreachable(world: &mut PollerWorld) {
    world.backend.answer("/status", Canned::Unreachable);
}

#[when("the status is refreshed")]
async fn status_refreshed(world: &mut PollerWorld) {
    world.poller().refresh_status().await;
}

#[then(expr = "the {string} target reads {string}")]
async fn target_reads(world: &mut PollerWorld, target: String, expected: String) {
    let text = world.surface().text(&target).await;
    assert_eq!(text.as_deref(), Some(expected.as_str()), "target {target}");
}

#[then(expr = "every status target reads {string}")]
async fn every_status_target_reads(world: &mut PollerWorld, expected: String) {
    let surface = world.surface();
    for target in STATUS_TARGETS {
        if let Some(text) = surface.text(target).await {
            assert_eq!(text, expected, "target {target}");
        }
    }
}

#[then(expr = "the {word} cycle has {int} consecutive failures")]
async fn cycle_failures(world: &mut PollerWorld, cycle: String, expected: u32) {
    let poller = world.poller();
    let health = poller.health().read().await;
    let record = match cycle.as_str() {
        "status" => &health.status,
        "contacts" => &health.contacts,
        other => panic!("Unknown cycle: {}", other),
    };
    assert_eq!(record.consecutive_failures, expected);
    if expected > 0 {
        assert!(record.last_error.is_some());
    }
}
