//! BDD step definitions for the contacts refresh feature

use cucumber::gherkin::Step;
use cucumber::{given, then, when};

use status_poller::surface::CONTACTS_LIST;
use status_poller::DisplaySurface;

use crate::world::PollerWorld;

fn table_items(step: &Step) -> Vec<String> {
    step.table
        .as_ref()
        .map(|table| {
            table
                .rows
                .iter()
                .filter_map(|row| row.first().cloned())
                .collect()
        })
        .unwrap_or_default()
}

#[given("the contacts list shows:")]
async fn contacts_list_shows(world: &mut PollerWorld, step: &Step) {
    let items = table_items(step);
    world
        .surface()
        .replace_items(CONTACTS_LIST, &items)
        .await
        .unwrap();
}

#[given("the backend serves contacts:")]
fn backend_serves_contacts(world: &mut PollerWorld, step: &Step) {
    let body = step.docstring.as_ref().expect("contacts body docstring");
    world.backend.serve("/contacts", 200, body);
}

#[given(expr = "the backend answers contacts with HTTP {int}")]
fn backend_answers_contacts_with(world: &mut PollerWorld, status: u16) {
    world.backend.serve("/contacts", status, "Service Unavailable");
}

#[when("the contacts are refreshed")]
async fn contacts_refreshed(world: &mut PollerWorld) {
    world.poller().refresh_contacts().await;
}

#[then("the rendered contacts are:")]
async fn rendered_contacts_are(world: &mut PollerWorld, step: &Step) {
    let expected = table_items(step);
    let items = world.surface().items(CONTACTS_LIST).await;
    assert_eq!(items, Some(expected));
}

#[then("the rendered contacts are empty")]
async fn rendered_contacts_empty(world: &mut PollerWorld) {
    let items = world.surface().items(CONTACTS_LIST).await;
    assert_eq!(items, Some(vec![]));
}
