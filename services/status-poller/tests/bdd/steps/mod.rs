//! BDD step definitions for the status poller

pub mod contacts_steps;
pub mod scheduling_steps;
pub mod status_steps;
