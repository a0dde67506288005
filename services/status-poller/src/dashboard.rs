//! Page host: serves the rendered surface and cycle health over HTTP

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;

use crate::health::HealthHandle;
use crate::surface::{MemorySurface, CONTACTS_LIST, STATUS_TARGETS};

/// Dashboard application state
#[derive(Clone)]
pub struct DashboardState {
    pub surface: Arc<MemorySurface>,
    pub health: HealthHandle,
}

/// Build the dashboard axum router
pub fn build_router(surface: Arc<MemorySurface>, health: HealthHandle) -> Router {
    let dashboard_state = DashboardState { surface, health };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/surface", get(surface_handler))
        .route("/api/health", get(health_report_handler))
        .route("/health", get(health_handler))
        .with_state(dashboard_state)
}

async fn index_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let contents = dashboard.surface.contents().await;

    let status_rows: String = STATUS_TARGETS
        .iter()
        .filter_map(|target| contents.texts.get(*target).map(|text| (target, text)))
        .map(|(target, text)| {
            format!(
                r#"<tr style="border-bottom: 1px solid #dee2e6;">
                    <td style="padding: 0.5rem;">{}</td>
                    <td style="padding: 0.5rem;" id="{}">{}</td>
                </tr>"#,
                target,
                target,
                escape_html(text)
            )
        })
        .collect();

    let contact_items: String = contents
        .lists
        .get(CONTACTS_LIST)
        .map(|items| {
            items
                .iter()
                .map(|item| format!("<li>{}</li>", escape_html(item)))
                .collect()
        })
        .unwrap_or_default();

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta http-equiv="refresh" content="2">
    <title>Detection Status</title>
</head>
<body style="font-family: system-ui, sans-serif; max-width: 960px; margin: 0 auto; padding: 1rem;">
    <h1>Detection Status</h1>
    <section>
        <table style="width: 100%; border-collapse: collapse;">
            <tbody>{status_rows}</tbody>
        </table>
    </section>
    <section>
        <h2>Emergency Contacts</h2>
        <ul id="{list_id}">{contact_items}</ul>
    </section>
</body>
</html>"#,
        status_rows = status_rows,
        list_id = CONTACTS_LIST,
        contact_items = contact_items,
    );

    Html(html)
}

async fn surface_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    axum::Json(dashboard.surface.contents().await)
}

async fn health_report_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let health = dashboard.health.read().await;

    axum::Json(serde_json::json!({
        "uptime_seconds": health.started_at.elapsed().as_secs(),
        "status": health.status,
        "contacts": health.contacts,
    }))
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
