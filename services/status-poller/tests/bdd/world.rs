//! BDD test world for the status poller

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cucumber::World;
use status_poller::config::Config;
use status_poller::health::new_health_handle;
use status_poller::io::{HttpClient, HttpResponse};
use status_poller::{MemorySurface, PollerError, SchedulerHandle, StatusPoller};

/// What the fake backend answers on one path
#[derive(Debug, Clone)]
pub enum Canned {
    Response(HttpResponse),
    Unreachable,
}

/// A backend double answering per path and counting requests
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    answers: Mutex<HashMap<String, Canned>>,
    requests: Mutex<HashMap<String, usize>>,
}

impl ScriptedBackend {
    pub fn answer(&self, path: &str, canned: Canned) {
        self.answers
            .lock()
            .unwrap()
            .insert(path.to_string(), canned);
    }

    pub fn serve(&self, path: &str, status: u16, body: &str) {
        self.answer(
            path,
            Canned::Response(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedBackend {
    async fn get(&self, url: &str) -> status_poller::Result<HttpResponse> {
        let path = url
            .strip_prefix("http://localhost:5000")
            .unwrap_or(url)
            .to_string();
        *self.requests.lock().unwrap().entry(path.clone()).or_default() += 1;

        let canned = self.answers.lock().unwrap().get(&path).cloned();
        match canned {
            Some(Canned::Response(response)) => Ok(response),
            Some(Canned::Unreachable) => Err(PollerError::Http(format!(
                "GET {} failed: connection refused",
                url
            ))),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

#[derive(Debug, Default, World)]
pub struct PollerWorld {
    pub backend: Arc<ScriptedBackend>,
    pub surface: Option<Arc<MemorySurface>>,
    pub poller: Option<Arc<StatusPoller>>,
    pub scheduler: Option<SchedulerHandle>,
}

impl PollerWorld {
    pub fn surface(&mut self) -> Arc<MemorySurface> {
        Arc::clone(
            self.surface
                .get_or_insert_with(|| Arc::new(MemorySurface::with_default_targets())),
        )
    }

    /// The poller under test, created on first use against the scripted backend
    pub fn poller(&mut self) -> Arc<StatusPoller> {
        if self.poller.is_none() {
            let surface = self.surface();
            let http: Arc<dyn HttpClient> = Arc::clone(&self.backend) as Arc<dyn HttpClient>;
            self.poller = Some(Arc::new(StatusPoller::new(
                &Config::default(),
                http,
                surface,
                new_health_handle(),
            )));
        }
        Arc::clone(self.poller.as_ref().expect("poller just created"))
    }
}
