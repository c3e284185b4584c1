#![allow(dead_code)]

use async_trait::async_trait;
use modelscope_rs::{
    GenerationRequest, HttpMethod, HttpRequest, HttpResponse, ModelScopeClient, ModelScopeConfig,
    SeedSource, Sleeper, Transport, TransportError,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Replays canned responses and records every request it sees.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<HttpResponse>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests sent to `/tasks/{id}`.
    pub fn poll_count(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == HttpMethod::Get && r.url.contains("/tasks/"))
            .count()
    }

    /// The submit body decoded as JSON.
    pub fn submit_body(&self) -> serde_json::Value {
        let requests = self.requests();
        let body = requests[0].body.as_deref().expect("submit request has a body");
        serde_json::from_slice(body).unwrap()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Other("script exhausted".into()))
    }
}

/// Records sleeps instead of waiting.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

pub struct FixedSeed(pub u32);

impl SeedSource for FixedSeed {
    fn next_seed(&self) -> u32 {
        self.0
    }
}

pub const TOKEN: &str = "ms-test-token-0001";

pub fn submitted(task_id: &str) -> HttpResponse {
    HttpResponse::new(200, format!(r#"{{"task_id": "{}"}}"#, task_id))
}

pub fn status(value: &str) -> HttpResponse {
    HttpResponse::new(200, format!(r#"{{"task_status": "{}"}}"#, value))
}

pub fn succeeded(url: &str) -> HttpResponse {
    HttpResponse::new(
        200,
        format!(r#"{{"task_status": "SUCCEED", "output_images": ["{}"]}}"#, url),
    )
}

pub fn request() -> GenerationRequest {
    GenerationRequest::new("a lighthouse at dusk")
        .size(1024, 768)
        .token(TOKEN)
}

/// A client wired to the given script with no real delays.
pub fn client(
    responses: Vec<HttpResponse>,
) -> (ModelScopeClient, ScriptedTransport, RecordingSleeper) {
    let transport = ScriptedTransport::new(responses);
    let sleeper = RecordingSleeper::default();
    let client = ModelScopeClient::new(
        ModelScopeConfig::builder()
            .with_base_url("https://api.test/v1")
            .build(),
    )
    .with_transport(transport.clone())
    .with_sleeper(sleeper.clone())
    .with_seed_source(FixedSeed(777));
    (client, transport, sleeper)
}

/// Serves any number of concurrent generations. Each submit gets the task
/// id `task-{seed}` and each status query for that task succeeds with
/// `http://x/task-{seed}.png`, so results can be matched to their callers.
#[derive(Clone, Default)]
pub struct EchoTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl EchoTransport {
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for EchoTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        // Let other callers interleave between round trips.
        tokio::task::yield_now().await;

        match request.method {
            HttpMethod::Post => {
                let body: serde_json::Value =
                    serde_json::from_slice(request.body.as_deref().unwrap_or_default())
                        .map_err(|e| TransportError::Other(e.to_string()))?;
                Ok(submitted(&format!("task-{}", body["seed"])))
            }
            HttpMethod::Get => {
                let task_id = request
                    .url
                    .rsplit('/')
                    .next()
                    .unwrap_or_default();
                Ok(succeeded(&format!("http://x/{}.png", task_id)))
            }
        }
    }
}
