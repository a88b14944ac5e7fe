//! Async dispatch engine: request descriptors, the transport seam and the
//! one-shot hand-off that carries each outcome to its consumer.

use crate::consts::{self, limits, Config, UrlError};
use crate::model::{ErrorDetail, Outcome, RequestDescriptor};
use crate::translate::parse_and_flatten;
use crate::utils::{one_line, truncate_text};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP: {0}")] Http(#[from] reqwest::Error),
    #[error("Status {0}: {1}")] Status(StatusCode, String),
    #[error("Bad header: {0}")] Header(String),
}

/// Performs I/O off the caller's context and fires exactly one of the
/// completion entry points per request.
pub trait Transport: Send + Sync {
    fn execute(&self, request: RequestDescriptor, completion: Completion);
}

// ═══════════════════════════════════════════════════════════════════
// OUTCOME CHANNEL
// ═══════════════════════════════════════════════════════════════════

/// Producer half of one request's outcome channel.
///
/// Both entry points take `self`, so at most one can run. If the transport
/// drops it without calling either, a transport failure is delivered instead.
pub struct Completion {
    id: u64,
    tx: Option<oneshot::Sender<Outcome>>,
}

/// Consumer half: resolves to the single outcome of one request.
#[derive(Debug)]
pub struct PendingOutcome {
    id: u64,
    rx: oneshot::Receiver<Outcome>,
}

pub fn outcome_channel(id: u64) -> (Completion, PendingOutcome) {
    let (tx, rx) = oneshot::channel();
    (Completion { id, tx: Some(tx) }, PendingOutcome { id, rx })
}

impl Completion {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Raw body received; parse and flatten it.
    pub fn on_success(mut self, body: &str) {
        let outcome = match parse_and_flatten(body) {
            Ok(records) => {
                log::debug!("#{}: {} translation(s)", self.id, records.len());
                Outcome::Success(records)
            }
            Err(e) => {
                log::warn!("#{}: response is not JSON: {}", self.id, e);
                Outcome::Failure(ErrorDetail::parse(e.to_string()))
            }
        };
        self.deliver(outcome);
    }

    /// Network or HTTP failure; reported verbatim.
    pub fn on_error(mut self, failure: impl fmt::Display) {
        let message = failure.to_string();
        log::warn!("#{}: request failed: {}", self.id, message);
        self.deliver(Outcome::Failure(ErrorDetail::transport(message)));
    }

    fn deliver(&mut self, outcome: Outcome) {
        if let Some(tx) = self.tx.take() {
            if tx.send(outcome).is_err() {
                log::debug!("#{}: consumer went away, outcome discarded", self.id);
            }
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if self.tx.is_some() {
            log::error!("#{}: transport dropped the request without completing", self.id);
            self.deliver(Outcome::Failure(ErrorDetail::transport("request dropped without completing")));
        }
    }
}

impl PendingOutcome {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub async fn recv(self) -> Outcome {
        // Completion always sends before it is gone; this arm is a fallback.
        self.rx
            .await
            .unwrap_or_else(|_| Outcome::Failure(ErrorDetail::transport("outcome channel closed")))
    }
}

// ═══════════════════════════════════════════════════════════════════
// DISPATCHER
// ═══════════════════════════════════════════════════════════════════

pub struct RequestDispatcher {
    config: Config,
    transport: Arc<dyn Transport>,
    next_id: AtomicU64,
}

impl RequestDispatcher {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Arc<Self> {
        Arc::new(Self { config, transport, next_id: AtomicU64::new(1) })
    }

    /// GET descriptor for one lookup, decorated with the credential headers.
    pub fn describe(&self, word: &str, source_lang: &str, target_lang: &str) -> Result<RequestDescriptor, UrlError> {
        let url = self.config.translation_url(word, source_lang, target_lang)?;
        Ok(RequestDescriptor::get(url).with_headers(self.config.auth_headers()))
    }

    /// Starts one request. Calls are fully independent of each other. An
    /// input that cannot be addressed resolves to a transport failure without
    /// reaching the transport.
    pub fn dispatch(&self, word: &str, source_lang: &str, target_lang: &str) -> PendingOutcome {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (completion, pending) = outcome_channel(id);

        match self.describe(word, source_lang, target_lang) {
            Ok(request) => {
                log::debug!("#{}: {} {}", id, request.method, request.url);
                self.transport.execute(request, completion);
            }
            Err(e) => completion.on_error(e),
        }
        pending
    }

    /// Callback form of `dispatch`: `on_outcome` runs once, on a runtime task.
    /// Must be called from within a tokio runtime.
    pub fn dispatch_with<F>(&self, word: &str, source_lang: &str, target_lang: &str, on_outcome: F)
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        let pending = self.dispatch(word, source_lang, target_lang);
        tokio::spawn(async move { on_outcome(pending.recv().await) });
    }
}

// ═══════════════════════════════════════════════════════════════════
// HTTP TRANSPORT
// ═══════════════════════════════════════════════════════════════════

/// reqwest-backed transport. Each request runs on its own tokio task.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(limits::REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn fetch(client: Client, request: RequestDescriptor) -> Result<String, FetchError> {
        let mut header_map = HeaderMap::new();
        header_map.insert(ACCEPT, HeaderValue::from_static(consts::headers::ACCEPT));
        for (key, val) in &request.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| FetchError::Header(key.clone()))?;
            let value = HeaderValue::from_str(val).map_err(|_| FetchError::Header(key.clone()))?;
            header_map.insert(name, value);
        }

        let response = client
            .request(request.method, request.url)
            .headers(header_map)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // the status alone is enough to report; the body is best effort
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status(status, truncate_text(&one_line(&body), 200)));
        }
        Ok(response.text().await?)
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: RequestDescriptor, completion: Completion) {
        let client = self.client.clone();
        tokio::spawn(async move {
            match Self::fetch(client, request).await {
                Ok(body) => completion.on_success(&body),
                Err(e) => completion.on_error(e),
            }
        });
    }
}
