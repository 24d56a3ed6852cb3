use std::time::Duration;

use reqwest::blocking::{Client, Response};
use tracing::debug;

use crate::error::QuizError;
use crate::wire::{AnswerRequest, Step, StepResponse};

/// Source of quiz steps.
pub trait QuizTransport {
    /// Fetches the first question.
    fn begin(&self) -> Result<Step, QuizError>;

    /// Submits an answer and returns the next step.
    fn answer(&self, request: &AnswerRequest) -> Result<Step, QuizError>;
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub begin_path: String,
    pub answer_path: String,
    pub timeout: Duration,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            begin_path: "begin".into(),
            answer_path: "answer".into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn begin_url(&self) -> String {
        join_url(&self.base_url, &self.begin_path)
    }

    pub fn answer_url(&self) -> String {
        join_url(&self.base_url, &self.answer_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Blocking JSON-over-HTTP transport. Failures are returned once, never retried.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self, QuizError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl QuizTransport for HttpTransport {
    fn begin(&self) -> Result<Step, QuizError> {
        let url = self.config.begin_url();
        debug!(%url, "fetching first question");
        let response = ensure_success(self.client.get(&url).send()?)?;
        decode(response)
    }

    fn answer(&self, request: &AnswerRequest) -> Result<Step, QuizError> {
        let url = self.config.answer_url();
        debug!(%url, step_id = %request.step_id, answer = %request.answer, "submitting answer");
        let response = ensure_success(self.client.post(&url).json(request).send()?)?;
        decode(response)
    }
}

fn ensure_success(response: Response) -> Result<Response, QuizError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(QuizError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

fn decode(response: Response) -> Result<Step, QuizError> {
    let body = response.text()?;
    let parsed: StepResponse = serde_json::from_str(&body)?;
    parsed.into_step()
}
