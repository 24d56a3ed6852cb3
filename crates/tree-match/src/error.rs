use thiserror::Error;

use crate::wire::StepId;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} responded with status {status}")]
    Status { status: u16, url: String },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response carried neither a question nor a match")]
    EmptyStep,
    #[error("no question is waiting for an answer")]
    NotAsking,
    #[error("a request is already in flight")]
    Pending,
    #[error("'{answer}' is not an answer to step {step_id}")]
    UnknownAnswer { answer: String, step_id: StepId },
}
