use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Step identifier as issued by the server, echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepId {
    Number(i64),
    Text(String),
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepId::Number(number) => write!(f, "{}", number),
            StepId::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub step_id: StepId,
    pub question: String,
    #[serde(default)]
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Body posted to the answer endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub step_id: StepId,
    pub answer: String,
}

/// Body returned by both the begin and the answer endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepResponse {
    #[serde(default)]
    pub question: Option<Question>,
    #[serde(default, rename = "match")]
    pub found: Option<Match>,
}

impl StepResponse {
    /// A match takes precedence over a question when both are present.
    pub fn into_step(self) -> Result<Step, QuizError> {
        match (self.found, self.question) {
            (Some(found), _) => Ok(Step::Match(found)),
            (None, Some(question)) => Ok(Step::Question(question)),
            (None, None) => Err(QuizError::EmptyStep),
        }
    }
}

/// What the server asked for next.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Question(Question),
    Match(Match),
}
