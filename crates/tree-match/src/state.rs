use tracing::{debug, error, warn};

use crate::error::QuizError;
use crate::wire::{AnswerRequest, Match, Question, Step};

/// What the quiz currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizState {
    Loading,
    Question(Question),
    Match(Match),
    Error(String),
}

impl QuizState {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizState::Loading => "loading",
            QuizState::Question(_) => "question",
            QuizState::Match(_) => "match",
            QuizState::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Begin,
    Answer,
}

/// Handle for one in-flight request. Only the newest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    kind: RequestKind,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

/// Quiz state holder. It performs no I/O: callers issue the request a
/// ticket stands for and hand the outcome back through [`TreeMatch::resolve`].
#[derive(Debug, Clone)]
pub struct TreeMatch {
    state: QuizState,
    generation: u64,
    pending: Option<Ticket>,
}

impl Default for TreeMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeMatch {
    pub fn new() -> Self {
        Self {
            state: QuizState::Loading,
            generation: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// True while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn question(&self) -> Option<&Question> {
        match &self.state {
            QuizState::Question(question) => Some(question),
            _ => None,
        }
    }

    pub fn found_match(&self) -> Option<&Match> {
        match &self.state {
            QuizState::Match(found) => Some(found),
            _ => None,
        }
    }

    /// Re-enters loading and supersedes whatever request was in flight.
    pub fn restart(&mut self) -> Ticket {
        self.state = QuizState::Loading;
        self.issue(RequestKind::Begin)
    }

    /// Prepares the answer request for the current question.
    pub fn answer(&mut self, answer: &str) -> Result<(Ticket, AnswerRequest), QuizError> {
        if self.pending.is_some() {
            return Err(QuizError::Pending);
        }
        let QuizState::Question(question) = &self.state else {
            return Err(QuizError::NotAsking);
        };
        if !question.answers.iter().any(|candidate| candidate == answer) {
            return Err(QuizError::UnknownAnswer {
                answer: answer.to_string(),
                step_id: question.step_id.clone(),
            });
        }

        let request = AnswerRequest {
            step_id: question.step_id.clone(),
            answer: answer.to_string(),
        };
        Ok((self.issue(RequestKind::Answer), request))
    }

    /// Applies a response. Returns `false` when the ticket is stale.
    pub fn resolve(&mut self, ticket: Ticket, outcome: Result<Step, QuizError>) -> bool {
        if self.pending != Some(ticket) {
            warn!(
                generation = ticket.generation,
                current = self.generation,
                "discarding stale quiz response"
            );
            return false;
        }
        self.pending = None;

        self.state = match outcome {
            Ok(Step::Question(question)) => {
                debug!(step_id = %question.step_id, "next question");
                QuizState::Question(question)
            }
            Ok(Step::Match(found)) => {
                debug!(name = %found.name, "match found");
                QuizState::Match(found)
            }
            Err(err) => {
                let message = match ticket.kind {
                    RequestKind::Begin => format!("Error fetching initial question: {}", err),
                    RequestKind::Answer => format!("Error answering question: {}", err),
                };
                error!(error = %err, "quiz request failed");
                QuizState::Error(message)
            }
        };
        true
    }

    fn issue(&mut self, kind: RequestKind) -> Ticket {
        self.generation += 1;
        let ticket = Ticket {
            generation: self.generation,
            kind,
        };
        self.pending = Some(ticket);
        ticket
    }
}
