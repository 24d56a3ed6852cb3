#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use tree_match::{AnswerRequest, QuizError, QuizTransport, Step, StepResponse};

pub fn fixture(name: &str) -> &'static str {
    match name {
        "begin" => include_str!("../tests/fixtures/begin.json"),
        "next_question" => include_str!("../tests/fixtures/next_question.json"),
        "match" => include_str!("../tests/fixtures/match.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

pub fn step(name: &str) -> Step {
    let response: StepResponse = serde_json::from_str(fixture(name)).expect("deserialize");
    response.into_step().expect("step")
}

/// Transport that replays canned outcomes and records what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: RefCell<VecDeque<Result<Step, QuizError>>>,
    pub sent: RefCell<Vec<AnswerRequest>>,
    pub begins: RefCell<usize>,
}

impl ScriptedTransport {
    pub fn new(outcomes: Vec<Result<Step, QuizError>>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            ..Self::default()
        }
    }

    fn next(&self) -> Result<Step, QuizError> {
        self.outcomes
            .borrow_mut()
            .pop_front()
            .expect("script ran out of outcomes")
    }
}

impl QuizTransport for ScriptedTransport {
    fn begin(&self) -> Result<Step, QuizError> {
        *self.begins.borrow_mut() += 1;
        self.next()
    }

    fn answer(&self, request: &AnswerRequest) -> Result<Step, QuizError> {
        self.sent.borrow_mut().push(request.clone());
        self.next()
    }
}
