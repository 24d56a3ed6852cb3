use crate::error::QuizError;
use crate::state::{QuizState, TreeMatch};
use crate::transport::QuizTransport;

/// Drives a [`TreeMatch`] through a transport, one blocking request at a time.
#[derive(Debug)]
pub struct TreeMatchSession<T> {
    machine: TreeMatch,
    transport: T,
}

impl<T: QuizTransport> TreeMatchSession<T> {
    /// Session in the loading state; nothing is fetched yet.
    pub fn new(transport: T) -> Self {
        Self {
            machine: TreeMatch::new(),
            transport,
        }
    }

    /// Creates a session and fetches the first question.
    pub fn start(transport: T) -> Self {
        let mut session = Self::new(transport);
        session.restart();
        session
    }

    pub fn state(&self) -> &QuizState {
        self.machine.state()
    }

    pub fn machine(&self) -> &TreeMatch {
        &self.machine
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Goes back to the first question. Transport failures end in the error state.
    pub fn restart(&mut self) -> &QuizState {
        let ticket = self.machine.restart();
        let outcome = self.transport.begin();
        self.machine.resolve(ticket, outcome);
        self.machine.state()
    }

    /// Answers the current question.
    ///
    /// Rejected answers leave the state untouched and return an error;
    /// transport failures move to the error state instead.
    pub fn submit(&mut self, answer: &str) -> Result<&QuizState, QuizError> {
        let (ticket, request) = self.machine.answer(answer)?;
        let outcome = self.transport.answer(&request);
        self.machine.resolve(ticket, outcome);
        Ok(self.machine.state())
    }
}
