#![allow(missing_docs)]

pub mod error;
pub mod session;
pub mod state;
pub mod transport;
pub mod wire;

pub use error::QuizError;
pub use session::TreeMatchSession;
pub use state::{QuizState, RequestKind, Ticket, TreeMatch};
pub use transport::{HttpTransport, QuizTransport, TransportConfig};
pub use wire::{AnswerRequest, Match, Question, Step, StepId, StepResponse};
