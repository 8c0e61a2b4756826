#![forbid(unsafe_code)]

pub mod ai;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod gateway;
pub mod questions;
pub mod tutor;

pub use tutor_core::Clock;

pub use config::SessionConfig;
pub use error::{AiClientError, GatewayError, SessionError};
pub use evaluation::{Assessment, EvaluationEngine};
pub use gateway::{AnswerGrader, QuestionProvider};
pub use questions::{LoadedQuestion, QuestionLoader};
pub use tutor::{SubmitOutcome, TutorSession};
