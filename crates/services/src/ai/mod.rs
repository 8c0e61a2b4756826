pub mod client;
pub mod gateways;
pub mod prompts;
pub mod wire;

pub use client::{AiClient, AiConfig};
pub use gateways::{AiAnswerGrader, AiQuestionProvider};
