//! Boundary to the external question generator and answer grader.

use async_trait::async_trait;

use tutor_core::model::{CaseStudy, DifficultyTier, EvaluationResult, Question};

use crate::error::GatewayError;

/// Turns a topic, tier and case study into a question.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Request one question.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the provider is unreachable or its answer is malformed.
    async fn request_question(
        &self,
        topic: &str,
        tier: DifficultyTier,
        case_study: &CaseStudy,
    ) -> Result<Question, GatewayError>;
}

/// Judges free-text, multiple-choice and formula answers.
#[async_trait]
pub trait AnswerGrader: Send + Sync {
    /// Grade `answer` against `question`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the grader is unreachable or its answer is malformed.
    async fn grade(
        &self,
        question: &Question,
        answer: &str,
    ) -> Result<EvaluationResult, GatewayError>;
}
