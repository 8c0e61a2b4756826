use async_trait::async_trait;
use tracing::debug;

use tutor_core::model::{CaseStudy, DifficultyTier, EvaluationResult, Question};

use crate::ai::client::AiClient;
use crate::ai::{prompts, wire};
use crate::error::GatewayError;
use crate::gateway::{AnswerGrader, QuestionProvider};

/// Question generator backed by a chat-completions model.
#[derive(Clone)]
pub struct AiQuestionProvider {
    client: AiClient,
}

impl AiQuestionProvider {
    #[must_use]
    pub fn new(client: AiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuestionProvider for AiQuestionProvider {
    async fn request_question(
        &self,
        topic: &str,
        tier: DifficultyTier,
        case_study: &CaseStudy,
    ) -> Result<Question, GatewayError> {
        let prompt = prompts::question_prompt(topic, tier, case_study);
        let raw = self.client.complete_json(prompts::PERSONA, &prompt).await?;
        debug!(%topic, %tier, case = %case_study.title, "question generated");
        wire::decode_question(&raw)
    }
}

/// Answer grader backed by a chat-completions model.
#[derive(Clone)]
pub struct AiAnswerGrader {
    client: AiClient,
}

impl AiAnswerGrader {
    #[must_use]
    pub fn new(client: AiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnswerGrader for AiAnswerGrader {
    async fn grade(
        &self,
        question: &Question,
        answer: &str,
    ) -> Result<EvaluationResult, GatewayError> {
        let prompt = prompts::grading_prompt(question, answer);
        let raw = self.client.complete_json(prompts::PERSONA, &prompt).await?;
        wire::decode_grade(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AiClientError;

    #[tokio::test]
    async fn disabled_client_surfaces_as_gateway_error() {
        let provider = AiQuestionProvider::new(AiClient::new(None));
        let case = CaseStudy::new("Pencils", "3mm cores", ["SD: 0.1mm"]);
        let err = provider
            .request_question("Standard Error", DifficultyTier::Concept, &case)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Ai(AiClientError::Disabled)));

        let grader = AiAnswerGrader::new(AiClient::new(None));
        let err = grader
            .grade(&Question::fallback(), "sd over root n")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Ai(AiClientError::Disabled)));
    }
}
