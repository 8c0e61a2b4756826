use std::sync::Arc;

use tracing::warn;

use tutor_core::model::{CaseStudy, DifficultyTier, Question};

use crate::gateway::QuestionProvider;

/// Question produced for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedQuestion {
    pub question: Question,
    /// True when the provider failed and the fixed fallback was substituted.
    pub degraded: bool,
}

/// Fetches questions from a provider, substituting a fallback on failure.
#[derive(Clone)]
pub struct QuestionLoader {
    provider: Arc<dyn QuestionProvider>,
}

impl QuestionLoader {
    #[must_use]
    pub fn new(provider: Arc<dyn QuestionProvider>) -> Self {
        Self { provider }
    }

    /// Load a question. Never fails: provider errors yield `Question::fallback()`.
    pub async fn load(
        &self,
        topic: &str,
        tier: DifficultyTier,
        case_study: &CaseStudy,
    ) -> LoadedQuestion {
        match self.provider.request_question(topic, tier, case_study).await {
            Ok(question) => LoadedQuestion {
                question,
                degraded: false,
            },
            Err(err) => {
                warn!(error = %err, %topic, %tier, "question generation failed, using fallback");
                LoadedQuestion {
                    question: Question::fallback(),
                    degraded: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use async_trait::async_trait;
    use tutor_core::model::QuestionType;

    struct Broken;

    #[async_trait]
    impl QuestionProvider for Broken {
        async fn request_question(
            &self,
            _topic: &str,
            _tier: DifficultyTier,
            _case_study: &CaseStudy,
        ) -> Result<Question, GatewayError> {
            Err(GatewayError::Unavailable("offline".into()))
        }
    }

    struct Echo;

    #[async_trait]
    impl QuestionProvider for Echo {
        async fn request_question(
            &self,
            topic: &str,
            tier: DifficultyTier,
            _case_study: &CaseStudy,
        ) -> Result<Question, GatewayError> {
            Ok(Question::text_input(format!("{tier}: {topic}"), "rubric"))
        }
    }

    fn case() -> CaseStudy {
        CaseStudy::new("Pencils", "3mm cores", ["SD: 0.1mm"])
    }

    #[tokio::test]
    async fn provider_failure_yields_fallback() {
        let loader = QuestionLoader::new(Arc::new(Broken));
        let loaded = loader.load("SE", DifficultyTier::Setup, &case()).await;
        assert!(loaded.degraded);
        assert_eq!(loaded.question.question_type(), QuestionType::TextInput);
        assert!(loaded.question.rubric.is_some_and(|r| !r.is_empty()));
    }

    #[tokio::test]
    async fn provider_question_is_passed_through() {
        let loader = QuestionLoader::new(Arc::new(Echo));
        let loaded = loader.load("SE", DifficultyTier::Setup, &case()).await;
        assert!(!loaded.degraded);
        assert_eq!(loaded.question.text, "Setup: SE");
    }
}
