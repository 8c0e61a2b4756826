use std::sync::Arc;

use tracing::warn;

use tutor_core::evaluation::{CALCULATION_TOLERANCE, grade_calculation};
use tutor_core::mentor;
use tutor_core::model::{EvaluationResult, Question, QuestionKind};

use crate::gateway::AnswerGrader;

/// Verdict plus whether it came from an actual grading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub result: EvaluationResult,
    /// False when the grader failed and a fallback verdict was produced.
    pub graded: bool,
}

impl Assessment {
    /// Fallback used when grading is unavailable.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            result: EvaluationResult::incorrect(mentor::GRADING_UNAVAILABLE),
            graded: false,
        }
    }
}

/// Decides correctness: locally for calculations, via the grader otherwise.
#[derive(Clone)]
pub struct EvaluationEngine {
    grader: Arc<dyn AnswerGrader>,
    tolerance: f64,
}

impl EvaluationEngine {
    #[must_use]
    pub fn new(grader: Arc<dyn AnswerGrader>) -> Self {
        Self {
            grader,
            tolerance: CALCULATION_TOLERANCE,
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Evaluate `answer`; grader failures become an incorrect fallback verdict.
    pub async fn evaluate(&self, question: &Question, answer: &str) -> EvaluationResult {
        self.assess(question, answer).await.result
    }

    /// Like `evaluate`, but reports whether a real grading took place.
    pub async fn assess(&self, question: &Question, answer: &str) -> Assessment {
        if let QuestionKind::Calculation { correct_value } = question.kind {
            return Assessment {
                result: grade_calculation(answer, correct_value, self.tolerance),
                graded: true,
            };
        }

        match self.grader.grade(question, answer).await {
            Ok(result) => Assessment {
                result,
                graded: true,
            },
            Err(err) => {
                warn!(error = %err, "grading failed, using fallback verdict");
                Assessment::unavailable()
            }
        }
    }
}
