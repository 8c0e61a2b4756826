use std::fmt;

use serde::{Deserialize, Serialize};

//
// ─── QUESTION TYPE ─────────────────────────────────────────────────────────────
//

/// Answer format a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    MultipleChoice,
    TextInput,
    Calculation,
    Formula,
}

impl QuestionType {
    /// Wire name used by the question generator.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionType::TextInput => "TEXT_INPUT",
            QuestionType::Calculation => "CALCULATION",
            QuestionType::Formula => "FORMULA",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Type-specific payload of a question.
///
/// Options exist only on multiple choice, a reference value only on calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        correct_option: Option<usize>,
    },
    TextInput,
    Calculation {
        correct_value: f64,
    },
    Formula,
}

/// One generated question, owned by the session until replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub context: Option<String>,
    pub text: String,
    pub kind: QuestionKind,
    pub rubric: Option<String>,
}

impl Question {
    #[must_use]
    pub fn text_input(text: impl Into<String>, rubric: impl Into<String>) -> Self {
        Self {
            context: None,
            text: text.into(),
            kind: QuestionKind::TextInput,
            rubric: Some(rubric.into()),
        }
    }

    #[must_use]
    pub fn calculation(text: impl Into<String>, correct_value: f64) -> Self {
        Self {
            context: None,
            text: text.into(),
            kind: QuestionKind::Calculation { correct_value },
            rubric: None,
        }
    }

    #[must_use]
    pub fn multiple_choice(
        text: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            context: None,
            text: text.into(),
            kind: QuestionKind::MultipleChoice {
                options: options.into_iter().map(Into::into).collect(),
                correct_option: None,
            },
            rubric: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_rubric(mut self, rubric: impl Into<String>) -> Self {
        self.rubric = Some(rubric.into());
        self
    }

    /// Substitute used whenever question generation fails.
    #[must_use]
    pub fn fallback() -> Self {
        Self::text_input(
            "What is the standard error definition?",
            "standard deviation divided by root n",
        )
        .with_context("We seem to have lost connection to the server farm.")
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        match self.kind {
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::TextInput => QuestionType::TextInput,
            QuestionKind::Calculation { .. } => QuestionType::Calculation,
            QuestionKind::Formula => QuestionType::Formula,
        }
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::MultipleChoice { options, .. } => options,
            _ => &[],
        }
    }

    #[must_use]
    pub fn correct_value(&self) -> Option<f64> {
        match self.kind {
            QuestionKind::Calculation { correct_value } => Some(correct_value),
            _ => None,
        }
    }
}

//
// ─── EVALUATION RESULT ─────────────────────────────────────────────────────────
//

/// Verdict on one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    pub is_correct: bool,
    pub feedback: String,
}

impl EvaluationResult {
    #[must_use]
    pub fn correct(feedback: impl Into<String>) -> Self {
        Self {
            is_correct: true,
            feedback: feedback.into(),
        }
    }

    #[must_use]
    pub fn incorrect(feedback: impl Into<String>) -> Self {
        Self {
            is_correct: false,
            feedback: feedback.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_text_input_with_rubric() {
        let q = Question::fallback();
        assert_eq!(q.question_type(), QuestionType::TextInput);
        assert!(q.rubric.as_deref().is_some_and(|r| !r.is_empty()));
        assert!(q.context.is_some());
    }

    #[test]
    fn accessors_follow_kind() {
        let mc = Question::multiple_choice("Pick", ["a", "b"]);
        assert_eq!(mc.options(), ["a".to_string(), "b".to_string()]);
        assert_eq!(mc.correct_value(), None);

        let calc = Question::calculation("Compute", 240.0);
        assert_eq!(calc.correct_value(), Some(240.0));
        assert!(calc.options().is_empty());
    }

    #[test]
    fn wire_names_are_screaming_snake_case() {
        assert_eq!(QuestionType::MultipleChoice.to_string(), "MULTIPLE_CHOICE");
        assert_eq!(QuestionType::Formula.wire_name(), "FORMULA");
    }
}
