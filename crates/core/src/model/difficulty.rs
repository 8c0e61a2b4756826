use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::question::QuestionType;

/// Escalating question style within a module.
///
/// Tiers cycle: `Interpretation` wraps back to `Concept`, so a module never
/// reaches a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DifficultyTier {
    /// Definitions and validity of a concept.
    #[default]
    Concept,
    /// Mapping a description onto a variable or hypothesis.
    Setup,
    /// A specific calculation.
    Execution,
    /// A business decision or interpretation of a coefficient.
    Interpretation,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Concept,
        DifficultyTier::Setup,
        DifficultyTier::Execution,
        DifficultyTier::Interpretation,
    ];

    /// Cyclic successor.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            DifficultyTier::Concept => DifficultyTier::Setup,
            DifficultyTier::Setup => DifficultyTier::Execution,
            DifficultyTier::Execution => DifficultyTier::Interpretation,
            DifficultyTier::Interpretation => DifficultyTier::Concept,
        }
    }

    /// True for the last tier, whose successor wraps around.
    #[must_use]
    pub fn is_last(self) -> bool {
        self == DifficultyTier::Interpretation
    }

    /// Question type a generator is asked to produce for this tier.
    #[must_use]
    pub fn expected_question_type(self) -> QuestionType {
        match self {
            DifficultyTier::Concept | DifficultyTier::Setup => QuestionType::MultipleChoice,
            DifficultyTier::Execution => QuestionType::Calculation,
            DifficultyTier::Interpretation => QuestionType::TextInput,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyTier::Concept => "Concept",
            DifficultyTier::Setup => "Setup",
            DifficultyTier::Execution => "Execution",
            DifficultyTier::Interpretation => "Interpretation",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_cycle_back_to_concept() {
        let mut tier = DifficultyTier::Concept;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(tier);
            tier = tier.next();
        }
        assert_eq!(
            seen,
            vec![
                DifficultyTier::Concept,
                DifficultyTier::Setup,
                DifficultyTier::Execution,
                DifficultyTier::Interpretation,
                DifficultyTier::Concept,
            ]
        );
    }

    #[test]
    fn only_interpretation_is_last() {
        let last: Vec<_> = DifficultyTier::ALL.into_iter().filter(|t| t.is_last()).collect();
        assert_eq!(last, vec![DifficultyTier::Interpretation]);
    }

    #[test]
    fn expected_types_follow_tier() {
        assert_eq!(
            DifficultyTier::Setup.expected_question_type(),
            QuestionType::MultipleChoice
        );
        assert_eq!(
            DifficultyTier::Execution.expected_question_type(),
            QuestionType::Calculation
        );
        assert_eq!(
            DifficultyTier::Interpretation.expected_question_type(),
            QuestionType::TextInput
        );
    }
}
