//! Deterministic grading of calculation answers.

use crate::model::EvaluationResult;

/// Absolute tolerance accepted on calculation answers.
pub const CALCULATION_TOLERANCE: f64 = 0.05;

/// Parse a learner's numeric answer; `None` when it is not a finite number.
#[must_use]
pub fn parse_numeric(answer: &str) -> Option<f64> {
    answer
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// True when `answer` parses and lies strictly within `tolerance` of `correct_value`.
#[must_use]
pub fn within_tolerance(answer: &str, correct_value: f64, tolerance: f64) -> bool {
    parse_numeric(answer).is_some_and(|value| (value - correct_value).abs() < tolerance)
}

/// Grade a calculation answer. Unparseable input is an ordinary wrong answer.
#[must_use]
pub fn grade_calculation(answer: &str, correct_value: f64, tolerance: f64) -> EvaluationResult {
    if within_tolerance(answer, correct_value, tolerance) {
        EvaluationResult::correct("Boom. Spot on. The numbers don't lie.")
    } else {
        EvaluationResult::incorrect(format!(
            "Not quite. I calculated {correct_value}. Check your standard errors."
        ))
    }
}
