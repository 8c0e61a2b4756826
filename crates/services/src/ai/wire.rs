//! JSON shapes returned by the generator and the grader.

use serde::Deserialize;

use tutor_core::model::{EvaluationResult, Question, QuestionKind};

use crate::error::GatewayError;

/// Numbers sometimes arrive quoted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionWire {
    context: Option<String>,
    text: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    options: Option<Vec<String>>,
    correct_option_index: Option<Numeric>,
    correct_value: Option<Numeric>,
    rubric: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GradeWire {
    is_correct: bool,
    feedback: String,
}

/// Strip an optional Markdown code fence around a JSON reply.
fn unfence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Decode a generated question.
///
/// Unknown or missing types become text input. A calculation without a
/// numeric `correctValue` or a multiple choice without options is malformed.
///
/// # Errors
///
/// Returns `GatewayError` for invalid JSON or missing required fields.
pub fn decode_question(raw: &str) -> Result<Question, GatewayError> {
    let wire: QuestionWire = serde_json::from_str(unfence(raw))?;
    let text = non_blank(wire.text).ok_or(GatewayError::MissingField("text"))?;

    let kind = match wire.kind.as_deref().map(str::trim) {
        Some("MULTIPLE_CHOICE") => {
            let options = wire
                .options
                .filter(|o| !o.is_empty())
                .ok_or(GatewayError::MissingField("options"))?;
            let correct_option = wire
                .correct_option_index
                .as_ref()
                .and_then(Numeric::value)
                .filter(|i| i.fract() == 0.0 && *i >= 0.0)
                .map(|i| i as usize)
                .filter(|i| *i < options.len());
            QuestionKind::MultipleChoice {
                options,
                correct_option,
            }
        }
        Some("CALCULATION") => {
            let correct_value = wire
                .correct_value
                .as_ref()
                .and_then(Numeric::value)
                .ok_or(GatewayError::MissingField("correctValue"))?;
            QuestionKind::Calculation { correct_value }
        }
        Some("FORMULA") => QuestionKind::Formula,
        _ => QuestionKind::TextInput,
    };

    Ok(Question {
        context: non_blank(wire.context),
        text,
        kind,
        rubric: non_blank(wire.rubric),
    })
}

/// Decode a grading verdict.
///
/// # Errors
///
/// Returns `GatewayError` for invalid JSON or a missing field.
pub fn decode_grade(raw: &str) -> Result<EvaluationResult, GatewayError> {
    let wire: GradeWire = serde_json::from_str(unfence(raw))?;
    Ok(EvaluationResult {
        is_correct: wire.is_correct,
        feedback: wire.feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::model::QuestionType;

    #[test]
    fn decodes_calculation_question() {
        let raw = r#"{"context": "Sewage COVID levels.", "text": "Upper control limit?",
                      "type": "CALCULATION", "correctValue": 357.6}"#;
        let q = decode_question(raw).unwrap();
        assert_eq!(q.question_type(), QuestionType::Calculation);
        assert_eq!(q.correct_value(), Some(357.6));
        assert_eq!(q.context.as_deref(), Some("Sewage COVID levels."));
    }

    #[test]
    fn quoted_numbers_are_accepted() {
        let raw = r#"{"text": "t-stat?", "type": "CALCULATION", "correctValue": "1.64"}"#;
        assert_eq!(decode_question(raw).unwrap().correct_value(), Some(1.64));
    }

    #[test]
    fn decodes_multiple_choice_with_index() {
        let raw = r#"```json
            {"text": "Which bias?", "type": "MULTIPLE_CHOICE",
             "options": ["Coverage", "Response", "None"], "correctOptionIndex": 0}
        ```"#;
        let q = decode_question(raw).unwrap();
        assert_eq!(
            q.kind,
            QuestionKind::MultipleChoice {
                options: vec!["Coverage".into(), "Response".into(), "None".into()],
                correct_option: Some(0),
            }
        );
    }

    #[test]
    fn out_of_range_option_index_is_dropped() {
        let raw = r#"{"text": "Pick", "type": "MULTIPLE_CHOICE", "options": ["a"], "correctOptionIndex": 4}"#;
        let q = decode_question(raw).unwrap();
        assert!(matches!(
            q.kind,
            QuestionKind::MultipleChoice {
                correct_option: None,
                ..
            }
        ));
    }

    #[test]
    fn unknown_type_maps_to_text_input() {
        let raw = r#"{"text": "Interpret the slope.", "type": "ESSAY", "rubric": "units"}"#;
        let q = decode_question(raw).unwrap();
        assert_eq!(q.question_type(), QuestionType::TextInput);
        assert_eq!(q.rubric.as_deref(), Some("units"));

        let q = decode_question(r#"{"text": "Build it", "type": "FORMULA"}"#).unwrap();
        assert_eq!(q.question_type(), QuestionType::Formula);
    }

    #[test]
    fn malformed_questions_are_rejected() {
        assert!(matches!(
            decode_question("not json"),
            Err(GatewayError::MalformedResponse(_))
        ));
        assert!(matches!(
            decode_question(r#"{"type": "TEXT_INPUT"}"#),
            Err(GatewayError::MissingField("text"))
        ));
        assert!(matches!(
            decode_question(r#"{"text": "x", "type": "CALCULATION"}"#),
            Err(GatewayError::MissingField("correctValue"))
        ));
        assert!(matches!(
            decode_question(r#"{"text": "x", "type": "MULTIPLE_CHOICE", "options": []}"#),
            Err(GatewayError::MissingField("options"))
        ));
    }

    #[test]
    fn decodes_grade() {
        let result = decode_grade(r#"{"isCorrect": true, "feedback": "Boom. Deep idea."}"#).unwrap();
        assert!(result.is_correct);
        assert_eq!(result.feedback, "Boom. Deep idea.");
        assert!(decode_grade(r#"{"isCorrect": "maybe"}"#).is_err());
    }
}
