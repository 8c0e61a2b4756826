use std::fmt::Write as _;

use tutor_core::model::{Curriculum, FormulaToken, QuestionKind};
use tutor_core::{Phase, SessionState};

pub const HELP: &str = "\
Type your answer and press enter.
  multiple choice: the option number or its text
  formula:         palette tokens separated by spaces, `<` undoes, `clear` restarts
Commands:
  :modules         list modules        :module <id>  switch module
  :skip            new question        :retry        retry a timed-out load
  :status          score and streak    :reset        zero score and streak
  :help            this text           :quit         leave";

#[must_use]
pub fn modules(curriculum: &Curriculum) -> String {
    let mut out = String::from("Modules:\n");
    for module in curriculum.modules() {
        let _ = writeln!(out, "  {}. {}", module.id(), module.title());
    }
    out
}

#[must_use]
pub fn status(state: &SessionState) -> String {
    let module = state
        .module()
        .map_or_else(|| "none".to_string(), |m| m.title().to_string());
    format!(
        "Module: {module} | Tier: {} | Score: {} | Streak: {}",
        state.tier(),
        state.score(),
        state.streak()
    )
}

/// Card for the active question, or a placeholder when there is none.
#[must_use]
pub fn question(state: &SessionState) -> String {
    let Some(module) = state.module() else {
        return "Select a module to begin (:modules, then :module <id>).".to_string();
    };
    let Some(question) = state.question() else {
        return match state.phase() {
            Phase::LoadFailed => "No question loaded. Use :retry.".to_string(),
            _ => "Loading...".to_string(),
        };
    };

    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", state.tier(), module.question_label());
    if let Some(context) = &question.context {
        let _ = writeln!(out, "  {context}");
    }
    let _ = writeln!(out, "\n{}", question.text);
    match &question.kind {
        QuestionKind::MultipleChoice { options, .. } => {
            for (i, option) in options.iter().enumerate() {
                let _ = writeln!(out, "  {}) {option}", i + 1);
            }
        }
        QuestionKind::Calculation { .. } => {
            let _ = writeln!(out, "  (round to 2 decimals)");
        }
        QuestionKind::Formula => {
            let palette = FormulaToken::PALETTE
                .iter()
                .map(|t| t.symbol())
                .collect::<Vec<_>>()
                .join("  ");
            let _ = writeln!(out, "  palette: {palette}");
        }
        QuestionKind::TextInput => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tutor_core::model::{ModuleId, Question};

    #[test]
    fn question_card_numbers_options() {
        let curriculum = Curriculum::builtin();
        let module = curriculum.module(ModuleId::new(1)).unwrap();
        let mut state = SessionState::new();
        let ticket = state.select_module(Arc::clone(&module)).unwrap();
        assert_eq!(question(&state), "Loading...");

        let q = Question::multiple_choice("Which bias?", ["Coverage", "Response"])
            .with_context("iOS users polled.");
        state.question_loaded(&ticket, q).unwrap();
        let card = question(&state);
        assert!(card.starts_with("[Concept] Q-ID: 110\n"));
        assert!(card.contains("  iOS users polled.\n"));
        assert!(card.contains("  1) Coverage\n  2) Response\n"));
    }

    #[test]
    fn status_without_module() {
        let state = SessionState::new();
        assert_eq!(
            status(&state),
            "Module: none | Tier: Concept | Score: 0 | Streak: 0"
        );
    }

    #[test]
    fn module_list_is_in_curriculum_order() {
        let list = modules(&Curriculum::builtin());
        assert!(list.starts_with("Modules:\n  1. Samples & Surveys\n  2. "));
        assert!(list.ends_with("  9. Categorical Variables\n"));
    }
}
