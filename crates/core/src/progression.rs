use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{DifficultyTier, EvaluationResult, Module, Question};

/// Points per streak step: a correct answer earns `10 × (streak before it + 1)`.
pub const POINTS_PER_STREAK_STEP: u64 = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Guard violations. State is left untouched whenever one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressionError {
    #[error("no module selected")]
    NoModule,
    #[error("another request is still in flight")]
    Busy,
    #[error("answer is empty")]
    EmptyAnswer,
    #[error("operation not allowed while {0}")]
    WrongPhase(Phase),
    #[error("response belongs to a superseded request")]
    StaleTicket,
    #[error("no advance is pending")]
    NoPendingAdvance,
}

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where the learner is within one question round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No module selected yet.
    #[default]
    Idle,
    /// Waiting for the question generator.
    Loading,
    /// A question is shown and the learner may answer or skip.
    AwaitingAnswer,
    /// Waiting for the answer to be graded.
    Evaluating,
    /// Answer was correct; the next tier loads once the display delay elapses.
    Advancing,
    /// The load timed out; the learner may retry.
    LoadFailed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::AwaitingAnswer => "awaiting an answer",
            Phase::Evaluating => "evaluating",
            Phase::Advancing => "advancing",
            Phase::LoadFailed => "load failed",
        };
        f.write_str(name)
    }
}

//
// ─── TICKETS ───────────────────────────────────────────────────────────────────
//

/// Handle for one outstanding question load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub sequence: u64,
    pub module: Arc<Module>,
    pub tier: DifficultyTier,
}

/// Handle for one outstanding evaluation, carrying what must be graded.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationTicket {
    pub sequence: u64,
    pub question: Question,
    pub answer: String,
}

/// Scheduled tier advance after a correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub due_at: DateTime<Utc>,
    pub from: DifficultyTier,
}

impl PendingAdvance {
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.due_at
    }
}

/// Score bookkeeping produced by applying one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChange {
    pub is_correct: bool,
    pub points: u64,
    pub streak: u32,
    pub score: u64,
}

/// Result of firing a pending advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub ticket: LoadTicket,
    pub wrapped: bool,
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Per-learner progression state machine.
///
/// At most one load or evaluation is outstanding; each is identified by a
/// ticket whose sequence number must match when its response is applied.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    module: Option<Arc<Module>>,
    tier: DifficultyTier,
    phase: Phase,
    question: Option<Question>,
    draft_answer: String,
    streak: u32,
    score: u64,
    sequence: u64,
    pending_advance: Option<PendingAdvance>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn module(&self) -> Option<&Arc<Module>> {
        self.module.as_ref()
    }

    #[must_use]
    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn draft_answer(&self) -> &str {
        &self.draft_answer
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<PendingAdvance> {
        self.pending_advance
    }

    /// True while a load or an evaluation is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::Evaluating)
    }

    /// Whether a submit would currently be accepted.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::AwaitingAnswer && !self.draft_answer.trim().is_empty()
    }

    /// Switch to `module`, restarting at `Concept`. Streak and score carry over.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::Busy` while a load or evaluation is outstanding.
    pub fn select_module(&mut self, module: Arc<Module>) -> Result<LoadTicket, ProgressionError> {
        if self.is_busy() {
            return Err(ProgressionError::Busy);
        }
        self.module = Some(Arc::clone(&module));
        self.tier = DifficultyTier::Concept;
        self.pending_advance = None;
        Ok(self.begin_load(module))
    }

    /// Install a freshly loaded question.
    ///
    /// # Errors
    ///
    /// Returns `WrongPhase` outside `Loading` and `StaleTicket` for a superseded load.
    pub fn question_loaded(
        &mut self,
        ticket: &LoadTicket,
        question: Question,
    ) -> Result<(), ProgressionError> {
        self.check_ticket(Phase::Loading, ticket.sequence)?;
        self.question = Some(question);
        self.draft_answer.clear();
        self.phase = Phase::AwaitingAnswer;
        Ok(())
    }

    /// Record that a load never produced a question.
    ///
    /// # Errors
    ///
    /// Returns `WrongPhase` outside `Loading` and `StaleTicket` for a superseded load.
    pub fn load_failed(&mut self, ticket: &LoadTicket) -> Result<(), ProgressionError> {
        self.check_ticket(Phase::Loading, ticket.sequence)?;
        self.phase = Phase::LoadFailed;
        Ok(())
    }

    /// Re-issue the load for the current tier after a failure.
    ///
    /// # Errors
    ///
    /// Returns `WrongPhase` unless the last load failed.
    pub fn retry_load(&mut self) -> Result<LoadTicket, ProgressionError> {
        if self.phase != Phase::LoadFailed {
            return Err(ProgressionError::WrongPhase(self.phase));
        }
        let module = self.require_module()?;
        Ok(self.begin_load(module))
    }

    /// Replace the draft answer.
    ///
    /// # Errors
    ///
    /// Returns `WrongPhase` unless a question is awaiting an answer.
    pub fn set_draft_answer(&mut self, answer: impl Into<String>) -> Result<(), ProgressionError> {
        if self.phase != Phase::AwaitingAnswer {
            return Err(ProgressionError::WrongPhase(self.phase));
        }
        self.draft_answer = answer.into();
        Ok(())
    }

    /// Start grading the draft answer.
    ///
    /// # Errors
    ///
    /// Returns `Busy` while evaluating, `WrongPhase` when no question awaits an
    /// answer and `EmptyAnswer` for a blank draft.
    pub fn submit(&mut self) -> Result<EvaluationTicket, ProgressionError> {
        if self.is_busy() {
            return Err(ProgressionError::Busy);
        }
        if self.phase == Phase::Idle {
            return Err(ProgressionError::NoModule);
        }
        if self.phase != Phase::AwaitingAnswer {
            return Err(ProgressionError::WrongPhase(self.phase));
        }
        if self.draft_answer.trim().is_empty() {
            return Err(ProgressionError::EmptyAnswer);
        }
        let question = self
            .question
            .clone()
            .ok_or(ProgressionError::WrongPhase(self.phase))?;
        self.sequence += 1;
        self.phase = Phase::Evaluating;
        Ok(EvaluationTicket {
            sequence: self.sequence,
            question,
            answer: self.draft_answer.clone(),
        })
    }

    /// Apply a verdict.
    ///
    /// Correct answers extend the streak, add `10 × (previous streak + 1)` and
    /// schedule a tier advance at `advance_due_at`. Wrong answers reset the
    /// streak and leave the question in place.
    ///
    /// # Errors
    ///
    /// Returns `WrongPhase` outside `Evaluating` and `StaleTicket` for a superseded evaluation.
    pub fn evaluated(
        &mut self,
        ticket: &EvaluationTicket,
        result: &EvaluationResult,
        advance_due_at: DateTime<Utc>,
    ) -> Result<ScoreChange, ProgressionError> {
        self.check_ticket(Phase::Evaluating, ticket.sequence)?;
        let points = if result.is_correct {
            let points = POINTS_PER_STREAK_STEP.saturating_mul(u64::from(self.streak) + 1);
            self.streak = self.streak.saturating_add(1);
            self.score = self.score.saturating_add(points);
            self.pending_advance = Some(PendingAdvance {
                due_at: advance_due_at,
                from: self.tier,
            });
            self.phase = Phase::Advancing;
            points
        } else {
            self.streak = 0;
            self.phase = Phase::AwaitingAnswer;
            0
        };
        Ok(ScoreChange {
            is_correct: result.is_correct,
            points,
            streak: self.streak,
            score: self.score,
        })
    }

    /// Drop an evaluation that produced no verdict. Streak and score stay as they were.
    ///
    /// # Errors
    ///
    /// Returns `WrongPhase` outside `Evaluating` and `StaleTicket` for a superseded evaluation.
    pub fn evaluation_failed(&mut self, ticket: &EvaluationTicket) -> Result<(), ProgressionError> {
        self.check_ticket(Phase::Evaluating, ticket.sequence)?;
        self.phase = Phase::AwaitingAnswer;
        Ok(())
    }

    /// Fire the pending advance: move to the next tier and start its load.
    ///
    /// # Errors
    ///
    /// Returns `NoPendingAdvance` when no correct answer is waiting to advance.
    pub fn advance(&mut self) -> Result<Advance, ProgressionError> {
        if self.phase != Phase::Advancing {
            return Err(ProgressionError::NoPendingAdvance);
        }
        let module = self.require_module()?;
        let pending = self
            .pending_advance
            .take()
            .ok_or(ProgressionError::NoPendingAdvance)?;
        self.tier = pending.from.next();
        let ticket = self.begin_load(module);
        Ok(Advance {
            ticket,
            wrapped: pending.from.is_last(),
        })
    }

    /// Abandon the current question. Resets the streak; tier and score stay.
    ///
    /// # Errors
    ///
    /// Returns `Busy` while a request is outstanding and `WrongPhase` unless a
    /// question awaits an answer.
    pub fn skip(&mut self) -> Result<LoadTicket, ProgressionError> {
        if self.is_busy() {
            return Err(ProgressionError::Busy);
        }
        if self.phase == Phase::Idle {
            return Err(ProgressionError::NoModule);
        }
        if self.phase != Phase::AwaitingAnswer {
            return Err(ProgressionError::WrongPhase(self.phase));
        }
        let module = self.require_module()?;
        self.streak = 0;
        Ok(self.begin_load(module))
    }

    /// Clear streak and score.
    ///
    /// A pending advance is cancelled: the tier stays and a fresh question is
    /// loaded for it, returned as the ticket.
    ///
    /// # Errors
    ///
    /// Returns `Busy` while a request is outstanding.
    pub fn reset_progress(&mut self) -> Result<Option<LoadTicket>, ProgressionError> {
        if self.is_busy() {
            return Err(ProgressionError::Busy);
        }
        self.streak = 0;
        self.score = 0;
        if self.pending_advance.take().is_none() {
            return Ok(None);
        }
        let module = self.require_module()?;
        Ok(Some(self.begin_load(module)))
    }

    fn require_module(&self) -> Result<Arc<Module>, ProgressionError> {
        self.module.clone().ok_or(ProgressionError::NoModule)
    }

    fn begin_load(&mut self, module: Arc<Module>) -> LoadTicket {
        self.sequence += 1;
        self.question = None;
        self.draft_answer.clear();
        self.phase = Phase::Loading;
        LoadTicket {
            sequence: self.sequence,
            module,
            tier: self.tier,
        }
    }

    fn check_ticket(&self, expected: Phase, sequence: u64) -> Result<(), ProgressionError> {
        if self.phase != expected {
            return Err(ProgressionError::WrongPhase(self.phase));
        }
        if sequence != self.sequence {
            return Err(ProgressionError::StaleTicket);
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CaseStudy, ModuleId};
    use crate::time::fixed_now;

    fn module(id: u32) -> Arc<Module> {
        Arc::new(
            Module::new(
                ModuleId::new(id),
                format!("Module {id}"),
                vec!["Standard Error".to_string()],
                vec![CaseStudy::new("Pencils", "3mm cores", ["SD: 0.1mm"])],
            )
            .unwrap(),
        )
    }

    /// Session with a module selected and a question awaiting an answer.
    fn ready_state() -> SessionState {
        let mut state = SessionState::new();
        let ticket = state.select_module(module(1)).unwrap();
        state
            .question_loaded(&ticket, Question::calculation("Compute", 240.0))
            .unwrap();
        state
    }

    fn answer(state: &mut SessionState, correct: bool) -> ScoreChange {
        state.set_draft_answer("42").unwrap();
        let ticket = state.submit().unwrap();
        let result = if correct {
            EvaluationResult::correct("yes")
        } else {
            EvaluationResult::incorrect("no")
        };
        state.evaluated(&ticket, &result, fixed_now()).unwrap()
    }

    fn answer_and_advance(state: &mut SessionState) {
        answer(state, true);
        let advance = state.advance().unwrap();
        state
            .question_loaded(&advance.ticket, Question::fallback())
            .unwrap();
    }

    #[test]
    fn select_module_starts_loading_at_concept() {
        let mut state = SessionState::new();
        assert_eq!(state.phase(), Phase::Idle);
        let ticket = state.select_module(module(2)).unwrap();
        assert_eq!(ticket.tier, DifficultyTier::Concept);
        assert_eq!(ticket.module.id(), ModuleId::new(2));
        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.question().is_none());
        assert!(state.is_busy());
    }

    #[test]
    fn question_loaded_clears_draft() {
        let mut state = ready_state();
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
        assert_eq!(state.draft_answer(), "");
        assert!(state.question().is_some());
    }

    #[test]
    fn correct_answer_scores_with_previous_streak() {
        let mut state = ready_state();
        let first = answer(&mut state, true);
        assert_eq!((first.points, first.streak, first.score), (10, 1, 10));
        assert_eq!(state.phase(), Phase::Advancing);
        assert_eq!(state.tier(), DifficultyTier::Concept);

        let advance = state.advance().unwrap();
        state.question_loaded(&advance.ticket, Question::fallback()).unwrap();
        let second = answer(&mut state, true);
        assert_eq!((second.points, second.streak, second.score), (20, 2, 30));
    }

    #[test]
    fn streak_of_n_accumulates_triangular_score() {
        let mut state = ready_state();
        for _ in 0..6 {
            answer_and_advance(&mut state);
        }
        assert_eq!(state.streak(), 6);
        assert_eq!(state.score(), 5 * 6 * 7);
    }

    #[test]
    fn wrong_answer_resets_streak_and_keeps_question() {
        let mut state = ready_state();
        answer_and_advance(&mut state);
        answer_and_advance(&mut state);
        let before = state.score();
        let change = answer(&mut state, false);
        assert_eq!(change.points, 0);
        assert_eq!(state.streak(), 0);
        assert_eq!(state.score(), before);
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
        assert!(state.question().is_some());
        assert_eq!(state.tier(), DifficultyTier::Execution);
        assert!(state.pending_advance().is_none());
    }

    #[test]
    fn tier_wraps_after_interpretation() {
        let mut state = ready_state();
        for _ in 0..3 {
            answer_and_advance(&mut state);
        }
        assert_eq!(state.tier(), DifficultyTier::Interpretation);
        answer(&mut state, true);
        let advance = state.advance().unwrap();
        assert!(advance.wrapped);
        assert_eq!(advance.ticket.tier, DifficultyTier::Concept);
        assert_eq!(state.tier(), DifficultyTier::Concept);
    }

    #[test]
    fn tier_only_moves_on_advance() {
        let mut state = ready_state();
        answer(&mut state, true);
        assert_eq!(state.tier(), DifficultyTier::Concept);
        assert_eq!(state.pending_advance().unwrap().from, DifficultyTier::Concept);
        state.advance().unwrap();
        assert_eq!(state.tier(), DifficultyTier::Setup);
        assert_eq!(state.advance().unwrap_err(), ProgressionError::NoPendingAdvance);
    }

    #[test]
    fn skip_resets_streak_and_keeps_tier() {
        let mut state = ready_state();
        answer_and_advance(&mut state);
        assert_eq!(state.tier(), DifficultyTier::Setup);
        let score = state.score();

        let ticket = state.skip().unwrap();
        assert_eq!(ticket.tier, DifficultyTier::Setup);
        assert_eq!(state.streak(), 0);
        assert_eq!(state.score(), score);
        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.question().is_none());
    }

    #[test]
    fn empty_or_blank_answer_is_rejected() {
        let mut state = ready_state();
        assert_eq!(state.submit().unwrap_err(), ProgressionError::EmptyAnswer);
        state.set_draft_answer("   ").unwrap();
        assert!(!state.can_submit());
        assert_eq!(state.submit().unwrap_err(), ProgressionError::EmptyAnswer);
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
    }

    #[test]
    fn failed_evaluation_leaves_score_untouched() {
        let mut state = ready_state();
        answer_and_advance(&mut state);
        state.set_draft_answer("sd over root n").unwrap();
        let ticket = state.submit().unwrap();
        state.evaluation_failed(&ticket).unwrap();
        assert_eq!((state.streak(), state.score()), (1, 10));
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
        assert_eq!(state.draft_answer(), "sd over root n");
    }

    #[test]
    fn busy_state_rejects_submit_switch_and_skip() {
        let mut state = ready_state();
        state.set_draft_answer("240").unwrap();
        let _ticket = state.submit().unwrap();
        assert_eq!(state.submit().unwrap_err(), ProgressionError::Busy);
        assert_eq!(state.select_module(module(2)).unwrap_err(), ProgressionError::Busy);
        assert_eq!(state.skip().unwrap_err(), ProgressionError::Busy);
        assert_eq!(state.reset_progress().unwrap_err(), ProgressionError::Busy);
        assert_eq!(state.module().unwrap().id(), ModuleId::new(1));
    }

    #[test]
    fn nothing_to_answer_without_module() {
        let mut state = SessionState::new();
        assert_eq!(state.submit().unwrap_err(), ProgressionError::NoModule);
        assert_eq!(state.skip().unwrap_err(), ProgressionError::NoModule);
    }

    #[test]
    fn stale_load_ticket_is_rejected() {
        let mut state = ready_state();
        let stale = state.skip().unwrap();
        state.load_failed(&stale).unwrap();
        let fresh = state.retry_load().unwrap();
        let err = state
            .question_loaded(&stale, Question::fallback())
            .unwrap_err();
        assert_eq!(err, ProgressionError::StaleTicket);
        state.question_loaded(&fresh, Question::fallback()).unwrap();
    }

    #[test]
    fn load_failure_allows_retry_only_from_failed_phase() {
        let mut state = SessionState::new();
        let ticket = state.select_module(module(1)).unwrap();
        assert_eq!(
            state.retry_load().unwrap_err(),
            ProgressionError::WrongPhase(Phase::Loading)
        );
        state.load_failed(&ticket).unwrap();
        assert_eq!(state.phase(), Phase::LoadFailed);
        assert!(!state.is_busy());
        let retry = state.retry_load().unwrap();
        assert_eq!(retry.tier, DifficultyTier::Concept);
        assert!(retry.sequence > ticket.sequence);
    }

    #[test]
    fn module_switch_keeps_score_and_cancels_pending_advance() {
        let mut state = ready_state();
        answer(&mut state, true);
        assert!(state.pending_advance().is_some());

        let ticket = state.select_module(module(2)).unwrap();
        assert!(state.pending_advance().is_none());
        assert_eq!(ticket.tier, DifficultyTier::Concept);
        assert_eq!(state.streak(), 1);
        assert_eq!(state.score(), 10);
    }

    #[test]
    fn reset_progress_clears_streak_and_score() {
        let mut state = ready_state();
        answer_and_advance(&mut state);
        assert!(state.reset_progress().unwrap().is_none());
        assert_eq!((state.streak(), state.score()), (0, 0));
        assert_eq!(state.tier(), DifficultyTier::Setup);
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
    }

    #[test]
    fn reset_cancels_pending_advance_and_reloads_same_tier() {
        let mut state = ready_state();
        answer(&mut state, true);
        assert_eq!(state.phase(), Phase::Advancing);

        let ticket = state.reset_progress().unwrap().unwrap();
        assert!(state.pending_advance().is_none());
        assert_eq!(ticket.tier, DifficultyTier::Concept);
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!((state.streak(), state.score()), (0, 0));
        assert_eq!(state.advance().unwrap_err(), ProgressionError::NoPendingAdvance);

        state
            .question_loaded(&ticket, Question::fallback())
            .unwrap();
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
        assert_eq!(state.tier(), DifficultyTier::Concept);
    }

    #[test]
    fn pending_advance_due_check() {
        let pending = PendingAdvance {
            due_at: fixed_now(),
            from: DifficultyTier::Setup,
        };
        assert!(pending.is_due(fixed_now()));
        assert!(!pending.is_due(fixed_now() - chrono::Duration::milliseconds(1)));
    }
}
