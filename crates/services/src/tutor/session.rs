use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use tutor_core::Clock;
use tutor_core::mentor;
use tutor_core::model::{Curriculum, EvaluationResult, ModuleId};
use tutor_core::progression::{LoadTicket, ScoreChange, SessionState};
use tutor_core::selector;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::evaluation::{Assessment, EvaluationEngine};
use crate::gateway::{AnswerGrader, QuestionProvider};
use crate::questions::QuestionLoader;

//
// ─── SUBMIT OUTCOME ────────────────────────────────────────────────────────────
//

/// What happened to one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub result: EvaluationResult,
    /// `None` when grading was unavailable and nothing was scored.
    pub change: Option<ScoreChange>,
    /// When the next tier loads, for correct answers.
    pub advance_due_at: Option<DateTime<Utc>>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Drives one learner through the curriculum.
///
/// Owns the progression state, the entropy source used for topic/case
/// selection and the pending advance timer. Every gateway call is bounded by
/// `SessionConfig::request_timeout`.
pub struct TutorSession {
    clock: Clock,
    config: SessionConfig,
    curriculum: Arc<Curriculum>,
    questions: QuestionLoader,
    evaluator: EvaluationEngine,
    rng: StdRng,
    state: SessionState,
    mentor: Option<String>,
    last_evaluation: Option<EvaluationResult>,
}

impl TutorSession {
    #[must_use]
    pub fn new(
        curriculum: Arc<Curriculum>,
        provider: Arc<dyn QuestionProvider>,
        grader: Arc<dyn AnswerGrader>,
    ) -> Self {
        let config = SessionConfig::default();
        Self {
            clock: Clock::system(),
            config,
            curriculum,
            questions: QuestionLoader::new(provider),
            evaluator: EvaluationEngine::new(grader).with_tolerance(config.tolerance),
            rng: StdRng::from_os_rng(),
            state: SessionState::new(),
            mentor: None,
            last_evaluation: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.evaluator = self.evaluator.with_tolerance(config.tolerance);
        self.config = config;
        self
    }

    /// Use a specific entropy source for topic/case selection.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn last_evaluation(&self) -> Option<&EvaluationResult> {
        self.last_evaluation.as_ref()
    }

    /// Current line of the tutor persona.
    #[must_use]
    pub fn mentor_message(&self) -> &str {
        self.mentor.as_deref().unwrap_or(mentor::GREETING)
    }

    /// Label of the active question, e.g. `Q-ID: 130`.
    #[must_use]
    pub fn question_label(&self) -> Option<String> {
        self.state.question()?;
        self.state.module().map(|m| m.question_label())
    }

    /// Time left before a pending advance fires.
    #[must_use]
    pub fn time_until_advance(&self) -> Option<Duration> {
        let pending = self.state.pending_advance()?;
        Some((pending.due_at - self.clock.now()).to_std().unwrap_or(Duration::ZERO))
    }

    /// Switch to a module and load its first `Concept` question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for unknown modules or while a request is in flight.
    pub async fn select_module(&mut self, id: ModuleId) -> Result<(), SessionError> {
        let module = self.curriculum.module(id)?;
        let ticket = self.state.select_module(Arc::clone(&module))?;
        info!(module = %module.id(), title = module.title(), "module selected");
        self.last_evaluation = None;
        self.load(ticket, Some(mentor::module_selected(&module))).await
    }

    /// Replace the draft answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Progression` unless a question awaits an answer.
    pub fn set_answer(&mut self, answer: impl Into<String>) -> Result<(), SessionError> {
        Ok(self.state.set_draft_answer(answer)?)
    }

    /// Grade the draft answer and apply it to streak, score and tier.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Progression` for an empty draft, a busy session,
    /// or when no question awaits an answer.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SessionError> {
        let ticket = self.state.submit()?;
        let assessment = tokio::time::timeout(
            self.config.request_timeout,
            self.evaluator.assess(&ticket.question, &ticket.answer),
        )
        .await
        .unwrap_or_else(|_| {
            warn!(timeout = ?self.config.request_timeout, "grading timed out");
            Assessment::unavailable()
        });

        let result = assessment.result;
        self.mentor = Some(result.feedback.clone());
        self.last_evaluation = Some(result.clone());

        if !assessment.graded {
            self.state.evaluation_failed(&ticket)?;
            return Ok(SubmitOutcome {
                result,
                change: None,
                advance_due_at: None,
            });
        }

        let due_at = self.clock.after(self.config.advance_delay);
        let change = self.state.evaluated(&ticket, &result, due_at)?;
        debug!(
            correct = change.is_correct,
            points = change.points,
            streak = change.streak,
            score = change.score,
            "answer evaluated"
        );
        Ok(SubmitOutcome {
            result,
            change: Some(change),
            advance_due_at: change.is_correct.then_some(due_at),
        })
    }

    /// Give up on the current question; resets the streak and loads another at the same tier.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Progression` unless a question awaits an answer.
    pub async fn skip(&mut self) -> Result<(), SessionError> {
        let ticket = self.state.skip()?;
        info!(tier = %ticket.tier, "question skipped");
        self.last_evaluation = None;
        self.load(ticket, None).await
    }

    /// Retry a load that timed out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Progression` unless the last load failed.
    pub async fn retry_load(&mut self) -> Result<(), SessionError> {
        let ticket = self.state.retry_load()?;
        self.load(ticket, None).await
    }

    /// Fire the pending advance if its delay has elapsed. Returns whether it fired.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the follow-up load cannot start.
    pub async fn poll_advance(&mut self) -> Result<bool, SessionError> {
        let Some(pending) = self.state.pending_advance() else {
            return Ok(false);
        };
        if !pending.is_due(self.clock.now()) {
            return Ok(false);
        }
        self.advance_now().await?;
        Ok(true)
    }

    /// Fire the pending advance without waiting for its delay.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Progression` when no advance is pending.
    pub async fn advance_now(&mut self) -> Result<(), SessionError> {
        let advance = self.state.advance()?;
        info!(tier = %advance.ticket.tier, wrapped = advance.wrapped, "advancing tier");
        self.last_evaluation = None;
        let greeting = advance.wrapped.then(|| mentor::TIER_WRAPPED.to_string());
        self.load(advance.ticket, greeting).await
    }

    /// Clear streak and score. The tier stays; a pending advance is dropped
    /// in favour of a new question at the current tier.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Progression` while a request is in flight.
    pub async fn reset_progress(&mut self) -> Result<(), SessionError> {
        let reload = self.state.reset_progress()?;
        info!(cancelled_advance = reload.is_some(), "progress reset");
        match reload {
            Some(ticket) => {
                self.last_evaluation = None;
                self.load(ticket, None).await
            }
            None => Ok(()),
        }
    }

    async fn load(
        &mut self,
        ticket: LoadTicket,
        greeting: Option<String>,
    ) -> Result<(), SessionError> {
        let (topic, case_study) = match selector::pick(&ticket.module, &mut self.rng) {
            Ok(selection) => (selection.topic.to_string(), selection.case_study.clone()),
            Err(err) => {
                self.state.load_failed(&ticket)?;
                return Err(err.into());
            }
        };
        debug!(%topic, case = %case_study.title, tier = %ticket.tier, "loading question");

        let loaded = tokio::time::timeout(
            self.config.request_timeout,
            self.questions.load(&topic, ticket.tier, &case_study),
        )
        .await;

        match loaded {
            Ok(loaded) => {
                self.state.question_loaded(&ticket, loaded.question)?;
                self.mentor = if loaded.degraded {
                    Some(mentor::DEGRADED_QUESTION.to_string())
                } else {
                    greeting
                };
            }
            Err(_) => {
                warn!(timeout = ?self.config.request_timeout, "question load timed out");
                self.state.load_failed(&ticket)?;
                self.mentor = Some(mentor::LOAD_TIMED_OUT.to_string());
            }
        }
        Ok(())
    }
}

impl fmt::Debug for TutorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TutorSession")
            .field("config", &self.config)
            .field("modules", &self.curriculum.len())
            .field("state", &self.state)
            .field("mentor", &self.mentor)
            .finish_non_exhaustive()
    }
}
