//! Interview session state — the single mutable record tracking one
//! interview's progress, plus the phase machine that gates user actions.
//!
//! The phase machine is deliberately an explicit tagged union with a pure
//! transition function, not a graph engine: the flow is a single fixed
//! path with one branch (next question vs. finish), and encoding it as
//! data buys nothing. Every mutation of `InterviewState` happens through
//! a named method so the invariants below are auditable in one place.
//!
//! Invariants:
//! - `current_question()` always reads `interview_questions[current_question_index]`
//!   while the interview is active.
//! - `previous_answers` is append-only and grows by exactly one per
//!   completed question; its length equals `current_question_index` at
//!   every `AwaitingAnswer` boundary and equals the question count once
//!   the interview is complete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Number of questions requested from the generator. The parser accepts
/// fewer (the model under-delivering is survivable) but never more.
pub const MAX_QUESTIONS: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Core state record
// ────────────────────────────────────────────────────────────────────────────

/// One completed question/answer exchange. Never mutated after append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
    pub feedback: String,
    pub score: u8,
    pub answered_at: DateTime<Utc>,
}

/// The complete mutable record for one interview session.
///
/// Created fresh at "start interview", mutated stage-by-stage through the
/// evaluator pipeline, and discarded wholesale at restart. `score == 0`
/// means "not yet scored" — nominal scores are 1–5.
#[derive(Debug, Clone)]
pub struct InterviewState {
    pub job_description: String,
    pub interview_questions: Vec<String>,
    pub current_question_index: usize,
    pub answer: String,
    pub score: u8,
    pub feedback: String,
    pub previous_answers: Vec<AnswerRecord>,
    pub final_feedback: String,
    pub interview_complete: bool,
}

impl InterviewState {
    /// Initializes a fresh state at question 0 with no recorded answers.
    /// `questions` must be non-empty — the question generator guarantees this.
    pub fn new(job_description: String, questions: Vec<String>) -> Self {
        debug_assert!(!questions.is_empty());
        Self {
            job_description,
            interview_questions: questions,
            current_question_index: 0,
            answer: String::new(),
            score: 0,
            feedback: String::new(),
            previous_answers: Vec::new(),
            final_feedback: String::new(),
            interview_complete: false,
        }
    }

    /// The question currently being asked (derived, never stored separately).
    pub fn current_question(&self) -> &str {
        &self.interview_questions[self.current_question_index]
    }

    pub fn max_questions(&self) -> usize {
        self.interview_questions.len()
    }

    /// True when the current question is the last one — the routing
    /// condition for the advance-vs-finish branch.
    pub fn is_last_question(&self) -> bool {
        self.current_question_index >= self.max_questions() - 1
    }

    /// Stores the transcribed answer for the current question.
    pub fn set_answer(&mut self, transcript: String) {
        self.answer = transcript;
    }

    /// True once a transcript (including a placeholder) has been stored.
    pub fn has_answer(&self) -> bool {
        !self.answer.is_empty()
    }

    /// Records the evaluation of the current answer. This append is the only
    /// state mutation with permanent effect: the record can never be revised
    /// or removed later.
    pub fn record_evaluation(&mut self, feedback: String, score: u8) {
        self.previous_answers.push(AnswerRecord {
            question: self.current_question().to_string(),
            answer: self.answer.clone(),
            feedback: feedback.clone(),
            score,
            answered_at: Utc::now(),
        });
        self.feedback = feedback;
        self.score = score;
    }

    /// The question advancer: moves to the next question, clearing the
    /// per-question fields, or — on the last question — marks the interview
    /// complete WITHOUT generating final feedback (that is a distinct,
    /// explicit step; see `evaluator::finalize_interview`).
    ///
    /// The branch is chosen strictly by index position. Low scores never end
    /// the interview early or trigger remediation — every question is asked.
    pub fn advance(&mut self) {
        if self.is_last_question() {
            self.interview_complete = true;
        } else {
            self.current_question_index += 1;
            self.answer.clear();
            self.score = 0;
            self.feedback.clear();
        }
    }

    /// Arithmetic mean of recorded scores; 0.0 when nothing has been
    /// recorded (never a division error).
    pub fn average_score(&self) -> f64 {
        if self.previous_answers.is_empty() {
            return 0.0;
        }
        let total: u32 = self.previous_answers.iter().map(|a| a.score as u32).sum();
        total as f64 / self.previous_answers.len() as f64
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Score bands
// ────────────────────────────────────────────────────────────────────────────

/// Presentation band for a score — drives color coding in clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    /// Band thresholds: ≥4 high, ≥3 medium, else low.
    pub fn for_score(score: f64) -> Self {
        if score >= 4.0 {
            ScoreBand::High
        } else if score >= 3.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Phase machine
// ────────────────────────────────────────────────────────────────────────────

/// Where the session stands in the record → submit → feedback loop.
///
/// "Not started" has no variant: it is the absence of a session in the
/// store. Restart deletes the session, returning the client to that state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the candidate to record an answer to the current question.
    AwaitingAnswer,
    /// A transcript is (or placeholder text is) stored; waiting for submit.
    AwaitingSubmission,
    /// The answer has been scored and critiqued; waiting for continue.
    FeedbackShown,
    /// Terminal until restart.
    Complete,
}

/// User-initiated actions that drive phase transitions. There are no
/// timer-driven or automatic transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Record,
    Submit,
    Continue,
}

impl UserAction {
    fn name(&self) -> &'static str {
        match self {
            UserAction::Record => "record",
            UserAction::Submit => "submit",
            UserAction::Continue => "continue",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("action '{action}' is not valid in phase {phase:?}")]
    InvalidAction { phase: Phase, action: &'static str },

    #[error("cannot submit: no recorded answer is present")]
    NoTranscript,
}

/// The pure transition function of the session phase machine.
///
/// `on_last_question` feeds the advance-vs-finish branch; `has_transcript`
/// feeds the submit guard. Callers mutate `InterviewState` only after this
/// returns `Ok` — a rejected action must leave all state untouched.
pub fn apply_action(
    phase: Phase,
    action: UserAction,
    on_last_question: bool,
    has_transcript: bool,
) -> Result<Phase, TransitionError> {
    match (phase, action) {
        (Phase::AwaitingAnswer, UserAction::Record) => Ok(Phase::AwaitingSubmission),
        (Phase::AwaitingSubmission, UserAction::Submit) => {
            if has_transcript {
                Ok(Phase::FeedbackShown)
            } else {
                Err(TransitionError::NoTranscript)
            }
        }
        (Phase::FeedbackShown, UserAction::Continue) => {
            if on_last_question {
                Ok(Phase::Complete)
            } else {
                Ok(Phase::AwaitingAnswer)
            }
        }
        (phase, action) => Err(TransitionError::InvalidAction {
            phase,
            action: action.name(),
        }),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session wrapper
// ────────────────────────────────────────────────────────────────────────────

/// One live interview session: the state record plus its controller phase.
#[derive(Debug)]
pub struct InterviewSession {
    pub id: Uuid,
    pub phase: Phase,
    pub state: InterviewState,
    pub started_at: DateTime<Utc>,
}

impl InterviewSession {
    pub fn new(job_description: String, questions: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: Phase::AwaitingAnswer,
            state: InterviewState::new(job_description, questions),
            started_at: Utc::now(),
        }
    }
}
