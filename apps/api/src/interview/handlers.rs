//! Axum route handlers for the interview API — the session controller.
//!
//! Each handler is one user action (start, record, submit, continue,
//! restart) plus the read-only state view. Every action locks its session
//! for the full round, runs the phase-machine guard FIRST, and mutates
//! state only after the guard and any external calls succeed — a rejected
//! or failed action leaves the session exactly as it was.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::evaluator::{evaluate_answer, finalize_interview};
use crate::interview::questions::generate_questions;
use crate::interview::session::{
    apply_action, AnswerRecord, InterviewSession, Phase, ScoreBand, UserAction,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StartInterviewRequest {
    pub job_description: String,
}

/// One completed question in the read-only view, with its presentation band.
#[derive(Debug, Serialize)]
pub struct AnswerSummary {
    pub question: String,
    pub answer: String,
    pub score: u8,
    pub score_band: ScoreBand,
    pub feedback: String,
    pub answered_at: DateTime<Utc>,
}

impl From<&AnswerRecord> for AnswerSummary {
    fn from(record: &AnswerRecord) -> Self {
        AnswerSummary {
            question: record.question.clone(),
            answer: record.answer.clone(),
            score: record.score,
            score_band: ScoreBand::for_score(record.score as f64),
            feedback: record.feedback.clone(),
            answered_at: record.answered_at,
        }
    }
}

/// Read-only snapshot of a session, rendered after every action and by GET.
/// Per-question fields are `None` until the pipeline stage that fills them
/// has run; `current_question` is `None` once the interview is complete.
#[derive(Debug, Serialize)]
pub struct InterviewView {
    pub interview_id: Uuid,
    pub phase: Phase,
    pub question_number: usize,
    pub total_questions: usize,
    pub current_question: Option<String>,
    pub answer: Option<String>,
    pub score: Option<u8>,
    pub score_band: Option<ScoreBand>,
    pub feedback: Option<String>,
    pub answered_questions: Vec<AnswerSummary>,
    pub average_score: f64,
    pub overall_band: ScoreBand,
    pub final_feedback: Option<String>,
    pub interview_complete: bool,
    pub started_at: DateTime<Utc>,
}

impl InterviewView {
    pub fn from_session(session: &InterviewSession) -> Self {
        let state = &session.state;
        let average = state.average_score();
        let non_empty = |s: &String| (!s.is_empty()).then(|| s.clone());

        InterviewView {
            interview_id: session.id,
            phase: session.phase,
            question_number: state.current_question_index + 1,
            total_questions: state.max_questions(),
            current_question: (!state.interview_complete)
                .then(|| state.current_question().to_string()),
            answer: non_empty(&state.answer),
            score: (state.score > 0).then_some(state.score),
            score_band: (state.score > 0).then(|| ScoreBand::for_score(state.score as f64)),
            feedback: non_empty(&state.feedback),
            answered_questions: state.previous_answers.iter().map(AnswerSummary::from).collect(),
            average_score: average,
            overall_band: ScoreBand::for_score(average),
            final_feedback: non_empty(&state.final_feedback),
            interview_complete: state.interview_complete,
            started_at: session.started_at,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
///
/// Start: generates the question list from the job description and stores a
/// fresh session at question 0.
pub async fn handle_start(
    State(state): State<AppState>,
    Json(request): Json<StartInterviewRequest>,
) -> Result<(StatusCode, Json<InterviewView>), AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let questions = generate_questions(&request.job_description, &state.llm).await?;
    let session = InterviewSession::new(request.job_description, questions);
    let view = InterviewView::from_session(&session);

    let id = state.sessions.insert(session);
    info!("Started interview {id} with {} questions", view.total_questions);

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/interviews/:id
///
/// Read-only state view for rendering.
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let handle = state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
    let session = handle.lock().await;
    Ok(Json(InterviewView::from_session(&session)))
}

/// POST /api/v1/interviews/:id/recording
///
/// Record: accepts WAV bytes as multipart field `audio`, transcribes them,
/// and stores the transcript as the current answer. Transcription failures
/// are NON-FATAL: each maps to its placeholder transcript and the flow
/// continues to the submission step.
pub async fn handle_record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<InterviewView>, AppError> {
    let mut audio = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("audio") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("could not read audio field: {e}")))?;
            audio = Some(data);
            break;
        }
    }

    let audio = audio.filter(|a| !a.is_empty()).ok_or_else(|| {
        AppError::Validation("multipart field 'audio' with WAV bytes is required".to_string())
    })?;

    let handle = state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
    let mut session = handle.lock().await;

    let next_phase = apply_action(
        session.phase,
        UserAction::Record,
        session.state.is_last_question(),
        session.state.has_answer(),
    )
    .map_err(|e| AppError::InvalidAction(e.to_string()))?;

    let transcript = match state.transcriber.transcribe(audio).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Transcription failed for interview {id}: {e}; storing placeholder");
            e.placeholder().to_string()
        }
    };

    session.state.set_answer(transcript);
    session.phase = next_phase;

    Ok(Json(InterviewView::from_session(&session)))
}

/// POST /api/v1/interviews/:id/submission
///
/// Submit: rejected (409) unless a transcript is present; runs the
/// score → feedback → append pipeline and shows the critique.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let handle = state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
    let mut session = handle.lock().await;

    let next_phase = apply_action(
        session.phase,
        UserAction::Submit,
        session.state.is_last_question(),
        session.state.has_answer(),
    )
    .map_err(|e| AppError::InvalidAction(e.to_string()))?;

    evaluate_answer(&mut session.state, &state.llm).await?;
    session.phase = next_phase;

    Ok(Json(InterviewView::from_session(&session)))
}

/// POST /api/v1/interviews/:id/advance
///
/// Continue: advances to the next question, or — exactly when the current
/// question is the last — runs the Final Evaluator and completes the
/// interview.
pub async fn handle_advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let handle = state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
    let mut session = handle.lock().await;

    let next_phase = apply_action(
        session.phase,
        UserAction::Continue,
        session.state.is_last_question(),
        session.state.has_answer(),
    )
    .map_err(|e| AppError::InvalidAction(e.to_string()))?;

    match next_phase {
        Phase::Complete => finalize_interview(&mut session.state, &state.llm).await?,
        _ => session.state.advance(),
    }
    session.phase = next_phase;

    Ok(Json(InterviewView::from_session(&session)))
}

/// DELETE /api/v1/interviews/:id
///
/// Restart: discards the entire session. Starting over is a fresh POST.
pub async fn handle_restart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id) {
        return Err(AppError::NotFound(format!("Interview {id} not found")));
    }
    info!(
        "Discarded interview {id} ({} sessions remain)",
        state.sessions.len()
    );
    Ok(StatusCode::NO_CONTENT)
}
