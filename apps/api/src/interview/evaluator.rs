//! Answer Evaluator and Final Evaluator — the two LLM pipelines run
//! against a live session.
//!
//! Per-answer flow: score → feedback → append record. The session mutates
//! only after BOTH calls succeed, so a failed action leaves the state
//! exactly as it was and the client can resubmit.
//!
//! Final flow: deterministic average over the recorded scores, a transcript
//! of every question/answer/score triple, one summarizing LLM call, then
//! the completion mutations. Re-running it over the same records yields the
//! same average (the prose may differ — it is regenerated, not cached).

use tracing::info;

use crate::errors::AppError;
use crate::interview::feedback::generate_feedback;
use crate::interview::prompts::FINAL_EVALUATION_PROMPT_TEMPLATE;
use crate::interview::scoring::score_answer;
use crate::interview::session::{AnswerRecord, InterviewState};
use crate::llm_client::prompts::INTERVIEWER_SYSTEM;
use crate::llm_client::LlmClient;

/// Runs the per-answer evaluation pipeline against the current answer:
/// score it, critique it, and append the completed record.
pub async fn evaluate_answer(state: &mut InterviewState, llm: &LlmClient) -> Result<(), AppError> {
    let score = score_answer(state.current_question(), &state.answer, llm).await?;
    info!(
        "Scored answer {}/{}: {}/5",
        state.current_question_index + 1,
        state.max_questions(),
        score
    );

    let feedback = generate_feedback(&state.answer, score, llm).await?;

    state.record_evaluation(feedback, score);
    Ok(())
}

/// Builds the plain-text interview transcript fed to the final evaluation
/// prompt: one block per recorded answer plus the average score line.
pub fn build_transcript(records: &[AnswerRecord], average_score: f64) -> String {
    let mut transcript = String::new();
    for (i, record) in records.iter().enumerate() {
        transcript.push_str(&format!("Question {}: {}\n", i + 1, record.question));
        transcript.push_str(&format!("Answer: {}\n", record.answer));
        transcript.push_str(&format!("Score: {}/5\n\n", record.score));
    }
    transcript.push_str(&format!("Average score: {average_score:.1}/5"));
    transcript
}

/// Runs the Final Evaluator: one summarizing LLM call over the full
/// transcript, then marks the interview complete with the aggregate
/// feedback. The LLM call happens before any mutation, so a failure leaves
/// the session resumable at the same point.
pub async fn finalize_interview(
    state: &mut InterviewState,
    llm: &LlmClient,
) -> Result<(), AppError> {
    let average = state.average_score();
    let transcript = build_transcript(&state.previous_answers, average);

    let prompt = FINAL_EVALUATION_PROMPT_TEMPLATE.replace("{transcript}", &transcript);
    let final_feedback = llm
        .call_text(&prompt, INTERVIEWER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("final evaluation failed: {e}")))?;

    info!(
        "Interview finalized: {} answers, average {:.1}/5",
        state.previous_answers.len(),
        average
    );

    state.advance(); // last-question branch: marks the interview complete
    state.final_feedback = final_feedback;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(question: &str, answer: &str, score: u8) -> AnswerRecord {
        AnswerRecord {
            question: question.to_string(),
            answer: answer.to_string(),
            feedback: "feedback".to_string(),
            score,
            answered_at: Utc::now(),
        }
    }

    #[test]
    fn test_transcript_contains_every_triple() {
        let records = vec![
            record("Why Rust?", "Memory safety.", 4),
            record("Why async?", "Throughput.", 3),
        ];
        let transcript = build_transcript(&records, 3.5);

        assert!(transcript.contains("Question 1: Why Rust?"));
        assert!(transcript.contains("Answer: Memory safety."));
        assert!(transcript.contains("Score: 4/5"));
        assert!(transcript.contains("Question 2: Why async?"));
        assert!(transcript.contains("Score: 3/5"));
        assert!(transcript.contains("Average score: 3.5/5"));
    }

    #[test]
    fn test_transcript_for_empty_records_is_average_only() {
        let transcript = build_transcript(&[], 0.0);
        assert_eq!(transcript, "Average score: 0.0/5");
    }

    #[test]
    fn test_transcript_average_formatted_to_one_decimal() {
        let records = vec![record("Q", "A", 4), record("Q", "A", 3), record("Q", "A", 3)];
        let transcript = build_transcript(&records, 10.0 / 3.0);
        assert!(transcript.ends_with("Average score: 3.3/5"));
    }

    #[test]
    fn test_transcript_is_deterministic_over_same_records() {
        let records = vec![record("Q1", "A1", 5)];
        assert_eq!(
            build_transcript(&records, 5.0),
            build_transcript(&records, 5.0)
        );
    }
}
