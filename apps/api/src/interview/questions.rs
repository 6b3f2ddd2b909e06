//! Question Generator — turns a job description into the fixed question
//! list that seeds an interview session.
//!
//! The model is asked for a numbered list, but model output is unstructured
//! text and is treated as such: `parse_question_list` is a strict parser
//! that strips numbering, drops blank and preamble lines, and returns a
//! typed error when nothing usable can be extracted — a malformed reply
//! never degenerates into a single garbage "question".

use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::interview::prompts::QUESTION_GENERATION_PROMPT_TEMPLATE;
use crate::interview::session::MAX_QUESTIONS;
use crate::llm_client::prompts::INTERVIEWER_SYSTEM;
use crate::llm_client::LlmClient;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionParseError {
    #[error("no questions could be extracted from the model reply")]
    Empty,
}

/// Strips a leading `1.` / `1)` / `1:` list marker from a line, returning
/// the question text, or `None` when the line carries no such marker.
fn strip_numbering(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return None; // no leading digits
    }
    let rest = rest.strip_prefix(['.', ')', ':'])?;
    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}

/// Parses the question list out of a free-text model reply.
///
/// Numbered lines are preferred: if any line carries a `N.`-style marker,
/// only those lines become questions (this discards preambles like
/// "Here are five questions:"). When no line is numbered, every non-empty
/// line is taken as a question. The list is capped at `MAX_QUESTIONS`;
/// an under-delivering model is tolerated with a warning.
pub fn parse_question_list(raw: &str) -> Result<Vec<String>, QuestionParseError> {
    let lines: Vec<&str> = raw.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let numbered: Vec<String> = lines
        .iter()
        .filter_map(|l| strip_numbering(l))
        .map(str::to_string)
        .collect();

    let mut questions = if numbered.is_empty() {
        lines.into_iter().map(str::to_string).collect()
    } else {
        numbered
    };

    if questions.is_empty() {
        return Err(QuestionParseError::Empty);
    }

    if questions.len() > MAX_QUESTIONS {
        warn!(
            "Model returned {} questions; truncating to {}",
            questions.len(),
            MAX_QUESTIONS
        );
        questions.truncate(MAX_QUESTIONS);
    } else if questions.len() < MAX_QUESTIONS {
        warn!(
            "Model returned only {} of {} requested questions",
            questions.len(),
            MAX_QUESTIONS
        );
    }

    Ok(questions)
}

/// Generates the interview question list for a job description.
/// The caller has already validated that `job_description` is non-empty.
pub async fn generate_questions(
    job_description: &str,
    llm: &LlmClient,
) -> Result<Vec<String>, AppError> {
    let prompt = QUESTION_GENERATION_PROMPT_TEMPLATE.replace("{job_description}", job_description);

    let reply = llm
        .call_text(&prompt, INTERVIEWER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("question generation failed: {e}")))?;

    let questions = parse_question_list(&reply)
        .map_err(|e| AppError::Parse(format!("question generation: {e}")))?;

    info!("Generated {} interview questions", questions.len());
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list_parses_to_stripped_questions() {
        let raw = "1. Tell me about yourself.\n2. Why Python?\n3. Describe a hard bug.\n4. How do you test?\n5. Questions for us?";
        let questions = parse_question_list(raw).unwrap();
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[0], "Tell me about yourself.");
        assert_eq!(questions[4], "Questions for us?");
    }

    #[test]
    fn test_paren_and_colon_numbering_accepted() {
        let raw = "1) First question?\n2: Second question?";
        let questions = parse_question_list(raw).unwrap();
        assert_eq!(questions, vec!["First question?", "Second question?"]);
    }

    #[test]
    fn test_preamble_dropped_when_list_is_numbered() {
        let raw = "Here are 5 interview questions:\n\n1. What is ownership?\n2. What is borrowing?";
        let questions = parse_question_list(raw).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0], "What is ownership?");
    }

    #[test]
    fn test_blank_lines_dropped() {
        let raw = "1. One?\n\n\n2. Two?\n";
        let questions = parse_question_list(raw).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn test_unnumbered_lines_fall_back_to_plain_lines() {
        let raw = "What is Python?\nWhat is a generator?";
        let questions = parse_question_list(raw).unwrap();
        assert_eq!(questions, vec!["What is Python?", "What is a generator?"]);
    }

    #[test]
    fn test_empty_reply_is_typed_error() {
        assert_eq!(parse_question_list(""), Err(QuestionParseError::Empty));
        assert_eq!(parse_question_list("   \n  \n"), Err(QuestionParseError::Empty));
    }

    #[test]
    fn test_over_generation_truncated_to_max() {
        let raw = (1..=8)
            .map(|i| format!("{i}. Question {i}?"))
            .collect::<Vec<_>>()
            .join("\n");
        let questions = parse_question_list(&raw).unwrap();
        assert_eq!(questions.len(), MAX_QUESTIONS);
    }

    #[test]
    fn test_under_generation_accepted() {
        let raw = "1. Only one question?";
        let questions = parse_question_list(raw).unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_strip_numbering_requires_marker() {
        assert_eq!(strip_numbering("3. Why threads?"), Some("Why threads?"));
        assert_eq!(strip_numbering("No marker here"), None);
        assert_eq!(strip_numbering("2026 was a year"), None);
        assert_eq!(strip_numbering("4."), None);
    }

    #[test]
    fn test_multi_digit_numbering() {
        assert_eq!(strip_numbering("12. Late question?"), Some("Late question?"));
    }
}
