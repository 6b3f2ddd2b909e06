//! Answer Scorer — asks the model for a bare 1–5 score and parses it out
//! of the reply.
//!
//! Models asked for "only a score" still occasionally preface it with
//! reasoning, so the LAST non-empty line of the reply is the one parsed.
//! An unparseable or out-of-range line is a typed error that propagates to
//! the controller: the submit action fails, session state is untouched,
//! and the client can resubmit. Scores are never clamped or guessed.

use thiserror::Error;

use crate::errors::AppError;
use crate::interview::prompts::SCORING_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{INTERVIEWER_SYSTEM, NUMERIC_ONLY_SYSTEM};
use crate::llm_client::LlmClient;

/// Upper bound of the scoring scale. 0 is accepted on parse (it means
/// "unset" in the state record and the model may legitimately award it).
const MAX_SCORE: u8 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreParseError {
    #[error("score reply contained no content")]
    NoContent,

    #[error("last line of score reply is not an integer: {line:?}")]
    NotAnInteger { line: String },

    #[error("score {value} is outside the 0-5 scale")]
    OutOfRange { value: i64 },
}

/// Parses the score from a model reply: take the last non-empty line and
/// read it as an integer on the 0–5 scale.
pub fn parse_score_reply(raw: &str) -> Result<u8, ScoreParseError> {
    let last_line = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .next_back()
        .ok_or(ScoreParseError::NoContent)?;

    let value: i64 = last_line
        .parse()
        .map_err(|_| ScoreParseError::NotAnInteger {
            line: last_line.to_string(),
        })?;

    if !(0..=MAX_SCORE as i64).contains(&value) {
        return Err(ScoreParseError::OutOfRange { value });
    }

    Ok(value as u8)
}

/// Scores the candidate's answer to the current question.
pub async fn score_answer(
    question: &str,
    answer: &str,
    llm: &LlmClient,
) -> Result<u8, AppError> {
    let prompt = SCORING_PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{answer}", answer);
    let system = format!("{INTERVIEWER_SYSTEM} {NUMERIC_ONLY_SYSTEM}");

    let reply = llm
        .call_text(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("answer scoring failed: {e}")))?;

    parse_score_reply(&reply).map_err(|e| AppError::Parse(format!("answer scoring: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_integer_parses() {
        assert_eq!(parse_score_reply("4"), Ok(4));
    }

    #[test]
    fn test_last_line_wins_over_reasoning() {
        // The documented behavior: reasoning first, score last.
        assert_eq!(parse_score_reply("Reasoning...\n4"), Ok(4));
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert_eq!(parse_score_reply("  3  \n\n"), Ok(3));
    }

    #[test]
    fn test_trailing_blank_lines_skipped() {
        assert_eq!(parse_score_reply("The answer is solid.\n5\n\n  \n"), Ok(5));
    }

    #[test]
    fn test_zero_is_a_valid_score() {
        assert_eq!(parse_score_reply("0"), Ok(0));
    }

    #[test]
    fn test_non_integer_last_line_is_typed_error() {
        let err = parse_score_reply("I would give this a 4 out of 5").unwrap_err();
        assert!(matches!(err, ScoreParseError::NotAnInteger { .. }));
    }

    #[test]
    fn test_empty_reply_is_no_content() {
        assert_eq!(parse_score_reply(""), Err(ScoreParseError::NoContent));
        assert_eq!(parse_score_reply(" \n "), Err(ScoreParseError::NoContent));
    }

    #[test]
    fn test_out_of_range_rejected_not_clamped() {
        assert_eq!(
            parse_score_reply("10"),
            Err(ScoreParseError::OutOfRange { value: 10 })
        );
        assert_eq!(
            parse_score_reply("-1"),
            Err(ScoreParseError::OutOfRange { value: -1 })
        );
    }

    #[test]
    fn test_score_with_decoration_rejected() {
        // "4/5" is not a bare integer; deciding what it means is not the
        // parser's job.
        assert!(matches!(
            parse_score_reply("4/5"),
            Err(ScoreParseError::NotAnInteger { .. })
        ));
    }
}
