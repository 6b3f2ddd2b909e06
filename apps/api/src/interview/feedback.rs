//! Feedback Generator — produces the free-text critique for a scored
//! answer. Pure delegation: the raw model reply IS the feedback, with no
//! parsing beyond trimming. The append of the completed answer record
//! happens in the evaluator pipeline, after this call succeeds.

use crate::errors::AppError;
use crate::interview::prompts::FEEDBACK_PROMPT_TEMPLATE;
use crate::llm_client::prompts::INTERVIEWER_SYSTEM;
use crate::llm_client::LlmClient;

pub async fn generate_feedback(
    answer: &str,
    score: u8,
    llm: &LlmClient,
) -> Result<String, AppError> {
    let prompt = FEEDBACK_PROMPT_TEMPLATE
        .replace("{score}", &score.to_string())
        .replace("{answer}", answer);

    llm.call_text(&prompt, INTERVIEWER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("feedback generation failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_template_substitution() {
        let prompt = FEEDBACK_PROMPT_TEMPLATE
            .replace("{score}", "4")
            .replace("{answer}", "I would use a hash map.");
        assert!(prompt.contains("(4/5)"));
        assert!(prompt.contains("I would use a hash map."));
        assert!(!prompt.contains("{score}"));
        assert!(!prompt.contains("{answer}"));
    }
}
