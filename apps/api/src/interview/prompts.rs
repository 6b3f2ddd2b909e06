// All LLM prompt constants for the interview pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Question generation prompt template. Replace `{job_description}` before sending.
/// The numbered format is load-bearing: the reply is fed to
/// `questions::parse_question_list`.
pub const QUESTION_GENERATION_PROMPT_TEMPLATE: &str = r#"Based on the following job description, generate 5 interview questions in a numbered format:

{job_description}

Format the output as:
1. [Question 1]
2. [Question 2]
3. [Question 3]
4. [Question 4]
5. [Question 5]

Do NOT include any text before or after the numbered list."#;

/// Answer scoring prompt template. Replace `{question}` and `{answer}`.
/// The reply's LAST non-empty line must be the score — see
/// `scoring::parse_score_reply`.
pub const SCORING_PROMPT_TEMPLATE: &str = r#"Evaluate this answer based on clarity, correctness, and depth.
Question: {question}
Answer: {answer}
Provide only a score, not text, out of 5 as a single number."#;

/// Feedback prompt template. Replace `{answer}` and `{score}`.
/// The raw reply is used verbatim as the critique.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Provide constructive feedback on this answer based on its score ({score}/5).
Answer: {answer}

Be specific about what worked and what to improve."#;

/// Final evaluation prompt template. Replace `{transcript}` with the
/// concatenated question/answer/score triples plus the average score
/// (built by `evaluator::build_transcript`).
pub const FINAL_EVALUATION_PROMPT_TEMPLATE: &str = r#"Based on the interview performance, provide a final evaluation.

Previous answers and scores:
{transcript}

Give an overall assessment of the candidate's performance."#;
