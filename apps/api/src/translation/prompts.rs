// LLM prompt constants for resume translation.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, PRESERVE_TERMS_INSTRUCTION};

/// System prompt base. Replace `{language}` before sending.
pub const TRANSLATION_SYSTEM: &str =
    "You are a professional translator of resumes and CVs into {language}. \
    Translate naturally and idiomatically, in the register of a professional resume.";

/// Translation prompt. Replace `{language}` and `{content_json}` before sending.
pub const TRANSLATION_PROMPT_TEMPLATE: &str = r#"Translate the text values of the following resume content into {language}.

Return a JSON object with EXACTLY the same structure and keys as the input:
- keep every array at the same length and in the same order;
- translate string values only, never keys;
- leave empty strings empty.

Input:
{content_json}"#;

/// Full system prompt with the shared JSON and terminology rules appended.
pub fn system_prompt(language: &str) -> String {
    format!(
        "{} {} {}",
        TRANSLATION_SYSTEM.replace("{language}", language),
        PRESERVE_TERMS_INSTRUCTION,
        JSON_ONLY_SYSTEM
    )
}
