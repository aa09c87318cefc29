// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps proper nouns and technical vocabulary untouched during translation.
pub const PRESERVE_TERMS_INSTRUCTION: &str = "\
    Do NOT translate company names, product names, programming languages, frameworks, \
    libraries or other technical terms. Keep URLs, e-mail addresses and numbers exactly as given.";
