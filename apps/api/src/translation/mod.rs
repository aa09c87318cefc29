//! Translation: rewrites the text of a resume into another language.
//!
//! Only a fixed subset of the resume is translated (see `TranslatableResume`).
//! The model's reply is merged field by field: anything it leaves out or blanks
//! keeps its original value. A reply that is not valid JSON fails the request.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::llm_client::{LlmClient, LlmError};
use crate::resume::language::Language;

pub mod prompts;

use prompts::{system_prompt, TRANSLATION_PROMPT_TEMPLATE};

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("LLM translation call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Failed to serialize translation input: {0}")]
    Serialize(#[source] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslatableResume {
    pub title: String,
    pub summary: String,
    pub experiences: Vec<TranslatableExperience>,
    pub projects: Vec<TranslatableProject>,
    pub education: Vec<TranslatableEducation>,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslatableExperience {
    pub role: String,
    pub company: String,
    pub description: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslatableProject {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslatableEducation {
    pub degree: String,
    pub institution: String,
}

/// The model's reply. Every field may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct TranslationReply {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experiences: Option<Vec<ExperienceReply>>,
    #[serde(default)]
    pub projects: Option<Vec<ProjectReply>>,
    #[serde(default)]
    pub education: Option<Vec<EducationReply>>,
    #[serde(default)]
    pub interests: Option<Vec<Option<String>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExperienceReply {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub responsibilities: Option<Vec<Option<String>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectReply {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EducationReply {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Carried in `AppState` as `Option<Arc<dyn Translator>>`; `None` means no
/// credential is configured.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        content: &TranslatableResume,
        target: Language,
    ) -> Result<TranslatableResume, TranslationError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmTranslator
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmTranslator {
    llm: LlmClient,
}

impl LlmTranslator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    async fn translate(
        &self,
        content: &TranslatableResume,
        target: Language,
    ) -> Result<TranslatableResume, TranslationError> {
        if !target.needs_translation() {
            return Ok(content.clone());
        }

        let content_json =
            serde_json::to_string_pretty(content).map_err(TranslationError::Serialize)?;
        let prompt = TRANSLATION_PROMPT_TEMPLATE
            .replace("{language}", target.display_name())
            .replace("{content_json}", &content_json);
        let system = system_prompt(target.display_name());

        let reply: TranslationReply = self.llm.call_json(&prompt, &system).await?;
        info!(
            "Translated resume into {} ({} experiences, {} projects)",
            target.display_name(),
            content.experiences.len(),
            content.projects.len()
        );

        Ok(merge_translation(content, reply))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Merge
// ────────────────────────────────────────────────────────────────────────────

/// Overlays the reply on the original. The result always has the original's shape:
/// list lengths never change, and missing or blank fields fall back to the source.
pub fn merge_translation(
    original: &TranslatableResume,
    reply: TranslationReply,
) -> TranslatableResume {
    let experiences = reply.experiences.unwrap_or_default();
    let projects = reply.projects.unwrap_or_default();
    let education = reply.education.unwrap_or_default();

    TranslatableResume {
        title: pick(reply.title, &original.title),
        summary: pick(reply.summary, &original.summary),
        experiences: original
            .experiences
            .iter()
            .enumerate()
            .map(|(i, orig)| match experiences.get(i) {
                Some(tr) => TranslatableExperience {
                    role: pick(tr.role.clone(), &orig.role),
                    company: pick(tr.company.clone(), &orig.company),
                    description: pick(tr.description.clone(), &orig.description),
                    responsibilities: pick_list(
                        tr.responsibilities.as_deref(),
                        &orig.responsibilities,
                    ),
                },
                None => orig.clone(),
            })
            .collect(),
        projects: original
            .projects
            .iter()
            .enumerate()
            .map(|(i, orig)| match projects.get(i) {
                Some(tr) => TranslatableProject {
                    title: pick(tr.title.clone(), &orig.title),
                    description: pick(tr.description.clone(), &orig.description),
                },
                None => orig.clone(),
            })
            .collect(),
        education: original
            .education
            .iter()
            .enumerate()
            .map(|(i, orig)| match education.get(i) {
                Some(tr) => TranslatableEducation {
                    degree: pick(tr.degree.clone(), &orig.degree),
                    institution: pick(tr.institution.clone(), &orig.institution),
                },
                None => orig.clone(),
            })
            .collect(),
        interests: pick_list(reply.interests.as_deref(), &original.interests),
    }
}

fn pick(translated: Option<String>, original: &str) -> String {
    translated
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| original.to_string())
}

fn pick_list(translated: Option<&[Option<String>]>, original: &[String]) -> Vec<String> {
    let translated = translated.unwrap_or_default();
    original
        .iter()
        .enumerate()
        .map(|(i, orig)| pick(translated.get(i).cloned().flatten(), orig))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample() -> TranslatableResume {
        TranslatableResume {
            title: "Software Engineer".to_string(),
            summary: "Builds web things.".to_string(),
            experiences: vec![
                TranslatableExperience {
                    role: "Frontend Developer".to_string(),
                    company: "Acme".to_string(),
                    description: "Built the dashboard.".to_string(),
                    responsibilities: vec!["Code review".to_string(), "Mentoring".to_string()],
                },
                TranslatableExperience {
                    role: "Intern".to_string(),
                    company: "Globex".to_string(),
                    description: String::new(),
                    responsibilities: vec![],
                },
            ],
            projects: vec![TranslatableProject {
                title: "Portfolio".to_string(),
                description: "This site.".to_string(),
            }],
            education: vec![TranslatableEducation {
                degree: "BSc Computer Science".to_string(),
                institution: "TU Delft".to_string(),
            }],
            interests: vec!["Cycling".to_string(), "Chess".to_string()],
        }
    }

    fn reply(json: serde_json::Value) -> TranslationReply {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_full_reply_replaces_fields() {
        let merged = merge_translation(
            &sample(),
            reply(serde_json::json!({
                "title": "Software-ingenieur",
                "summary": "Bouwt webdingen.",
                "experiences": [
                    {"role": "Frontend-ontwikkelaar", "company": "Acme", "description": "Bouwde het dashboard.",
                     "responsibilities": ["Codereview", "Begeleiding"]},
                    {"role": "Stagiair", "company": "Globex", "description": "", "responsibilities": []}
                ],
                "projects": [{"title": "Portfolio", "description": "Deze site."}],
                "education": [{"degree": "BSc Informatica", "institution": "TU Delft"}],
                "interests": ["Fietsen", "Schaken"]
            })),
        );
        assert_eq!(merged.title, "Software-ingenieur");
        assert_eq!(merged.experiences[0].responsibilities, vec!["Codereview", "Begeleiding"]);
        assert_eq!(merged.experiences[1].role, "Stagiair");
        assert_eq!(merged.projects[0].description, "Deze site.");
        assert_eq!(merged.education[0].degree, "BSc Informatica");
        assert_eq!(merged.interests, vec!["Fietsen", "Schaken"]);
    }

    #[test]
    fn test_missing_fields_fall_back_to_original() {
        let original = sample();
        let merged = merge_translation(
            &original,
            reply(serde_json::json!({
                "title": "Software-ingenieur",
                "experiences": [{"role": "Frontend-ontwikkelaar", "responsibilities": [null]}],
                "interests": ["Fietsen"]
            })),
        );
        assert_eq!(merged.title, "Software-ingenieur");
        assert_eq!(merged.summary, original.summary);
        assert_eq!(merged.experiences[0].role, "Frontend-ontwikkelaar");
        assert_eq!(merged.experiences[0].company, "Acme");
        assert_eq!(merged.experiences[0].responsibilities, original.experiences[0].responsibilities);
        assert_eq!(merged.experiences[1], original.experiences[1]);
        assert_eq!(merged.projects, original.projects);
        assert_eq!(merged.interests, vec!["Fietsen", "Chess"]);
    }

    #[test]
    fn test_empty_reply_is_identity() {
        let original = sample();
        assert_eq!(merge_translation(&original, TranslationReply::default()), original);
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let merged = merge_translation(&sample(), reply(serde_json::json!({"title": "  "})));
        assert_eq!(merged.title, "Software Engineer");
    }

    fn llm_reply(text: &str) -> serde_json::Value {
        serde_json::json!({
            "content": [{"type": "text", "text": text}],
            "usage": {"input_tokens": 100, "output_tokens": 50}
        })
    }

    async fn translator_for(server: &MockServer) -> LlmTranslator {
        LlmTranslator::new(
            LlmClient::new("test-key".to_string())
                .unwrap()
                .with_base_url(server.uri()),
        )
    }

    #[tokio::test]
    async fn test_llm_translator_strips_fences_and_merges() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(llm_reply(
                "```json\n{\"title\": \"Software-ingenieur\", \"interests\": [\"Fietsen\", \"Schaken\"]}\n```",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let translated = translator_for(&server)
            .await
            .translate(&sample(), Language::Dutch)
            .await
            .unwrap();
        assert_eq!(translated.title, "Software-ingenieur");
        assert_eq!(translated.interests, vec!["Fietsen", "Schaken"]);
        assert_eq!(translated.summary, "Builds web things.");
    }

    #[tokio::test]
    async fn test_llm_translator_fails_on_unparseable_reply() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(llm_reply("Hier is de vertaling!")),
            )
            .mount(&server)
            .await;

        let err = translator_for(&server)
            .await
            .translate(&sample(), Language::Dutch)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::Llm(LlmError::Parse(_))));
    }

    #[tokio::test]
    async fn test_english_target_skips_the_llm() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let original = sample();
        let translated = translator_for(&server)
            .await
            .translate(&original, Language::English)
            .await
            .unwrap();
        assert_eq!(translated, original);
    }
}
