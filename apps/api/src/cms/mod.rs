//! Headless CMS access: read-only queries against the Sanity HTTP API.
//!
//! Handlers and the resume assembler depend on the `ContentSource` trait, never on
//! `SanityClient` directly. Documents come back raw; `content::transform` turns them
//! into records.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod documents;
pub mod images;
pub mod queries;

use documents::{QueryResponse, RawExperience, RawProject, RawTechStackItem};
use queries::{EXPERIENCE_QUERY, PROJECTS_QUERY, TECH_STACK_QUERY};

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected CMS response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The three collections the portfolio reads.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn projects(&self) -> Result<Vec<RawProject>, CmsError>;
    async fn experiences(&self) -> Result<Vec<RawExperience>, CmsError>;
    async fn tech_stack(&self) -> Result<Vec<RawTechStackItem>, CmsError>;
}

#[derive(Clone)]
pub struct SanityClient {
    client: Client,
    base_url: String,
    api_version: String,
    dataset: String,
    token: Option<String>,
}

impl SanityClient {
    pub fn new(
        project_id: &str,
        dataset: &str,
        api_version: &str,
        token: Option<String>,
        use_cdn: bool,
    ) -> Result<Self, CmsError> {
        let host = if use_cdn { "apicdn" } else { "api" };
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            base_url: format!("https://{project_id}.{host}.sanity.io"),
            api_version: api_version.trim_start_matches('v').to_string(),
            dataset: dataset.to_string(),
            token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, CmsError> {
        Self::new(
            &config.sanity_project_id,
            &config.sanity_dataset,
            &config.sanity_api_version,
            config.sanity_api_token.clone(),
            config.sanity_use_cdn,
        )
    }

    /// Points the client at another host (a local mock in tests).
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn query_url(&self) -> String {
        format!(
            "{}/v{}/data/query/{}",
            self.base_url, self.api_version, self.dataset
        )
    }

    /// Runs a GROQ query and deserializes its `result`.
    pub async fn query<T: DeserializeOwned>(&self, groq: &str) -> Result<T, CmsError> {
        let mut request = self.client.get(self.query_url()).query(&[("query", groq)]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CmsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: QueryResponse<T> = serde_json::from_str(&body)?;
        debug!("CMS query succeeded ({} bytes)", body.len());
        Ok(parsed.result)
    }
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn projects(&self) -> Result<Vec<RawProject>, CmsError> {
        self.query(PROJECTS_QUERY).await
    }

    async fn experiences(&self) -> Result<Vec<RawExperience>, CmsError> {
        self.query(EXPERIENCE_QUERY).await
    }

    async fn tech_stack(&self) -> Result<Vec<RawTechStackItem>, CmsError> {
        self.query(TECH_STACK_QUERY).await
    }
}
