//! Gemini `generateContent` client.
//!
//! One blocking request/response per post variant, no retry and no
//! streaming. A failed call surfaces as [`GenerationError`] and costs only
//! that variant; the caller decides what to do with whatever survived.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::GenerationError;
use crate::models::PostCandidate;
use crate::utils::truncate_chars;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Character budget for the article excerpt in the short-post prompt.
const SHORT_PROMPT_CHARS: usize = 1000;
/// Character budget for the article excerpt in the long-post prompt.
const LONG_PROMPT_CHARS: usize = 1500;

/// Minimal Gemini REST client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Submit one prompt and return the first candidate's text.
    #[instrument(level = "debug", skip_all, fields(model = %self.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        debug!(chars = text.chars().count(), "Received generated text");
        Ok(text)
    }

    /// Generate the short and long rewrites of one article.
    ///
    /// The two calls are independent; either may fail without affecting the
    /// other, in which case its slot is `None`.
    #[instrument(level = "info", skip_all)]
    pub async fn generate_variants(&self, raw_text: &str) -> PostCandidate {
        let short = match self.generate(&short_prompt(raw_text)).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "Short variant generation failed");
                None
            }
        };

        let long = match self.generate(&long_prompt(raw_text)).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "Long variant generation failed");
                None
            }
        };

        PostCandidate { short, long }
    }
}

fn short_prompt(raw_text: &str) -> String {
    format!(
        "Summarize the following content into a short, attention-grabbing Facebook post: {}",
        truncate_chars(raw_text, SHORT_PROMPT_CHARS)
    )
}

fn long_prompt(raw_text: &str) -> String {
    format!(
        "Write a longer, more detailed Facebook post with hashtags for the following content: {}",
        truncate_chars(raw_text, LONG_PROMPT_CHARS)
    )
}
