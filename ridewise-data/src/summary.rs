//! Natural-language summaries of a recommendation run.
//!
//! The summariser is cosmetic: it is the one integration point that
//! swallows its own failures. Callers go through
//! [`summarize_or_fallback`], which substitutes a deterministic static
//! summary whenever the client errors, returns nothing usable, or was
//! never configured; the ranked list is still valid either way.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::runtime::Runtime;

use ridewise_core::RecommendationRecord;

use crate::runtime::{block_on, build_runtime};

/// Default base URL of the OpenAI-compatible API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for summary generation.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Everything the summariser may mention.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryContext {
    /// Park display name.
    pub park_name: String,
    /// The resolved status message (hours, events).
    pub park_message: String,
    /// Weather line, when the lookup succeeded.
    pub weather: Option<String>,
    /// The ranked records, best first.
    pub recommendations: Vec<RecommendationRecord>,
}

/// Errors from a summariser.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The request could not be completed.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport-level diagnostic.
        message: String,
    },
    /// The service answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The response body did not match the expected shape.
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder diagnostic.
        message: String,
    },
    /// The completion carried no usable text.
    #[error("completion response contained no choices")]
    EmptyCompletion,
}

/// Error type for [`OpenAiSummarizer`] construction failures.
#[derive(Debug, Error)]
pub enum SummaryBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Generate a short advice paragraph for a recommendation run.
pub trait Summarizer: Send + Sync {
    /// Produce a summary for the context.
    ///
    /// # Errors
    /// Returns [`SummaryError`] on any network or decoding failure; callers
    /// should fall back rather than propagate.
    fn summarize(&self, context: &SummaryContext) -> Result<String, SummaryError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Configuration for [`OpenAiSummarizer`].
#[derive(Debug, Clone)]
pub struct OpenAiSummarizerConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Request timeout duration.
    pub timeout: Duration,
}

impl Default for OpenAiSummarizerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Summariser backed by an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiSummarizer {
    client: Client,
    config: OpenAiSummarizerConfig,
    api_key: String,
    runtime: Runtime,
}

impl std::fmt::Debug for OpenAiSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSummarizer")
            .field("config", &self.config)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenAiSummarizer {
    /// Create a summariser with the default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SummaryBuildError> {
        Self::with_config(api_key, OpenAiSummarizerConfig::default())
    }

    /// Create a summariser with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(
        api_key: impl Into<String>,
        config: OpenAiSummarizerConfig,
    ) -> Result<Self, SummaryBuildError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SummaryBuildError::HttpClient)?;
        let runtime = build_runtime().map_err(SummaryBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            api_key: api_key.into(),
            runtime,
        })
    }

    /// Create a summariser from the `OPENAI_API_KEY` environment variable.
    ///
    /// Returns `Ok(None)` when the variable is unset or empty: an
    /// unconfigured summariser is a supported state, not an error.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn from_env() -> Result<Option<Self>, SummaryBuildError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Self::new(key).map(Some),
            _ => Ok(None),
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn summarize_async(&self, context: &SummaryContext) -> Result<String, SummaryError> {
        let url = self.completions_url();
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a cheerful theme-park guide. Reply with two or three \
                              sentences of practical advice about the recommended rides. \
                              Do not invent rides that are not listed."
                        .to_owned(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt_for(context),
                },
            ],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, &url))?;

        let completion: ChatResponse =
            response.json().await.map_err(|err| SummaryError::Decode {
                url: url.clone(),
                message: err.to_string(),
            })?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(SummaryError::EmptyCompletion);
        }
        Ok(text)
    }
}

impl Summarizer for OpenAiSummarizer {
    fn summarize(&self, context: &SummaryContext) -> Result<String, SummaryError> {
        block_on(&self.runtime, self.summarize_async(context))
    }
}

fn convert_reqwest_error(error: &reqwest::Error, url: &str) -> SummaryError {
    if let Some(status) = error.status() {
        return SummaryError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
        };
    }
    SummaryError::Network {
        url: url.to_owned(),
        message: error.to_string(),
    }
}

/// Render the user prompt for a context.
fn prompt_for(context: &SummaryContext) -> String {
    let mut prompt = format!(
        "Park: {}\nStatus: {}\n",
        context.park_name, context.park_message
    );
    if let Some(weather) = &context.weather {
        prompt.push_str(&format!("Weather: {weather}\n"));
    }
    if context.recommendations.is_empty() {
        prompt.push_str("No rides matched the visitor's preferences.\n");
    } else {
        prompt.push_str("Ranked recommendations:\n");
        for record in &context.recommendations {
            prompt.push_str(&format!(
                "- {} ({} min wait, {} m away)\n",
                record.name, record.listed_wait_minutes, record.distance_meters
            ));
        }
    }
    prompt
}

/// The deterministic summary used whenever generation is unavailable.
pub fn fallback_summary(context: &SummaryContext) -> String {
    match context.recommendations.first() {
        Some(top) => format!(
            "Top pick: {} ({} min wait, {} m from you). {} more recommendation(s) listed below.",
            top.name,
            top.listed_wait_minutes,
            top.distance_meters,
            context.recommendations.len().saturating_sub(1)
        ),
        None => "No rides matched your current location and preferences.".to_owned(),
    }
}

/// Summarise with the configured client, falling back on any failure.
///
/// A missing summary must never fail an otherwise valid request; the
/// failure is logged for diagnosis and the static fallback is returned.
pub fn summarize_or_fallback(
    summarizer: Option<&dyn Summarizer>,
    context: &SummaryContext,
) -> String {
    let Some(summarizer) = summarizer else {
        return fallback_summary(context);
    };
    match summarizer.summarize(context) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            log::warn!("summary generation returned empty text; using fallback");
            fallback_summary(context)
        }
        Err(err) => {
            log::warn!("summary generation failed: {err}; using fallback");
            fallback_summary(context)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridewise_core::{EntityType, LiveStatus};
    use rstest::{fixture, rstest};

    fn record(name: &str, wait: u32, distance: u32) -> RecommendationRecord {
        RecommendationRecord {
            id: name.to_lowercase(),
            name: name.to_owned(),
            entity_type: EntityType::Attraction,
            status: LiveStatus::Operating,
            distance_meters: distance,
            listed_wait_minutes: wait,
            score: 10.0,
        }
    }

    #[fixture]
    fn context() -> SummaryContext {
        SummaryContext {
            park_name: "Magic Kingdom (FL)".to_owned(),
            park_message: "Open 9:00 AM EST – 10:00 PM EST".to_owned(),
            weather: Some("72°F, Mostly Sunny".to_owned()),
            recommendations: vec![record("Space Mountain", 35, 410), record("Haunted Mansion", 20, 250)],
        }
    }

    struct FailingSummarizer;

    impl Summarizer for FailingSummarizer {
        fn summarize(&self, _context: &SummaryContext) -> Result<String, SummaryError> {
            Err(SummaryError::EmptyCompletion)
        }
    }

    struct CannedSummarizer(&'static str);

    impl Summarizer for CannedSummarizer {
        fn summarize(&self, _context: &SummaryContext) -> Result<String, SummaryError> {
            Ok(self.0.to_owned())
        }
    }

    #[rstest]
    fn unconfigured_summariser_uses_the_fallback(context: SummaryContext) {
        let text = summarize_or_fallback(None, &context);
        assert!(text.contains("Space Mountain"));
        assert!(text.contains("1 more recommendation"));
    }

    #[rstest]
    fn failure_is_swallowed_with_the_fallback(context: SummaryContext) {
        let text = summarize_or_fallback(Some(&FailingSummarizer), &context);
        assert!(text.contains("Top pick: Space Mountain"));
    }

    #[rstest]
    fn blank_completion_falls_back(context: SummaryContext) {
        let text = summarize_or_fallback(Some(&CannedSummarizer("   ")), &context);
        assert!(text.contains("Top pick"));
    }

    #[rstest]
    fn generated_text_passes_through(context: SummaryContext) {
        let text = summarize_or_fallback(Some(&CannedSummarizer("Ride early!")), &context);
        assert_eq!(text, "Ride early!");
    }

    #[rstest]
    fn empty_run_has_its_own_fallback() {
        let context = SummaryContext {
            park_name: "Disneyland Park (CA)".to_owned(),
            park_message: "No operating hours today.".to_owned(),
            weather: None,
            recommendations: Vec::new(),
        };
        assert_eq!(
            fallback_summary(&context),
            "No rides matched your current location and preferences."
        );
    }

    #[rstest]
    fn prompt_lists_the_ranked_records(context: SummaryContext) {
        let prompt = prompt_for(&context);
        assert!(prompt.contains("Park: Magic Kingdom (FL)"));
        assert!(prompt.contains("- Space Mountain (35 min wait, 410 m away)"));
        assert!(prompt.contains("Weather: 72°F, Mostly Sunny"));
    }

    #[rstest]
    fn completion_response_decodes() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Head to Space Mountain first."}}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).expect("should deserialise");
        assert_eq!(
            response.choices[0].message.content,
            "Head to Space Mountain first."
        );
    }
}
