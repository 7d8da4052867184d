//! Chat-completions classifier

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use shiplog_core::{Category, LlmConfig, Result, SourceError, TitleClassifier};

const SYSTEM_PROMPT: &str = "\
You classify software change titles into exactly one category each.
Categories:
- breaking: incompatible API or behavior changes requiring consumer action
- features: new functionality
- fixes: bug fixes
- performance: speed or resource usage improvements
- docs: documentation-only changes
- other: anything else (refactors, chores, tooling)

Respond with JSON only, shaped as:
{\"classifications\":[{\"title\":\"<exact input title>\",\"category\":\"<category>\"}]}";

/// Classifier backed by an OpenAI-compatible chat-completions endpoint
pub struct OpenAiClassifier {
    config: LlmConfig,
    client: Client,
}

impl OpenAiClassifier {
    /// Create a new classifier
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Validated shape of the model's answer
#[derive(Debug, Deserialize)]
struct ClassificationResponse {
    classifications: Vec<Classification>,
}

#[derive(Debug, Deserialize)]
struct Classification {
    title: String,
    category: String,
}

#[async_trait]
impl TitleClassifier for OpenAiClassifier {
    #[instrument(skip(self, titles), fields(title_count = titles.len()))]
    async fn classify(&self, titles: &[String]) -> Result<Vec<(String, Category)>> {
        let user_content = format!(
            "Classify these change titles:\n{}",
            titles
                .iter()
                .map(|t| format!("- {}", t))
                .collect::<Vec<_>>()
                .join("\n")
        );

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            temperature: 0.0,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or_default();

        let parsed = parse_classifications(content);
        debug!(
            returned = parsed.len(),
            requested = titles.len(),
            "classification response parsed"
        );
        Ok(parsed)
    }
}

/// Parse and validate the model's JSON answer.
///
/// Code fences are tolerated; entries whose category does not name one of
/// the six fixed buckets are dropped rather than guessed at.
fn parse_classifications(content: &str) -> Vec<(String, Category)> {
    let json = strip_code_fences(content);

    let response: ClassificationResponse = match serde_json::from_str(json) {
        Ok(response) => response,
        Err(err) => {
            warn!(%err, "malformed classification payload, dropping all");
            return Vec::new();
        }
    };

    response
        .classifications
        .into_iter()
        .filter_map(|c| {
            c.category
                .parse::<Category>()
                .ok()
                .map(|category| (c.title, category))
        })
        .collect()
}

/// Strip a surrounding markdown code fence, if present
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}
