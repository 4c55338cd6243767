use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::{self, SharedConfig};
use crate::error::TranslateError;

/// Limit for text captured from the foreground application.
pub const MAX_CAPTURE_CHARS: usize = 4000;
/// Limit for the test box in the settings window.
pub const MAX_PREVIEW_CHARS: usize = 1000;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TOKENS: u32 = 1000;
// Low temperature keeps the output a literal translation.
const TEMPERATURE: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    EnToRomanUrdu,
    RomanUrduToEn,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::EnToRomanUrdu => "English -> Roman Urdu",
            Direction::RomanUrduToEn => "Roman Urdu -> English",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated piece of text headed for the translation service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    direction: Direction,
}

impl TranslationRequest {
    /// Trims `text` and checks it against `max_chars` (counted in chars, not bytes).
    pub fn new(text: &str, direction: Direction, max_chars: usize) -> Result<Self, TranslateError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TranslateError::EmptySelection);
        }
        let len = text.chars().count();
        if len > max_chars {
            return Err(TranslateError::InputTooLong { len, max: max_chars });
        }
        Ok(Self { text: text.to_string(), direction })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The single user message sent to the model. Asks for the translation
    /// alone so the reply needs no further parsing.
    pub fn prompt(&self) -> String {
        match self.direction {
            Direction::EnToRomanUrdu => format!(
                "Translate this English text to Roman Urdu (NOT Urdu script). Return only translation:\n\n\"{}\"",
                self.text
            ),
            Direction::RomanUrduToEn => format!(
                "Translate this Roman Urdu text to English. Return only translation:\n\n\"{}\"",
                self.text
            ),
        }
    }
}

#[async_trait]
pub trait Translate: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError>;
}

#[derive(serde::Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(serde::Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(serde::Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(serde::Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completion client. One attempt per call, no retries.
pub struct OpenAiTranslator {
    client: reqwest::Client,
    config: SharedConfig,
}

impl OpenAiTranslator {
    pub fn new(config: SharedConfig) -> anyhow::Result<Self> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(config: SharedConfig, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Translate for OpenAiTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        // Credential is read per call so a key saved in settings applies immediately.
        let cfg = config::snapshot(&self.config);
        let api_key = cfg.openai_api_key.trim();
        if api_key.is_empty() {
            return Err(TranslateError::MissingCredential);
        }

        let prompt = request.prompt();
        let body = ChatRequest {
            model: &cfg.openai_model,
            messages: vec![ChatMessage { role: "user", content: &prompt }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let url = format!("{}/chat/completions", cfg.api_base.trim_end_matches('/'));

        tracing::debug!(
            "POST {} ({} chars, {}, model {})",
            url,
            request.text().chars().count(),
            request.direction(),
            cfg.openai_model
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(TranslateError::Unauthorized);
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(TranslateError::NetworkFailure(format!("HTTP {}: {}", status, text.trim())));
        }

        let raw = resp.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&raw).map_err(|_| TranslateError::MalformedResponse)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(TranslateError::MalformedResponse)
    }
}
