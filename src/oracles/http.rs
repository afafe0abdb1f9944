use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::OracleError;
use crate::{OracleVerdict, PronunciationOracle};

const SYSTEM_PROMPT: &str = "You grade a young child's reading and spelling. \
Given a TARGET word and an ATTEMPT (a speech transcript or a typed word), decide whether \
the attempt contains the target word, accepting homophones, minor speech-recognition \
errors and filler words. Respond with JSON only: \
{\"status\": \"correct\" | \"incorrect\", \"mismatchedIndices\": [0-based letter positions of \
the target that were wrong]}.";

/// Parameters for an OpenAI-compatible chat-completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpOracleParams {
    /// Full URL of the chat-completions route.
    pub endpoint: String,
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
    pub model: String,
    /// Transport-level timeout; evaluation applies its own bound on top.
    pub request_timeout_ms: u64,
}

impl Default for HttpOracleParams {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Oracle backed by a language model behind an HTTP chat-completion API.
///
/// ```rust,no_run
/// use readspell_rs::oracles::http::{HttpOracle, HttpOracleParams};
/// use readspell_rs::PronunciationOracle;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let oracle = HttpOracle::new(HttpOracleParams {
///     api_key: std::env::var("OPENAI_API_KEY").ok(),
///     ..Default::default()
/// })?;
/// let verdict = oracle.evaluate("through", "I went thru the door").await?;
/// println!("{:?}", verdict.status);
/// # Ok(())
/// # }
/// ```
pub struct HttpOracle {
    client: reqwest::Client,
    params: HttpOracleParams,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl HttpOracle {
    pub fn new(params: HttpOracleParams) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(params.request_timeout_ms))
            .build()?;
        Ok(Self { client, params })
    }

    fn request_body(&self, target: &str, attempt: &str) -> serde_json::Value {
        json!({
            "model": self.params.model,
            "temperature": 0,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("TARGET: {target}\nATTEMPT: {attempt}") },
            ],
        })
    }
}

#[async_trait]
impl PronunciationOracle for HttpOracle {
    async fn evaluate(&self, target: &str, attempt: &str) -> Result<OracleVerdict, OracleError> {
        let mut request = self
            .client
            .post(&self.params.endpoint)
            .json(&self.request_body(target, attempt));
        if let Some(key) = &self.params.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Unavailable(format!(
                "endpoint returned {status}: {body}"
            )));
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| OracleError::InvalidResponse("no message content".to_string()))?;

        parse_verdict(&content)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Parse the model's JSON answer, tolerating a surrounding code fence.
fn parse_verdict(content: &str) -> Result<OracleVerdict, OracleError> {
    let trimmed = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    serde_json::from_str(trimmed)
        .map_err(|e| OracleError::InvalidResponse(format!("{e}: {content:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PronunciationStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_plain_verdict() {
        let verdict =
            parse_verdict(r#"{"status": "incorrect", "mismatchedIndices": [2]}"#).expect("valid");
        assert_eq!(verdict, OracleVerdict::incorrect(vec![2]));
    }

    #[test]
    fn parses_fenced_verdict_without_indices() {
        let verdict = parse_verdict("```json\n{\"status\": \"correct\"}\n```").expect("valid");
        assert_eq!(verdict.status, PronunciationStatus::Correct);
        assert!(verdict.mismatched_indices.is_empty());
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(matches!(
            parse_verdict(r#"{"status": "maybe"}"#),
            Err(OracleError::InvalidResponse(_))
        ));
    }

    #[test]
    fn request_carries_target_and_attempt() {
        let oracle = HttpOracle::new(HttpOracleParams::default()).expect("client");
        let body = oracle.request_body("ball", "the bal");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][1]["content"], "TARGET: ball\nATTEMPT: the bal");
    }
}
