//! InsightApiClient - REST client for the companion insight service.
//!
//! Every operation is a single JSON POST with no automatic retry; a failed
//! call degrades at the orchestration boundary instead of being re-issued,
//! so user actions never produce duplicate side effects.

use crate::config::InsightServiceConfig;
use async_trait::async_trait;
use kokoro_core::conversation::{ConversationTurn, TurnSender};
use kokoro_core::error::{KokoroError, Result};
use kokoro_core::insight::{BalanceInsight, ChatSeed, EntryAnalysis, InsightService};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANALYZE_PATH: &str = "/analyze";
const CHAT_START_PATH: &str = "/chat/start";
const CHAT_TURN_PATH: &str = "/chat/turn";
const BALANCE_PATH: &str = "/insights/balance";
const NEGATIVITY_PATH: &str = "/insights/negativity";
const TRIGGERS_PATH: &str = "/insights/triggers";

/// HTTP implementation of [`InsightService`].
#[derive(Clone)]
pub struct InsightApiClient {
    client: Client,
    base_url: String,
}

impl InsightApiClient {
    /// Creates a client against the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(
            base_url,
            Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Creates a client with an explicit per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client from the resolved configuration.
    ///
    /// Priority: `KOKORO_INSIGHT_URL` environment variable >
    /// `~/.config/kokoro/service.json` > local default.
    pub fn from_config() -> Self {
        let config = InsightServiceConfig::resolve();
        Self::with_timeout(config.base_url, Duration::from_secs(config.timeout_secs))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issues one JSON POST and decodes the response body.
    ///
    /// Transport failures and non-success statuses map to
    /// `ServiceUnavailable`; a 2xx body that does not match the expected
    /// shape maps to `ServiceResponseInvalid`. The distinction is load
    /// bearing for callers picking a fallback path.
    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        tracing::debug!("[InsightApiClient] POST {}", path);
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|err| {
                KokoroError::service_unavailable(format!(
                    "request to {path} failed: {err}"
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(KokoroError::service_unavailable(format!(
                "{path} returned {status}: {body_text}"
            )));
        }

        let body_text = response.text().await.map_err(|err| {
            KokoroError::service_unavailable(format!("failed to read {path} body: {err}"))
        })?;

        serde_json::from_str(&body_text).map_err(|err| {
            KokoroError::service_response_invalid(format!(
                "unexpected {path} response shape: {err}"
            ))
        })
    }
}

#[async_trait]
impl InsightService for InsightApiClient {
    async fn analyze(&self, text: &str) -> Result<EntryAnalysis> {
        let request = AnalyzeRequest { text };
        let response: AnalyzeResponse = self.post_json(ANALYZE_PATH, &request).await?;
        Ok(EntryAnalysis {
            emotion: response.emotion,
            sentiment: response.sentiment,
            summary: response.summary,
            insights: response.insights,
        })
    }

    async fn chat_start(&self, seed: &ChatSeed) -> Result<String> {
        let request = ChatStartRequest {
            seed_text: &seed.text,
            insights: &seed.insights,
        };
        let response: ChatReply = self.post_json(CHAT_START_PATH, &request).await?;
        Ok(response.reply)
    }

    async fn chat_turn(&self, history: &[ConversationTurn], message: &str) -> Result<String> {
        let request = ChatTurnRequest {
            history: history.iter().map(TurnPayload::from).collect(),
            message,
        };
        let response: ChatReply = self.post_json(CHAT_TURN_PATH, &request).await?;
        Ok(response.reply)
    }

    async fn balance_insight(&self, entries_json: &str) -> Result<BalanceInsight> {
        let request = CorpusRequest {
            entries: entries_json,
        };
        let response: BalanceResponse = self.post_json(BALANCE_PATH, &request).await?;
        Ok(BalanceInsight {
            narrative: response.insight,
            actionable_advice: response.actionable_advice,
        })
    }

    async fn negativity_sources(&self, entries_json: &str) -> Result<Vec<String>> {
        let request = CorpusRequest {
            entries: entries_json,
        };
        let response: NegativityResponse = self.post_json(NEGATIVITY_PATH, &request).await?;
        Ok(response.sources)
    }

    async fn mood_triggers(&self, entries_json: &str) -> Result<Vec<String>> {
        let request = CorpusRequest {
            entries: entries_json,
        };
        let response: TriggersResponse = self.post_json(TRIGGERS_PATH, &request).await?;
        Ok(response.triggers)
    }
}

// Wire DTOs. Response fields are all required: a body missing any of them
// is a shape error, not a partial success.

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    emotion: String,
    sentiment: String,
    summary: String,
    insights: Vec<String>,
}

#[derive(Serialize)]
struct ChatStartRequest<'a> {
    seed_text: &'a str,
    insights: &'a [String],
}

#[derive(Serialize)]
struct ChatTurnRequest<'a> {
    history: Vec<TurnPayload>,
    message: &'a str,
}

#[derive(Serialize)]
struct TurnPayload {
    sender: &'static str,
    text: String,
}

impl From<&ConversationTurn> for TurnPayload {
    fn from(turn: &ConversationTurn) -> Self {
        Self {
            sender: match turn.sender {
                TurnSender::User => "user",
                TurnSender::Ai => "ai",
            },
            text: turn.text.clone(),
        }
    }
}

#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

#[derive(Serialize)]
struct CorpusRequest<'a> {
    entries: &'a str,
}

#[derive(Deserialize)]
struct BalanceResponse {
    insight: String,
    actionable_advice: Vec<String>,
}

#[derive(Deserialize)]
struct NegativityResponse {
    sources: Vec<String>,
}

#[derive(Deserialize)]
struct TriggersResponse {
    triggers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_response_requires_every_field() {
        let full = r#"{
            "emotion": "Joyful",
            "sentiment": "very positive",
            "summary": "A great day.",
            "insights": ["Shipping things feels good"]
        }"#;
        let parsed: AnalyzeResponse = serde_json::from_str(full).unwrap();
        assert_eq!(parsed.emotion, "Joyful");

        let missing_sentiment = r#"{
            "emotion": "Joyful",
            "summary": "A great day.",
            "insights": []
        }"#;
        assert!(serde_json::from_str::<AnalyzeResponse>(missing_sentiment).is_err());
    }

    #[test]
    fn test_chat_reply_requires_reply_field() {
        assert!(serde_json::from_str::<ChatReply>(r#"{"reply": "hello"}"#).is_ok());
        assert!(serde_json::from_str::<ChatReply>(r#"{"message": "hello"}"#).is_err());
    }

    #[test]
    fn test_turn_payload_maps_senders() {
        let user = TurnPayload::from(&ConversationTurn::user("hi"));
        assert_eq!(user.sender, "user");
        let ai = TurnPayload::from(&ConversationTurn::ai("hello"));
        assert_eq!(ai.sender, "ai");
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = InsightApiClient::new("http://localhost:8000/");
        assert_eq!(
            client.endpoint(ANALYZE_PATH),
            "http://localhost:8000/analyze"
        );
    }
}
