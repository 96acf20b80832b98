//! Bot API client
//!
//! Thin wrapper over the bot HTTP endpoints the device needs: `sendMessage`
//! for texts, `sendDocument` for the history chart, `getUpdates` for
//! long-polled inbound commands. The API base is configurable so tests can
//! point the client at a local mock server.

use std::time::Duration;

use serde::Deserialize;
use sitright_core::Notifier;

use crate::GatewayError;

/// Multipart boundary for document uploads
///
/// Fixed string; the payloads we build (SVG text, numeric fields) cannot
/// contain it.
const MULTIPART_BOUNDARY: &str = "----sitright-boundary-7MA4YWxkTrZu0gW";

/// Bot transport configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot credential token
    pub token: String,
    /// Default recipient chat id
    pub chat_id: String,
    /// API base URL, overridable for tests
    pub api_base: String,
    /// Per-request timeout (must exceed the long-poll window)
    pub timeout: Duration,
    /// Backoff before the single retry
    pub retry_backoff: Duration,
    /// Server-side hold on `getUpdates`, seconds
    pub long_poll_secs: u16,
}

impl BotConfig {
    /// Create a configuration for the public bot API
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            api_base: "https://api.telegram.org".to_string(),
            timeout: Duration::from_secs(40),
            retry_backoff: Duration::from_millis(500),
            long_poll_secs: 25,
        }
    }

    /// Override the API base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Override the long-poll window
    pub fn long_poll_secs(mut self, secs: u16) -> Self {
        self.long_poll_secs = secs;
        self
    }
}

/// One inbound update from `getUpdates`
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonically increasing update id
    pub update_id: i64,
    /// Message payload, absent for non-message updates
    #[serde(default)]
    pub message: Option<UpdateMessage>,
}

/// Message part of an update
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMessage {
    /// Message text, absent for media-only messages
    #[serde(default)]
    pub text: Option<String>,
    /// Originating chat
    pub chat: UpdateChat,
}

/// Chat part of an update
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateChat {
    /// Chat id, the reply target
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct UpdatesEnvelope {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
}

/// Blocking bot API client
#[derive(Clone)]
pub struct BotClient {
    config: BotConfig,
    agent: ureq::Agent,
}

impl BotClient {
    /// Create a client over `config`
    pub fn new(config: BotConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { config, agent }
    }

    /// The configured default recipient
    pub fn chat_id(&self) -> &str {
        &self.config.chat_id
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.config.api_base, self.config.token
        )
    }

    /// Whether this failure is worth the single retry
    fn retryable(err: &ureq::Error) -> bool {
        match err {
            ureq::Error::Transport(_) => true,
            ureq::Error::Status(status, _) => *status >= 500,
        }
    }

    /// Run `op`, retrying once after a fixed backoff on transient failure
    fn with_retry<F>(&self, op: F) -> Result<ureq::Response, GatewayError>
    where
        F: Fn() -> Result<ureq::Response, ureq::Error>,
    {
        match op() {
            Ok(response) => Ok(response),
            Err(err) if Self::retryable(&err) => {
                log::warn!("bot request failed, retrying once: {err}");
                std::thread::sleep(self.config.retry_backoff);
                op().map_err(GatewayError::from)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Push a text message
    pub fn send_message(&self, chat_id: &str, text: &str) -> Result<(), GatewayError> {
        let url = self.endpoint("sendMessage");
        self.with_retry(|| {
            self.agent.post(&url).send_json(serde_json::json!({
                "chat_id": chat_id,
                "text": text,
            }))
        })?;
        Ok(())
    }

    /// Push a file attachment
    pub fn send_document(
        &self,
        chat_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), GatewayError> {
        let url = self.endpoint("sendDocument");
        let body = multipart_document(chat_id, filename, data);
        let content_type = format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}");

        self.with_retry(|| {
            self.agent
                .post(&url)
                .set("Content-Type", &content_type)
                .send_bytes(&body)
        })?;
        Ok(())
    }

    /// Long-poll for updates at or after `offset`
    pub fn get_updates(&self, offset: i64) -> Result<Vec<Update>, GatewayError> {
        let url = self.endpoint("getUpdates");
        let response = self.with_retry(|| {
            self.agent.post(&url).send_json(serde_json::json!({
                "offset": offset,
                "timeout": self.config.long_poll_secs,
            }))
        })?;

        let envelope: UpdatesEnvelope = response
            .into_json()
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        if !envelope.ok {
            return Err(GatewayError::Malformed("server reported ok=false".into()));
        }
        Ok(envelope.result)
    }
}

impl Notifier for BotClient {
    type Error = GatewayError;

    fn send_text(&self, recipient: &str, text: &str) -> Result<(), Self::Error> {
        self.send_message(recipient, text)
    }

    fn send_image(
        &self,
        recipient: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        self.send_document(recipient, filename, data)
    }
}

/// Assemble a two-part multipart/form-data body: chat id and document
fn multipart_document(chat_id: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 512);

    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"chat_id\"\r\n\r\n\
             {chat_id}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"document\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    body
}
