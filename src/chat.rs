//! Chat conversation controller.
//!
//! Owns the ordered, append-only message log for one chat surface and
//! coordinates the turn lifecycle: user message in, watchdog armed, backend
//! awaited, outcome appended. Rendering order always equals insertion order.
//!
//! A turn that outlives the watchdog gets a "taking a while" notice while
//! the request stays in flight, so a slow backend can legitimately produce
//! two assistant messages for one user message: the notice, then the real
//! answer (or error) when the request finally settles.

use crate::api::{ApiClient, ApiError, ChatReply};
use crate::types::{ChatMessage, Sender};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Budget before the slow-response notice appears. The underlying request
/// is never cancelled; it keeps running past this point.
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(60);

pub const WELCOME_MESSAGE: &str =
    "こんにちは！キャンピングカーの修理・メンテナンスについて、お気軽にご相談ください。";
pub const SLOW_RESPONSE_NOTICE: &str =
    "回答の生成に時間がかかっています。もう少々お待ちください。";
pub const TIMEOUT_RETRY_MESSAGE: &str =
    "リクエストがタイムアウトしました。時間をおいて再度お試しください。";
pub const NO_ANSWER_FALLBACK: &str =
    "回答を生成できませんでした。もう一度お試しください。";

/// Seam between the controller and the backend, so tests can script
/// responses without a network.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn start_conversation(&self, session_id: &str) -> Result<(), ApiError>;
    async fn send_message(&self, message: &str, session_id: &str) -> Result<ChatReply, ApiError>;
}

#[async_trait]
impl ChatBackend for ApiClient {
    async fn start_conversation(&self, session_id: &str) -> Result<(), ApiError> {
        ApiClient::start_conversation(self, session_id).await
    }

    async fn send_message(
        &self,
        message: &str,
        session_id: &str,
    ) -> Result<ChatReply, ApiError> {
        self.send_chat_message(message, session_id).await
    }
}

/// One controller instance backs one rendered chat surface; clones share
/// the same log and loading flag.
#[derive(Clone)]
pub struct ChatController {
    backend: Arc<dyn ChatBackend>,
    session_id: String,
    log: Arc<Mutex<Vec<ChatMessage>>>,
    loading: Arc<AtomicBool>,
}

impl ChatController {
    /// The session token is resolved once by the caller and injected here;
    /// the controller never reaches into ambient storage itself.
    pub fn new(backend: Arc<dyn ChatBackend>, session_id: impl Into<String>) -> Self {
        Self {
            backend,
            session_id: session_id.into(),
            log: Arc::new(Mutex::new(Vec::new())),
            loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.log.lock().expect("chat log poisoned").clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Mount-time initialization: the welcome banner appears immediately
    /// and unconditionally; the conversation handshake runs best-effort in
    /// the background and its failure is logged, never shown.
    pub fn begin(&self) {
        self.push(Sender::System, WELCOME_MESSAGE);
        let backend = Arc::clone(&self.backend);
        let session_id = self.session_id.clone();
        tokio::spawn(async move {
            if let Err(err) = backend.start_conversation(&session_id).await {
                tracing::warn!("start_conversation failed: {err}");
            }
        });
    }

    /// Runs one full turn. Empty input and input arriving while a request
    /// is outstanding are dropped before anything is appended.
    pub async fn send_turn(&self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        if self.loading.swap(true, Ordering::SeqCst) {
            return;
        }

        self.push(Sender::User, trimmed);

        let watchdog = {
            let this = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(RESPONSE_TIMEOUT).await;
                this.push(Sender::Ai, SLOW_RESPONSE_NOTICE);
            })
        };

        let result = self.backend.send_message(trimmed, &self.session_id).await;
        // Settled either way; a stale notice must not appear after this.
        watchdog.abort();

        match result {
            Ok(reply) => self.push(Sender::Ai, reply_text(reply)),
            Err(err) if err.is_timeout_or_network() => {
                tracing::warn!("chat request failed: {err}");
                self.push(Sender::Ai, TIMEOUT_RETRY_MESSAGE);
            }
            Err(err) => {
                tracing::error!("chat request failed: {err}");
                self.push(Sender::Ai, format!("エラーが発生しました: {err}"));
            }
        }

        self.loading.store(false, Ordering::SeqCst);
    }

    fn push(&self, sender: Sender, text: impl Into<String>) {
        self.log
            .lock()
            .expect("chat log poisoned")
            .push(ChatMessage::new(sender, text));
    }
}

/// Ordered field lookup over the reply shapes the backend has shipped.
fn reply_text(reply: ChatReply) -> String {
    reply
        .answer
        .or(reply.response)
        .unwrap_or_else(|| NO_ANSWER_FALLBACK.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_field_wins() {
        let reply = ChatReply {
            answer: Some("answer".into()),
            response: Some("response".into()),
        };
        assert_eq!(reply_text(reply), "answer");
    }

    #[test]
    fn response_field_is_the_fallback() {
        let reply = ChatReply {
            answer: None,
            response: Some("response".into()),
        };
        assert_eq!(reply_text(reply), "response");
    }

    #[test]
    fn fixed_text_when_both_fields_absent() {
        assert_eq!(reply_text(ChatReply::default()), NO_ANSWER_FALLBACK);
    }
}
