//! Conversation endpoints.

use super::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct StartConversationRequest<'a> {
    session_id: &'a str,
}

#[derive(Serialize)]
struct UnifiedChatRequest<'a> {
    message: &'a str,
    session_id: &'a str,
}

/// The chat endpoint answers under `answer` or, in older deployments,
/// `response`. Both optional; the controller applies the display fallback.
#[derive(Debug, Default, Deserialize)]
pub struct ChatReply {
    pub answer: Option<String>,
    pub response: Option<String>,
}

impl ApiClient {
    /// Registers the session with the backend so it can seed server-side
    /// conversation state. The response body carries nothing we use.
    pub async fn start_conversation(&self, session_id: &str) -> Result<(), ApiError> {
        self.post_checked("/start_conversation", &StartConversationRequest { session_id })
            .await?;
        Ok(())
    }

    pub async fn send_chat_message(
        &self,
        message: &str,
        session_id: &str,
    ) -> Result<ChatReply, ApiError> {
        let body = self
            .post_checked("/api/unified/chat", &UnifiedChatRequest { message, session_id })
            .await?;
        super::reject_failure(&body)?;
        Ok(serde_json::from_str(&body)?)
    }
}
