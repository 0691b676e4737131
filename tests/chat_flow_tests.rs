//! Conversation-flow tests driving the controller against a scripted
//! backend. Timer-sensitive cases run on a paused clock so the 60-second
//! watchdog scenarios finish instantly.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vancare::api::{ApiError, ChatReply};
use vancare::chat::{
    ChatBackend, ChatController, NO_ANSWER_FALLBACK, SLOW_RESPONSE_NOTICE, TIMEOUT_RETRY_MESSAGE,
    WELCOME_MESSAGE,
};
use vancare::types::Sender;

enum Script {
    Answer(&'static str),
    ResponseOnly(&'static str),
    EmptyReply,
    NetworkFailure,
    BackendFailure(&'static str),
    NeverResolves,
}

struct ScriptedBackend {
    script: Script,
    delay: Duration,
    sends: AtomicUsize,
    starts: AtomicUsize,
    last_session: Mutex<Option<String>>,
}

impl ScriptedBackend {
    fn new(script: Script) -> Arc<Self> {
        Self::with_delay(script, Duration::ZERO)
    }

    fn with_delay(script: Script, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            script,
            delay,
            sends: AtomicUsize::new(0),
            starts: AtomicUsize::new(0),
            last_session: Mutex::new(None),
        })
    }

    fn send_count(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn start_conversation(&self, session_id: &str) -> Result<(), ApiError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        *self.last_session.lock().unwrap() = Some(session_id.to_string());
        Ok(())
    }

    async fn send_message(&self, _message: &str, session_id: &str) -> Result<ChatReply, ApiError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        *self.last_session.lock().unwrap() = Some(session_id.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.script {
            Script::Answer(text) => Ok(ChatReply {
                answer: Some(text.to_string()),
                response: None,
            }),
            Script::ResponseOnly(text) => Ok(ChatReply {
                answer: None,
                response: Some(text.to_string()),
            }),
            Script::EmptyReply => Ok(ChatReply::default()),
            Script::NetworkFailure => Err(ApiError::Network("connection reset".to_string())),
            Script::BackendFailure(message) => Err(ApiError::Backend(message.to_string())),
            Script::NeverResolves => std::future::pending().await,
        }
    }
}

fn controller_with(backend: Arc<ScriptedBackend>) -> ChatController {
    ChatController::new(backend, "session_test_123")
}

#[tokio::test(start_paused = true)]
async fn answered_turn_appends_user_then_ai() {
    let backend = ScriptedBackend::with_delay(
        Script::Answer("まずブースターケーブルで救援車とつないでください。"),
        Duration::from_secs(2),
    );
    let controller = controller_with(backend.clone());

    controller.send_turn("バッテリーが上がりません").await;

    let messages = controller.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[0].text, "バッテリーが上がりません");
    assert_eq!(messages[1].sender, Sender::Ai);
    assert_eq!(
        messages[1].text,
        "まずブースターケーブルで救援車とつないでください。"
    );
    assert!(!controller.is_loading());
    assert_eq!(backend.send_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn legacy_response_field_is_used_when_answer_missing() {
    let backend = ScriptedBackend::new(Script::ResponseOnly("提携工場をご案内します。"));
    let controller = controller_with(backend);

    controller.send_turn("修理工場を探しています").await;

    let messages = controller.messages();
    assert_eq!(messages[1].text, "提携工場をご案内します。");
}

#[tokio::test(start_paused = true)]
async fn empty_reply_falls_back_to_fixed_text() {
    let backend = ScriptedBackend::new(Script::EmptyReply);
    let controller = controller_with(backend);

    controller.send_turn("料金について").await;

    let messages = controller.messages();
    assert_eq!(messages[1].text, NO_ANSWER_FALLBACK);
}

#[tokio::test(start_paused = true)]
async fn begin_appends_welcome_and_fires_handshake() {
    let backend = ScriptedBackend::new(Script::Answer("ok"));
    let controller = controller_with(backend.clone());

    controller.begin();
    // give the spawned handshake a chance to run
    tokio::time::sleep(Duration::from_millis(1)).await;

    let messages = controller.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, Sender::System);
    assert_eq!(messages[0].text, WELCOME_MESSAGE);
    assert_eq!(backend.start_count(), 1);
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn watchdog_notice_appears_while_request_stays_in_flight() {
    let backend = ScriptedBackend::new(Script::NeverResolves);
    let controller = controller_with(backend);

    controller.begin();
    tokio::time::sleep(Duration::from_millis(1)).await;

    let worker = controller.clone();
    let turn = tokio::spawn(async move { worker.send_turn("エアコンが効きません").await });
    tokio::time::sleep(Duration::from_secs(61)).await;

    let messages = controller.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[2].sender, Sender::Ai);
    assert_eq!(messages[2].text, SLOW_RESPONSE_NOTICE);
    // request is still outstanding: the turn never settled
    assert!(controller.is_loading());
    assert!(!turn.is_finished());
}

#[tokio::test(start_paused = true)]
async fn slow_turn_produces_notice_then_real_answer() {
    let backend = ScriptedBackend::with_delay(
        Script::Answer("バッテリー液の点検をお勧めします。"),
        Duration::from_secs(90),
    );
    let controller = controller_with(backend);

    let worker = controller.clone();
    tokio::spawn(async move { worker.send_turn("冬場に始動が悪いです").await });
    tokio::time::sleep(Duration::from_secs(61)).await;

    assert_eq!(controller.messages().len(), 2);
    assert!(controller.is_loading());

    tokio::time::sleep(Duration::from_secs(40)).await;

    // one user turn, two ai messages: the notice plus the late answer
    let messages = controller.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].text, SLOW_RESPONSE_NOTICE);
    assert_eq!(messages[2].text, "バッテリー液の点検をお勧めします。");
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn settled_turn_never_emits_a_stale_notice() {
    let backend = ScriptedBackend::with_delay(Script::Answer("了解です。"), Duration::from_secs(2));
    let controller = controller_with(backend);

    controller.send_turn("点検の予約はできますか").await;
    tokio::time::sleep(Duration::from_secs(120)).await;

    assert_eq!(controller.messages().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn network_failure_maps_to_localized_retry_message() {
    let backend = ScriptedBackend::new(Script::NetworkFailure);
    let controller = controller_with(backend);

    controller.send_turn("雨漏りの相談です").await;

    let messages = controller.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].sender, Sender::Ai);
    assert_eq!(messages[1].text, TIMEOUT_RETRY_MESSAGE);
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn backend_failure_maps_to_generic_error_text() {
    let backend = ScriptedBackend::new(Script::BackendFailure("診断エンジンが停止しています"));
    let controller = controller_with(backend);

    controller.send_turn("見積もりをお願いします").await;

    let messages = controller.messages();
    assert!(messages[1].text.starts_with("エラーが発生しました:"));
    assert!(messages[1].text.contains("診断エンジンが停止しています"));
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn blank_input_is_never_submitted() {
    let backend = ScriptedBackend::new(Script::Answer("ok"));
    let controller = controller_with(backend.clone());

    controller.send_turn("   ").await;
    controller.send_turn("").await;

    assert!(controller.messages().is_empty());
    assert_eq!(backend.send_count(), 0);
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn sends_are_dropped_while_a_request_is_outstanding() {
    let backend = ScriptedBackend::new(Script::NeverResolves);
    let controller = controller_with(backend.clone());

    let worker = controller.clone();
    tokio::spawn(async move { worker.send_turn("最初の質問").await });
    tokio::time::sleep(Duration::from_secs(1)).await;

    controller.send_turn("二つ目の質問").await;

    assert_eq!(controller.messages().len(), 1);
    assert_eq!(backend.send_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn repeated_text_yields_independent_messages_in_call_order() {
    let backend = ScriptedBackend::new(Script::Answer("承知しました。"));
    let controller = controller_with(backend);

    controller.send_turn("FFヒーターが点きません").await;
    controller.send_turn("FFヒーターが点きません").await;

    let messages = controller.messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[2].sender, Sender::User);
    assert_eq!(messages[0].text, messages[2].text);
    assert_ne!(messages[0].id, messages[2].id);
}

#[tokio::test(start_paused = true)]
async fn injected_session_token_reaches_the_backend() {
    let backend = ScriptedBackend::new(Script::Answer("ok"));
    let controller = controller_with(backend.clone());
    assert_eq!(controller.session_id(), "session_test_123");

    controller.send_turn("こんにちは").await;

    let seen = backend.last_session.lock().unwrap().clone();
    assert_eq!(seen.as_deref(), Some("session_test_123"));
}
