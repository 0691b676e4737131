use crate::api::ApiClient;
use crate::chat::ChatController;
use crate::session::SessionStore;
use crate::types::{ChatMessage, Sender};
use crate::views::shared::format_message_timestamp;
use dioxus::events::Key;
use dioxus::prelude::*;
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(80);

const QUICK_ACTIONS: &[(&str, &str)] = &[
    ("バッテリー上がり", "バッテリーが上がってしまいました。どうすればいいですか？"),
    ("雨漏り", "天井から雨漏りがしています。修理費用の目安を教えてください。"),
    ("エアコン", "走行中にエアコンが効かなくなりました。原因は何が考えられますか？"),
    ("工場を探す", "近くでキャンピングカーを修理できる工場を探しています。"),
];

fn build_controller() -> anyhow::Result<ChatController> {
    let api = ApiClient::from_env()?;
    let session_id = SessionStore::open_default().load_or_create();
    Ok(ChatController::new(Arc::new(api), session_id))
}

fn sender_class(sender: Sender) -> &'static str {
    sender.as_str()
}

#[component]
pub fn ChatView() -> Element {
    let messages = use_signal(Vec::<ChatMessage>::new);
    let mut input = use_signal(String::new);
    let sending = use_signal(|| false);
    let mut started = use_signal(|| false);

    let controller = use_signal(|| match build_controller() {
        Ok(controller) => Some(controller),
        Err(err) => {
            tracing::error!("failed to initialize chat backend: {err}");
            None
        }
    });

    use_effect(move || {
        if started() {
            return;
        }
        if let Some(handle) = controller() {
            started.set(true);
            let mut messages = messages;
            spawn(async move {
                handle.begin();
                messages.set(handle.messages());
            });
        }
    });

    let mut send_message = {
        let mut sending_signal = sending;
        let mut input_signal = input;
        move |text: String| {
            let Some(handle) = controller() else {
                return;
            };
            let trimmed = text.trim().to_string();
            if trimmed.is_empty() || sending_signal() {
                return;
            }
            input_signal.set(String::new());
            sending_signal.set(true);

            let mut messages = messages;
            spawn(async move {
                let worker = handle.clone();
                let turn = tokio::spawn(async move { worker.send_turn(&trimmed).await });
                while !turn.is_finished() {
                    messages.set(handle.messages());
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
                messages.set(handle.messages());
                sending_signal.set(false);
            });
        }
    };

    let messages_snapshot = messages();
    let backend_ready = controller().is_some();

    rsx! {
        div { class: "main-container",
            if !backend_ready {
                p { class: "text-muted", "チャットを初期化できませんでした。設定を確認してください。" }
            }
            div { class: "chat-list",
                for msg in messages_snapshot.iter() {
                    div { key: "{msg.id}", class: format_args!("message-row {}", sender_class(msg.sender)),
                        div {
                            div { class: format_args!("bubble {}", sender_class(msg.sender)), "{msg.text}" }
                            if let Some(ts) = format_message_timestamp(msg.timestamp) {
                                div { class: "message-timestamp", "{ts}" }
                            }
                        }
                    }
                }
                if sending() {
                    div { class: "message-row ai",
                        div { class: "bubble ai",
                            span { class: "shimmer-text", "回答を作成しています…" }
                        }
                    }
                }
            }

            div { class: "quick-actions",
                for (label, prompt) in QUICK_ACTIONS.iter().copied() {
                    button {
                        class: "btn",
                        r#type: "button",
                        disabled: sending() || !backend_ready,
                        onclick: move |_| send_message(prompt.to_string()),
                        "{label}"
                    }
                }
            }

            form { class: "composer",
                textarea {
                    rows: "2",
                    placeholder: "修理や故障の相談を入力してください",
                    value: "{input}",
                    oninput: move |ev| input.set(ev.value()),
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter && !ev.modifiers().shift() {
                            ev.prevent_default();
                            let text = input();
                            send_message(text);
                        }
                    },
                    disabled: sending() || !backend_ready,
                    autofocus: true,
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: sending() || !backend_ready || input().trim().is_empty(),
                    onclick: move |_| {
                        let text = input();
                        send_message(text);
                    },
                    "送信"
                }
            }
        }
    }
}
