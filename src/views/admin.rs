use crate::api::{ApiClient, BuilderRecord, FileRecord, SystemInfo};
use crate::files::{FileCategory, filter_files, format_bytes};
use dioxus::events::FormEvent;
use dioxus::prelude::*;

#[component]
pub fn AdminView() -> Element {
    let client = use_signal(|| match ApiClient::from_env() {
        Ok(client) => Some(client),
        Err(err) => {
            tracing::error!("failed to initialize admin client: {err}");
            None
        }
    });
    let files = use_signal(Vec::<FileRecord>::new);
    let info = use_signal(SystemInfo::default);
    let builders = use_signal(Vec::<BuilderRecord>::new);
    let mut query = use_signal(String::new);
    let mut category = use_signal(FileCategory::default);
    let status_line = use_signal(|| Option::<String>::None);
    let mut loaded = use_signal(|| false);

    use_effect(move || {
        if loaded() {
            return;
        }
        if let Some(api) = client() {
            loaded.set(true);
            let mut files = files;
            let mut info = info;
            let mut builders = builders;
            spawn(async move {
                files.set(api.list_files().await);
                info.set(api.system_info().await);
                match api.list_builders().await {
                    Ok(list) => builders.set(list),
                    Err(err) => tracing::warn!("builder list fetch failed: {err}"),
                }
            });
        }
    });

    let reload = {
        let mut status_line = status_line;
        let mut files = files;
        let mut info = info;
        move |_| {
            let Some(api) = client() else {
                return;
            };
            status_line.set(Some("データベースを再読み込みしています…".to_string()));
            spawn(async move {
                match api.reload_database().await {
                    Ok(()) => {
                        status_line.set(Some("再読み込みが完了しました。".to_string()));
                        files.set(api.list_files().await);
                        info.set(api.system_info().await);
                    }
                    Err(err) => status_line.set(Some(format!("エラーが発生しました: {err}"))),
                }
            });
        }
    };

    let files_snapshot = files();
    let visible = filter_files(&files_snapshot, &query(), category());
    let info_snapshot = info();
    let builders_snapshot = builders();

    rsx! {
        div { class: "main-container",
            div { class: "info-card",
                div {
                    div { class: "label", "DB接続" }
                    div {
                        if info_snapshot.db_status.is_empty() { "不明" } else { "{info_snapshot.db_status}" }
                    }
                }
                div {
                    div { class: "label", "登録ドキュメント数" }
                    div { "{info_snapshot.doc_count}" }
                }
                button { class: "btn", r#type: "button", onclick: reload, "再読み込み" }
            }
            if let Some(line) = status_line() {
                p { class: "status-line", "{line}" }
            }

            div { class: "admin-controls",
                input {
                    r#type: "search",
                    placeholder: "ファイル名で検索",
                    value: "{query}",
                    oninput: move |ev| query.set(ev.value()),
                }
                select {
                    value: category().key(),
                    onchange: move |evt: FormEvent| category.set(FileCategory::from_key(&evt.value())),
                    for option_category in FileCategory::ALL.iter() {
                        option { value: option_category.key(), "{option_category.label()}" }
                    }
                }
            }

            if visible.is_empty() {
                p { class: "text-muted", "表示できるファイルがありません。" }
            } else {
                table { class: "file-table",
                    thead {
                        tr {
                            th { "ファイル名" }
                            th { "サイズ" }
                        }
                    }
                    tbody {
                        for file in visible.iter() {
                            tr { key: "{file.name}",
                                td { "{file.name}" }
                                td { "{format_bytes(file.size)}" }
                            }
                        }
                    }
                }
            }

            h3 { "ビルダー一覧" }
            if builders_snapshot.is_empty() {
                p { class: "text-muted", "ビルダー情報はまだありません。" }
            } else {
                ul {
                    for builder in builders_snapshot.iter() {
                        li { key: "{builder.name}",
                            "{builder.name}"
                            if let Some(prefecture) = builder.prefecture.as_ref() {
                                span { class: "text-muted", "（{prefecture}）" }
                            }
                        }
                    }
                }
            }
        }
    }
}
