#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

pub struct ThemeDefinition {
    pub css: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Light => ThemeDefinition { css: LIGHT_THEME },
        ThemeMode::Dark => ThemeDefinition { css: DARK_THEME },
    }
}

pub const BASE_CSS: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: "Hiragino Sans", "Noto Sans JP", sans-serif; }
.header { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.25rem; border-bottom: 1px solid var(--color-border); }
.header-title { font-size: 1.1rem; font-weight: 700; margin: 0; }
.tabs { display: flex; gap: 0.5rem; }
.tab { font-size: 0.95rem; font-weight: 500; margin: 0; padding: 0.35rem 0.9rem; border-radius: 999px; cursor: pointer; }
.tab.active { background: var(--color-accent); color: var(--color-accent-text); }
.main-container { max-width: 860px; margin: 0 auto; padding: 1rem 1.25rem 2rem; }
.chat-list { display: flex; flex-direction: column; gap: 0.75rem; min-height: 60vh; }
.message-row { display: flex; }
.message-row.user { justify-content: flex-end; }
.bubble { max-width: 75%; padding: 0.6rem 0.9rem; border-radius: 14px; white-space: pre-wrap; }
.bubble.user { background: var(--color-chat-user-bg); color: var(--color-chat-user-text); }
.bubble.ai { background: var(--color-chat-ai-bg); color: var(--color-chat-ai-text); }
.bubble.system { background: var(--color-surface-muted); font-size: 0.9rem; }
.message-timestamp { font-size: 0.7rem; color: var(--color-timestamp); margin-top: 0.15rem; }
.composer { position: sticky; bottom: 0; padding: 0.75rem 0; background: var(--color-bg-primary); }
.composer textarea { width: 100%; resize: none; padding: 0.6rem 0.8rem; border-radius: 10px; border: 1px solid var(--color-input-border); font: inherit; }
.quick-actions { display: flex; flex-wrap: wrap; gap: 0.5rem; margin: 0.5rem 0 1rem; }
.btn { padding: 0.45rem 1rem; border-radius: 8px; border: 1px solid var(--color-border); background: transparent; cursor: pointer; font: inherit; }
.btn-primary { background: var(--color-accent); color: var(--color-accent-text); border: none; }
.btn:disabled { opacity: 0.5; cursor: default; }
.shimmer-text { opacity: 0.6; }
.admin-controls { display: flex; gap: 0.75rem; margin-bottom: 1rem; align-items: center; }
.admin-controls input, .admin-controls select { padding: 0.4rem 0.6rem; border: 1px solid var(--color-input-border); border-radius: 8px; font: inherit; }
.file-table { width: 100%; border-collapse: collapse; }
.file-table th, .file-table td { text-align: left; padding: 0.45rem 0.6rem; border-bottom: 1px solid var(--color-border); font-size: 0.9rem; }
.info-card { display: flex; gap: 2rem; padding: 0.9rem 1.1rem; border: 1px solid var(--color-border); border-radius: 10px; margin: 1.25rem 0; }
.info-card .label { font-size: 0.75rem; color: var(--color-timestamp); }
.text-muted { color: var(--color-timestamp); }
.status-line { font-size: 0.85rem; margin-top: 0.5rem; }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-border: #e3ded6;
    --color-surface-muted: #f4f1ec;
    --color-input-border: #cfc8bc;
    --color-accent: #e86a33;
    --color-accent-text: #ffffff;
    --color-chat-user-bg: #e86a33;
    --color-chat-user-text: #ffffff;
    --color-chat-ai-bg: #f4f1ec;
    --color-chat-ai-text: #2b2925;
    --color-timestamp: #8d867b;
}
body { background: var(--color-bg-primary); color: #2b2925; }
"#;

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #191714;
    --color-border: #3a362f;
    --color-surface-muted: #242019;
    --color-input-border: #4a453c;
    --color-accent: #e86a33;
    --color-accent-text: #ffffff;
    --color-chat-user-bg: #e86a33;
    --color-chat-user-text: #ffffff;
    --color-chat-ai-bg: #242019;
    --color-chat-ai-text: #ece7df;
    --color-timestamp: #8d867b;
}
body { background: var(--color-bg-primary); color: #ece7df; }
"#;
