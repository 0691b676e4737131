use crate::theme::{BASE_CSS, ThemeMode, theme_definition};
use crate::views::{AdminView, ChatView};
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AppTab {
    Chat,
    Admin,
}

#[component]
pub fn App() -> Element {
    let active_tab = use_signal(|| AppTab::Chat);
    let theme = use_signal(|| ThemeMode::Light);

    rsx! {
        ThemeStyles { theme }
        AppHeader { active_tab, theme }
        TabPanels { active_tab }
    }
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    let definition = theme_definition(theme());
    rsx! {
        style { dangerous_inner_html: "{BASE_CSS}" }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn AppHeader(active_tab: Signal<AppTab>, theme: Signal<ThemeMode>) -> Element {
    let mut theme = theme;
    let toggle_label = match theme() {
        ThemeMode::Light => "ダーク",
        ThemeMode::Dark => "ライト",
    };
    rsx! {
        div { class: "header",
            h1 { class: "header-title", "Vancare" }
            TabNavigation { active_tab }
            button {
                class: "btn",
                r#type: "button",
                onclick: move |_| {
                    let next = match theme() {
                        ThemeMode::Light => ThemeMode::Dark,
                        ThemeMode::Dark => ThemeMode::Light,
                    };
                    theme.set(next);
                },
                "{toggle_label}"
            }
        }
    }
}

#[component]
fn TabNavigation(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        div { class: "tabs",
            TabButton { active_tab, tab: AppTab::Chat, label: "相談チャット" }
            TabButton { active_tab, tab: AppTab::Admin, label: "管理" }
        }
    }
}

#[component]
fn TabButton(active_tab: Signal<AppTab>, tab: AppTab, label: &'static str) -> Element {
    let mut active_tab = active_tab;
    let class = if active_tab() == tab {
        "tab active"
    } else {
        "tab"
    };
    rsx! {
        h2 {
            class: class,
            onclick: move |_| active_tab.set(tab),
            "{label}"
        }
    }
}

#[component]
fn TabPanels(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        {
            match active_tab() {
                AppTab::Chat => rsx!( ChatView {} ),
                AppTab::Admin => rsx!( AdminView {} ),
            }
        }
    }
}
