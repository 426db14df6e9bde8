use crate::session::Session;
use crate::theme::{load_theme_mode, theme_definition};
use crate::types::ThemeMode;
use crate::views::{AuthView, CalendarView, ChatView, SettingsView, TasksView};
use dioxus::prelude::*;

const APP_CSS: Asset = asset!("/assets/doit.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Login,
    Tasks,
    Calendar,
    Chat,
    Settings,
}

#[component]
pub fn App() -> Element {
    let session = use_context_provider(Session::from_env);
    let initial = if session.is_authenticated() {
        Page::Tasks
    } else {
        Page::Login
    };
    let page = use_context_provider(|| Signal::new(initial));
    let theme = use_signal(load_theme_mode);

    // Anything past the auth screen requires a stored token; the REST client
    // drops it on any 401, so re-check on every page change.
    {
        let session = session.clone();
        let mut page = page;
        use_effect(move || {
            if page() != Page::Login && !session.is_authenticated() {
                page.set(Page::Login);
            }
        });
    }

    rsx! {
        ThemeStyles { theme }
        if page() == Page::Login {
            AuthView {}
        } else {
            div { class: "app-shell",
                AppHeader { page }
                {match page() {
                    Page::Tasks => rsx! { TasksView {} },
                    Page::Calendar => rsx! { CalendarView {} },
                    Page::Chat => rsx! { ChatView {} },
                    Page::Settings => rsx! { SettingsView { theme } },
                    Page::Login => rsx! { AuthView {} },
                }}
            }
        }
    }
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    let definition = theme_definition(theme());
    rsx! {
        document::Link { rel: "stylesheet", href: APP_CSS }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn AppHeader(page: Signal<Page>) -> Element {
    let session = use_context::<Session>();
    let mut page_for_logout = page;
    let email = session
        .current_user()
        .map(|user| user.email)
        .unwrap_or_default();
    let logout_session = session.clone();

    rsx! {
        div { class: "header",
            div { class: "header-content",
                div { class: "brand",
                    div { class: "brand-mark", "✓" }
                    span { "DO IT" }
                }
                nav { class: "tabs",
                    NavTab { page, tab: Page::Tasks, label: "Tasks" }
                    NavTab { page, tab: Page::Calendar, label: "Calendar" }
                    NavTab { page, tab: Page::Chat, label: "AI Assistant" }
                    NavTab { page, tab: Page::Settings, label: "Settings" }
                }
                div { class: "header-user",
                    span { class: "user-email", "{email}" }
                    button {
                        class: "btn",
                        onclick: move |_| {
                            logout_session.logout();
                            page_for_logout.set(Page::Login);
                        },
                        "Logout"
                    }
                }
            }
        }
    }
}

#[component]
fn NavTab(page: Signal<Page>, tab: Page, label: &'static str) -> Element {
    let mut page = page;
    let class = if page() == tab { "tab active" } else { "tab" };
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| page.set(tab),
            "{label}"
        }
    }
}
