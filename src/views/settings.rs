use crate::session::Session;
use crate::theme::save_theme_mode;
use crate::types::ThemeMode;
use crate::ui::Page;
use dioxus::prelude::*;

#[component]
pub fn SettingsView(theme: Signal<ThemeMode>) -> Element {
    let session = use_context::<Session>();
    let mut page = use_context::<Signal<Page>>();

    let user = session.current_user();
    let email = user
        .as_ref()
        .map(|user| user.email.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let initial = email.chars().next().unwrap_or('?');

    // Local-only preferences; nothing server-side backs these yet.
    let email_notifications = use_signal(|| true);
    let push_notifications = use_signal(|| false);
    let auto_archive = use_signal(|| true);

    let on_logout = move |_| {
        session.logout();
        page.set(Page::Login);
    };

    rsx! {
        div { class: "main-container",
            h2 { class: "page-title", "Settings" }

            div { class: "settings-section",
                h3 { class: "section-title", "Profile" }
                div { class: "profile-row",
                    div { class: "avatar", "{initial}" }
                    div {
                        div { "{email}" }
                        p { class: "toggle-hint", "Identity comes from your sign-in token." }
                    }
                }
            }

            div { class: "settings-section",
                h3 { class: "section-title", "Display" }
                div { class: "theme-toggle",
                    ThemeOption { theme, mode: ThemeMode::Light, label: "Light" }
                    ThemeOption { theme, mode: ThemeMode::Dark, label: "Dark" }
                }
            }

            div { class: "settings-section",
                h3 { class: "section-title", "Notifications" }
                ToggleRow {
                    label: "Email notifications",
                    hint: "Daily digest of due tasks",
                    value: email_notifications,
                }
                ToggleRow {
                    label: "Push notifications",
                    hint: "Alerts when a task becomes due",
                    value: push_notifications,
                }
            }

            div { class: "settings-section",
                h3 { class: "section-title", "Tasks" }
                ToggleRow {
                    label: "Auto-archive completed tasks",
                    hint: "Hide tasks a week after completion",
                    value: auto_archive,
                }
            }

            div { class: "settings-section",
                h3 { class: "section-title", "Account" }
                button { class: "btn btn-danger", onclick: on_logout, "Logout" }
            }
        }
    }
}

#[component]
fn ThemeOption(theme: Signal<ThemeMode>, mode: ThemeMode, label: &'static str) -> Element {
    let mut theme = theme;
    let class = if theme() == mode {
        "theme-option active"
    } else {
        "theme-option"
    };
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| {
                theme.set(mode);
                save_theme_mode(mode);
            },
            "{label}"
        }
    }
}

#[component]
fn ToggleRow(label: &'static str, hint: &'static str, value: Signal<bool>) -> Element {
    let mut value = value;
    let class = if value() { "toggle on" } else { "toggle" };
    rsx! {
        div { class: "toggle-row",
            div {
                div { class: "toggle-label", "{label}" }
                p { class: "toggle-hint", "{hint}" }
            }
            button {
                class: "{class}",
                r#type: "button",
                aria_pressed: value().to_string(),
                onclick: move |_| {
                    let current = value();
                    value.set(!current);
                },
            }
        }
    }
}
