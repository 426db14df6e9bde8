use crate::session::Session;
use crate::ui::Page;
use dioxus::events::FormEvent;
use dioxus::prelude::*;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    Login,
    Register,
}

#[component]
pub fn AuthView() -> Element {
    let session = use_context::<Session>();
    let mut page = use_context::<Signal<Page>>();

    let mode = use_signal(|| AuthMode::Login);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);
    let mut backend_ok = use_signal(|| Option::<bool>::None);

    {
        let api = session.api();
        use_effect(move || {
            let api = api.clone();
            spawn(async move {
                let healthy = matches!(api.health().await, Ok(status) if status.is_healthy());
                backend_ok.set(Some(healthy));
            });
        });
    }

    let submit_session = session.clone();
    let submit = move |ev: FormEvent| {
        ev.prevent_default();
        if submitting() {
            return;
        }
        let email_value = email().trim().to_string();
        let password_value = password();
        if email_value.is_empty() || password_value.is_empty() {
            error.set(Some("Email and password are required.".to_string()));
            return;
        }
        if mode() == AuthMode::Register {
            if password_value.len() < MIN_PASSWORD_LEN {
                error.set(Some(format!(
                    "Password must be at least {MIN_PASSWORD_LEN} characters."
                )));
                return;
            }
            if password_value != confirm() {
                error.set(Some("Passwords do not match.".to_string()));
                return;
            }
        }

        submitting.set(true);
        error.set(None);
        let session = submit_session.clone();
        spawn(async move {
            let result = match mode() {
                AuthMode::Login => session.login(&email_value, &password_value).await,
                AuthMode::Register => session.register(&email_value, &password_value).await,
            };
            match result {
                Ok(()) => page.set(Page::Tasks),
                Err(err) => error.set(Some(err.to_string())),
            }
            submitting.set(false);
        });
    };

    let is_register = mode() == AuthMode::Register;
    let subtitle = if is_register {
        "Create an account to get organized"
    } else {
        "Welcome back"
    };
    let submit_label = if submitting() {
        "Please wait…"
    } else if is_register {
        "Create account"
    } else {
        "Sign in"
    };
    let password_autocomplete = if is_register {
        "new-password"
    } else {
        "current-password"
    };

    rsx! {
        div { class: "auth-screen",
            div { class: "auth-card",
                h1 { class: "auth-title", "DO IT" }
                p { class: "auth-subtitle", "{subtitle}" }
                if let Some(message) = error() {
                    div { class: "error-banner", "{message}" }
                }
                form { onsubmit: submit,
                    div { class: "field",
                        label { r#for: "email", "Email" }
                        input {
                            id: "email",
                            r#type: "email",
                            autocomplete: "email",
                            value: "{email}",
                            oninput: move |ev| email.set(ev.value()),
                        }
                    }
                    div { class: "field",
                        label { r#for: "password", "Password" }
                        input {
                            id: "password",
                            r#type: "password",
                            autocomplete: "{password_autocomplete}",
                            value: "{password}",
                            oninput: move |ev| password.set(ev.value()),
                        }
                    }
                    if is_register {
                        div { class: "field",
                            label { r#for: "confirm-password", "Confirm password" }
                            input {
                                id: "confirm-password",
                                r#type: "password",
                                autocomplete: "new-password",
                                value: "{confirm}",
                                oninput: move |ev| confirm.set(ev.value()),
                            }
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        style: "width: 100%; margin-top: 0.5rem;",
                        disabled: submitting(),
                        "{submit_label}"
                    }
                }
                ModeSwitch { mode }
                HealthLine { backend_ok }
            }
        }
    }
}

#[component]
fn ModeSwitch(mode: Signal<AuthMode>) -> Element {
    let mut mode = mode;
    let is_register = mode() == AuthMode::Register;
    let prompt = if is_register {
        "Already have an account?"
    } else {
        "No account yet?"
    };
    let action = if is_register { "Sign in" } else { "Register" };
    rsx! {
        p { class: "auth-switch",
            "{prompt}"
            button {
                r#type: "button",
                onclick: move |_| {
                    mode.set(if is_register { AuthMode::Login } else { AuthMode::Register })
                },
                "{action}"
            }
        }
    }
}

#[component]
fn HealthLine(backend_ok: Signal<Option<bool>>) -> Element {
    let (dot_class, label) = match backend_ok() {
        None => ("health-dot", "Checking backend…"),
        Some(true) => ("health-dot ok", "Backend online"),
        Some(false) => ("health-dot bad", "Backend unreachable"),
    };
    rsx! {
        div { class: "health-line",
            span { class: "{dot_class}" }
            span { "{label}" }
        }
    }
}
