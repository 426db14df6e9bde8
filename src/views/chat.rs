use crate::chat::{ChatSession, visible_conversations};
use crate::session::Session;
use crate::types::{Conversation, Message, Role};
use crate::ui::Page;
use crate::views::shared::{
    Spinner, format_message_timestamp, markdown_to_html, redirect_if_unauthorized, relative_time,
};
use dioxus::events::Key;
use dioxus::prelude::*;

#[component]
pub fn ChatView() -> Element {
    let session = use_context::<Session>();
    let page = use_context::<Signal<Page>>();

    let mut chat = use_signal(ChatSession::new);
    let mut input = use_signal(String::new);
    let mut sending = use_signal(|| false);
    let mut loading_history = use_signal(|| false);

    let mut conversations = use_signal(Vec::<Conversation>::new);
    let mut sidebar_loading = use_signal(|| true);
    let mut sidebar_error = use_signal(|| Option::<String>::None);

    // The chat endpoints are addressed by user id, which only exists while
    // the token decodes. The root view redirects when it doesn't; rendering
    // falls back to a spinner below, once every hook has run.
    let user_id_opt = session.current_user().map(|user| user.id);
    let api = session.api();

    let load_conversations = {
        let api = api.clone();
        let user_id_opt = user_id_opt.clone();
        move || {
            let Some(user_id) = user_id_opt.clone() else {
                return;
            };
            let api = api.clone();
            spawn(async move {
                sidebar_loading.set(true);
                sidebar_error.set(None);
                match api.list_conversations(&user_id).await {
                    Ok(all) => conversations.set(visible_conversations(all)),
                    Err(err) => {
                        if !redirect_if_unauthorized(&err, page) {
                            sidebar_error.set(Some("Failed to load conversations".to_string()));
                        }
                    }
                }
                sidebar_loading.set(false);
            });
        }
    };

    {
        let mut load_conversations = load_conversations.clone();
        use_effect(move || {
            load_conversations();
        });
    }

    let Some(user_id) = user_id_opt else {
        return rsx! {
            Spinner {}
        };
    };

    let select_conversation = {
        let api = api.clone();
        let user_id = user_id.clone();
        move |conversation_id: Option<i64>| {
            let Some(conversation_id) = conversation_id else {
                // "+ New" is purely local.
                chat.with_mut(|session| session.reset());
                return;
            };
            let api = api.clone();
            let user_id = user_id.clone();
            loading_history.set(true);
            spawn(async move {
                match api.conversation_history(&user_id, conversation_id).await {
                    Ok(history) => {
                        chat.with_mut(|session| {
                            session.load_history(conversation_id, history.messages)
                        });
                    }
                    Err(err) => {
                        if !redirect_if_unauthorized(&err, page) {
                            sidebar_error
                                .set(Some("Failed to load conversation history".to_string()));
                        }
                    }
                }
                loading_history.set(false);
            });
        }
    };

    let send_message = {
        let api = api.clone();
        let user_id = user_id.clone();
        let mut load_conversations = load_conversations.clone();
        move |text: String| {
            let trimmed = text.trim().to_string();
            if trimmed.is_empty() || sending() {
                return;
            }
            input.set(String::new());

            let conversation_id = chat.with(|session| session.conversation_id());
            chat.with_mut(|session| {
                session.push_user(&trimmed);
            });
            sending.set(true);

            let api = api.clone();
            let user_id = user_id.clone();
            let mut load_conversations = load_conversations.clone();
            spawn(async move {
                let request = crate::types::ChatRequest {
                    conversation_id,
                    message: trimmed,
                };
                match api.send_chat(&user_id, &request).await {
                    Ok(response) => {
                        let adopted = chat.with_mut(|session| session.apply_reply(&response));
                        if adopted {
                            // A fresh conversation now exists server-side.
                            load_conversations();
                        }
                    }
                    Err(err) => {
                        if !redirect_if_unauthorized(&err, page) {
                            chat.with_mut(|session| session.apply_failure(&err));
                        }
                    }
                }
                sending.set(false);
            });
        }
    };

    let active_id = chat.with(|session| session.conversation_id());
    let transcript = chat.with(|session| session.transcript().to_vec());

    rsx! {
        div { class: "main-container",
            div { class: "chat-layout",
                ConversationSidebar {
                    conversations,
                    loading: sidebar_loading,
                    error: sidebar_error,
                    active_id,
                    on_select: select_conversation.clone(),
                    on_retry: {
                        let mut load_conversations = load_conversations.clone();
                        move |_| load_conversations()
                    },
                }
                div { class: "chat-panel",
                    ChatHeader { active_id, on_new: {
                        let mut select_conversation = select_conversation.clone();
                        move |_| select_conversation(None)
                    } }
                    if loading_history() {
                        Spinner {}
                    } else {
                        MessageList { transcript, sending: sending() }
                    }
                    Composer { input, sending: sending(), on_send: send_message.clone() }
                }
            }
        }
    }
}

#[component]
fn ChatHeader(active_id: Option<i64>, on_new: EventHandler<()>) -> Element {
    rsx! {
        div { class: "chat-header",
            div {
                h3 { class: "chat-title", "AI Todo Assistant" }
                if let Some(id) = active_id {
                    p { class: "chat-sub", "Conversation #{id}" }
                } else {
                    p { class: "chat-sub", "New conversation" }
                }
            }
            button {
                class: "btn",
                r#type: "button",
                onclick: move |_| on_new.call(()),
                "New Chat"
            }
        }
    }
}

#[component]
fn ConversationSidebar(
    conversations: Signal<Vec<Conversation>>,
    loading: Signal<bool>,
    error: Signal<Option<String>>,
    active_id: Option<i64>,
    on_select: EventHandler<Option<i64>>,
    on_retry: EventHandler<()>,
) -> Element {
    rsx! {
        aside { class: "convo-sidebar",
            div { class: "convo-header",
                span { "Conversations" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_select.call(None),
                    "+ New"
                }
            }
            div { class: "convo-list",
                if loading() {
                    Spinner {}
                } else if let Some(message) = error() {
                    div { class: "empty-state",
                        p { "{message}" }
                        button { class: "btn btn-ghost", onclick: move |_| on_retry.call(()), "Retry" }
                    }
                } else if conversations().is_empty() {
                    div { class: "empty-state",
                        p { "No conversations yet" }
                        p { class: "text-muted", "Start a new chat to begin!" }
                    }
                } else {
                    for conversation in conversations() {
                        ConversationRow {
                            key: "{conversation.id}",
                            active: active_id == Some(conversation.id),
                            conversation,
                            on_select,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ConversationRow(
    conversation: Conversation,
    active: bool,
    on_select: EventHandler<Option<i64>>,
) -> Element {
    let id = conversation.id;
    let class = if active { "convo-row active" } else { "convo-row" };
    let stamp = relative_time(&conversation.updated_at);
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| on_select.call(Some(id)),
            div { class: "convo-title", "Conversation #{conversation.id}" }
            div { class: "convo-meta",
                span { "{conversation.message_count} messages" }
                span { "{stamp}" }
            }
        }
    }
}

#[component]
fn MessageList(transcript: Vec<Message>, sending: bool) -> Element {
    rsx! {
        div { class: "chat-list",
            if transcript.is_empty() && !sending {
                div { class: "empty-state",
                    p { "Ask me to add, list, or complete your tasks." }
                    p { class: "text-muted", "e.g. \"remind me to buy milk tomorrow\"" }
                }
            }
            for message in transcript.iter().cloned() {
                MessageRow { message }
            }
            if sending {
                div { class: "message-row assistant",
                    div { class: "message-stack",
                        div { class: "bubble assistant",
                            span { class: "shimmer-text", "Thinking…" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: Message) -> Element {
    let is_user = message.role == Role::User;
    let row_class = if is_user {
        "message-row user"
    } else {
        "message-row assistant"
    };
    let meta_class = if is_user {
        "message-meta align-end"
    } else {
        "message-meta"
    };
    rsx! {
        div { class: "{row_class}",
            div { class: "message-stack",
                if is_user {
                    div { class: "bubble user", "{message.content}" }
                } else {
                    AssistantBubble { message: message.clone() }
                }
                if let Some(stamp) = format_message_timestamp(message.created_at) {
                    div { class: "{meta_class}",
                        span { class: "message-timestamp", "{stamp}" }
                    }
                }
            }
        }
    }
}

#[component]
fn AssistantBubble(message: Message) -> Element {
    let content_html = markdown_to_html(&message.content);
    let tool_count = message.tool_calls.len();

    rsx! {
        div { class: "bubble assistant",
            div { class: "md", dangerous_inner_html: "{content_html}" }
            if tool_count > 0 {
                div { class: "tool-pills",
                    span { class: "tag-pill", "ran {tool_count} action(s)" }
                    for tool in message.tool_calls.iter() {
                        span { class: "tag-pill", "{tool}" }
                    }
                }
            }
        }
        div { class: "bubble-controls",
            div { class: "actions",
                CopyButton { content: message.content.clone() }
            }
        }
    }
}

#[component]
fn CopyButton(content: String) -> Element {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = content;
        rsx! {}
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let on_copy = move |_| {
            let raw = content.clone();
            if let Ok(mut clipboard) = arboard::Clipboard::new() {
                let _ = clipboard.set_text(raw);
            }
        };
        rsx! {
            button { class: "action-btn", title: "Copy reply", onclick: on_copy, "Copy" }
        }
    }
}

#[component]
fn Composer(input: Signal<String>, sending: bool, on_send: EventHandler<String>) -> Element {
    let mut input = input;
    rsx! {
        form { class: "composer",
            div { class: "composer-inner",
                textarea {
                    rows: "1",
                    placeholder: "Type your message… (Shift+Enter for a new line)",
                    value: "{input}",
                    disabled: sending,
                    oninput: move |ev| input.set(ev.value()),
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter && !ev.modifiers().shift() {
                            ev.prevent_default();
                            on_send.call(input());
                        }
                    },
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: sending || input().trim().is_empty(),
                    onclick: move |_| on_send.call(input()),
                    "Send"
                }
            }
        }
    }
}
