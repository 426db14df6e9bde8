//! Chat session manager: the conversation-scoped transcript state machine
//! behind the assistant panel. Two states, `NoConversation` (id `None`) and
//! `ConversationActive(id)`; sends are optimistic and failures append a
//! synthetic assistant reply instead of retrying.

use crate::api::ApiError;
use crate::types::{ChatResponse, Message, MessageId, MessageRecord, Role};
use crate::views::shared::{now_utc, parse_server_timestamp};
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed cap on sidebar entries after empty conversations are dropped.
pub const CONVERSATION_DISPLAY_CAP: usize = 2;

static PENDING_IDS: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(1));

pub fn next_pending_id() -> u64 {
    PENDING_IDS.fetch_add(1, Ordering::Relaxed)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
    conversation_id: Option<i64>,
    transcript: Vec<Message>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation_id(&self) -> Option<i64> {
        self.conversation_id
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    /// "New Chat": back to `NoConversation` unconditionally, no server call.
    pub fn reset(&mut self) {
        self.conversation_id = None;
        self.transcript.clear();
    }

    /// Enter a stored conversation: the fetched history replaces whatever
    /// the transcript held.
    pub fn load_history(&mut self, conversation_id: i64, records: Vec<MessageRecord>) {
        self.conversation_id = Some(conversation_id);
        self.transcript = records
            .into_iter()
            .map(|record| message_from_record(record, conversation_id))
            .collect();
    }

    /// Optimistically append the user's message ahead of the request.
    pub fn push_user(&mut self, content: &str) -> MessageId {
        let id = MessageId::Pending(next_pending_id());
        self.transcript.push(Message {
            id,
            role: Role::User,
            content: content.to_string(),
            conversation_id: self.conversation_id,
            created_at: Some(now_utc()),
            tool_calls: Vec::new(),
        });
        id
    }

    /// Fold a successful reply in: adopt the server's conversation id and
    /// append exactly one assistant message. Returns whether the id was
    /// newly adopted (first turn of a fresh conversation), so the caller can
    /// refresh the sidebar.
    pub fn apply_reply(&mut self, response: &ChatResponse) -> bool {
        let adopted = self.conversation_id.is_none();
        self.conversation_id = Some(response.conversation_id);
        let tool_calls = response
            .tool_calls
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|call| call.tool.clone())
            .collect();
        self.transcript.push(Message {
            id: MessageId::Pending(next_pending_id()),
            role: Role::Assistant,
            content: response.response.clone(),
            conversation_id: Some(response.conversation_id),
            created_at: Some(now_utc()),
            tool_calls,
        });
        adopted
    }

    /// A failed send keeps the optimistic user message and answers it with a
    /// synthetic assistant reply. When the conversation itself is gone the
    /// id resets so the next send starts a new one.
    pub fn apply_failure(&mut self, error: &ApiError) {
        self.transcript.push(Message {
            id: MessageId::Pending(next_pending_id()),
            role: Role::Assistant,
            content: failure_reply(error),
            conversation_id: self.conversation_id,
            created_at: Some(now_utc()),
            tool_calls: Vec::new(),
        });
        if error.conversation_gone() {
            self.conversation_id = None;
        }
    }
}

pub fn failure_reply(error: &ApiError) -> String {
    format!(
        "❌ {error}\n\nIf this keeps happening, try:\n- starting a new conversation\n- checking your connection\n- refreshing the page"
    )
}

fn message_from_record(record: MessageRecord, conversation_id: i64) -> Message {
    Message {
        id: MessageId::Confirmed(record.id),
        role: record.role,
        content: record.content,
        conversation_id: Some(conversation_id),
        created_at: parse_server_timestamp(&record.created_at),
        tool_calls: Vec::new(),
    }
}

/// Sidebar contents: conversations that actually have messages, capped for
/// display. No recency sort is requested from the server, so this is a plain
/// truncation, not "latest N".
pub fn visible_conversations(
    all: Vec<crate::types::Conversation>,
) -> Vec<crate::types::Conversation> {
    all.into_iter()
        .filter(|conversation| conversation.message_count > 0)
        .take(CONVERSATION_DISPLAY_CAP)
        .collect()
}
