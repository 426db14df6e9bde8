//! Chat session state machine tests: conversation adoption, optimistic
//! transcript behavior, and failure handling.

use doit::api::ApiError;
use doit::chat::{CONVERSATION_DISPLAY_CAP, ChatSession, visible_conversations};
use doit::types::{ChatResponse, Conversation, MessageId, MessageRecord, Role, ToolCall};

fn reply(conversation_id: i64, text: &str) -> ChatResponse {
    ChatResponse {
        conversation_id,
        response: text.to_string(),
        tool_calls: None,
    }
}

fn record(id: i64, role: Role, content: &str) -> MessageRecord {
    MessageRecord {
        id,
        role,
        content: content.to_string(),
        created_at: "2026-02-15T10:30:00".to_string(),
    }
}

#[test]
fn first_send_adopts_the_server_conversation() {
    let mut session = ChatSession::new();
    assert_eq!(session.conversation_id(), None);

    session.push_user("add a task for tomorrow");
    let adopted = session.apply_reply(&reply(42, "ok"));

    assert!(adopted);
    assert_eq!(session.conversation_id(), Some(42));

    let assistant: Vec<_> = session
        .transcript()
        .iter()
        .filter(|message| message.role == Role::Assistant)
        .collect();
    assert_eq!(assistant.len(), 1);
    assert_eq!(assistant[0].content, "ok");
}

#[test]
fn later_sends_keep_the_existing_conversation() {
    let mut session = ChatSession::new();
    session.push_user("first");
    assert!(session.apply_reply(&reply(7, "hello")));

    session.push_user("second");
    let adopted = session.apply_reply(&reply(7, "again"));
    assert!(!adopted);
    assert_eq!(session.conversation_id(), Some(7));
    assert_eq!(session.transcript().len(), 4);
}

#[test]
fn optimistic_messages_carry_pending_ids() {
    let mut session = ChatSession::new();
    let first = session.push_user("one");
    let second = session.push_user("two");

    let (MessageId::Pending(a), MessageId::Pending(b)) = (first, second) else {
        panic!("optimistic ids must be pending");
    };
    assert!(b > a);
}

#[test]
fn history_load_replaces_the_transcript_with_confirmed_rows() {
    let mut session = ChatSession::new();
    session.push_user("stale optimistic entry");

    session.load_history(
        9,
        vec![
            record(100, Role::User, "add milk"),
            record(101, Role::Assistant, "Added \"milk\" to your list."),
        ],
    );

    assert_eq!(session.conversation_id(), Some(9));
    assert_eq!(session.transcript().len(), 2);
    assert_eq!(session.transcript()[0].id, MessageId::Confirmed(100));
    assert_eq!(session.transcript()[1].role, Role::Assistant);
    // Ordering is the server's: creation-time ascending.
    assert!(session.transcript()[0].created_at.is_some());
}

#[test]
fn new_chat_resets_unconditionally() {
    let mut session = ChatSession::new();
    session.push_user("hi");
    session.apply_reply(&reply(3, "hello"));

    session.reset();
    assert_eq!(session.conversation_id(), None);
    assert!(session.is_empty());
}

#[test]
fn failures_keep_the_optimistic_message_and_answer_synthetically() {
    let mut session = ChatSession::new();
    session.push_user("hello?");
    session.apply_reply(&reply(5, "hi"));

    session.push_user("are you there?");
    session.apply_failure(&ApiError::Api {
        code: None,
        message: "AI service unavailable. Please try again later.".to_string(),
    });

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 4);
    assert_eq!(transcript[2].content, "are you there?");
    let synthetic = &transcript[3];
    assert_eq!(synthetic.role, Role::Assistant);
    assert!(synthetic.content.contains("AI service unavailable"));
    assert!(synthetic.content.contains("new conversation"));
    // Not a conversation-scoped failure: the id survives.
    assert_eq!(session.conversation_id(), Some(5));
}

#[test]
fn conversation_gone_resets_the_identifier() {
    let mut session = ChatSession::new();
    session.push_user("hi");
    session.apply_reply(&reply(12, "hello"));

    session.push_user("still there?");
    session.apply_failure(&ApiError::Api {
        code: Some("CONVERSATION_NOT_FOUND".to_string()),
        message: "Conversation 12 is gone".to_string(),
    });
    assert_eq!(session.conversation_id(), None);

    // Wording-only variant, for backends without machine codes.
    let mut session = ChatSession::new();
    session.apply_reply(&reply(13, "hello"));
    session.apply_failure(&ApiError::Api {
        code: None,
        message: "Conversation 13 not found".to_string(),
    });
    assert_eq!(session.conversation_id(), None);
}

#[test]
fn tool_calls_surface_as_names() {
    let mut session = ChatSession::new();
    session.push_user("add bread and milk");
    session.apply_reply(&ChatResponse {
        conversation_id: 1,
        response: "Done, both added.".to_string(),
        tool_calls: Some(vec![
            ToolCall {
                tool: "add_task".to_string(),
                arguments: serde_json::json!({"title": "bread"}),
                result: serde_json::json!({"id": 10}),
            },
            ToolCall {
                tool: "add_task".to_string(),
                arguments: serde_json::json!({"title": "milk"}),
                result: serde_json::json!({"id": 11}),
            },
        ]),
    });

    let assistant = session.transcript().last().expect("reply appended");
    assert_eq!(assistant.tool_calls, vec!["add_task", "add_task"]);
}

#[test]
fn sidebar_drops_empty_conversations_and_caps_the_rest() {
    let conversation = |id: i64, count: u32| Conversation {
        id,
        created_at: String::new(),
        updated_at: String::new(),
        message_count: count,
    };

    let visible = visible_conversations(vec![
        conversation(1, 0),
        conversation(2, 4),
        conversation(3, 0),
        conversation(4, 2),
        conversation(5, 9),
    ]);

    assert_eq!(visible.len(), CONVERSATION_DISPLAY_CAP);
    // First N after filtering, not "latest N" — no server-side sort is asked for.
    assert_eq!(visible[0].id, 2);
    assert_eq!(visible[1].id, 4);
}
