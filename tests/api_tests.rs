//! Error-normalization tests for the REST client.

use doit::api::{ApiError, StatusCode, normalize_failure};

#[test]
fn unauthorized_maps_to_the_logout_variant() {
    let error = normalize_failure(StatusCode::UNAUTHORIZED, r#"{"detail":"Not authenticated"}"#);
    assert!(error.is_unauthorized());
}

#[test]
fn string_detail_wins() {
    let error = normalize_failure(
        StatusCode::NOT_FOUND,
        r#"{"detail":"Task 9 not found","message":"ignored"}"#,
    );
    assert_eq!(error.to_string(), "Task 9 not found");
}

#[test]
fn validation_arrays_flatten_to_field_message_pairs() {
    let body = r#"{"detail":[
        {"loc":["body","title"],"msg":"field required","type":"value_error.missing"},
        {"loc":["body","priority"],"msg":"unexpected value","type":"value_error"}
    ]}"#;
    let error = normalize_failure(StatusCode::UNPROCESSABLE_ENTITY, body);
    assert_eq!(
        error.to_string(),
        "title: field required, priority: unexpected value"
    );
}

#[test]
fn message_then_error_field_priority() {
    let error = normalize_failure(StatusCode::BAD_REQUEST, r#"{"message":"bad input"}"#);
    assert_eq!(error.to_string(), "bad input");

    let error = normalize_failure(StatusCode::BAD_REQUEST, r#"{"error":"nope"}"#);
    assert_eq!(error.to_string(), "nope");
}

#[test]
fn non_json_bodies_surface_verbatim() {
    let error = normalize_failure(StatusCode::BAD_GATEWAY, "upstream exploded");
    assert_eq!(error.to_string(), "upstream exploded");
}

#[test]
fn empty_bodies_fall_back_to_the_status() {
    let error = normalize_failure(StatusCode::INTERNAL_SERVER_ERROR, "");
    assert!(error.to_string().contains("500"));
}

#[test]
fn machine_codes_are_preserved() {
    let error = normalize_failure(
        StatusCode::NOT_FOUND,
        r#"{"detail":"Conversation 7 is gone","code":"CONVERSATION_NOT_FOUND"}"#,
    );
    assert_eq!(error.code(), Some("CONVERSATION_NOT_FOUND"));
    assert!(error.conversation_gone());
}

#[test]
fn conversation_gone_switches_on_code_before_wording() {
    let coded = ApiError::Api {
        code: Some("CONVERSATION_FORBIDDEN".to_string()),
        message: "whatever the copy says".to_string(),
    };
    assert!(coded.conversation_gone());

    // A code that isn't conversation-related never triggers the reset, even
    // with matching words in the message.
    let other_code = ApiError::Api {
        code: Some("TASK_NOT_FOUND".to_string()),
        message: "conversation not found".to_string(),
    };
    assert!(!other_code.conversation_gone());
}

#[test]
fn conversation_gone_falls_back_to_wording_without_a_code() {
    let not_found = ApiError::Api {
        code: None,
        message: "Conversation 42 not found".to_string(),
    };
    assert!(not_found.conversation_gone());

    let foreign = ApiError::Api {
        code: None,
        message: "Conversation does not belong to user".to_string(),
    };
    assert!(foreign.conversation_gone());

    let unrelated = ApiError::Api {
        code: None,
        message: "AI service unavailable. Please try again later.".to_string(),
    };
    assert!(!unrelated.conversation_gone());

    assert!(!ApiError::Unauthorized.conversation_gone());
}

#[test]
fn connect_errors_carry_the_backend_address() {
    let error = ApiError::Connect("http://localhost:8000".to_string());
    let text = error.to_string();
    assert!(text.contains("Cannot connect"));
    assert!(text.contains("http://localhost:8000"));
}
