//! Token decoding tests for the session layer.
//!
//! Tokens here are JWT-shaped (`header.payload.signature`) with hand-encoded
//! payload segments; the client never verifies signatures, it only reads the
//! payload.

use doit::session::decode_user;

const HEADER: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";

// {"sub":"u1","email":"a@b.com"} base64url, no padding
const PAYLOAD_FULL: &str = "eyJzdWIiOiJ1MSIsImVtYWlsIjoiYUBiLmNvbSJ9";
// {"sub":"user-17"}
const PAYLOAD_SUB_ONLY: &str = "eyJzdWIiOiJ1c2VyLTE3In0";
// {"email":"x@y.z"} — no sub claim
const PAYLOAD_NO_SUB: &str = "eyJlbWFpbCI6InhAeS56In0";
// {"sub":"u12"} standard alphabet with '=' padding
const PAYLOAD_PADDED: &str = "eyJzdWIiOiJ1MTIifQ==";

fn token(payload: &str) -> String {
    format!("{HEADER}.{payload}.signature")
}

#[test]
fn decodes_sub_and_email() {
    let user = decode_user(&token(PAYLOAD_FULL)).expect("token should decode");
    assert_eq!(user.id, "u1");
    assert_eq!(user.email, "a@b.com");
}

#[test]
fn email_falls_back_to_sub() {
    let user = decode_user(&token(PAYLOAD_SUB_ONLY)).expect("token should decode");
    assert_eq!(user.id, "user-17");
    assert_eq!(user.email, "user-17");
}

#[test]
fn missing_sub_is_no_user() {
    assert_eq!(decode_user(&token(PAYLOAD_NO_SUB)), None);
}

#[test]
fn padded_standard_alphabet_still_decodes() {
    let user = decode_user(&token(PAYLOAD_PADDED)).expect("token should decode");
    assert_eq!(user.id, "u12");
}

#[test]
fn malformed_tokens_are_soft_failures() {
    assert_eq!(decode_user(""), None);
    assert_eq!(decode_user("not-a-jwt"), None);
    assert_eq!(decode_user("only.two"), None);
    assert_eq!(decode_user(&token("!!!not-base64!!!")), None);
    // valid base64, invalid JSON
    assert_eq!(decode_user(&token("bm90LWpzb24")), None);
}
