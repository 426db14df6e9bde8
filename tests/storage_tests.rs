//! Round-trip tests for the on-device key/value store (file-backed on
//! native targets). Keys here are scratch keys so the developer's real
//! token is never touched.

use doit::storage::{get, remove, set};

#[test]
fn test_set_and_get() {
    let key = "test_doit_roundtrip";
    let value = r#"{"kind":"scratch","n":42}"#;

    set(key, value).expect("Failed to write storage");
    assert_eq!(get(key), Some(value.to_string()));

    // Cleanup
    remove(key);
}

#[test]
fn test_get_nonexistent() {
    assert_eq!(get("test_doit_never_written"), None);
}

#[test]
fn test_overwrite() {
    let key = "test_doit_overwrite";

    set(key, "first").expect("Failed to write storage");
    set(key, "second").expect("Failed to write storage");
    assert_eq!(get(key), Some("second".to_string()));

    remove(key);
}

#[test]
fn test_remove() {
    let key = "test_doit_remove";

    set(key, "value").expect("Failed to write storage");
    assert!(get(key).is_some());

    remove(key);
    assert!(get(key).is_none());

    // Removing again is a no-op.
    remove(key);
}
