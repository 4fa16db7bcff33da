use crate::utils::{is_identifier, to_identifier};

#[test]
fn identifier_accepts_plain_names() {
    assert!(is_identifier("token"));
    assert!(is_identifier("_private"));
    assert!(is_identifier("Contract2"));
}

#[test]
fn identifier_rejects_bad_names() {
    assert!(!is_identifier(""));
    assert!(!is_identifier("9lives"));
    assert!(!is_identifier("my-token"));
    assert!(!is_identifier("a b"));
}

#[test]
fn to_identifier_replaces_separators() {
    assert_eq!(to_identifier("my-token"), "my_token");
    assert_eq!(to_identifier("hello.world"), "hello_world");
    assert_eq!(to_identifier("already_fine"), "already_fine");
}

#[test]
fn to_identifier_guards_leading_digit() {
    assert_eq!(to_identifier("42"), "_42");
    assert_eq!(to_identifier(""), "_");
}

#[test]
fn to_identifier_is_idempotent() {
    let once = to_identifier("x-y.z");
    assert_eq!(to_identifier(&once), once);
    assert!(is_identifier(&once));
}
