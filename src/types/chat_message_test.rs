//! Tests for `ChatMessage`.

use super::{ChatMessage, Role};

#[test]
fn user_constructor_sets_role() {
  let m = ChatMessage::user("is this a macaque?");
  assert_eq!(m.role, Role::User);
  assert_eq!(m.text, "is this a macaque?");
}

#[test]
fn assistant_constructor_sets_role() {
  let m = ChatMessage::assistant(String::from("yes"));
  assert_eq!(m.role, Role::Assistant);
}
