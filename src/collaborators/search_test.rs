//! Tests for the search stub.

use crate::types::CallStatus;

use super::{StubSearch, WebSearch};

#[tokio::test]
async fn stub_search_is_deterministic() {
  let a = StubSearch.search("Macaca fuscata", 5).await;
  let b = StubSearch.search("Macaca fuscata", 5).await;
  assert_eq!(a, b);
  assert_eq!(a.status, CallStatus::Ok);
  assert_eq!(a.results.len(), 2);
}

#[tokio::test]
async fn stub_search_respects_max_results() {
  let s = StubSearch.search("Macaca fuscata", 1).await;
  assert_eq!(s.results.len(), 1);
}

#[test]
fn stub_search_empty_query_is_empty() {
  let s = tokio_test::block_on(StubSearch.search("  ", 5));
  assert_eq!(s.status, CallStatus::Empty);
  assert!(s.results.is_empty());
}
