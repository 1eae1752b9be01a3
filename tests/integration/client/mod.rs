//! Client session tests

mod publish_test;

use chatcast::client::{MessageList, MessageStore};
use std::time::Duration;

/// Wait until the store's list satisfies `predicate`
pub async fn wait_for_list<F>(store: &MessageStore, predicate: F) -> MessageList
where
    F: FnMut(&MessageList) -> bool,
{
    let mut updates = store.subscribe();
    let list = tokio::time::timeout(Duration::from_secs(5), updates.wait_for(predicate))
        .await
        .expect("list did not reach the expected state in time")
        .expect("store dropped");
    list.clone()
}
