// Unit tests for Swipe Match

use swipe_match::core::keys::StoreKey;
use swipe_match::core::procedure::SWIPE_AND_CHECK_MATCH;
use swipe_match::error::SwipeError;
use swipe_match::models::SwipeAction;
use swipe_match::services::{MemoryStore, SwipeStore};

fn args(from: &str, to: &str, action: &str) -> Vec<String> {
    vec![from.to_string(), to.to_string(), action.to_string()]
}

#[test]
fn test_pair_key_symmetry() {
    for (a, b) in [("alice", "bob"), ("user1", "user10"), ("Zed", "amy")] {
        assert_eq!(StoreKey::swipes(a, b), StoreKey::swipes(b, a));
    }
}

#[test]
fn test_pair_key_orders_lexicographically() {
    assert_eq!(StoreKey::swipes("user9", "user10"), "swipes:user10:user9");
}

#[test]
fn test_action_round_trip_strings() {
    for action in [SwipeAction::Like, SwipeAction::Dislike] {
        assert_eq!(action.as_str().parse::<SwipeAction>().unwrap(), action);
    }
}

#[tokio::test]
async fn test_store_procedure_records_last_action() {
    let store = MemoryStore::new();
    store.register_procedures().await.unwrap();
    let keys = vec![StoreKey::swipes("amy", "ben")];

    let result = store
        .run_atomic_procedure(SWIPE_AND_CHECK_MATCH, &keys, &args("amy", "ben", "dislike"))
        .await
        .unwrap();
    assert_eq!(result, 0);

    // Amy changes her mind, Ben's like then creates the match
    store
        .run_atomic_procedure(SWIPE_AND_CHECK_MATCH, &keys, &args("amy", "ben", "like"))
        .await
        .unwrap();
    let result = store
        .run_atomic_procedure(SWIPE_AND_CHECK_MATCH, &keys, &args("ben", "amy", "like"))
        .await
        .unwrap();
    assert_eq!(result, 1);
}

#[tokio::test]
async fn test_store_procedure_rejects_bad_action_without_mutation() {
    let store = MemoryStore::new();
    store.register_procedures().await.unwrap();
    let keys = vec![StoreKey::swipes("amy", "ben")];

    store
        .run_atomic_procedure(SWIPE_AND_CHECK_MATCH, &keys, &args("ben", "amy", "like"))
        .await
        .unwrap();
    let err = store
        .run_atomic_procedure(SWIPE_AND_CHECK_MATCH, &keys, &args("amy", "ben", "Like"))
        .await
        .unwrap_err();
    assert_eq!(err, SwipeError::InvalidAction("Like".to_string()));

    assert!(store.members_of(&StoreKey::matches("amy")).await.unwrap().is_empty());
}
