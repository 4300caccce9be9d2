#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::unwrap_used, reason = "integration test: panics are the assertion mechanism")]

use std::collections::HashSet;
use std::sync::Arc;

use duallist_core::{Anchor, ListStore, MutationDispatcher};
use duallist_types::{AppConfig, ListKind, MutationError};

fn assert_single_membership(store: &ListStore) {
    let available: HashSet<String> = store.available().ids().into_iter().collect();
    let selected: HashSet<String> = store.selected().ids().into_iter().collect();
    assert_eq!(available.len(), store.available().len(), "duplicate in all items");
    assert_eq!(selected.len(), store.selected().len(), "duplicate in selected");
    assert!(available.is_disjoint(&selected), "id present in both collections");
}

#[tokio::test]
async fn test_interleaved_intents_keep_single_membership() {
    let d = MutationDispatcher::new(ListStore::seeded(50), &AppConfig::default());

    for round in 0..5_usize {
        for n in (1..=50_usize).filter(|n| n % 5 == round) {
            let id = n.to_string();
            let anchor = Anchor::Index(n % 3);
            // Whichever direction applies, the other is a no-op at flush time.
            let _ = d.select(Some(&id), anchor.clone());
            let _ = d.deselect(Some(&id), anchor);
        }
        let _ = d.add(Some(&format!("new-{round}"))).await;
        let _ = d.reorder_all(Some("50"), Some("1")).await;
        d.flush().await;

        let store = d.store().read().await;
        assert_single_membership(&store);
        let stats = store.stats();
        assert_eq!(stats.available + stats.selected, 50 + round + 1);
    }
}

#[tokio::test]
async fn test_concurrent_selects_of_one_id_accept_exactly_one() {
    let d = Arc::new(MutationDispatcher::new(ListStore::seeded(10), &AppConfig::default()));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let d = d.clone();
        handles.push(tokio::spawn(async move { d.select(Some("7"), Anchor::Tail) }));
    }

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(err) => assert_eq!(err, MutationError::AlreadyProcessing { id: "7".to_string() }),
        }
    }
    assert_eq!(accepted, 1);

    d.flush().await;
    let store = d.store().read().await;
    assert_eq!(store.selected().ids(), vec!["7"]);
    assert_single_membership(&store);
}

#[tokio::test]
async fn test_flush_and_intents_race_without_losing_items() {
    let d = Arc::new(MutationDispatcher::new(ListStore::seeded(200), &AppConfig::default()));

    let writer = {
        let d = d.clone();
        tokio::spawn(async move {
            for n in 1..=200_usize {
                let _ = d.select(Some(&n.to_string()), Anchor::Tail);
                if n % 10 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        })
    };
    let flusher = {
        let d = d.clone();
        tokio::spawn(async move {
            for _ in 0..20 {
                d.flush().await;
                tokio::task::yield_now().await;
            }
        })
    };
    writer.await.unwrap();
    flusher.await.unwrap();
    d.drain().await;

    let store = d.store().read().await;
    assert_single_membership(&store);
    assert_eq!(store.stats().selected, 200);
    assert!(store.collection(ListKind::Available).is_empty());
    assert!(d.in_flight().is_empty());
}
