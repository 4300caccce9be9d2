use std::sync::Arc;
use std::time::Duration;

use duallist_types::models::AddPlacement;
use duallist_types::ListKind;

use super::*;
use crate::store::ListStore;

fn queue_with(store: ListStore) -> (Arc<MutationQueue>, SharedStore, Arc<InFlightRegistry>) {
    let shared = store.into_shared();
    let in_flight = Arc::new(InFlightRegistry::new());
    let queue = Arc::new(MutationQueue::new(
        "test",
        Duration::from_millis(20),
        shared.clone(),
        in_flight.clone(),
    ));
    (queue, shared, in_flight)
}

fn add(id: &str) -> Mutation {
    Mutation::Add { id: id.to_string(), placement: AddPlacement::Back }
}

#[tokio::test]
async fn test_flush_applies_in_registration_order() {
    let (queue, store, _) = queue_with(ListStore::new());
    queue.enqueue(add("1"));
    queue.enqueue(add("2"));
    queue.enqueue(add("3"));

    let outcome = queue.flush_now().await;
    assert_eq!(outcome.report().map(|r| r.applied), Some(3));
    assert_eq!(store.read().await.available().ids(), vec!["1", "2", "3"]);
    assert_eq!(queue.pending_len(), 0);
}

#[tokio::test]
async fn test_same_key_supersedes_pending_mutation() {
    let (queue, store, _) = queue_with(ListStore::with_ids(["5", "7"], ["a", "b"]));
    let first = queue.enqueue(Mutation::Select { id: "7".to_string(), anchor: Anchor::Tail });
    let second = queue.enqueue(Mutation::Select {
        id: "7".to_string(),
        anchor: Anchor::Before("a".to_string()),
    });
    assert_eq!(first, EnqueueOutcome::Queued);
    assert_eq!(second, EnqueueOutcome::Superseded);
    assert_eq!(queue.pending_len(), 1);

    let outcome = queue.flush_now().await;
    assert_eq!(outcome.report().map(|r| r.total()), Some(1));
    assert_eq!(store.read().await.selected().ids(), vec!["7", "a", "b"]);
    assert_eq!(queue.stats().total_superseded, 1);
}

#[tokio::test]
async fn test_superseding_moves_key_to_batch_tail() {
    let (queue, _, _) = queue_with(ListStore::new());
    queue.enqueue(Mutation::Reorder {
        list: ListKind::Selected,
        from_id: "1".to_string(),
        to_id: None,
    });
    queue.enqueue(Mutation::Select { id: "8".to_string(), anchor: Anchor::Tail });
    queue.enqueue(Mutation::Reorder {
        list: ListKind::Selected,
        from_id: "8".to_string(),
        to_id: None,
    });
    assert_eq!(queue.pending_keys(), vec!["select:8", "reorder"]);
}

#[tokio::test]
async fn test_failed_task_does_not_abort_batch() {
    let (queue, store, _) = queue_with(ListStore::with_ids(["1"], Vec::<String>::new()));
    queue.enqueue(add("0"));
    queue.enqueue(add("1"));
    queue.enqueue(add("2"));

    let Some(report) = queue.flush_now().await.report().cloned() else {
        panic!("expected a flush report");
    };
    assert_eq!(report.applied, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(store.read().await.available().ids(), vec!["1", "0", "2"]);
    assert_eq!(queue.stats().total_failed, 1);
}

#[tokio::test]
async fn test_flush_with_nothing_pending_is_idle() {
    let (queue, _, _) = queue_with(ListStore::new());
    assert_eq!(queue.flush_now().await, FlushOutcome::Idle);
    assert_eq!(queue.stats().total_flushes, 0);
}

#[tokio::test]
async fn test_flush_now_is_not_reentrant() {
    let (queue, store, _) = queue_with(ListStore::new());
    queue.enqueue(add("1"));

    // Hold the store so the first flush parks mid-batch.
    let blocker = store.write().await;
    let running = tokio::spawn({
        let queue = queue.clone();
        async move { queue.flush_now().await }
    });
    while !queue.is_flushing() {
        tokio::task::yield_now().await;
    }

    queue.enqueue(add("2"));
    assert_eq!(queue.flush_now().await, FlushOutcome::AlreadyRunning);
    drop(blocker);

    let first = running.await.expect("flush task panicked");
    // The batch is taken once the store is held, so the late enqueue joined it.
    assert_eq!(first.report().map(|r| r.applied), Some(2));
    assert_eq!(store.read().await.available().ids(), vec!["1", "2"]);

    assert_eq!(queue.flush_now().await, FlushOutcome::Idle);
    assert_eq!(queue.stats().total_flushes, 1);
}

#[tokio::test]
async fn test_cancelled_flush_keeps_pending_batch() {
    let (queue, store, in_flight) = queue_with(ListStore::with_ids(["1"], Vec::<String>::new()));
    assert!(in_flight.try_mark("1", InFlightKind::Select).is_ok());
    queue.enqueue(Mutation::Select { id: "1".to_string(), anchor: Anchor::Tail });

    let blocker = store.write().await;
    let parked = tokio::spawn({
        let queue = queue.clone();
        async move { queue.flush_now().await }
    });
    while !queue.is_flushing() {
        tokio::task::yield_now().await;
    }
    parked.abort();
    assert!(parked.await.is_err_and(|e| e.is_cancelled()));
    drop(blocker);

    assert!(!queue.is_flushing());
    assert_eq!(queue.pending_len(), 1);

    let outcome = queue.flush_now().await;
    assert_eq!(outcome.report().map(|r| r.applied), Some(1));
    assert_eq!(store.read().await.selected().ids(), vec!["1"]);
    assert!(in_flight.is_empty());
}

#[tokio::test]
async fn test_flush_releases_in_flight_marks() {
    let (queue, _, in_flight) = queue_with(ListStore::with_ids(["3"], Vec::<String>::new()));
    assert!(in_flight.try_mark("3", InFlightKind::Select).is_ok());
    assert!(in_flight.try_mark("9", InFlightKind::Select).is_ok());
    queue.enqueue(Mutation::Select { id: "3".to_string(), anchor: Anchor::Tail });
    queue.enqueue(Mutation::Select { id: "9".to_string(), anchor: Anchor::Tail });

    let report = queue.flush_now().await;
    assert_eq!(report.report().map(|r| (r.applied, r.skipped)), Some((1, 1)));
    assert!(in_flight.is_empty());
}

#[tokio::test]
async fn test_periodic_loop_flushes_and_drains_on_shutdown() {
    let (queue, store, _) = queue_with(ListStore::new());
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let handle = queue.start(shutdown_rx);

    queue.enqueue(add("tick"));
    tokio::time::timeout(Duration::from_secs(2), async {
        while !store.read().await.available().contains("tick") {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("periodic flush never ran");

    queue.enqueue(add("last"));
    shutdown_tx.send(true).expect("loop dropped receiver");
    handle.await.expect("flush loop panicked");

    assert!(store.read().await.available().contains("last"));
    assert_eq!(queue.pending_len(), 0);
}
