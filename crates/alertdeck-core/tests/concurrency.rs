//! Concurrency properties of the store and its broadcast.
//!
//! Many ingest tasks race against each other and against readers; the
//! assertions check that no reader or viewer ever observes a partially
//! applied ingest and that viewers see snapshots in mutation order.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use alertdeck_core::{EventStore, StoreConfig, TOTAL_LABEL};
use alertdeck_types::{OriginId, StatSet};
use serde_json::json;

const INGESTS: usize = 64;

fn one(label: &str) -> StatSet {
    std::iter::once((label.to_owned(), 1)).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_ingests_publish_consistent_snapshots_in_order() {
    let retention = 10;
    let store = Arc::new(EventStore::new(
        &StoreConfig::with_retention(retention).broadcast_capacity(INGESTS),
    ));
    let mut viewer = store.subscribe();

    let mut handles = Vec::new();
    for i in 0..INGESTS {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .ingest(
                    OriginId::new(format!("origin-{i}")),
                    json!({ "seq": i }),
                    one("x"),
                    vec![format!("out-{i}")],
                )
                .await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // Every ingest uses a fresh origin, so the n-th published snapshot
    // must hold exactly n origins' worth of counters.
    for n in 1..=INGESTS {
        let snap = viewer.try_next().unwrap();
        let expected = i64::try_from(n).unwrap();
        assert_eq!(snap.stats.get("x"), Some(&expected));
        assert_eq!(snap.stats.get(TOTAL_LABEL), Some(&expected));
        assert_eq!(snap.events.len(), n.min(retention));
        assert_eq!(snap.outputs.len(), 1);
    }
    assert!(viewer.try_next().is_none());
    assert_eq!(viewer.dropped(), 0);
    assert_eq!(store.origin_count().await, INGESTS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_never_observe_half_applied_ingest() {
    let store = Arc::new(EventStore::new(&StoreConfig::with_retention(1000)));

    let writer = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for i in 0..200 {
                store
                    .ingest(OriginId::new(format!("o{i}")), json!(i), one("x"), Vec::new())
                    .await;
            }
        })
    };

    let reader = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for _ in 0..200 {
                let snap = store.snapshot().await;
                let events = i64::try_from(snap.events.len()).unwrap();
                // One event and one new origin per ingest, so they move together.
                assert_eq!(snap.stats.get("x").copied().unwrap_or(0), events);
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
}

#[tokio::test]
async fn slow_viewer_never_stalls_ingest() {
    let store = EventStore::new(&StoreConfig::with_retention(5).broadcast_capacity(4));
    let mut stalled = store.subscribe();

    for i in 0..100 {
        store
            .ingest(OriginId::from("o"), json!(i), one("x"), Vec::new())
            .await;
    }

    // The viewer only holds the newest snapshots; older ones were dropped.
    let mut last = None;
    while let Some(snap) = stalled.try_next() {
        last = Some(snap);
    }
    assert_eq!(stalled.dropped(), 96);
    assert_eq!(last.unwrap().events.last(), Some(&json!(99)));
}

#[tokio::test]
async fn disconnecting_viewer_leaves_others_untouched() {
    let store = EventStore::new(&StoreConfig::with_retention(5));
    let leaving = store.subscribe();
    let mut staying = store.subscribe();

    store.ingest(OriginId::from("o"), json!(1), one("x"), Vec::new()).await;
    leaving.unsubscribe();
    store.ingest(OriginId::from("o"), json!(2), one("x"), Vec::new()).await;

    assert_eq!(store.broadcaster().viewer_count(), 1);
    assert_eq!(staying.try_next().unwrap().events, vec![json!(1)]);
    assert_eq!(staying.try_next().unwrap().events, vec![json!(1), json!(2)]);
}
