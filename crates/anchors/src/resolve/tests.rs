use super::*;
use std::{sync::Arc, time::Duration};

#[test]
fn resolves_once() {
    let cell = ResolveOnce::new(Some(1));
    assert_eq!(cell.get(), Resolution::Pending(Some(1)));
    assert_eq!(cell.value(), Some(1));
    assert!(!cell.is_resolved());

    assert!(cell.resolve(2));
    assert_eq!(cell.get(), Resolution::Resolved(2));
    assert!(cell.is_resolved());

    // Later resolutions change nothing.
    assert!(!cell.resolve(3));
    assert_eq!(cell.get(), Resolution::Resolved(2));
    assert_eq!(cell.value(), Some(2));
}

#[test]
fn pending_without_placeholder() {
    let cell = ResolveOnce::<u32>::new(None);
    assert_eq!(cell.value(), None);
    assert!(cell.resolve(7));
    assert_eq!(cell.value(), Some(7));
}

#[tokio::test]
async fn resolved_waits_for_resolution() {
    let cell = Arc::new(ResolveOnce::new(Some("placeholder".to_string())));
    let waiter = {
        let cell = cell.clone();
        tokio::spawn(async move { cell.resolved().await })
    };
    tokio::task::yield_now().await;
    assert!(!waiter.is_finished());

    cell.resolve("value".to_string());
    assert_eq!(waiter.await.unwrap(), "value");

    // Already resolved.
    assert_eq!(cell.resolved().await, "value");
}

#[tokio::test]
async fn unresolved_stays_pending() {
    let cell = ResolveOnce::new(Some(1u8));
    let r = tokio::time::timeout(Duration::from_millis(50), cell.resolved()).await;
    assert!(r.is_err());
    assert_eq!(cell.get(), Resolution::Pending(Some(1)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_readers_never_see_pending_after_resolution() {
    let cell = Arc::new(ResolveOnce::new(Some(0u64)));
    let readers: Vec<_> = (0..8)
        .map(|_| {
            let cell = cell.clone();
            tokio::spawn(async move {
                let mut seen_resolved = false;
                for _ in 0..1_000 {
                    match cell.get() {
                        Resolution::Pending(value) => {
                            assert!(!seen_resolved, "reverted to pending");
                            assert_eq!(value, Some(0));
                        }
                        Resolution::Resolved(value) => {
                            seen_resolved = true;
                            assert_eq!(value, 42);
                        }
                    }
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    tokio::task::yield_now().await;
    cell.resolve(42);
    for reader in readers {
        reader.await.unwrap();
    }
    assert_eq!(cell.get(), Resolution::Resolved(42));
}
