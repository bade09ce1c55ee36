//! Integration tests for the event broadcaster's delivery and
//! cancellation contract.

#![allow(
    clippy::unwrap_used,
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing
)]

use std::time::Duration;

use futures::StreamExt;
use switchboard_broadcast::{BroadcastError, Broadcaster, Topic};

const QUIET: Duration = Duration::from_millis(50);

#[tokio::test]
async fn test_subscriber_before_publish_receives() {
    let broadcaster = Broadcaster::new();
    let mut sub = broadcaster.subscribe("personAdded").unwrap();

    assert_eq!(broadcaster.publish("personAdded", String::from("ann")), 1);

    let event = sub.recv().await.unwrap();
    assert_eq!(event.payload(), "ann");
    assert_eq!(event.topic(), &Topic::from("personAdded"));
}

#[tokio::test]
async fn test_subscriber_after_publish_never_receives() {
    let broadcaster = Broadcaster::new();
    broadcaster.publish("personAdded", 1_u32);

    let mut late = broadcaster.subscribe("personAdded").unwrap();
    assert!(tokio::time::timeout(QUIET, late.recv()).await.is_err());

    broadcaster.publish("personAdded", 2_u32);
    assert_eq!(late.recv().await.map(|e| *e.payload()), Some(2));
}

#[tokio::test]
async fn test_topics_are_isolated() {
    let broadcaster = Broadcaster::new();
    let mut people = broadcaster.subscribe("personAdded").unwrap();

    assert_eq!(broadcaster.publish("orderPlaced", 7_u32), 0);
    assert!(tokio::time::timeout(QUIET, people.recv()).await.is_err());
}

#[tokio::test]
async fn test_waiting_consumer_is_woken_by_publish() {
    let broadcaster = Broadcaster::new();
    let mut sub = broadcaster.subscribe("t").unwrap();

    let consumer = tokio::spawn(async move { sub.recv().await.map(|e| *e.payload()) });
    tokio::task::yield_now().await;

    broadcaster.publish("t", 42_u64);
    assert_eq!(consumer.await.unwrap(), Some(42));
}

#[tokio::test]
async fn test_delivery_is_fifo() {
    let broadcaster = Broadcaster::new();
    let sub = broadcaster.subscribe("t").unwrap();

    for n in 0..10_u32 {
        broadcaster.publish("t", n);
    }

    let received: Vec<u32> = sub.take(10).map(|e| *e.payload()).collect().await;
    assert_eq!(received, (0..10).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_concurrent_subscribers_see_same_order() {
    let broadcaster = Broadcaster::new();
    let first = broadcaster.subscribe("t").unwrap();
    let second = broadcaster.subscribe("t").unwrap();

    let collect = |sub: switchboard_broadcast::Subscription<u32>| {
        tokio::spawn(async move { sub.take(40).map(|e| e.sequence()).collect::<Vec<_>>().await })
    };
    let first = collect(first);
    let second = collect(second);

    let mut publishers = Vec::new();
    for p in 0..4_u32 {
        let broadcaster = broadcaster.clone();
        publishers.push(tokio::spawn(async move {
            for n in 0..10_u32 {
                broadcaster.publish("t", p * 100 + n);
                tokio::task::yield_now().await;
            }
        }));
    }
    for publisher in publishers {
        publisher.await.unwrap();
    }

    let first = first.await.unwrap();
    let second = second.await.unwrap();
    assert_eq!(first.len(), 40);
    assert_eq!(first, second);
    assert!(first.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_unsubscribe_stops_delivery_and_is_idempotent() {
    let broadcaster = Broadcaster::new();
    let mut sub = broadcaster.subscribe("t").unwrap();

    broadcaster.publish("t", 1_u32);
    sub.unsubscribe();
    sub.unsubscribe();

    assert!(!sub.is_active());
    assert_eq!(broadcaster.subscriber_count("t"), 0);
    assert_eq!(broadcaster.publish("t", 2_u32), 0);
    // Even the event queued before unsubscribing is not delivered.
    assert!(sub.recv().await.is_none());
    assert!(sub.next().await.is_none());
}

#[tokio::test]
async fn test_unsubscribe_racing_publish() {
    let broadcaster = Broadcaster::new();
    let mut sub = broadcaster.subscribe("t").unwrap();

    let publisher = {
        let broadcaster = broadcaster.clone();
        tokio::spawn(async move {
            for n in 0..1_000_u32 {
                broadcaster.publish("t", n);
                if n % 50 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        })
    };

    tokio::task::yield_now().await;
    sub.unsubscribe();
    publisher.await.unwrap();

    assert!(sub.recv().await.is_none());
    assert!(broadcaster.topics().is_empty());
}

#[tokio::test]
async fn test_dropping_stream_deregisters() {
    let broadcaster: Broadcaster<u32> = Broadcaster::new();
    let sub = broadcaster.subscribe("t").unwrap();
    let task = tokio::spawn(async move {
        let mut sub = sub;
        sub.recv().await
    });

    tokio::task::yield_now().await;
    assert_eq!(broadcaster.subscriber_count("t"), 1);

    task.abort();
    let _ = task.await;
    assert_eq!(broadcaster.subscriber_count("t"), 0);
}

#[tokio::test]
async fn test_shutdown_ends_streams_after_draining() {
    let broadcaster = Broadcaster::new();
    let mut sub = broadcaster.subscribe("t").unwrap();

    broadcaster.publish("t", 1_u32);
    assert_eq!(broadcaster.shutdown(), 1);

    assert_eq!(sub.recv().await.map(|e| *e.payload()), Some(1));
    assert!(sub.recv().await.is_none());

    let err = broadcaster.subscribe("t").unwrap_err();
    assert!(matches!(err, BroadcastError::ShutDown { .. }));
}

#[tokio::test]
async fn test_dropping_broadcaster_ends_streams() {
    let broadcaster: Broadcaster<u32> = Broadcaster::new();
    let mut sub = broadcaster.subscribe("t").unwrap();
    drop(broadcaster);

    assert!(sub.recv().await.is_none());
    // Unsubscribing after the broadcaster is gone is still fine.
    sub.unsubscribe();
}
