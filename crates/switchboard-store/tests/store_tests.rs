//! Integration tests for the entity store using the `Person` schema.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;
use std::sync::Arc;

use switchboard_store::EntityStore;
use switchboard_types::{Draft, PersonFields, Record, RecordId};

#[tokio::test]
async fn test_put_without_id_returns_fresh_id() {
    let store = EntityStore::new();
    let existing = store.put(Draft::with_id("taken", PersonFields::named("Bo"))).await;

    let fields = PersonFields::named("Ann").with_field("age", serde_json::json!(41));
    let id = store.put(Draft::new(fields.clone())).await;

    assert!(!id.is_empty());
    assert_ne!(id, existing);
    assert_eq!(store.get(&id).await, Some(Record::new(id.clone(), fields)));
}

#[tokio::test]
async fn test_put_with_id_round_trips() {
    let store = EntityStore::new();
    let fields = PersonFields::named("Cy");

    let id = store.put(Draft::with_id("p-7", fields.clone())).await;

    assert_eq!(id, RecordId::new("p-7"));
    assert_eq!(store.get(&id).await, Some(Record::new("p-7", fields)));
}

#[tokio::test]
async fn test_get_missing_is_none() {
    let store: EntityStore<PersonFields> = EntityStore::new();
    assert_eq!(store.get(&RecordId::new("nobody")).await, None);
}

#[tokio::test]
async fn test_list_all_contains_inserted_ids() {
    let store = EntityStore::new();
    for id in ["a", "b", "c"] {
        store.put(Draft::with_id(id, PersonFields::named(id))).await;
    }

    let listed = store.list_all().await;
    let ids: Vec<&str> = listed.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    let set: BTreeSet<&str> = ids.into_iter().collect();
    assert_eq!(set, BTreeSet::from(["a", "b", "c"]));
}

#[tokio::test]
async fn test_concurrent_puts_are_all_stored() {
    let store = Arc::new(EntityStore::new());
    let mut tasks = Vec::new();
    for n in 0..32_u32 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            store
                .put(Draft::new(PersonFields::default().with_field("n", n.into())))
                .await
        }));
    }

    let mut ids = BTreeSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap());
    }

    assert_eq!(ids.len(), 32);
    assert_eq!(store.len().await, 32);
}
