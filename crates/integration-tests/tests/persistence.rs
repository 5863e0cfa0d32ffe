//! Snapshot hydration and write-back across storage backends.
//!
//! Covers the session-to-session story: a cart flushed to storage hydrates
//! back id-for-id, on both the in-memory and the file-backed reference
//! backends.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use pocket_market_cart::{
    CART_STORAGE_KEY, CartStorage, CartStore, FileStorage, MemoryStorage,
};
use pocket_market_core::{LineItem, ProductId};
use pocket_market_integration_tests::sample_product;

// =============================================================================
// Round Trips
// =============================================================================

#[tokio::test]
async fn test_memory_round_trip_preserves_items_and_quantities() {
    let storage = Arc::new(MemoryStorage::new());

    let cart = CartStore::open(storage.clone()).await.unwrap();
    cart.add_to_cart(sample_product("p1", "Shirt"));
    cart.add_to_cart(sample_product("p2", "Mug"));
    cart.increment(&ProductId::new("p2"));
    cart.flush().await.unwrap();
    let expected = cart.items();
    drop(cart);

    let reopened = CartStore::open(storage).await.unwrap();
    assert_eq!(reopened.items(), expected);
}

#[tokio::test]
async fn test_file_round_trip_survives_process_restart_analog() {
    let dir = tempfile::tempdir().unwrap();

    {
        let storage = Arc::new(FileStorage::new(dir.path()));
        let cart = CartStore::open(storage).await.unwrap();
        cart.add_to_cart(sample_product("p1", "Shirt"));
        cart.add_to_cart(sample_product("p1", "Shirt"));
        cart.add_to_cart(sample_product("p2", "Mug"));
        cart.flush().await.unwrap();
    }

    // A fresh storage handle over the same directory stands in for a new
    // process attaching to the same device storage.
    let storage = Arc::new(FileStorage::new(dir.path()));
    let cart = CartStore::open(storage).await.unwrap();

    let items = cart.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items.first().unwrap().id, ProductId::new("p1"));
    assert_eq!(items.first().unwrap().quantity, 2);
    assert_eq!(items.get(1).unwrap().id, ProductId::new("p2"));
    assert_eq!(items.get(1).unwrap().quantity, 1);
}

#[tokio::test]
async fn test_hydration_of_documented_snapshot_shape() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(
            CART_STORAGE_KEY,
            r#"[{"id":"p1","title":"Shirt","image_url":"u","price":10,"quantity":2}]"#.to_owned(),
        )
        .await
        .unwrap();

    let cart = CartStore::open(storage).await.unwrap();

    let items = cart.items();
    assert_eq!(items.len(), 1);
    let line = items.first().unwrap();
    assert_eq!(line.id, ProductId::new("p1"));
    assert_eq!(line.title, "Shirt");
    assert_eq!(line.image_url, "u");
    assert_eq!(line.quantity, 2);
}

// =============================================================================
// Write-Back Behaviour
// =============================================================================

#[tokio::test]
async fn test_storage_slot_converges_to_latest_state_after_burst() {
    let storage = Arc::new(MemoryStorage::new());
    let cart = CartStore::open(storage.clone()).await.unwrap();

    // A burst of mutations; the worker may coalesce intermediate snapshots,
    // but the slot must end up holding the final state.
    for _ in 0..10 {
        cart.add_to_cart(sample_product("p1", "Shirt"));
    }
    cart.add_to_cart(sample_product("p2", "Mug"));
    cart.decrement(&ProductId::new("p1"));
    cart.flush().await.unwrap();

    let raw = storage.get(CART_STORAGE_KEY).await.unwrap().unwrap();
    let stored: Vec<LineItem> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, cart.items());
    assert_eq!(stored.first().unwrap().quantity, 9);
}

#[tokio::test]
async fn test_mutations_after_flush_keep_persisting() {
    let storage = Arc::new(MemoryStorage::new());
    let cart = CartStore::open(storage.clone()).await.unwrap();

    cart.add_to_cart(sample_product("p1", "Shirt"));
    cart.flush().await.unwrap();

    cart.decrement(&ProductId::new("p1"));
    cart.flush().await.unwrap();

    let raw = storage.get(CART_STORAGE_KEY).await.unwrap().unwrap();
    assert_eq!(raw, "[]");
}

#[tokio::test]
async fn test_malformed_snapshot_resets_then_next_flush_repairs_storage() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(CART_STORAGE_KEY, "definitely not json".to_owned())
        .await
        .unwrap();

    let cart = CartStore::open(storage.clone()).await.unwrap();
    assert!(cart.is_empty());

    cart.add_to_cart(sample_product("p1", "Shirt"));
    cart.flush().await.unwrap();

    let raw = storage.get(CART_STORAGE_KEY).await.unwrap().unwrap();
    let stored: Vec<LineItem> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 1);
}
