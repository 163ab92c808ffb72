//! Pool allocation behavior: quantities, derived capacity figures,
//! and lifecycle guards.

mod common;

use assert_matches::assert_matches;

use stockroom_core::error::CoreError;
use stockroom_db::models::pool::{CreateConsumablePool, UpdateConsumablePool};
use stockroom_service::allocator::Allocator;
use stockroom_service::catalog::Catalog;
use stockroom_service::checkout::CheckoutLedger;

#[tokio::test]
async fn pool_quantity_must_be_positive() {
    let env = common::create_env().await;
    let result = Allocator::create_pool(
        &env.store,
        CreateConsumablePool {
            name: "Cable 1 Pool 2".to_string(),
            consumable: env.cable.id,
            location: env.location_a.id,
            quantity: 0,
        },
    )
    .await;
    assert_matches!(result, Err(CoreError::InvalidQuantity(0)));

    let result = Allocator::update_pool(
        &env.store,
        env.pool.id,
        UpdateConsumablePool {
            quantity: Some(-1),
            ..UpdateConsumablePool::default()
        },
    )
    .await;
    assert_matches!(result, Err(CoreError::InvalidQuantity(-1)));
}

#[tokio::test]
async fn duplicate_pool_name_per_consumable_and_location() {
    let env = common::create_env().await;
    let result = Allocator::create_pool(
        &env.store,
        CreateConsumablePool {
            name: "Cable 1 Pool 1".to_string(),
            consumable: env.cable.id,
            location: env.location_a.id,
            quantity: 5,
        },
    )
    .await;
    assert_matches!(result, Err(CoreError::DuplicateKey(_)));

    // The same name at a different location is a different pool.
    Allocator::create_pool(
        &env.store,
        CreateConsumablePool {
            name: "Cable 1 Pool 1".to_string(),
            consumable: env.cable.id,
            location: env.location_b.id,
            quantity: 5,
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn quantities_start_at_zero_used() {
    let env = common::create_env().await;
    assert_eq!(
        Allocator::used_quantity(&env.store, env.pool.id).await.unwrap(),
        0
    );
    assert_eq!(
        Allocator::available_quantity(&env.store, env.pool.id)
            .await
            .unwrap(),
        13
    );
}

#[tokio::test]
async fn over_allocation_is_a_consistency_fault() {
    let env = common::create_env().await;
    let ledger = CheckoutLedger::new(env.store.clone());

    ledger
        .checkout(env.pool.id, env.device_x.id, 13)
        .await
        .unwrap();
    // Shrinking the declared quantity below the used quantity is not
    // blocked on the pool itself...
    Allocator::update_pool(
        &env.store,
        env.pool.id,
        UpdateConsumablePool {
            quantity: Some(5),
            ..UpdateConsumablePool::default()
        },
    )
    .await
    .unwrap();

    // ...but reading the derived figure now surfaces the fault.
    assert_matches!(
        Allocator::available_quantity(&env.store, env.pool.id).await,
        Err(CoreError::Consistency(_))
    );
}

#[tokio::test]
async fn service_deletes_respect_references() {
    let env = common::create_env().await;
    let ledger = CheckoutLedger::new(env.store.clone());
    let record = ledger
        .checkout(env.pool.id, env.device_x.id, 3)
        .await
        .unwrap();

    assert_matches!(
        Allocator::delete_pool(&env.store, env.pool.id).await,
        Err(CoreError::ReferentialBlock { .. })
    );
    assert_matches!(
        Catalog::delete_consumable(&env.store, env.cable.id).await,
        Err(CoreError::ReferentialBlock { .. })
    );

    ledger.checkin(record.id).await.unwrap();
    Allocator::delete_pool(&env.store, env.pool.id).await.unwrap();
    Catalog::delete_consumable(&env.store, env.cable.id)
        .await
        .unwrap();
}
