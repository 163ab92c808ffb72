//! Shared test fixtures.

use serde_json::json;

use stockroom_db::models::consumable::{Consumable, CreateConsumable};
use stockroom_db::models::directory::{Device, Location};
use stockroom_db::models::pool::ConsumablePool;
use stockroom_db::repositories::{ConsumableTypeRepo, DirectoryRepo};
use stockroom_db::{seed, Store};
use stockroom_service::allocator::Allocator;
use stockroom_service::catalog::Catalog;

pub struct Env {
    pub store: std::sync::Arc<Store>,
    pub location_a: Location,
    pub location_b: Location,
    pub device_x: Device,
    pub device_y: Device,
    pub device_z: Device,
    pub cable: Consumable,
    pub pool: ConsumablePool,
}

/// A seeded store with two locations, three devices, one cable
/// consumable, and the pool "Cable 1 Pool 1" (quantity 13) at
/// Location A. Devices X and Y are at Location A, device Z at
/// Location B.
pub async fn create_env() -> Env {
    let store = std::sync::Arc::new(Store::new());
    seed::install_default_types(&store).await.unwrap();

    let location_a = DirectoryRepo::add_location(&store, "Location A").await;
    let location_b = DirectoryRepo::add_location(&store, "Location B").await;
    let device_x = DirectoryRepo::add_device(&store, "Device X", location_a.id)
        .await
        .unwrap();
    let device_y = DirectoryRepo::add_device(&store, "Device Y", location_a.id)
        .await
        .unwrap();
    let device_z = DirectoryRepo::add_device(&store, "Device Z", location_b.id)
        .await
        .unwrap();

    let cable_type = ConsumableTypeRepo::get_by_name(&store, "Cable").await.unwrap();
    let mfgr = DirectoryRepo::add_manufacturer(&store, "Acme").await;
    let cable = Catalog::create_consumable(
        &store,
        CreateConsumable {
            name: "Cable 1".to_string(),
            consumable_type: cable_type.id,
            manufacturer: Some(mfgr.id),
            product_id: "cable_001".to_string(),
            data: Some(json!({
                "cable_type": "CAT6",
                "connector": "8P8C",
                "length": 5,
                "length_unit": "m",
                "color": "ff9800",
            })),
        },
    )
    .await
    .unwrap();

    let pool = Allocator::create_pool(
        &store,
        stockroom_db::models::pool::CreateConsumablePool {
            name: "Cable 1 Pool 1".to_string(),
            consumable: cable.id,
            location: location_a.id,
            quantity: 13,
        },
    )
    .await
    .unwrap();

    Env {
        store,
        location_a,
        location_b,
        device_x,
        device_y,
        device_z,
        cable,
        pool,
    }
}
