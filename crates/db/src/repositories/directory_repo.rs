//! Read-only directory lookups, plus the fixture inserts the
//! enclosing deployment (or a test) uses to populate the directory.

use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;

use crate::models::directory::{Device, Location, Manufacturer};
use crate::store::Store;

/// Provides lookups into the location/device/manufacturer directory.
pub struct DirectoryRepo;

impl DirectoryRepo {
    // -- lookups ------------------------------------------------------------

    pub async fn get_location(store: &Store, id: DbId) -> Result<Location, CoreError> {
        store
            .tables
            .read()
            .await
            .locations
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Location",
                id,
            })
    }

    pub async fn get_device(store: &Store, id: DbId) -> Result<Device, CoreError> {
        store
            .tables
            .read()
            .await
            .devices
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Device",
                id,
            })
    }

    pub async fn get_manufacturer(store: &Store, id: DbId) -> Result<Manufacturer, CoreError> {
        store
            .tables
            .read()
            .await
            .manufacturers
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Manufacturer",
                id,
            })
    }

    /// List devices at a location, sorted by name.
    pub async fn list_devices_at(store: &Store, location: DbId) -> Vec<Device> {
        let tables = store.tables.read().await;
        let mut devices: Vec<Device> = tables
            .devices
            .values()
            .filter(|device| device.location == location)
            .cloned()
            .collect();
        devices.sort_by(|a, b| a.name.cmp(&b.name));
        devices
    }

    // -- fixture inserts ----------------------------------------------------

    pub async fn add_location(store: &Store, name: &str) -> Location {
        let location = Location {
            id: store.allocate_id(),
            name: name.to_string(),
        };
        let mut tables = store.tables.write().await;
        tables.locations.insert(location.id, location.clone());
        location
    }

    pub async fn add_device(
        store: &Store,
        name: &str,
        location: DbId,
    ) -> Result<Device, CoreError> {
        let mut tables = store.tables.write().await;
        if !tables.locations.contains_key(&location) {
            return Err(CoreError::NotFound {
                entity: "Location",
                id: location,
            });
        }
        let device = Device {
            id: store.allocate_id(),
            name: name.to_string(),
            location,
        };
        tables.devices.insert(device.id, device.clone());
        Ok(device)
    }

    pub async fn add_manufacturer(store: &Store, name: &str) -> Manufacturer {
        let manufacturer = Manufacturer {
            id: store.allocate_id(),
            name: name.to_string(),
        };
        let mut tables = store.tables.write().await;
        tables.manufacturers.insert(manufacturer.id, manufacturer.clone());
        manufacturer
    }
}
