use contracts::domain::a002_warehouse::{Location, LocationId, Warehouse, WarehouseId, Zone, ZoneId};

use crate::domain::{a001_branch, a002_warehouse};
use crate::shared::data::{EntityStore, InMemoryStore};

/// Store seeded with the console sample data (2 branches, 2 warehouses, 3 zones, 6 bins)
pub fn seeded_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    a001_branch::service::insert_test_data(&mut store).unwrap();
    a002_warehouse::service::insert_test_data(&mut store).unwrap();
    store
}

pub fn console_sample() -> Vec<Warehouse> {
    seeded_store().list_warehouses()
}

/// WH-01 with zone A [L1, L2] and zone B [L3]
pub fn wh01_scenario() -> Vec<Warehouse> {
    let mut warehouse = Warehouse::new_with_id(
        WarehouseId(1),
        "WH-01".into(),
        "Warehouse One".into(),
        "BR-001".into(),
        "Main Branch".into(),
        "1 Dock Street".into(),
        "Dana".into(),
    );
    let bin = |id: i64, zone_code: &str| {
        Location::new_with_id(
            LocationId(id),
            format!("L{}", id),
            format!("Bin L{}", id),
            zone_code.into(),
            "10 units".into(),
        )
    };

    let mut zone_a = Zone::new_with_id(ZoneId(1), "A".into(), "Zone A".into(), "WH-01".into());
    zone_a.locations = vec![bin(1, "A"), bin(2, "A")];
    let mut zone_b = Zone::new_with_id(ZoneId(2), "B".into(), "Zone B".into(), "WH-01".into());
    zone_b.locations = vec![bin(3, "B")];

    warehouse.zones = vec![zone_a, zone_b];
    vec![warehouse]
}
