use contracts::domain::a001_branch::{Branch, BranchId};
use contracts::domain::a002_warehouse::{
    normalize_code, same_code, Location, LocationId, Warehouse, WarehouseId, Zone, ZoneId,
};
use thiserror::Error;

/// Errors reported by the entity store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("{kind} code already exists: {code}")]
    DuplicateCode { kind: &'static str, code: String },

    #[error("{kind} id already exists: {id}")]
    DuplicateId { kind: &'static str, id: i64 },

    #[error("{kind} {code} references unknown {parent_kind} {parent}")]
    UnknownParent {
        kind: &'static str,
        code: String,
        parent_kind: &'static str,
        parent: String,
    },
}

impl StoreError {
    fn not_found(kind: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    fn duplicate_code(kind: &'static str, code: &str) -> Self {
        StoreError::DuplicateCode {
            kind,
            code: code.to_string(),
        }
    }
}

/// Read side of the store consumed by the structure view.
///
/// Every call returns a fresh snapshot; warehouses come with zones and locations attached.
pub trait EntityStore {
    fn list_warehouses(&self) -> Vec<Warehouse>;

    fn list_branches(&self) -> Vec<Branch>;
}

#[derive(Debug, Clone, Copy, Default)]
struct NextIds {
    branch: i64,
    warehouse: i64,
    zone: i64,
    location: i64,
}

/// In-memory store: branches plus warehouses owning their zones and locations.
///
/// Entity ids are unique per entity type across the whole store, codes are unique
/// at their level (warehouse codes globally, zone codes per warehouse, bin codes per zone).
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    branches: Vec<Branch>,
    warehouses: Vec<Warehouse>,
    next_ids: NextIds,
}

impl EntityStore for InMemoryStore {
    fn list_warehouses(&self) -> Vec<Warehouse> {
        self.warehouses.clone()
    }

    fn list_branches(&self) -> Vec<Branch> {
        self.branches.clone()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    // ============================================================================
    // Id allocation
    // ============================================================================

    pub fn allocate_branch_id(&mut self) -> BranchId {
        self.next_ids.branch += 1;
        BranchId(self.next_ids.branch)
    }

    pub fn allocate_warehouse_id(&mut self) -> WarehouseId {
        self.next_ids.warehouse += 1;
        WarehouseId(self.next_ids.warehouse)
    }

    pub fn allocate_zone_id(&mut self) -> ZoneId {
        self.next_ids.zone += 1;
        ZoneId(self.next_ids.zone)
    }

    pub fn allocate_location_id(&mut self) -> LocationId {
        self.next_ids.location += 1;
        LocationId(self.next_ids.location)
    }

    // ============================================================================
    // Lookups
    // ============================================================================

    pub fn find_branch_by_code(&self, code: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.base.code == code)
    }

    pub fn find_warehouse(&self, id: WarehouseId) -> Option<&Warehouse> {
        self.warehouses.iter().find(|w| w.base.id == id)
    }

    pub fn find_warehouse_by_code(&self, code: &str) -> Option<&Warehouse> {
        self.warehouses.iter().find(|w| same_code(&w.base.code, code))
    }

    /// Zone together with its owning warehouse
    pub fn find_zone(&self, id: ZoneId) -> Option<(&Warehouse, &Zone)> {
        self.warehouses
            .iter()
            .find_map(|w| w.find_zone(id).map(|z| (w, z)))
    }

    /// Location together with its owning warehouse and zone
    pub fn find_location(&self, id: LocationId) -> Option<(&Warehouse, &Zone, &Location)> {
        self.warehouses.iter().find_map(|w| {
            w.zones
                .iter()
                .find_map(|z| z.find_location(id).map(|l| (w, z, l)))
        })
    }

    pub fn branch_mut(&mut self, id: BranchId) -> Result<&mut Branch, StoreError> {
        self.branches
            .iter_mut()
            .find(|b| b.base.id == id)
            .ok_or_else(|| StoreError::not_found("Branch", id))
    }

    pub fn warehouse_mut(&mut self, id: WarehouseId) -> Result<&mut Warehouse, StoreError> {
        self.warehouses
            .iter_mut()
            .find(|w| w.base.id == id)
            .ok_or_else(|| StoreError::not_found("Warehouse", id))
    }

    pub fn zone_mut(&mut self, id: ZoneId) -> Result<&mut Zone, StoreError> {
        self.warehouses
            .iter_mut()
            .flat_map(|w| w.zones.iter_mut())
            .find(|z| z.base.id == id)
            .ok_or_else(|| StoreError::not_found("Zone", id))
    }

    pub fn location_mut(&mut self, id: LocationId) -> Result<&mut Location, StoreError> {
        self.warehouses
            .iter_mut()
            .flat_map(|w| w.zones.iter_mut())
            .flat_map(|z| z.locations.iter_mut())
            .find(|l| l.base.id == id)
            .ok_or_else(|| StoreError::not_found("Location", id))
    }

    // ============================================================================
    // Uniqueness checks
    // ============================================================================

    pub fn ensure_unique_branch_code(
        &self,
        code: &str,
        except: Option<BranchId>,
    ) -> Result<(), StoreError> {
        match self.find_branch_by_code(code) {
            Some(b) if Some(b.base.id) != except => Err(StoreError::duplicate_code("Branch", code)),
            _ => Ok(()),
        }
    }

    pub fn ensure_unique_warehouse_code(
        &self,
        code: &str,
        except: Option<WarehouseId>,
    ) -> Result<(), StoreError> {
        match self.find_warehouse_by_code(code) {
            Some(w) if Some(w.base.id) != except => {
                Err(StoreError::duplicate_code("Warehouse", code))
            }
            _ => Ok(()),
        }
    }

    pub fn ensure_unique_zone_code(
        &self,
        warehouse_id: WarehouseId,
        code: &str,
        except: Option<ZoneId>,
    ) -> Result<(), StoreError> {
        let warehouse = self
            .find_warehouse(warehouse_id)
            .ok_or_else(|| StoreError::not_found("Warehouse", warehouse_id))?;
        match warehouse.find_zone_by_code(code) {
            Some(z) if Some(z.base.id) != except => Err(StoreError::duplicate_code("Zone", code)),
            _ => Ok(()),
        }
    }

    pub fn ensure_unique_location_code(
        &self,
        zone_id: ZoneId,
        code: &str,
        except: Option<LocationId>,
    ) -> Result<(), StoreError> {
        let (_, zone) = self
            .find_zone(zone_id)
            .ok_or_else(|| StoreError::not_found("Zone", zone_id))?;
        match zone.locations.iter().find(|l| same_code(&l.base.code, code)) {
            Some(l) if Some(l.base.id) != except => {
                Err(StoreError::duplicate_code("Location", code))
            }
            _ => Ok(()),
        }
    }

    // ============================================================================
    // Inserts
    // ============================================================================

    pub fn insert_branch(&mut self, branch: Branch) -> Result<BranchId, StoreError> {
        let id = branch.base.id;
        if self.branches.iter().any(|b| b.base.id == id) {
            return Err(StoreError::DuplicateId {
                kind: "Branch",
                id: id.value(),
            });
        }
        self.ensure_unique_branch_code(&branch.base.code, None)?;
        self.next_ids.branch = self.next_ids.branch.max(id.value());
        self.branches.push(branch);
        Ok(id)
    }

    /// Insert a warehouse. Zones and locations already attached are validated
    /// and registered as well.
    pub fn insert_warehouse(&mut self, warehouse: Warehouse) -> Result<WarehouseId, StoreError> {
        let id = warehouse.base.id;
        if self.find_warehouse(id).is_some() {
            return Err(StoreError::DuplicateId {
                kind: "Warehouse",
                id: id.value(),
            });
        }
        self.ensure_unique_warehouse_code(&warehouse.base.code, None)?;
        self.check_nested(&warehouse)?;

        self.next_ids.warehouse = self.next_ids.warehouse.max(id.value());
        for zone in &warehouse.zones {
            self.next_ids.zone = self.next_ids.zone.max(zone.base.id.value());
            for location in &zone.locations {
                self.next_ids.location = self.next_ids.location.max(location.base.id.value());
            }
        }
        self.warehouses.push(warehouse);
        Ok(id)
    }

    pub fn insert_zone(&mut self, warehouse_id: WarehouseId, zone: Zone) -> Result<ZoneId, StoreError> {
        let id = zone.base.id;
        if self.find_zone(id).is_some() {
            return Err(StoreError::DuplicateId {
                kind: "Zone",
                id: id.value(),
            });
        }
        self.ensure_unique_zone_code(warehouse_id, &zone.base.code, None)?;
        let warehouse = self.warehouse_mut(warehouse_id)?;
        if !same_code(&zone.warehouse_code, &warehouse.base.code) {
            return Err(StoreError::UnknownParent {
                kind: "Zone",
                code: zone.base.code.clone(),
                parent_kind: "warehouse",
                parent: zone.warehouse_code.clone(),
            });
        }
        warehouse.zones.push(zone);
        self.next_ids.zone = self.next_ids.zone.max(id.value());
        Ok(id)
    }

    pub fn insert_location(
        &mut self,
        zone_id: ZoneId,
        location: Location,
    ) -> Result<LocationId, StoreError> {
        let id = location.base.id;
        if self.find_location(id).is_some() {
            return Err(StoreError::DuplicateId {
                kind: "Location",
                id: id.value(),
            });
        }
        self.ensure_unique_location_code(zone_id, &location.base.code, None)?;
        let zone = self.zone_mut(zone_id)?;
        if !same_code(&location.zone_code, &zone.base.code) {
            return Err(StoreError::UnknownParent {
                kind: "Location",
                code: location.base.code.clone(),
                parent_kind: "zone",
                parent: location.zone_code.clone(),
            });
        }
        zone.locations.push(location);
        self.next_ids.location = self.next_ids.location.max(id.value());
        Ok(id)
    }

    /// Nested zones/locations must point back at their container, be unique
    /// at their level and not reuse ids already in the store.
    fn check_nested(&self, warehouse: &Warehouse) -> Result<(), StoreError> {
        let mut zone_codes = std::collections::HashSet::new();
        let mut zone_ids = std::collections::HashSet::new();
        let mut location_ids = std::collections::HashSet::new();

        for zone in &warehouse.zones {
            if !same_code(&zone.warehouse_code, &warehouse.base.code) {
                return Err(StoreError::UnknownParent {
                    kind: "Zone",
                    code: zone.base.code.clone(),
                    parent_kind: "warehouse",
                    parent: zone.warehouse_code.clone(),
                });
            }
            if !zone_codes.insert(normalize_code(&zone.base.code)) {
                return Err(StoreError::duplicate_code("Zone", &zone.base.code));
            }
            if !zone_ids.insert(zone.base.id) || self.find_zone(zone.base.id).is_some() {
                return Err(StoreError::DuplicateId {
                    kind: "Zone",
                    id: zone.base.id.value(),
                });
            }

            let mut bin_codes = std::collections::HashSet::new();
            for location in &zone.locations {
                if !same_code(&location.zone_code, &zone.base.code) {
                    return Err(StoreError::UnknownParent {
                        kind: "Location",
                        code: location.base.code.clone(),
                        parent_kind: "zone",
                        parent: location.zone_code.clone(),
                    });
                }
                if !bin_codes.insert(normalize_code(&location.base.code)) {
                    return Err(StoreError::duplicate_code("Location", &location.base.code));
                }
                if !location_ids.insert(location.base.id)
                    || self.find_location(location.base.id).is_some()
                {
                    return Err(StoreError::DuplicateId {
                        kind: "Location",
                        id: location.base.id.value(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse(id: i64, code: &str) -> Warehouse {
        Warehouse::new_with_id(
            WarehouseId(id),
            code.into(),
            format!("{} name", code),
            "BR-001".into(),
            "Main Branch".into(),
            "Somewhere".into(),
            "Someone".into(),
        )
    }

    #[test]
    fn test_allocated_ids_follow_inserted_ones() {
        let mut store = InMemoryStore::new();
        store.insert_warehouse(warehouse(7, "WH-007")).unwrap();
        assert_eq!(store.allocate_warehouse_id(), WarehouseId(8));
        assert_eq!(store.allocate_zone_id(), ZoneId(1));
    }

    #[test]
    fn test_duplicate_warehouse_code_rejected() {
        let mut store = InMemoryStore::new();
        store.insert_warehouse(warehouse(1, "WH-001")).unwrap();
        let err = store.insert_warehouse(warehouse(2, "WH-001")).unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateCode {
                kind: "Warehouse",
                code: "WH-001".into()
            }
        );
    }

    #[test]
    fn test_zone_codes_unique_per_warehouse_only() {
        let mut store = InMemoryStore::new();
        store.insert_warehouse(warehouse(1, "WH-001")).unwrap();
        store.insert_warehouse(warehouse(2, "WH-002")).unwrap();

        let zone = |id, wh: &str| Zone::new_with_id(ZoneId(id), "A".into(), "Zone A".into(), wh.into());
        store.insert_zone(WarehouseId(1), zone(1, "WH-001")).unwrap();
        store.insert_zone(WarehouseId(2), zone(2, "WH-002")).unwrap();
        assert!(matches!(
            store.insert_zone(WarehouseId(1), zone(3, "WH-001")),
            Err(StoreError::DuplicateCode { kind: "Zone", .. })
        ));
    }

    #[test]
    fn test_codes_are_unique_regardless_of_case() {
        let mut store = InMemoryStore::new();
        store.insert_warehouse(warehouse(1, "WH-001")).unwrap();
        assert!(matches!(
            store.ensure_unique_warehouse_code("wh-001", None),
            Err(StoreError::DuplicateCode { kind: "Warehouse", .. })
        ));
        assert!(store.find_warehouse_by_code(" wh-001 ").is_some());

        let mut wh = warehouse(2, "WH-002");
        wh.zones = vec![
            Zone::new_with_id(ZoneId(1), "A".into(), "Zone A".into(), "WH-002".into()),
            Zone::new_with_id(ZoneId(2), "a".into(), "Zone a".into(), "WH-002".into()),
        ];
        assert!(matches!(
            store.insert_warehouse(wh),
            Err(StoreError::DuplicateCode { kind: "Zone", .. })
        ));
    }

    #[test]
    fn test_orphan_zone_rejected() {
        let mut store = InMemoryStore::new();
        let mut wh = warehouse(1, "WH-001");
        wh.zones
            .push(Zone::new_with_id(ZoneId(1), "A".into(), "Zone A".into(), "WH-999".into()));
        assert!(matches!(
            store.insert_warehouse(wh),
            Err(StoreError::UnknownParent { kind: "Zone", .. })
        ));
        assert!(store.warehouses().is_empty());
    }

    #[test]
    fn test_find_location_returns_ancestors() {
        let mut store = InMemoryStore::new();
        store.insert_warehouse(warehouse(1, "WH-001")).unwrap();
        store
            .insert_zone(
                WarehouseId(1),
                Zone::new_with_id(ZoneId(4), "B".into(), "Zone B".into(), "WH-001".into()),
            )
            .unwrap();
        store
            .insert_location(
                ZoneId(4),
                Location::new_with_id(LocationId(9), "B-1".into(), "Bin".into(), "B".into(), "5".into()),
            )
            .unwrap();

        let (w, z, l) = store.find_location(LocationId(9)).unwrap();
        assert_eq!(w.base.code, "WH-001");
        assert_eq!(z.base.code, "B");
        assert_eq!(l.base.code, "B-1");
        assert_eq!(store.list_warehouses()[0].location_count(), 1);
    }
}
