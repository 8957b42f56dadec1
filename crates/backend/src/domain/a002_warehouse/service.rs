use anyhow::bail;
use contracts::domain::a001_branch::Branch;
use contracts::domain::a002_warehouse::{
    normalize_code, same_code, Location, LocationDto, LocationId, Warehouse, WarehouseDto,
    WarehouseId, Zone, ZoneDto, ZoneId,
};
use contracts::domain::common::AggregateRoot;
use contracts::enums::RecordStatus;
use contracts::projections::p900_warehouse_structure::{NodeId, NodeKind};

use crate::shared::data::{EntityStore, InMemoryStore};

/// New records can only be attached to an active parent
fn ensure_active<T: AggregateRoot>(parent: &T) -> anyhow::Result<()> {
    if !parent.status().is_active() {
        bail!("{} {} is inactive", T::element_name(), parent.code());
    }
    Ok(())
}

// ============================================================================
// Warehouse
// ============================================================================

/// Branch referenced by a warehouse form; the branch has to exist at write time
fn find_branch<'a>(store: &'a InMemoryStore, branch_code: &str) -> anyhow::Result<&'a Branch> {
    store
        .find_branch_by_code(branch_code.trim())
        .ok_or_else(|| anyhow::anyhow!("Branch not found: {}", branch_code))
}

/// Создание нового склада в активном филиале
pub fn create_warehouse(
    store: &mut InMemoryStore,
    dto: WarehouseDto,
    user: &str,
) -> anyhow::Result<WarehouseId> {
    dto.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    let branch = find_branch(store, &dto.branch_code)?;
    ensure_active(branch)?;
    let branch_name = branch.base.name.clone();
    let code = normalize_code(&dto.code);
    store.ensure_unique_warehouse_code(&code, None)?;

    let id = store.allocate_warehouse_id();
    let mut aggregate = Warehouse::new_with_id(
        id,
        code.clone(),
        dto.name.trim().into(),
        dto.branch_code.trim().into(),
        branch_name,
        dto.address.trim().into(),
        dto.manager.trim().into(),
    );
    aggregate.base.status = dto.status;
    aggregate.base.touch(user);

    store.insert_warehouse(aggregate)?;
    tracing::info!("{} {} created successfully", Warehouse::element_name(), code);
    Ok(id)
}

/// Обновление склада. Новый код склада переносится в его зоны.
pub fn update_warehouse(
    store: &mut InMemoryStore,
    dto: WarehouseDto,
    user: &str,
) -> anyhow::Result<()> {
    let id = dto
        .id
        .map(WarehouseId)
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;
    dto.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    let branch_name = find_branch(store, &dto.branch_code)?.base.name.clone();
    store.ensure_unique_warehouse_code(&normalize_code(&dto.code), Some(id))?;

    let aggregate = store.warehouse_mut(id)?;
    aggregate.update(&dto, branch_name);
    aggregate.base.touch(user);
    tracing::info!("{} {} updated successfully", Warehouse::element_name(), aggregate.base.code);
    Ok(())
}

// ============================================================================
// Zone
// ============================================================================

/// Создание зоны в активном складе `dto.warehouse_code`
pub fn create_zone(store: &mut InMemoryStore, dto: ZoneDto, user: &str) -> anyhow::Result<ZoneId> {
    dto.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    let warehouse = store
        .find_warehouse_by_code(&dto.warehouse_code)
        .ok_or_else(|| anyhow::anyhow!("Warehouse not found: {}", dto.warehouse_code.trim()))?;
    ensure_active(warehouse)?;
    let (warehouse_id, warehouse_code) = (warehouse.base.id, warehouse.base.code.clone());
    let code = normalize_code(&dto.code);
    store.ensure_unique_zone_code(warehouse_id, &code, None)?;

    let id = store.allocate_zone_id();
    let mut aggregate = Zone::new_with_id(id, code.clone(), dto.name.trim().into(), warehouse_code.clone());
    aggregate.base.status = dto.status;
    aggregate.base.touch(user);

    store.insert_zone(warehouse_id, aggregate)?;
    tracing::info!(
        "{} {} created successfully in {}",
        Zone::element_name(),
        code,
        warehouse_code
    );
    Ok(id)
}

/// Обновление зоны. Перенос зоны в другой склад не поддерживается.
pub fn update_zone(store: &mut InMemoryStore, dto: ZoneDto, user: &str) -> anyhow::Result<()> {
    let id = dto
        .id
        .map(ZoneId)
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;
    dto.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    let warehouse_id = {
        let (warehouse, _) = store
            .find_zone(id)
            .ok_or_else(|| anyhow::anyhow!("Zone not found: {}", id))?;
        if !same_code(&warehouse.base.code, &dto.warehouse_code) {
            bail!("Moving a zone to another warehouse is not supported");
        }
        warehouse.base.id
    };
    store.ensure_unique_zone_code(warehouse_id, &normalize_code(&dto.code), Some(id))?;

    let aggregate = store.zone_mut(id)?;
    aggregate.update(&dto);
    aggregate.base.touch(user);
    tracing::info!("{} {} updated successfully", Zone::element_name(), aggregate.base.code);
    Ok(())
}

// ============================================================================
// Location
// ============================================================================

/// Найти зону для формы ячейки. Код зоны уникален только внутри склада,
/// поэтому без кода склада он должен быть однозначным по всему хранилищу.
fn resolve_zone(store: &InMemoryStore, warehouse_code: &str, zone_code: &str) -> anyhow::Result<ZoneId> {
    let warehouse_code = warehouse_code.trim();
    let candidates: Vec<ZoneId> = store
        .warehouses()
        .iter()
        .filter(|w| warehouse_code.is_empty() || same_code(&w.base.code, warehouse_code))
        .filter_map(|w| w.find_zone_by_code(zone_code))
        .map(|z| z.base.id)
        .collect();

    match candidates.as_slice() {
        [id] => Ok(*id),
        [] => bail!("Zone not found: {}", zone_code.trim()),
        _ => bail!("Zone code {} is ambiguous, specify the warehouse", zone_code.trim()),
    }
}

/// Создание ячейки в активной зоне `dto.zone_code` активного склада
pub fn create_location(
    store: &mut InMemoryStore,
    dto: LocationDto,
    user: &str,
) -> anyhow::Result<LocationId> {
    dto.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    let zone_id = resolve_zone(store, &dto.warehouse_code, &dto.zone_code)?;
    let zone_code = {
        let (warehouse, zone) = store
            .find_zone(zone_id)
            .ok_or_else(|| anyhow::anyhow!("Zone not found: {}", zone_id))?;
        ensure_active(warehouse)?;
        ensure_active(zone)?;
        zone.base.code.clone()
    };
    let code = normalize_code(&dto.code);
    store.ensure_unique_location_code(zone_id, &code, None)?;

    let id = store.allocate_location_id();
    let mut aggregate = Location::new_with_id(
        id,
        code.clone(),
        dto.name.trim().into(),
        zone_code.clone(),
        dto.capacity.trim().into(),
    );
    aggregate.base.status = dto.status;
    aggregate.base.touch(user);

    store.insert_location(zone_id, aggregate)?;
    tracing::info!(
        "{} {} created successfully in zone {}",
        Location::element_name(),
        code,
        zone_code
    );
    Ok(id)
}

/// Обновление ячейки. Перенос ячейки в другую зону не поддерживается.
pub fn update_location(store: &mut InMemoryStore, dto: LocationDto, user: &str) -> anyhow::Result<()> {
    let id = dto
        .id
        .map(LocationId)
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;
    dto.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    let zone_id = {
        let (warehouse, zone, _) = store
            .find_location(id)
            .ok_or_else(|| anyhow::anyhow!("Location not found: {}", id))?;
        let other_warehouse = !dto.warehouse_code.trim().is_empty()
            && !same_code(&dto.warehouse_code, &warehouse.base.code);
        if other_warehouse || !same_code(&dto.zone_code, &zone.base.code) {
            bail!("Moving a location to another zone is not supported");
        }
        zone.base.id
    };
    store.ensure_unique_location_code(zone_id, &normalize_code(&dto.code), Some(id))?;

    let aggregate = store.location_mut(id)?;
    aggregate.update(&dto);
    aggregate.base.touch(user);
    tracing::info!("{} {} updated successfully", Location::element_name(), aggregate.base.code);
    Ok(())
}

// ============================================================================
// Status
// ============================================================================

/// Текущий статус записи, на которую указывает узел дерева
pub fn status_of(store: &InMemoryStore, node: NodeId) -> anyhow::Result<RecordStatus> {
    let status = match node.kind {
        NodeKind::Warehouse => store
            .find_warehouse(WarehouseId(node.entity_id))
            .map(|w| w.status()),
        NodeKind::Zone => store.find_zone(ZoneId(node.entity_id)).map(|(_, z)| z.status()),
        NodeKind::Location => store
            .find_location(LocationId(node.entity_id))
            .map(|(_, _, l)| l.status()),
    };
    status.ok_or_else(|| anyhow::anyhow!("{} not found: {}", node.kind.title(), node))
}

/// Установить статус записи (активация / деактивация)
pub fn set_status(
    store: &mut InMemoryStore,
    node: NodeId,
    status: RecordStatus,
    user: &str,
) -> anyhow::Result<()> {
    let metadata = match node.kind {
        NodeKind::Warehouse => {
            let w = store.warehouse_mut(WarehouseId(node.entity_id))?;
            w.base.status = status;
            w.metadata_mut()
        }
        NodeKind::Zone => {
            let z = store.zone_mut(ZoneId(node.entity_id))?;
            z.base.status = status;
            z.metadata_mut()
        }
        NodeKind::Location => {
            let l = store.location_mut(LocationId(node.entity_id))?;
            l.base.status = status;
            l.metadata_mut()
        }
    };
    metadata.touch(user);
    tracing::info!("{} {} set to {}", node.kind.title(), node, status);
    Ok(())
}

/// Переключить статус Active ↔ Inactive, вернуть новый статус
pub fn toggle_status(store: &mut InMemoryStore, node: NodeId, user: &str) -> anyhow::Result<RecordStatus> {
    let status = status_of(store, node)?.toggled();
    set_status(store, node, status, user)?;
    Ok(status)
}

// ============================================================================
// Queries / test data
// ============================================================================

/// Получение списка всех складов (с зонами и ячейками)
pub fn list_all(store: &impl EntityStore) -> Vec<Warehouse> {
    store.list_warehouses()
}

/// Вставка тестовых данных. Филиалы BR-001/BR-002 должны уже существовать.
pub fn insert_test_data(store: &mut InMemoryStore) -> anyhow::Result<()> {
    let warehouses = [
        ("WH-001", "Main Warehouse", "BR-001", "123 Storage Ave, Industrial Zone", "John Smith"),
        ("WH-002", "North Warehouse", "BR-002", "456 Storage Blvd, North District", "Sarah Johnson"),
    ];
    for (code, name, branch_code, address, manager) in warehouses {
        let dto = WarehouseDto {
            code: code.into(),
            name: name.into(),
            branch_code: branch_code.into(),
            address: address.into(),
            manager: manager.into(),
            ..Default::default()
        };
        create_warehouse(store, dto, "admin")?;
    }

    let zones = [
        ("WH-001", "A", "Zone A - Electronics", "manager1"),
        ("WH-001", "B", "Zone B - Furniture", "manager2"),
        ("WH-002", "C", "Zone C - General", "manager3"),
    ];
    for (warehouse_code, code, name, user) in zones {
        let dto = ZoneDto {
            code: code.into(),
            name: name.into(),
            warehouse_code: warehouse_code.into(),
            ..Default::default()
        };
        create_zone(store, dto, user)?;
    }

    let locations = [
        ("WH-001", "A", "A-01-01", "Shelf A-01-01", "100 units", "staff1"),
        ("WH-001", "A", "A-01-02", "Shelf A-01-02", "150 units", "staff2"),
        ("WH-001", "A", "A-02-01", "Shelf A-02-01", "200 units", "staff1"),
        ("WH-001", "B", "B-01-01", "Section B-01-01", "50 units", "staff3"),
        ("WH-001", "B", "B-01-02", "Section B-01-02", "75 units", "staff2"),
        ("WH-002", "C", "C-01-01", "Rack C-01-01", "300 units", "staff4"),
    ];
    for (warehouse_code, zone_code, code, name, capacity, user) in locations {
        let dto = LocationDto {
            code: code.into(),
            name: name.into(),
            warehouse_code: warehouse_code.into(),
            zone_code: zone_code.into(),
            capacity: capacity.into(),
            ..Default::default()
        };
        create_location(store, dto, user)?;
    }

    Ok(())
}
