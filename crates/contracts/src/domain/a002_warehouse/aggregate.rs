use serde::{Deserialize, Serialize};
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::RecordStatus;
use crate::numeric_aggregate_id;

// ============================================================================
// ID Types
// ============================================================================

numeric_aggregate_id!(
    /// Уникальный идентификатор склада
    WarehouseId
);

numeric_aggregate_id!(
    /// Уникальный идентификатор зоны (уникален в пределах всего хранилища)
    ZoneId
);

numeric_aggregate_id!(
    /// Уникальный идентификатор ячейки (уникален в пределах всего хранилища)
    LocationId
);

/// Коды склада, зоны и ячейки хранятся без пробелов по краям и в верхнем регистре
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Совпадение кодов с учётом нормализации ("wh-001" == "WH-001")
pub fn same_code(a: &str, b: &str) -> bool {
    normalize_code(a) == normalize_code(b)
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Склад. Корень агрегата: владеет зонами, зоны владеют ячейками.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(flatten)]
    pub base: BaseAggregate<WarehouseId>,

    #[serde(rename = "branchCode")]
    pub branch_code: String,

    /// Денормализованное наименование филиала на момент последней записи
    #[serde(rename = "branchName")]
    pub branch_name: String,

    pub address: String,
    pub manager: String,

    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// Зона склада
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(flatten)]
    pub base: BaseAggregate<ZoneId>,

    #[serde(rename = "warehouseCode")]
    pub warehouse_code: String,

    #[serde(default)]
    pub locations: Vec<Location>,
}

/// Ячейка хранения (bin / slot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(flatten)]
    pub base: BaseAggregate<LocationId>,

    #[serde(rename = "zoneCode")]
    pub zone_code: String,

    /// Вместимость в свободной форме ("100 units")
    pub capacity: String,
}

impl Warehouse {
    /// Создать склад без зон
    pub fn new_with_id(
        id: WarehouseId,
        code: String,
        name: String,
        branch_code: String,
        branch_name: String,
        address: String,
        manager: String,
    ) -> Self {
        Self {
            base: BaseAggregate::new(id, code, name),
            branch_code,
            branch_name,
            address,
            manager,
            zones: Vec::new(),
        }
    }

    /// Количество ячеек во всех зонах склада
    pub fn location_count(&self) -> usize {
        self.zones.iter().map(|zone| zone.locations.len()).sum()
    }

    pub fn find_zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.base.id == id)
    }

    pub fn find_zone_by_code(&self, code: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| same_code(&zone.base.code, code))
    }

    /// Обновить данные из DTO. Код склада переносится в зоны.
    pub fn update(&mut self, dto: &WarehouseDto, branch_name: String) {
        self.base.code = normalize_code(&dto.code);
        self.base.name = dto.name.trim().to_string();
        self.base.status = dto.status;
        self.branch_code = dto.branch_code.trim().to_string();
        self.branch_name = branch_name;
        self.address = dto.address.trim().to_string();
        self.manager = dto.manager.trim().to_string();
        for zone in &mut self.zones {
            zone.warehouse_code = self.base.code.clone();
        }
    }
}

impl Zone {
    pub fn new_with_id(id: ZoneId, code: String, name: String, warehouse_code: String) -> Self {
        Self {
            base: BaseAggregate::new(id, code, name),
            warehouse_code,
            locations: Vec::new(),
        }
    }

    pub fn find_location(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|location| location.base.id == id)
    }

    /// Обновить данные из DTO. Код зоны переносится в ячейки.
    pub fn update(&mut self, dto: &ZoneDto) {
        self.base.code = normalize_code(&dto.code);
        self.base.name = dto.name.trim().to_string();
        self.base.status = dto.status;
        for location in &mut self.locations {
            location.zone_code = self.base.code.clone();
        }
    }
}

impl Location {
    pub fn new_with_id(
        id: LocationId,
        code: String,
        name: String,
        zone_code: String,
        capacity: String,
    ) -> Self {
        Self {
            base: BaseAggregate::new(id, code, name),
            zone_code,
            capacity,
        }
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &LocationDto) {
        self.base.code = normalize_code(&dto.code);
        self.base.name = dto.name.trim().to_string();
        self.base.status = dto.status;
        self.capacity = dto.capacity.trim().to_string();
    }
}

macro_rules! impl_aggregate_root {
    ($ty:ty, $id:ty, $index:literal, $collection:literal, $element:literal, $list:literal) => {
        impl AggregateRoot for $ty {
            type Id = $id;

            fn id(&self) -> Self::Id {
                self.base.id
            }

            fn code(&self) -> &str {
                &self.base.code
            }

            fn name(&self) -> &str {
                &self.base.name
            }

            fn status(&self) -> RecordStatus {
                self.base.status
            }

            fn metadata(&self) -> &EntityMetadata {
                &self.base.metadata
            }

            fn metadata_mut(&mut self) -> &mut EntityMetadata {
                &mut self.base.metadata
            }

            fn aggregate_index() -> &'static str {
                $index
            }

            fn collection_name() -> &'static str {
                $collection
            }

            fn element_name() -> &'static str {
                $element
            }

            fn list_name() -> &'static str {
                $list
            }
        }
    };
}

impl_aggregate_root!(Warehouse, WarehouseId, "a002", "warehouse", "Warehouse", "Warehouses");
impl_aggregate_root!(Zone, ZoneId, "a002", "zone", "Zone", "Zones");
impl_aggregate_root!(Location, LocationId, "a002", "location", "Location", "Locations");

// ============================================================================
// Forms / DTOs
// ============================================================================

fn require(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

/// DTO для создания/обновления склада
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WarehouseDto {
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    #[serde(rename = "branchCode")]
    pub branch_code: String,
    pub address: String,
    pub manager: String,
    #[serde(default)]
    pub status: RecordStatus,
}

impl WarehouseDto {
    /// Валидация обязательных полей формы склада
    pub fn validate(&self) -> Result<(), String> {
        require(&self.code, "Warehouse code")?;
        require(&self.name, "Warehouse name")?;
        require(&self.branch_code, "Branch")?;
        require(&self.address, "Address")?;
        require(&self.manager, "Manager")?;
        Ok(())
    }
}

impl From<&Warehouse> for WarehouseDto {
    fn from(w: &Warehouse) -> Self {
        Self {
            id: Some(w.base.id.value()),
            code: w.base.code.clone(),
            name: w.base.name.clone(),
            branch_code: w.branch_code.clone(),
            address: w.address.clone(),
            manager: w.manager.clone(),
            status: w.base.status,
        }
    }
}

/// DTO для создания/обновления зоны
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ZoneDto {
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    #[serde(rename = "warehouseCode")]
    pub warehouse_code: String,
    #[serde(default)]
    pub status: RecordStatus,
}

impl ZoneDto {
    /// Валидация обязательных полей формы зоны
    pub fn validate(&self) -> Result<(), String> {
        require(&self.code, "Zone code")?;
        require(&self.name, "Zone name")?;
        require(&self.warehouse_code, "Warehouse")?;
        Ok(())
    }
}

impl From<&Zone> for ZoneDto {
    fn from(z: &Zone) -> Self {
        Self {
            id: Some(z.base.id.value()),
            code: z.base.code.clone(),
            name: z.base.name.clone(),
            warehouse_code: z.warehouse_code.clone(),
            status: z.base.status,
        }
    }
}

/// DTO для создания/обновления ячейки
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LocationDto {
    pub id: Option<i64>,
    #[serde(rename = "binCode")]
    pub code: String,
    #[serde(rename = "binName")]
    pub name: String,
    /// Код склада нужен, т.к. код зоны уникален только внутри склада
    #[serde(rename = "warehouseCode")]
    pub warehouse_code: String,
    #[serde(rename = "zoneCode")]
    pub zone_code: String,
    pub capacity: String,
    #[serde(default)]
    pub status: RecordStatus,
}

impl LocationDto {
    /// Валидация обязательных полей формы ячейки
    pub fn validate(&self) -> Result<(), String> {
        require(&self.code, "Bin code")?;
        require(&self.name, "Bin name")?;
        require(&self.zone_code, "Zone")?;
        require(&self.capacity, "Capacity")?;
        Ok(())
    }
}
