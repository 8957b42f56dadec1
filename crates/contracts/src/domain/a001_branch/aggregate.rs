use serde::{Deserialize, Serialize};
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::RecordStatus;
use crate::numeric_aggregate_id;

numeric_aggregate_id!(
    /// Уникальный идентификатор филиала
    BranchId
);

/// Филиал организации. Склад ссылается на филиал, но не владеет им.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(flatten)]
    pub base: BaseAggregate<BranchId>,
}

impl Branch {
    pub fn new_with_id(id: BranchId, code: String, name: String) -> Self {
        Self {
            base: BaseAggregate::new(id, code, name),
        }
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &BranchDto) {
        self.base.code = dto.code.trim().to_string();
        self.base.name = dto.name.trim().to_string();
        self.base.status = dto.status;
    }
}

impl AggregateRoot for Branch {
    type Id = BranchId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "branch"
    }

    fn element_name() -> &'static str {
        "Branch"
    }

    fn list_name() -> &'static str {
        "Branches"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления филиала
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BranchDto {
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub status: RecordStatus,
}

impl BranchDto {
    /// Валидация обязательных полей
    pub fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("Branch code is required".into());
        }
        if self.name.trim().is_empty() {
            return Err("Branch name is required".into());
        }
        Ok(())
    }
}
