use serde::{Deserialize, Serialize};
use super::EntityMetadata;
use crate::enums::RecordStatus;

/// Базовый агрегат с обязательными полями для всех справочников
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Уникальный идентификатор записи
    pub id: Id,
    /// Бизнес-код записи (например, "WH-001", "A-01-01")
    pub code: String,
    /// Наименование
    pub name: String,
    pub status: RecordStatus,
    /// Метаданные изменения
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    /// Создать новый агрегат в статусе Active
    pub fn new(id: Id, code: String, name: String) -> Self {
        Self {
            id,
            code,
            name,
            status: RecordStatus::Active,
            metadata: EntityMetadata::default(),
        }
    }

    /// Зафиксировать изменение пользователем `user`
    pub fn touch(&mut self, user: &str) {
        self.metadata.touch(user);
    }
}
