use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Метаданные экземпляра агрегата (кто и когда менял запись)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Дата последнего изменения
    #[serde(rename = "lastUpdated")]
    pub last_updated: NaiveDate,
    /// Пользователь, выполнивший последнее изменение
    #[serde(rename = "updatedBy")]
    pub updated_by: String,
}

impl EntityMetadata {
    /// Метаданные новой записи, созданной пользователем `user`
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            last_updated: chrono::Utc::now().date_naive(),
            updated_by: user.into(),
        }
    }

    /// Зафиксировать изменение
    pub fn touch(&mut self, user: &str) {
        self.last_updated = chrono::Utc::now().date_naive();
        self.updated_by = user.to_string();
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new("system")
    }
}
