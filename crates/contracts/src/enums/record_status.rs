use serde::{Deserialize, Serialize};

/// Статус записи справочника (склад, зона, ячейка, филиал)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    /// Получить код статуса (совпадает с сериализованным значением)
    pub fn code(&self) -> &'static str {
        match self {
            RecordStatus::Active => "Active",
            RecordStatus::Inactive => "Inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RecordStatus::Active)
    }

    /// Противоположный статус (кнопка "Деактивировать/Активировать")
    pub fn toggled(&self) -> Self {
        match self {
            RecordStatus::Active => RecordStatus::Inactive,
            RecordStatus::Inactive => RecordStatus::Active,
        }
    }

    pub fn all() -> Vec<RecordStatus> {
        vec![RecordStatus::Active, RecordStatus::Inactive]
    }

    /// Парсинг из строки. Сравнение точное, как в фильтре статуса.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Active" => Some(RecordStatus::Active),
            "Inactive" => Some(RecordStatus::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
