use super::{AggregateId, EntityMetadata};
use crate::enums::RecordStatus;

/// Трейт для корня агрегата
///
/// Общий интерфейс записей иерархии склада: поиск и таблицы работают через него,
/// не зная конкретного типа строки.
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id: AggregateId;

    // ============================================================================
    // Методы экземпляра (данные конкретной записи)
    // ============================================================================

    /// Получить ID записи
    fn id(&self) -> Self::Id;

    /// Получить бизнес-код записи (например, "WH-001")
    fn code(&self) -> &str;

    /// Получить наименование записи
    fn name(&self) -> &str;

    fn status(&self) -> RecordStatus;

    /// Получить метаданные изменения
    fn metadata(&self) -> &EntityMetadata;

    /// Получить изменяемые метаданные
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Метаданные класса агрегата (статические данные)
    // ============================================================================

    /// Индекс агрегата в системе (например, "a002")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции (например, "warehouse")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число, например, "Warehouse")
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число, например, "Warehouses")
    fn list_name() -> &'static str;

    // ============================================================================
    // Методы с реализацией по умолчанию
    // ============================================================================

    /// Полное имя агрегата для системы (например, "a002_warehouse")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
