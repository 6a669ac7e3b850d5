use super::{AggregateId, EntityMetadata};

/// Трейт для корня агрегата
///
/// Определяет обязательные методы и метаданные для всех сущностей системы
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id: AggregateId;

    // ============================================================================
    // Методы экземпляра (данные конкретной записи)
    // ============================================================================

    /// Получить ID записи
    fn id(&self) -> Self::Id;

    /// Получить бизнес-код записи (например, "D01")
    fn code(&self) -> &str;

    /// Получить метаданные аудита
    fn metadata(&self) -> &EntityMetadata;

    /// Получить изменяемые метаданные
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Метаданные класса агрегата (статические данные)
    // ============================================================================

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя таблицы БД (например, "department")
    fn collection_name() -> &'static str;

    /// Имя элемента (единственное число, например, "Department")
    fn element_name() -> &'static str;

    /// Имя списка (множественное число), оно же сегмент REST маршрута
    fn list_name() -> &'static str;

    /// Полное имя агрегата для системы (например, "a001_department")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
