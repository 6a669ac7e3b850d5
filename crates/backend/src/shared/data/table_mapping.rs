use contracts::domain::common::{AggregateRoot, EntityForm, UpdateForm};
use sea_orm::{FromQueryResult, Value};
use serde::{de::DeserializeOwned, Serialize};

/// Явное описание таблицы сущности для обобщённого репозитория.
///
/// Реализуется один раз на каждую сущность; имена таблицы, представления и
/// колонок объявляются статически, без вывода из имени типа.
pub trait TableMapping: Send + Sync + 'static {
    /// Сущность (строка таблицы)
    type Entity: AggregateRoot + Serialize + Send + Sync + 'static;
    /// Модель чтения (строка представления)
    type Model: Serialize + Send + Sync + 'static;
    type CreateDto: EntityForm + DeserializeOwned + Send + Sync + 'static;
    type UpdateDto: UpdateForm + DeserializeOwned + Send + Sync + 'static;
    type EntityRow: FromQueryResult + Send + Sync;
    type ModelRow: FromQueryResult + Send + Sync;

    /// Представление для модели чтения
    const VIEW: &'static str;
    const ID_COLUMN: &'static str;
    const CODE_COLUMN: &'static str;
    /// Колонка наименования, участвует в поиске
    const NAME_COLUMN: &'static str;
    /// Колонка, по которой работает выборка по списку ID
    const LIST_BY_IDS_COLUMN: &'static str = Self::ID_COLUMN;
    /// Префикс генерируемого кода (например, "D" для "D01")
    const CODE_PREFIX: &'static str;
    /// Минимальная ширина числовой части кода
    const CODE_WIDTH: usize;

    /// Имя таблицы
    fn table() -> &'static str {
        <Self::Entity as AggregateRoot>::collection_name()
    }

    /// Сегмент REST маршрута
    fn route() -> &'static str {
        <Self::Entity as AggregateRoot>::list_name()
    }

    fn entity_from_row(row: Self::EntityRow) -> anyhow::Result<Self::Entity>;

    fn model_from_row(row: Self::ModelRow) -> anyhow::Result<Self::Model>;

    /// Изменяемые колонки и значения для INSERT (без ID и аудита)
    fn create_values(dto: &Self::CreateDto) -> Vec<(&'static str, Value)>;

    /// Изменяемые колонки и значения для UPDATE (без ID и аудита)
    fn update_values(dto: &Self::UpdateDto) -> Vec<(&'static str, Value)>;
}
