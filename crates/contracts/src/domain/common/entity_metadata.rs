use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Поля аудита записи
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct EntityMetadata {
    /// Дата создания записи
    pub created_date: Option<DateTime<Utc>>,
    /// Кто создал
    pub created_by: Option<String>,
    /// Дата последнего изменения
    pub modified_date: Option<DateTime<Utc>>,
    /// Кто изменил
    pub modified_by: Option<String>,
}

impl EntityMetadata {
    /// Метаданные для новой записи
    pub fn new_created(by: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            created_date: Some(now),
            created_by: by.clone(),
            modified_date: Some(now),
            modified_by: by,
        }
    }

    /// Отметить изменение
    pub fn touch(&mut self, by: Option<String>) {
        self.modified_date = Some(Utc::now());
        self.modified_by = by;
    }
}
