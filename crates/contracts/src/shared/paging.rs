use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 500;

/// Параметры запроса `GET /Filter`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default = "default_page_number")]
    pub page_number: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_page_number() -> u64 {
    1
}

impl Default for FilterRequest {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_number: 1,
            search: None,
        }
    }
}

impl FilterRequest {
    /// Размер страницы в допустимых пределах
    pub fn limit(&self) -> u64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Смещение для SQL (страницы нумеруются с 1), насыщается вместо
    /// переполнения
    pub fn offset(&self) -> u64 {
        self.page_number
            .max(1)
            .saturating_sub(1)
            .saturating_mul(self.limit())
    }

    /// Непустая строка поиска
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Страница результатов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PagingResult<T> {
    pub data: Vec<T>,
    pub total_record: i64,
}
