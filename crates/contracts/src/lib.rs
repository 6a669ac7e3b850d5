//! Общие типы backend/frontend: агрегаты, DTO, конверт ошибок, пагинация

pub mod domain;
pub mod shared;
