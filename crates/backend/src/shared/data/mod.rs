pub mod base_repository;
pub mod db;
pub mod table_mapping;
pub mod unit_of_work;
