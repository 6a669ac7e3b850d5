use chrono::{DateTime, Utc};
use contracts::domain::a001_department::aggregate::{
    Department, DepartmentCreateDto, DepartmentDto, DepartmentUpdateDto,
};
use contracts::domain::common::EntityMetadata;
use sea_orm::{FromQueryResult, Value};

use crate::shared::data::base_repository::parse_id;
use crate::shared::data::table_mapping::TableMapping;

/// Строка `department` / `view_department` (колонки совпадают)
#[derive(Debug, Clone, FromQueryResult)]
pub struct DepartmentRow {
    pub department_id: String,
    pub department_code: String,
    pub department_name: String,
    pub created_date: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_date: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
}

impl DepartmentRow {
    fn metadata(&self) -> EntityMetadata {
        EntityMetadata {
            created_date: self.created_date,
            created_by: self.created_by.clone(),
            modified_date: self.modified_date,
            modified_by: self.modified_by.clone(),
        }
    }
}

pub struct DepartmentTable;

impl TableMapping for DepartmentTable {
    type Entity = Department;
    type Model = DepartmentDto;
    type CreateDto = DepartmentCreateDto;
    type UpdateDto = DepartmentUpdateDto;
    type EntityRow = DepartmentRow;
    type ModelRow = DepartmentRow;

    const VIEW: &'static str = "view_department";
    const ID_COLUMN: &'static str = "department_id";
    const CODE_COLUMN: &'static str = "department_code";
    const NAME_COLUMN: &'static str = "department_name";
    const CODE_PREFIX: &'static str = "D";
    const CODE_WIDTH: usize = 2;

    fn entity_from_row(row: DepartmentRow) -> anyhow::Result<Department> {
        Ok(Department {
            department_id: parse_id(&row.department_id)?,
            metadata: row.metadata(),
            department_code: row.department_code,
            department_name: row.department_name,
        })
    }

    fn model_from_row(row: DepartmentRow) -> anyhow::Result<DepartmentDto> {
        Ok(DepartmentDto {
            department_id: parse_id(&row.department_id)?,
            metadata: row.metadata(),
            department_code: row.department_code,
            department_name: row.department_name,
        })
    }

    fn create_values(dto: &DepartmentCreateDto) -> Vec<(&'static str, Value)> {
        vec![
            ("department_code", dto.department_code.trim().into()),
            ("department_name", dto.department_name.trim().into()),
        ]
    }

    fn update_values(dto: &DepartmentUpdateDto) -> Vec<(&'static str, Value)> {
        vec![
            ("department_code", dto.department_code.trim().into()),
            ("department_name", dto.department_name.trim().into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_names() {
        assert_eq!(DepartmentTable::table(), "department");
        assert_eq!(DepartmentTable::route(), "Departments");
        assert_eq!(DepartmentTable::LIST_BY_IDS_COLUMN, "department_id");
    }

    #[test]
    fn test_row_with_bad_id_is_rejected() {
        let row = DepartmentRow {
            department_id: "garbage".into(),
            department_code: "D01".into(),
            department_name: "Sales".into(),
            created_date: None,
            created_by: None,
            modified_date: None,
            modified_by: None,
        };
        assert!(DepartmentTable::entity_from_row(row).is_err());
    }
}
