use crate::domain::common::entity_form::{check_code, check_required, finish};
use crate::domain::common::{AggregateRoot, EntityForm, EntityMetadata, UpdateForm};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

crate::aggregate_id!(
    /// Уникальный идентификатор подразделения
    DepartmentId
);

pub const DEPARTMENT_CODE_MAX_LEN: usize = 20;
pub const DEPARTMENT_NAME_MAX_LEN: usize = 255;

// ============================================================================
// Aggregate Root
// ============================================================================

/// Подразделение (phòng ban), к которому закреплены основные средства
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Department {
    pub department_id: DepartmentId,
    pub department_code: String,
    pub department_name: String,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl AggregateRoot for Department {
    type Id = DepartmentId;

    fn id(&self) -> Self::Id {
        self.department_id
    }

    fn code(&self) -> &str {
        &self.department_code
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "department"
    }

    fn element_name() -> &'static str {
        "Department"
    }

    fn list_name() -> &'static str {
        "Departments"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Модель чтения подразделения (строка `view_department`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepartmentDto {
    pub department_id: DepartmentId,
    pub department_code: String,
    pub department_name: String,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

/// DTO создания: ID генерируется сервером
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct DepartmentCreateDto {
    pub department_code: String,
    pub department_name: String,
}

/// DTO изменения
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct DepartmentUpdateDto {
    #[serde(default)]
    pub department_id: Option<Uuid>,
    pub department_code: String,
    pub department_name: String,
}

fn validate_fields(code: &str, name: &str) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    check_code(&mut errors, "DepartmentCode", code, DEPARTMENT_CODE_MAX_LEN);
    check_required(&mut errors, "DepartmentName", name, DEPARTMENT_NAME_MAX_LEN);
    finish(errors)
}

impl EntityForm for DepartmentCreateDto {
    fn code(&self) -> &str {
        self.department_code.trim()
    }

    fn validate(&self) -> Result<(), Vec<String>> {
        validate_fields(&self.department_code, &self.department_name)
    }
}

impl EntityForm for DepartmentUpdateDto {
    fn code(&self) -> &str {
        self.department_code.trim()
    }

    fn validate(&self) -> Result<(), Vec<String>> {
        validate_fields(&self.department_code, &self.department_name)
    }
}

impl UpdateForm for DepartmentUpdateDto {
    fn target_id(&self) -> Option<Uuid> {
        self.department_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto_uses_pascal_case() {
        let dto: DepartmentCreateDto =
            serde_json::from_str(r#"{"DepartmentName":"Sales","DepartmentCode":"D01"}"#).unwrap();
        assert_eq!(dto.department_code, "D01");
        assert_eq!(dto.department_name, "Sales");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_dto_id_is_optional() {
        let dto: DepartmentUpdateDto =
            serde_json::from_str(r#"{"DepartmentName":"Sales","DepartmentCode":"D01"}"#).unwrap();
        assert_eq!(dto.target_id(), None);
    }

    #[test]
    fn test_validation_reports_every_field() {
        let dto = DepartmentCreateDto::default();
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_form_code_is_trimmed() {
        let dto = DepartmentCreateDto {
            department_code: " D01 ".into(),
            department_name: "Sales".into(),
        };
        assert_eq!(dto.code(), "D01");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_route_segment_is_not_a_code() {
        let dto = DepartmentCreateDto {
            department_code: "Count".into(),
            department_name: "Sales".into(),
        };
        assert_eq!(
            dto.validate().unwrap_err(),
            vec!["DepartmentCode 'Count' is reserved".to_string()]
        );
    }

    #[test]
    fn test_read_model_flattens_metadata() {
        let dto = DepartmentDto {
            department_id: DepartmentId::new_v4(),
            department_code: "D01".into(),
            department_name: "Sales".into(),
            metadata: EntityMetadata::default(),
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["DepartmentCode"], "D01");
        assert!(value.get("CreatedDate").is_some());
        assert!(value.get("Metadata").is_none());
    }
}
