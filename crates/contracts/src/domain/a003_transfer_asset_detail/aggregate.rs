use crate::domain::a001_department::aggregate::DepartmentId;
use crate::domain::common::entity_form::{check_code, check_optional, finish};
use crate::domain::common::{AggregateRoot, EntityForm, EntityMetadata, UpdateForm};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

crate::aggregate_id!(
    /// Уникальный идентификатор строки документа передачи
    TransferAssetDetailId
);

pub const TRANSFER_DETAIL_CODE_MAX_LEN: usize = 20;
pub const TRANSFER_REASON_MAX_LEN: usize = 500;

/// Строка документа передачи: какой актив из какого подразделения в какое
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransferAssetDetail {
    pub transfer_asset_detail_id: TransferAssetDetailId,
    pub transfer_asset_detail_code: String,
    pub transfer_asset_id: Uuid,
    pub fixed_asset_id: Uuid,
    pub old_department_id: DepartmentId,
    pub new_department_id: DepartmentId,
    pub reason: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl AggregateRoot for TransferAssetDetail {
    type Id = TransferAssetDetailId;

    fn id(&self) -> Self::Id {
        self.transfer_asset_detail_id
    }

    fn code(&self) -> &str {
        &self.transfer_asset_detail_code
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "transfer_asset_detail"
    }

    fn element_name() -> &'static str {
        "TransferAssetDetail"
    }

    fn list_name() -> &'static str {
        "TransferAssetDetails"
    }
}

/// Модель чтения: строка `view_transfer_asset_detail` с наименованиями
/// подразделений из соединения с `department`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransferAssetDetailDto {
    pub transfer_asset_detail_id: TransferAssetDetailId,
    pub transfer_asset_detail_code: String,
    pub transfer_asset_id: Uuid,
    pub fixed_asset_id: Uuid,
    pub old_department_id: DepartmentId,
    pub old_department_name: Option<String>,
    pub new_department_id: DepartmentId,
    pub new_department_name: Option<String>,
    pub reason: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransferAssetDetailCreateDto {
    pub transfer_asset_detail_code: String,
    pub transfer_asset_id: Uuid,
    pub fixed_asset_id: Uuid,
    pub old_department_id: DepartmentId,
    pub new_department_id: DepartmentId,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransferAssetDetailUpdateDto {
    #[serde(default)]
    pub transfer_asset_detail_id: Option<Uuid>,
    pub transfer_asset_detail_code: String,
    pub transfer_asset_id: Uuid,
    pub fixed_asset_id: Uuid,
    pub old_department_id: DepartmentId,
    pub new_department_id: DepartmentId,
    #[serde(default)]
    pub reason: Option<String>,
}

fn validate_fields(
    code: &str,
    old_department: DepartmentId,
    new_department: DepartmentId,
    reason: Option<&str>,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    check_code(
        &mut errors,
        "TransferAssetDetailCode",
        code,
        TRANSFER_DETAIL_CODE_MAX_LEN,
    );
    check_optional(&mut errors, "Reason", reason, TRANSFER_REASON_MAX_LEN);
    if old_department == new_department {
        errors.push("NewDepartmentId must differ from OldDepartmentId".to_string());
    }
    finish(errors)
}

impl EntityForm for TransferAssetDetailCreateDto {
    fn code(&self) -> &str {
        self.transfer_asset_detail_code.trim()
    }

    fn validate(&self) -> Result<(), Vec<String>> {
        validate_fields(
            &self.transfer_asset_detail_code,
            self.old_department_id,
            self.new_department_id,
            self.reason.as_deref(),
        )
    }
}

impl EntityForm for TransferAssetDetailUpdateDto {
    fn code(&self) -> &str {
        self.transfer_asset_detail_code.trim()
    }

    fn validate(&self) -> Result<(), Vec<String>> {
        validate_fields(
            &self.transfer_asset_detail_code,
            self.old_department_id,
            self.new_department_id,
            self.reason.as_deref(),
        )
    }
}

impl UpdateForm for TransferAssetDetailUpdateDto {
    fn target_id(&self) -> Option<Uuid> {
        self.transfer_asset_detail_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_department_is_rejected() {
        let department = DepartmentId::new_v4();
        let dto = TransferAssetDetailCreateDto {
            transfer_asset_detail_code: "DC00001".into(),
            transfer_asset_id: Uuid::new_v4(),
            fixed_asset_id: Uuid::new_v4(),
            old_department_id: department,
            new_department_id: department,
            reason: None,
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(
            errors,
            vec!["NewDepartmentId must differ from OldDepartmentId".to_string()]
        );
    }

    #[test]
    fn test_table_and_route_names() {
        assert_eq!(TransferAssetDetail::collection_name(), "transfer_asset_detail");
        assert_eq!(TransferAssetDetail::list_name(), "TransferAssetDetails");
        assert_eq!(TransferAssetDetail::full_name(), "a003_transfer_asset_detail");
    }
}
