use chrono::{DateTime, Utc};
use contracts::domain::a003_transfer_asset_detail::aggregate::{
    TransferAssetDetail, TransferAssetDetailCreateDto, TransferAssetDetailDto,
    TransferAssetDetailUpdateDto,
};
use contracts::domain::common::{AggregateId, EntityMetadata};
use sea_orm::{FromQueryResult, Value};

use crate::shared::data::base_repository::{parse_id, parse_uuid};
use crate::shared::data::table_mapping::TableMapping;

/// Строка таблицы `transfer_asset_detail`
#[derive(Debug, Clone, FromQueryResult)]
pub struct TransferAssetDetailRow {
    pub transfer_asset_detail_id: String,
    pub transfer_asset_detail_code: String,
    pub transfer_asset_id: String,
    pub fixed_asset_id: String,
    pub old_department_id: String,
    pub new_department_id: String,
    pub reason: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_date: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
}

/// Строка `view_transfer_asset_detail` (с наименованиями подразделений)
#[derive(Debug, Clone, FromQueryResult)]
pub struct TransferAssetDetailViewRow {
    pub transfer_asset_detail_id: String,
    pub transfer_asset_detail_code: String,
    pub transfer_asset_id: String,
    pub fixed_asset_id: String,
    pub old_department_id: String,
    pub old_department_name: Option<String>,
    pub new_department_id: String,
    pub new_department_name: Option<String>,
    pub reason: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_date: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
}

pub struct TransferAssetDetailTable;

impl TableMapping for TransferAssetDetailTable {
    type Entity = TransferAssetDetail;
    type Model = TransferAssetDetailDto;
    type CreateDto = TransferAssetDetailCreateDto;
    type UpdateDto = TransferAssetDetailUpdateDto;
    type EntityRow = TransferAssetDetailRow;
    type ModelRow = TransferAssetDetailViewRow;

    const VIEW: &'static str = "view_transfer_asset_detail";
    const ID_COLUMN: &'static str = "transfer_asset_detail_id";
    const CODE_COLUMN: &'static str = "transfer_asset_detail_code";
    const NAME_COLUMN: &'static str = "reason";
    const CODE_PREFIX: &'static str = "DC";
    const CODE_WIDTH: usize = 5;

    fn entity_from_row(row: TransferAssetDetailRow) -> anyhow::Result<TransferAssetDetail> {
        Ok(TransferAssetDetail {
            transfer_asset_detail_id: parse_id(&row.transfer_asset_detail_id)?,
            transfer_asset_id: parse_uuid(&row.transfer_asset_id)?,
            fixed_asset_id: parse_uuid(&row.fixed_asset_id)?,
            old_department_id: parse_id(&row.old_department_id)?,
            new_department_id: parse_id(&row.new_department_id)?,
            transfer_asset_detail_code: row.transfer_asset_detail_code,
            reason: row.reason,
            metadata: EntityMetadata {
                created_date: row.created_date,
                created_by: row.created_by,
                modified_date: row.modified_date,
                modified_by: row.modified_by,
            },
        })
    }

    fn model_from_row(row: TransferAssetDetailViewRow) -> anyhow::Result<TransferAssetDetailDto> {
        Ok(TransferAssetDetailDto {
            transfer_asset_detail_id: parse_id(&row.transfer_asset_detail_id)?,
            transfer_asset_id: parse_uuid(&row.transfer_asset_id)?,
            fixed_asset_id: parse_uuid(&row.fixed_asset_id)?,
            old_department_id: parse_id(&row.old_department_id)?,
            new_department_id: parse_id(&row.new_department_id)?,
            transfer_asset_detail_code: row.transfer_asset_detail_code,
            old_department_name: row.old_department_name,
            new_department_name: row.new_department_name,
            reason: row.reason,
            metadata: EntityMetadata {
                created_date: row.created_date,
                created_by: row.created_by,
                modified_date: row.modified_date,
                modified_by: row.modified_by,
            },
        })
    }

    fn create_values(dto: &TransferAssetDetailCreateDto) -> Vec<(&'static str, Value)> {
        vec![
            (
                "transfer_asset_detail_code",
                dto.transfer_asset_detail_code.trim().into(),
            ),
            ("transfer_asset_id", dto.transfer_asset_id.to_string().into()),
            ("fixed_asset_id", dto.fixed_asset_id.to_string().into()),
            ("old_department_id", dto.old_department_id.as_string().into()),
            ("new_department_id", dto.new_department_id.as_string().into()),
            ("reason", dto.reason.clone().into()),
        ]
    }

    fn update_values(dto: &TransferAssetDetailUpdateDto) -> Vec<(&'static str, Value)> {
        vec![
            (
                "transfer_asset_detail_code",
                dto.transfer_asset_detail_code.trim().into(),
            ),
            ("transfer_asset_id", dto.transfer_asset_id.to_string().into()),
            ("fixed_asset_id", dto.fixed_asset_id.to_string().into()),
            ("old_department_id", dto.old_department_id.as_string().into()),
            ("new_department_id", dto.new_department_id.as_string().into()),
            ("reason", dto.reason.clone().into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_names() {
        assert_eq!(TransferAssetDetailTable::table(), "transfer_asset_detail");
        assert_eq!(TransferAssetDetailTable::route(), "TransferAssetDetails");
        assert_eq!(
            TransferAssetDetailTable::LIST_BY_IDS_COLUMN,
            "transfer_asset_detail_id"
        );
    }
}
