use chrono::{DateTime, Utc};
use contracts::domain::a002_receiver::aggregate::{
    Receiver, ReceiverCreateDto, ReceiverDto, ReceiverUpdateDto,
};
use contracts::domain::common::EntityMetadata;
use sea_orm::{FromQueryResult, Value};

use crate::shared::data::base_repository::{parse_id, parse_uuid};
use crate::shared::data::table_mapping::TableMapping;

#[derive(Debug, Clone, FromQueryResult)]
pub struct ReceiverRow {
    pub receiver_id: String,
    pub transfer_asset_id: String,
    pub receiver_code: String,
    pub receiver_full_name: String,
    pub receiver_delegate: Option<String>,
    pub receiver_position: Option<String>,
    pub receiver_order: i32,
    pub created_date: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_date: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
}

impl ReceiverRow {
    fn metadata(&self) -> EntityMetadata {
        EntityMetadata {
            created_date: self.created_date,
            created_by: self.created_by.clone(),
            modified_date: self.modified_date,
            modified_by: self.modified_by.clone(),
        }
    }
}

fn none_if_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub struct ReceiverTable;

impl TableMapping for ReceiverTable {
    type Entity = Receiver;
    type Model = ReceiverDto;
    type CreateDto = ReceiverCreateDto;
    type UpdateDto = ReceiverUpdateDto;
    type EntityRow = ReceiverRow;
    type ModelRow = ReceiverRow;

    const VIEW: &'static str = "view_receiver";
    const ID_COLUMN: &'static str = "receiver_id";
    const CODE_COLUMN: &'static str = "receiver_code";
    const NAME_COLUMN: &'static str = "receiver_full_name";
    // Члены комиссии выбираются по документам передачи
    const LIST_BY_IDS_COLUMN: &'static str = "transfer_asset_id";
    const CODE_PREFIX: &'static str = "NN";
    const CODE_WIDTH: usize = 5;

    fn entity_from_row(row: ReceiverRow) -> anyhow::Result<Receiver> {
        Ok(Receiver {
            receiver_id: parse_id(&row.receiver_id)?,
            transfer_asset_id: parse_uuid(&row.transfer_asset_id)?,
            metadata: row.metadata(),
            receiver_code: row.receiver_code,
            receiver_full_name: row.receiver_full_name,
            receiver_delegate: row.receiver_delegate,
            receiver_position: row.receiver_position,
            receiver_order: row.receiver_order,
        })
    }

    fn model_from_row(row: ReceiverRow) -> anyhow::Result<ReceiverDto> {
        Ok(ReceiverDto {
            receiver_id: parse_id(&row.receiver_id)?,
            transfer_asset_id: parse_uuid(&row.transfer_asset_id)?,
            metadata: row.metadata(),
            receiver_code: row.receiver_code,
            receiver_full_name: row.receiver_full_name,
            receiver_delegate: row.receiver_delegate,
            receiver_position: row.receiver_position,
            receiver_order: row.receiver_order,
        })
    }

    fn create_values(dto: &ReceiverCreateDto) -> Vec<(&'static str, Value)> {
        vec![
            ("transfer_asset_id", dto.transfer_asset_id.to_string().into()),
            ("receiver_code", dto.receiver_code.trim().into()),
            ("receiver_full_name", dto.receiver_full_name.trim().into()),
            ("receiver_delegate", none_if_blank(&dto.receiver_delegate).into()),
            ("receiver_position", none_if_blank(&dto.receiver_position).into()),
            ("receiver_order", dto.receiver_order.into()),
        ]
    }

    fn update_values(dto: &ReceiverUpdateDto) -> Vec<(&'static str, Value)> {
        vec![
            ("transfer_asset_id", dto.transfer_asset_id.to_string().into()),
            ("receiver_code", dto.receiver_code.trim().into()),
            ("receiver_full_name", dto.receiver_full_name.trim().into()),
            ("receiver_delegate", none_if_blank(&dto.receiver_delegate).into()),
            ("receiver_position", none_if_blank(&dto.receiver_position).into()),
            ("receiver_order", dto.receiver_order.into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_by_ids_uses_transfer_asset_column() {
        assert_eq!(ReceiverTable::table(), "receiver");
        assert_eq!(ReceiverTable::LIST_BY_IDS_COLUMN, "transfer_asset_id");
    }

    #[test]
    fn test_blank_optional_text_is_stored_as_null() {
        assert_eq!(none_if_blank(&Some("  ".into())), None);
        assert_eq!(none_if_blank(&Some(" Head ".into())), Some("Head".into()));
        assert_eq!(none_if_blank(&None), None);
    }
}
