use crate::domain::common::entity_form::{check_code, check_optional, check_required, finish};
use crate::domain::common::{AggregateRoot, EntityForm, EntityMetadata, UpdateForm};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

crate::aggregate_id!(
    /// Уникальный идентификатор члена комиссии по передаче
    ReceiverId
);

pub const RECEIVER_CODE_MAX_LEN: usize = 20;
pub const RECEIVER_NAME_MAX_LEN: usize = 100;
pub const RECEIVER_TEXT_MAX_LEN: usize = 255;

/// Член комиссии по документу передачи активов.
///
/// Принадлежит документу передачи `transfer_asset_id`; выборка по списку ID
/// для этого агрегата идёт по документу, а не по собственному ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Receiver {
    pub receiver_id: ReceiverId,
    pub transfer_asset_id: Uuid,
    pub receiver_code: String,
    pub receiver_full_name: String,
    pub receiver_delegate: Option<String>,
    pub receiver_position: Option<String>,
    pub receiver_order: i32,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl AggregateRoot for Receiver {
    type Id = ReceiverId;

    fn id(&self) -> Self::Id {
        self.receiver_id
    }

    fn code(&self) -> &str {
        &self.receiver_code
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "receiver"
    }

    fn element_name() -> &'static str {
        "Receiver"
    }

    fn list_name() -> &'static str {
        "Receivers"
    }
}

/// Модель чтения (строка `view_receiver`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiverDto {
    pub receiver_id: ReceiverId,
    pub transfer_asset_id: Uuid,
    pub receiver_code: String,
    pub receiver_full_name: String,
    pub receiver_delegate: Option<String>,
    pub receiver_position: Option<String>,
    pub receiver_order: i32,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiverCreateDto {
    pub transfer_asset_id: Uuid,
    pub receiver_code: String,
    pub receiver_full_name: String,
    #[serde(default)]
    pub receiver_delegate: Option<String>,
    #[serde(default)]
    pub receiver_position: Option<String>,
    #[serde(default)]
    pub receiver_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiverUpdateDto {
    #[serde(default)]
    pub receiver_id: Option<Uuid>,
    pub transfer_asset_id: Uuid,
    pub receiver_code: String,
    pub receiver_full_name: String,
    #[serde(default)]
    pub receiver_delegate: Option<String>,
    #[serde(default)]
    pub receiver_position: Option<String>,
    #[serde(default)]
    pub receiver_order: i32,
}

fn validate_fields(
    code: &str,
    full_name: &str,
    delegate: Option<&str>,
    position: Option<&str>,
    order: i32,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    check_code(&mut errors, "ReceiverCode", code, RECEIVER_CODE_MAX_LEN);
    check_required(&mut errors, "ReceiverFullName", full_name, RECEIVER_NAME_MAX_LEN);
    check_optional(&mut errors, "ReceiverDelegate", delegate, RECEIVER_TEXT_MAX_LEN);
    check_optional(&mut errors, "ReceiverPosition", position, RECEIVER_TEXT_MAX_LEN);
    if order < 0 {
        errors.push("ReceiverOrder must not be negative".to_string());
    }
    finish(errors)
}

impl EntityForm for ReceiverCreateDto {
    fn code(&self) -> &str {
        self.receiver_code.trim()
    }

    fn validate(&self) -> Result<(), Vec<String>> {
        validate_fields(
            &self.receiver_code,
            &self.receiver_full_name,
            self.receiver_delegate.as_deref(),
            self.receiver_position.as_deref(),
            self.receiver_order,
        )
    }
}

impl EntityForm for ReceiverUpdateDto {
    fn code(&self) -> &str {
        self.receiver_code.trim()
    }

    fn validate(&self) -> Result<(), Vec<String>> {
        validate_fields(
            &self.receiver_code,
            &self.receiver_full_name,
            self.receiver_delegate.as_deref(),
            self.receiver_position.as_deref(),
            self.receiver_order,
        )
    }
}

impl UpdateForm for ReceiverUpdateDto {
    fn target_id(&self) -> Option<Uuid> {
        self.receiver_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default() {
        let transfer = Uuid::new_v4();
        let json = format!(
            r#"{{"TransferAssetId":"{}","ReceiverCode":"NN00001","ReceiverFullName":"Nguyen Van A"}}"#,
            transfer
        );
        let dto: ReceiverCreateDto = serde_json::from_str(&json).unwrap();
        assert_eq!(dto.transfer_asset_id, transfer);
        assert_eq!(dto.receiver_order, 0);
        assert!(dto.receiver_delegate.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_negative_order_is_rejected() {
        let dto = ReceiverCreateDto {
            receiver_code: "NN00001".into(),
            receiver_full_name: "Nguyen Van A".into(),
            receiver_order: -1,
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors, vec!["ReceiverOrder must not be negative".to_string()]);
    }
}
