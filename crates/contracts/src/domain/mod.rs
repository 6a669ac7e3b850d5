pub mod a001_department;
pub mod a002_receiver;
pub mod a003_transfer_asset_detail;
pub mod common;
