pub mod api_utils;
pub mod components;
pub mod http_client;
pub mod row_selection;
