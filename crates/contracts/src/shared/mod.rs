pub mod operation_result;
pub mod paging;
