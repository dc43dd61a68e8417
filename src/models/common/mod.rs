pub mod pagination;
pub mod reorder;
pub mod response;

pub use pagination::{PaginationInfo, PaginationQuery};
pub use reorder::{ReorderOutcome, ReorderRequest, ReorderResponse};
pub use response::{ApiResponse, FieldError};
