use domain::{PageRequest, PaginationError};
use serde::Deserialize;
use utoipa::IntoParams;

/// Pagination query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number, starting at 1 (default: 1)
    pub page: Option<i64>,
    /// Items per page, 1 to 100 (default: 10)
    pub per_page: Option<i64>,
}

impl PaginationQuery {
    pub fn into_request(self) -> Result<PageRequest, PaginationError> {
        PageRequest::new(self.page, self.per_page)
    }
}
