use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Optional `?limit=&offset=` window. Both absent means the whole table.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    /// Bind values for `LIMIT $n OFFSET $m`; Postgres treats NULL as "no limit"
    /// and "no offset".
    pub fn bounds(&self) -> AppResult<(Option<i64>, Option<i64>)> {
        if self.limit.is_some_and(|l| l < 0) || self.offset.is_some_and(|o| o < 0) {
            return Err(AppError::Validation(
                "limit and offset must be non-negative".into(),
            ));
        }
        Ok((self.limit, self.offset))
    }
}
