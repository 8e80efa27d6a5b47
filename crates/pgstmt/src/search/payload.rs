use super::config::SearchLimits;
use super::pagination::{Pagination, PaginationMeta};
use super::sorting::Sorting;
use crate::error::StmtResult;
use serde::{Deserialize, Serialize};

/// A search request over some resource, generic over its filter type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload<T> {
    pub filters: T,
    #[serde(default)]
    pub sort: Sorting,
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> SearchPayload<T> {
    /// Apply pagination defaults and check the sort field against `allowed_fields`.
    pub fn init(&mut self, allowed_fields: &[&str]) -> StmtResult<()> {
        self.pagination.apply_defaults();
        self.sort.validate(allowed_fields)
    }

    /// Like [`init`](Self::init), also capping the page size with `limits`.
    pub fn init_with_limits(
        &mut self,
        allowed_fields: &[&str],
        limits: &SearchLimits,
    ) -> StmtResult<()> {
        self.pagination.apply_limits(limits);
        self.sort.validate(allowed_fields)
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    pub items: T,
    pub pagination: PaginationMeta,
}

impl<T> SearchResult<T> {
    pub fn new(items: T, pagination: PaginationMeta) -> Self {
        Self { items, pagination }
    }
}
