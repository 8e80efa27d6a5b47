use super::config::SearchLimits;
use serde::{Deserialize, Serialize};

/// Page-number pagination as sent by clients. Pages start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Page below 1 becomes 1; non-positive limit becomes the default page size.
    pub fn apply_defaults(&mut self) {
        self.apply_defaults_with(&SearchLimits::default());
    }

    fn apply_defaults_with(&mut self, limits: &SearchLimits) {
        if self.page < 1 {
            self.page = 1;
        }
        if self.limit <= 0 {
            self.limit = limits.default_limit;
        }
    }

    /// [`apply_defaults`](Self::apply_defaults) with `limits`, then cap the page size.
    pub fn apply_limits(&mut self, limits: &SearchLimits) {
        self.apply_defaults_with(limits);
        self.limit = limits.clamp(Some(self.limit));
    }

    /// Rows to skip before this page. Saturates at `i64::MAX` for page
    /// numbers too large to address.
    pub fn offset(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .max(0)
    }

    /// Number of pages needed for `total_items` rows (0 when there is no page size).
    pub fn total_pages(&self, total_items: i64) -> i64 {
        if self.limit <= 0 || total_items <= 0 {
            return 0;
        }
        total_items / self.limit + i64::from(total_items % self.limit != 0)
    }

    pub fn meta(&self, total_items: i64) -> PaginationMeta {
        PaginationMeta {
            pagination: *self,
            total_items,
            total_pages: self.total_pages(total_items),
        }
    }
}

/// Pagination echoed back with totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub total_items: i64,
    pub total_pages: i64,
}
