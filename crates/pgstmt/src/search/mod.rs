//! Request-side search values: pagination, sorting and cursors.
//!
//! These are decoded from client requests (they derive `serde` traits), checked
//! with their `validate`/`apply_*` methods, and then fed into a
//! [`StatementBuilder`](crate::StatementBuilder) via
//! [`apply_sorting`](crate::StatementBuilder::apply_sorting) and
//! [`apply_pagination`](crate::StatementBuilder::apply_pagination).

mod config;
mod cursor;
mod pagination;
mod payload;
mod sorting;

#[cfg(test)]
mod tests;

pub use config::SearchLimits;
pub use cursor::Cursor;
pub use pagination::{Pagination, PaginationMeta};
pub use payload::{SearchPayload, SearchResult};
pub use sorting::{SORT_ASC, SORT_DESC, Sorting};
