//! # pgstmt
//!
//! Dynamic, parameter-safe statement building for PostgreSQL.
//!
//! ## Features
//!
//! - **Optional filters**: every filter call is skipped when its input is empty or `None`,
//!   so request parameters can be forwarded without guard code
//! - **Positional placeholders**: values are always bound as `$1, $2, ...`, never interpolated
//! - **Derived counts**: the same filters render a `SELECT COUNT(*)` statement
//!   without ordering or pagination
//! - **Search values**: pagination, sorting and cursor types for request payloads
//!
//! ## Example
//!
//! ```ignore
//! use pgstmt::{Operator, StatementBuilder};
//!
//! let mut b = StatementBuilder::new("SELECT * FROM users");
//! b.compare_filter("age", Operator::Gte, Some(18))
//!     .prefix_filter("name", "al", false)
//!     .sort("created_at", "desc")
//!     .paginate(10, 0);
//!
//! // SELECT * FROM users WHERE age >= $1 AND name ILIKE $2 ORDER BY created_at DESC LIMIT 10
//! let users = b.build().fetch_all(&client).await?;
//!
//! // SELECT COUNT(*) FROM (SELECT 1 FROM users WHERE age >= $1 AND name ILIKE $2) AS count_alias
//! let total = b.count().fetch_count(&client).await?;
//! ```

pub mod client;
pub mod error;
pub mod filter;
pub mod param;
pub mod row;
pub mod search;
pub mod stmt;

mod trace;

pub use client::GenericClient;
pub use error::{StmtError, StmtResult};
pub use filter::{CompareOperator, DateRange, Operator, resolve_operator};
pub use param::{Param, ParamList};
pub use row::{FromRow, RowExt};
pub use search::{
    Cursor, Pagination, PaginationMeta, SearchLimits, SearchPayload, SearchResult, Sorting,
};
pub use stmt::{Statement, StatementBuilder};
