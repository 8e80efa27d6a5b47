//! Dynamic statement building.
//!
//! [`StatementBuilder`] collects optional filter, assignment, grouping,
//! ordering and pagination fragments on top of a base statement, then
//! renders either the full [`Statement`] or a statement counting the rows
//! the same filters match.
//!
//! # Example
//!
//! ```ignore
//! use pgstmt::{Operator, StatementBuilder};
//!
//! let mut b = StatementBuilder::new("SELECT id, username FROM users");
//! b.compare_filter("age", Operator::Gte, params.min_age)
//!     .array_filter("status", params.statuses)
//!     .sort(&params.sort_field, &params.sort_order)
//!     .paginate(params.limit, params.offset);
//!
//! let total = b.count().fetch_count(&conn).await?;
//! let users: Vec<User> = b.build().fetch_all_as(&conn).await?;
//! ```

mod builder;
mod statement;


pub use builder::StatementBuilder;
pub use statement::Statement;
