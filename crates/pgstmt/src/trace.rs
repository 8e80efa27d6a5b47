//! `tracing` events for executed statements.
//!
//! Enabled with the `tracing` feature (on by default). Without it these are no-ops.

/// Maximum number of SQL bytes included in an event.
const MAX_SQL_LENGTH: usize = 200;

/// Truncate `s` to at most `max_bytes` bytes, respecting UTF-8 char boundaries.
fn truncate_sql(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(feature = "tracing")]
pub(crate) fn statement(kind: &'static str, sql: &str, param_count: usize) {
    let shown = truncate_sql(sql, MAX_SQL_LENGTH);
    let truncated = shown.len() < sql.len();
    tracing::debug!(
        target: "pgstmt.sql",
        kind,
        param_count,
        truncated,
        sql = %shown,
        "executing SQL statement"
    );
}

#[cfg(feature = "tracing")]
pub(crate) fn failed(kind: &'static str, err: &crate::StmtError) {
    tracing::debug!(target: "pgstmt.sql", kind, error = %err, "SQL statement failed");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn statement(kind: &'static str, sql: &str, param_count: usize) {
    let _ = (kind, truncate_sql(sql, MAX_SQL_LENGTH), param_count);
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn failed(kind: &'static str, err: &crate::StmtError) {
    let _ = (kind, err);
}
