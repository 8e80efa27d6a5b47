use crate::client::GenericClient;
use crate::error::{StmtError, StmtResult};
use crate::param::{Param, ParamList};
use crate::row::FromRow;
use crate::trace;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A rendered statement: SQL text with `$1, $2, ...` placeholders and the
/// values bound to them, in placeholder order.
#[derive(Debug, Clone)]
#[must_use]
pub struct Statement {
    sql: String,
    params: ParamList,
    placeholders: usize,
}

/// Highest `$N` placeholder number referenced in `sql` (0 if none).
///
/// Only run over caller-written fragments; a base statement may hold `$`
/// inside literals or dollar-quoted bodies.
pub(crate) fn max_placeholder(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut max = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end > start {
                if let Ok(n) = sql[start..end].parse::<usize>() {
                    max = max.max(n);
                }
            }
            i = end;
        } else {
            i += 1;
        }
    }
    max
}

impl Statement {
    /// `placeholders` is how many `$N` the rendered fragments reference.
    pub(crate) fn new(sql: String, params: ParamList, placeholders: usize) -> Self {
        Self {
            sql,
            params,
            placeholders,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.as_refs()
    }

    /// Split into the SQL text and the bound values.
    pub fn into_parts(self) -> (String, Vec<Param>) {
        (self.sql, self.params.into_vec())
    }

    /// Check that the placeholders the fragments reference match the bound values.
    ///
    /// The base statement text is never scanned. Raw conditions and count
    /// statements over assignments are the only ways to break this.
    pub fn validate(&self) -> StmtResult<()> {
        let placeholders = self.placeholders;
        let params = self.params.len();
        if placeholders != params {
            return Err(StmtError::Validation(format!(
                "Statement: placeholders({placeholders}) != params({params})"
            )));
        }
        Ok(())
    }

    fn prepare(&self, kind: &'static str) -> StmtResult<Vec<&(dyn ToSql + Sync)>> {
        self.validate()?;
        trace::statement(kind, &self.sql, self.params.len());
        Ok(self.params_ref())
    }

    fn traced<T>(kind: &'static str, result: StmtResult<T>) -> StmtResult<T> {
        if let Err(err) = &result {
            trace::failed(kind, err);
        }
        result
    }

    /// Execute and return all rows.
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> StmtResult<Vec<Row>> {
        let params = self.prepare("query")?;
        Self::traced("query", conn.query(&self.sql, &params).await)
    }

    /// Execute and return all rows mapped to `T`.
    pub async fn fetch_all_as<T: FromRow>(&self, conn: &impl GenericClient) -> StmtResult<Vec<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute and return the **first** row; `StmtError::NotFound` if there is none.
    pub async fn fetch_one(&self, conn: &impl GenericClient) -> StmtResult<Row> {
        let params = self.prepare("query_one")?;
        Self::traced("query_one", conn.query_one(&self.sql, &params).await)
    }

    /// Execute and return the **first** row mapped to `T`.
    pub async fn fetch_one_as<T: FromRow>(&self, conn: &impl GenericClient) -> StmtResult<T> {
        let row = self.fetch_one(conn).await?;
        T::from_row(&row)
    }

    /// Execute and return the first row, if any.
    pub async fn fetch_opt(&self, conn: &impl GenericClient) -> StmtResult<Option<Row>> {
        let params = self.prepare("query_opt")?;
        Self::traced("query_opt", conn.query_opt(&self.sql, &params).await)
    }

    /// Execute and return at most one row mapped to `T`.
    pub async fn fetch_opt_as<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> StmtResult<Option<T>> {
        let row = self.fetch_opt(conn).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Execute and return the number of affected rows.
    pub async fn execute(&self, conn: &impl GenericClient) -> StmtResult<u64> {
        let params = self.prepare("execute")?;
        Self::traced("execute", conn.execute(&self.sql, &params).await)
    }

    /// Execute a count statement and read its first column as `bigint`.
    pub async fn fetch_count(&self, conn: &impl GenericClient) -> StmtResult<i64> {
        let params = self.prepare("count")?;
        let row = Self::traced("count", conn.query_one(&self.sql, &params).await)?;
        row.try_get::<_, i64>(0)
            .map_err(|e| StmtError::decode("count", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_placeholder_finds_highest_number() {
        assert_eq!(max_placeholder("SELECT 1"), 0);
        assert_eq!(max_placeholder("a = $1 AND b BETWEEN $2 AND $3"), 3);
        assert_eq!(max_placeholder("a = ANY($12) AND b = $3"), 12);
        assert_eq!(max_placeholder("SELECT $$body$$"), 0);
    }

    #[test]
    fn validate_rejects_mismatched_params() {
        let mut params = ParamList::new();
        params.push(1_i32);
        let ok = Statement::new("SELECT * FROM t WHERE a = $1".into(), params.clone(), 1);
        assert!(ok.validate().is_ok());

        let missing = Statement::new(
            "SELECT * FROM t WHERE a = $1 AND b = $2".into(),
            params.clone(),
            2,
        );
        let err = missing.validate().unwrap_err();
        assert!(matches!(
            err,
            StmtError::Validation(ref m) if m == "Statement: placeholders(2) != params(1)"
        ));

        // The recorded count is authoritative; `$` in the text is not rescanned.
        let literal = Statement::new(
            "SELECT * FROM t WHERE a = $1 AND b <> '$9'".into(),
            params,
            1,
        );
        assert!(literal.validate().is_ok());
    }
}
