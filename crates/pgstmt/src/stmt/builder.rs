use super::statement::{Statement, max_placeholder};
use crate::client::GenericClient;
use crate::error::{StmtError, StmtResult};
use crate::filter::{CompareOperator, DateRange};
use crate::param::{Param, ParamList};
use crate::row::FromRow;
use crate::search::{Pagination, SearchResult, Sorting};
use tokio_postgres::types::ToSql;

/// Accumulates SQL fragments and their bound values.
///
/// Fragment-adding calls can be made in any order; [`build`](Self::build)
/// always renders `SET`, `WHERE`, `GROUP BY`, `ORDER BY`, `LIMIT`, `OFFSET`
/// in that order. Calls given an empty column, a `None` value, an empty
/// collection or an empty string are skipped without touching any state.
///
/// Placeholders are numbered from the bound values themselves, so the
/// number of `$N` markers always equals the number of bound values.
///
/// # Example
/// ```ignore
/// let mut b = StatementBuilder::new("SELECT id, name FROM users");
/// b.compare_filter("age", Operator::Gte, filters.min_age)
///     .substring_filter("name", &filters.name, false)
///     .sort("created_at", "desc")
///     .paginate(20, 40);
///
/// let total = b.count().fetch_count(&client).await?;
/// let rows = b.build().fetch_all(&client).await?;
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct StatementBuilder {
    base: String,
    /// Byte offset of the `FROM ...` tail when the base was supplied pre-split.
    from_offset: Option<usize>,
    assignments: Vec<String>,
    conditions: Vec<String>,
    group_columns: Vec<String>,
    order_clause: Option<String>,
    limit_clause: Option<String>,
    offset_clause: Option<String>,
    params: ParamList,
    /// Highest placeholder referenced by any fragment, generated or raw.
    highest_placeholder: usize,
}

impl StatementBuilder {
    /// Start from a base statement, e.g. `"SELECT * FROM users"` or `"UPDATE users"`.
    pub fn new(base: impl Into<String>) -> Self {
        Self::from_parts(base.into(), None)
    }

    /// Start from a base statement supplied as a select list and a `FROM ...` tail.
    ///
    /// [`count`](Self::count) uses `from_tail` directly instead of searching
    /// the base text for `FROM`, so `from_tail` must begin with `FROM`.
    pub fn with_select(select_list: &str, from_tail: &str) -> Self {
        debug_assert!(
            from_tail
                .trim_start()
                .get(..4)
                .is_some_and(|kw| kw.eq_ignore_ascii_case("FROM")),
            "from_tail must start with FROM: {from_tail:?}"
        );
        let select_list = select_list.trim_end();
        let base = format!("{} {}", select_list, from_tail.trim_start());
        Self::from_parts(base, Some(select_list.len() + 1))
    }

    fn from_parts(base: String, from_offset: Option<usize>) -> Self {
        Self {
            base,
            from_offset,
            assignments: Vec::new(),
            conditions: Vec::new(),
            group_columns: Vec::new(),
            order_clause: None,
            limit_clause: None,
            offset_clause: None,
            params: ParamList::new(),
            highest_placeholder: 0,
        }
    }

    /// The placeholder number the next bound value will get.
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }

    fn bind<T>(&mut self, value: T) -> usize
    where
        T: ToSql + Sync + Send + 'static,
    {
        let n = self.params.push(value);
        self.highest_placeholder = self.highest_placeholder.max(n);
        n
    }

    // ==================== SET ====================

    /// Add `column = $N` to the `SET` clause (UPDATE statements).
    pub fn assign<T>(&mut self, column: &str, value: T) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        if column.is_empty() {
            return self;
        }
        let n = self.bind(value);
        self.assignments.push(format!("{column} = ${n}"));
        self
    }

    // ==================== WHERE ====================

    /// Add `column <op> $N`.
    ///
    /// `operator` is an [`Operator`](crate::Operator), an operator name
    /// (`"gte"`, ...) or a raw comparison token (`"="`, `"!="`, `"<"`,
    /// `"<="`, `">"`, `">="`). Unrecognized operators skip the filter.
    pub fn compare_filter<O, T>(&mut self, column: &str, operator: O, value: Option<T>) -> &mut Self
    where
        O: CompareOperator,
        T: ToSql + Sync + Send + 'static,
    {
        if column.is_empty() {
            return self;
        }
        let (Some(op), Some(value)) = (operator.to_sql_operator(), value) else {
            return self;
        };
        let n = self.bind(value);
        self.conditions.push(format!("{column} {op} ${n}"));
        self
    }

    /// Add `column BETWEEN $N AND $N+1`, binding `from` then `to`.
    pub fn between_filter<T, U>(&mut self, column: &str, from: Option<T>, to: Option<U>) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
        U: ToSql + Sync + Send + 'static,
    {
        if column.is_empty() {
            return self;
        }
        let (Some(from), Some(to)) = (from, to) else {
            return self;
        };
        let lo = self.bind(from);
        let hi = self.bind(to);
        self.conditions
            .push(format!("{column} BETWEEN ${lo} AND ${hi}"));
        self
    }

    /// [`between_filter`](Self::between_filter) over a [`DateRange`].
    pub fn between_range(&mut self, column: &str, range: Option<&DateRange>) -> &mut Self {
        match range {
            Some(range) => self.between_filter(column, Some(range.from), Some(range.to)),
            None => self,
        }
    }

    /// Add `column = ANY($N)`, binding `values` as a single array parameter.
    pub fn array_filter<T>(&mut self, column: &str, values: Vec<T>) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        if column.is_empty() || values.is_empty() {
            return self;
        }
        let n = self.bind(values);
        self.conditions.push(format!("{column} = ANY(${n})"));
        self
    }

    fn like_filter(&mut self, column: &str, pattern: String, case_sensitive: bool) -> &mut Self {
        let op = if case_sensitive { "LIKE" } else { "ILIKE" };
        let n = self.bind(pattern);
        self.conditions.push(format!("{column} {op} ${n}"));
        self
    }

    /// Match values starting with `value` (`value%`).
    pub fn prefix_filter(&mut self, column: &str, value: &str, case_sensitive: bool) -> &mut Self {
        if column.is_empty() || value.is_empty() {
            return self;
        }
        self.like_filter(column, format!("{value}%"), case_sensitive)
    }

    /// Match values ending with `value` (`%value`).
    pub fn suffix_filter(&mut self, column: &str, value: &str, case_sensitive: bool) -> &mut Self {
        if column.is_empty() || value.is_empty() {
            return self;
        }
        self.like_filter(column, format!("%{value}"), case_sensitive)
    }

    /// Match values containing `value` (`%value%`).
    pub fn substring_filter(
        &mut self,
        column: &str,
        value: &str,
        case_sensitive: bool,
    ) -> &mut Self {
        if column.is_empty() || value.is_empty() {
            return self;
        }
        self.like_filter(column, format!("%{value}%"), case_sensitive)
    }

    /// Append a pre-rendered condition and bind `args` after the current values.
    ///
    /// Placeholders inside `condition` must start at
    /// [`next_placeholder`](Self::next_placeholder) as read just before this call.
    pub fn append_raw_where(
        &mut self,
        condition: &str,
        args: impl IntoIterator<Item = Param>,
    ) -> &mut Self {
        if condition.is_empty() {
            return self;
        }
        self.conditions.push(condition.to_string());
        self.params.extend(args);
        self.highest_placeholder = self.highest_placeholder.max(max_placeholder(condition));
        self
    }

    // ==================== GROUP BY / ORDER BY / LIMIT ====================

    pub fn group_by<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Set `ORDER BY field ASC|DESC`, replacing any earlier ordering.
    ///
    /// `order` is `DESC` when it equals `"desc"` ignoring case, `ASC` otherwise.
    pub fn sort(&mut self, field: &str, order: &str) -> &mut Self {
        if field.is_empty() {
            return self;
        }
        let order = if order.eq_ignore_ascii_case("desc") {
            "DESC"
        } else {
            "ASC"
        };
        self.order_clause = Some(format!("ORDER BY {field} {order}"));
        self
    }

    /// Set `LIMIT` when `limit > 0` and `OFFSET` when `offset > 0`.
    pub fn paginate(&mut self, limit: i64, offset: i64) -> &mut Self {
        if limit > 0 {
            self.limit_clause = Some(format!("LIMIT {limit}"));
        }
        if offset > 0 {
            self.offset_clause = Some(format!("OFFSET {offset}"));
        }
        self
    }

    pub fn apply_sorting(&mut self, sorting: &Sorting) -> &mut Self {
        self.sort(&sorting.field, &sorting.order)
    }

    pub fn apply_pagination(&mut self, pagination: &Pagination) -> &mut Self {
        self.paginate(pagination.limit, pagination.offset())
    }

    // ==================== Rendering ====================

    fn write_filters(&self, out: &mut String) {
        if !self.conditions.is_empty() {
            out.push_str(" WHERE ");
            out.push_str(&self.conditions.join(" AND "));
        }
        if !self.group_columns.is_empty() {
            out.push_str(" GROUP BY ");
            out.push_str(&self.group_columns.join(", "));
        }
    }

    /// Render the full statement.
    pub fn build(&self) -> Statement {
        let mut sql = self.base.clone();
        if !self.assignments.is_empty() {
            sql.push_str(" SET ");
            sql.push_str(&self.assignments.join(", "));
        }
        self.write_filters(&mut sql);
        for clause in [&self.order_clause, &self.limit_clause, &self.offset_clause]
            .into_iter()
            .flatten()
        {
            sql.push(' ');
            sql.push_str(clause);
        }
        Statement::new(sql, self.params.clone(), self.highest_placeholder)
    }

    /// Render a statement counting the rows matched by the current filters.
    ///
    /// Ordering, pagination and assignments are left out. The params are the
    /// full accumulated list, so on a builder with assignments they include
    /// values no placeholder of the count statement references, and
    /// [`Statement::validate`] rejects it.
    ///
    /// # Panics
    /// If the base statement has no `FROM`. Use [`try_count`](Self::try_count)
    /// to get an error instead.
    pub fn count(&self) -> Statement {
        match self.try_count() {
            Ok(stmt) => stmt,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`count`](Self::count), but returns [`StmtError::MissingFrom`]
    /// when the base statement has no `FROM`.
    pub fn try_count(&self) -> StmtResult<Statement> {
        // ASCII uppercasing keeps byte offsets aligned with `base`.
        let from = match self.from_offset {
            Some(offset) => offset,
            None => self
                .base
                .to_ascii_uppercase()
                .find("FROM")
                .ok_or(StmtError::MissingFrom)?,
        };

        let mut sql = String::with_capacity(self.base.len() + 64);
        sql.push_str("SELECT COUNT(*) FROM (SELECT 1 ");
        sql.push_str(&self.base[from..]);
        self.write_filters(&mut sql);
        sql.push_str(") AS count_alias");
        // Each assignment owns one placeholder that the count text drops.
        let referenced = self.highest_placeholder - self.assignments.len();
        Ok(Statement::new(sql, self.params.clone(), referenced))
    }

    // ==================== Execution ====================

    /// Count matching rows, then fetch one page of them.
    ///
    /// `pagination` replaces any `LIMIT`/`OFFSET` set earlier.
    pub async fn fetch_page<T: FromRow>(
        &mut self,
        conn: &impl GenericClient,
        pagination: &Pagination,
    ) -> StmtResult<SearchResult<Vec<T>>> {
        let total = self.try_count()?.fetch_count(conn).await?;
        self.apply_pagination(pagination);
        let items = self.build().fetch_all_as::<T>(conn).await?;
        Ok(SearchResult::new(items, pagination.meta(total)))
    }
}
