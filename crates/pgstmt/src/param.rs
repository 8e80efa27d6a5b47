//! Bound parameter storage.
//!
//! Values are type-erased behind `Arc`, so a builder can render both its full
//! statement and its count statement without copying values.

use std::fmt;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A single bound value.
#[derive(Clone)]
pub struct Param(Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Wrap any `ToSql` value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Borrow the value the way `tokio-postgres` expects it.
    pub fn as_sql(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

// `ToSql: Debug`, so the bound value itself is printed.
impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Ordered bound values; position `i` is placeholder `$i+1`.
#[derive(Clone, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a value and return its 1-based placeholder number.
    pub fn push<T: ToSql + Send + Sync + 'static>(&mut self, value: T) -> usize {
        self.push_param(Param::new(value))
    }

    /// Add a pre-wrapped [`Param`] and return its 1-based placeholder number.
    pub fn push_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.params.iter()
    }

    /// Get all parameters as references for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(Param::as_sql).collect()
    }

    pub fn into_vec(self) -> Vec<Param> {
        self.params
    }
}

impl fmt::Debug for ParamList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.params).finish()
    }
}

impl Extend<Param> for ParamList {
    fn extend<I: IntoIterator<Item = Param>>(&mut self, iter: I) {
        self.params.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ParamList {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_placeholder_numbers() {
        let mut params = ParamList::new();
        assert_eq!(params.push(1_i64), 1);
        assert_eq!(params.push("x"), 2);
        assert_eq!(params.push_param(Param::new(true)), 3);
        assert_eq!(params.len(), 3);
        assert_eq!(params.as_refs().len(), 3);
    }

    #[test]
    fn debug_prints_inner_values() {
        let mut params = ParamList::new();
        params.push(18_i32);
        params.push("alice");
        assert_eq!(format!("{params:?}"), r#"[18, "alice"]"#);
    }
}
