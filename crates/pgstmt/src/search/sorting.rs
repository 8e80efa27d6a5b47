use crate::error::{StmtError, StmtResult};
use serde::{Deserialize, Serialize};

pub const SORT_ASC: &str = "asc";
pub const SORT_DESC: &str = "desc";

/// Requested ordering: a field name and `asc`/`desc`.
///
/// Both are free text until [`validate`](Self::validate) checks the field
/// against an allow-list, so they can be rendered into `ORDER BY` safely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sorting {
    pub field: String,
    pub order: String,
}

impl Sorting {
    pub fn new(field: impl Into<String>, order: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: order.into(),
        }
    }

    /// Check the field against `allowed` and normalize both values to lowercase.
    ///
    /// An empty field means no sorting and is always valid.
    pub fn validate(&mut self, allowed: &[&str]) -> StmtResult<()> {
        let field = self.field.to_lowercase();
        let order = self.order.to_lowercase();

        if field.is_empty() {
            return Ok(());
        }

        if !allowed.contains(&field.as_str()) {
            return Err(StmtError::validation(format!(
                "invalid sort field: {}",
                self.field
            )));
        }

        if !order.is_empty() && order != SORT_ASC && order != SORT_DESC {
            return Err(StmtError::validation(format!(
                "invalid sort order: {}",
                self.order
            )));
        }

        self.field = field;
        self.order = order;
        Ok(())
    }
}
