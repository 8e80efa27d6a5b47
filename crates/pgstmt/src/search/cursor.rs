use super::config::SearchLimits;
use crate::error::{StmtError, StmtResult};
use serde::{Deserialize, Serialize};

/// Keyset cursor sent by clients: at most one of `after`/`before`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cursor {
    pub after: Option<String>,
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl Cursor {
    /// Settle `limit` within `limits` and reject cursors pointing both ways.
    ///
    /// The limit is fixed up even when an error is returned.
    pub fn validate(&mut self, limits: &SearchLimits) -> StmtResult<()> {
        self.limit = Some(limits.clamp(self.limit));

        if self.after.is_some() && self.before.is_some() {
            return Err(StmtError::validation(
                "invalid cursor: cannot have both 'after' and 'before' set",
            ));
        }
        Ok(())
    }

    /// The validated page size, or the default one if `validate` was not called.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or_else(|| SearchLimits::default().default_limit)
    }
}
