/// Page size limits applied to client-supplied pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Page size used when the client sends none (or a non-positive one).
    pub default_limit: i64,
    /// Largest page size a client may request.
    pub max_limit: i64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl SearchLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_limit(mut self, limit: i64) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn with_max_limit(mut self, limit: i64) -> Self {
        self.max_limit = limit;
        self
    }

    /// Replace a missing or non-positive limit with the default and cap it at the max.
    pub fn clamp(&self, limit: Option<i64>) -> i64 {
        match limit {
            Some(n) if n > 0 => n.min(self.max_limit),
            _ => self.default_limit.min(self.max_limit),
        }
    }
}
