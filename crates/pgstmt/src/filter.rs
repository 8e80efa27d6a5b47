//! Filter value types: comparison operators and date ranges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operator accepted from request filters.
///
/// Serialized by name (`"gte"`, `"gt"`, `"lte"`, `"lt"`, `"eq"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Gte,
    Gt,
    Lte,
    Lt,
    Eq,
}

impl Operator {
    /// Operator name as used in requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Gte => "gte",
            Operator::Gt => "gt",
            Operator::Lte => "lte",
            Operator::Lt => "lt",
            Operator::Eq => "eq",
        }
    }

    /// SQL comparison symbol.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Operator::Gte => ">=",
            Operator::Gt => ">",
            Operator::Lte => "<=",
            Operator::Lt => "<",
            Operator::Eq => "=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gte" => Ok(Operator::Gte),
            "gt" => Ok(Operator::Gt),
            "lte" => Ok(Operator::Lte),
            "lt" => Ok(Operator::Lt),
            "eq" => Ok(Operator::Eq),
            other => Err(format!("unknown operator: {other}")),
        }
    }
}

/// Resolve an operator token to a SQL comparison symbol.
///
/// Operator names are tried first, then raw SQL comparison tokens.
/// Returns `None` for anything else.
pub fn resolve_operator(token: &str) -> Option<&'static str> {
    if let Ok(op) = token.parse::<Operator>() {
        return Some(op.as_sql());
    }

    match token {
        "=" => Some("="),
        "!=" => Some("!="),
        "<" => Some("<"),
        "<=" => Some("<="),
        ">" => Some(">"),
        ">=" => Some(">="),
        _ => None,
    }
}

/// Anything that can name a comparison in
/// [`StatementBuilder::compare_filter`](crate::StatementBuilder::compare_filter).
pub trait CompareOperator {
    /// The SQL symbol, or `None` if the operator is not recognized.
    fn to_sql_operator(&self) -> Option<&'static str>;
}

impl CompareOperator for Operator {
    fn to_sql_operator(&self) -> Option<&'static str> {
        Some(self.as_sql())
    }
}

impl CompareOperator for &str {
    fn to_sql_operator(&self) -> Option<&'static str> {
        resolve_operator(self)
    }
}

impl CompareOperator for String {
    fn to_sql_operator(&self) -> Option<&'static str> {
        resolve_operator(self)
    }
}

impl CompareOperator for &String {
    fn to_sql_operator(&self) -> Option<&'static str> {
        resolve_operator(self)
    }
}

/// Inclusive timestamp range, bound with `BETWEEN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_names_resolve_to_symbols() {
        assert_eq!(resolve_operator("gte"), Some(">="));
        assert_eq!(resolve_operator("gt"), Some(">"));
        assert_eq!(resolve_operator("lte"), Some("<="));
        assert_eq!(resolve_operator("lt"), Some("<"));
        assert_eq!(resolve_operator("eq"), Some("="));
    }

    #[test]
    fn raw_tokens_pass_through() {
        for token in ["=", "!=", "<", "<=", ">", ">="] {
            assert_eq!(resolve_operator(token), Some(token));
        }
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert_eq!(resolve_operator(""), None);
        assert_eq!(resolve_operator("GTE"), None);
        assert_eq!(resolve_operator("<>"), None);
        assert_eq!(resolve_operator("; DROP TABLE users"), None);
        assert!("ne".parse::<Operator>().is_err());
    }

    #[test]
    fn operator_deserializes_from_name() {
        let op: Operator = serde_json::from_str(r#""lte""#).unwrap();
        assert_eq!(op, Operator::Lte);
        assert_eq!(serde_json::to_string(&Operator::Gt).unwrap(), r#""gt""#);
        assert!(serde_json::from_str::<Operator>(r#"">=""#).is_err());
    }

    #[test]
    fn date_range_uses_from_and_to_keys() {
        let range: DateRange = serde_json::from_str(
            r#"{"from":"2024-01-01T00:00:00Z","to":"2024-02-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(range.from < range.to);
        assert_eq!(range.from.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }
}
