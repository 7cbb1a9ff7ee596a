//! Closed operator and direction enums shared by the query pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator a filter can request.
///
/// The set is closed by design: every operator a client may name on the wire
/// is listed here, and nothing else parses. `Contains` and `StartsWith` only
/// make sense for text properties; catalogs mark them forbidden on
/// non-text properties so requests using them are rejected during mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Contains,
    StartsWith,
}

impl Operator {
    /// Every operator, in declaration order
    pub const ALL: [Operator; 8] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::LessThan,
        Operator::LessThanOrEqual,
        Operator::GreaterThan,
        Operator::GreaterThanOrEqual,
        Operator::Contains,
        Operator::StartsWith,
    ];

    /// Parse a wire-level token, case-insensitively.
    ///
    /// Accepts the operator names as clients send them (`"equal"`,
    /// `"NotEqual"`, `"STARTSWITH"`, ...). Returns `None` for anything
    /// outside the closed set.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|op| token.eq_ignore_ascii_case(op.as_str()))
    }

    /// The canonical token for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "equal",
            Operator::NotEqual => "notEqual",
            Operator::LessThan => "lessThan",
            Operator::LessThanOrEqual => "lessThanOrEqual",
            Operator::GreaterThan => "greaterThan",
            Operator::GreaterThanOrEqual => "greaterThanOrEqual",
            Operator::Contains => "contains",
            Operator::StartsWith => "startsWith",
        }
    }

    /// True for the four relative-comparison operators
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::LessThan
                | Operator::LessThanOrEqual
                | Operator::GreaterThan
                | Operator::GreaterThanOrEqual
        )
    }

    /// True for the substring operators, which only apply to text
    pub fn is_text_only(&self) -> bool {
        matches!(self, Operator::Contains | Operator::StartsWith)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the predicates of a multi-filter request combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombinationLogic {
    /// Every filter must hold
    And,
    /// At least one filter must hold
    Or,
}

impl CombinationLogic {
    /// Parse a wire-level token (`"and"` / `"or"`), case-insensitively
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("and") {
            Some(CombinationLogic::And)
        } else if token.eq_ignore_ascii_case("or") {
            Some(CombinationLogic::Or)
        } else {
            None
        }
    }
}

impl fmt::Display for CombinationLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombinationLogic::And => f.write_str("and"),
            CombinationLogic::Or => f.write_str("or"),
        }
    }
}

/// Sort order for a single-key sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parse a wire-level token (`"ascending"` / `"descending"`),
    /// case-insensitively
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("ascending") {
            Some(SortDirection::Ascending)
        } else if token.eq_ignore_ascii_case("descending") {
            Some(SortDirection::Descending)
        } else {
            None
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("ascending"),
            SortDirection::Descending => f.write_str("descending"),
        }
    }
}
