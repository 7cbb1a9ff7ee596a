//! Field value types and the closed text-to-value coercion table

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value read off an entity
///
/// Every property a catalog exposes for generic filtering or sorting resolves
/// to one of these variants. The set is closed: anything an entity cannot
/// express here (related collections, nested objects) is only reachable
/// through a custom override rule.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Identifier(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

/// The kind-only discriminant of [`FieldValue`]
///
/// Entities declare the kind of each queryable property so raw wire values
/// can be coerced once, at predicate-compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Integer,
    Float,
    Boolean,
    Identifier,
    DateTime,
}

impl ValueKind {
    /// Human-readable kind name, used in coercion error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::Identifier => "identifier",
            ValueKind::DateTime => "date-time",
        }
    }
}

impl FieldValue {
    /// Coerce a raw string into a value of the given kind.
    ///
    /// This is the whole conversion table: each kind has exactly one parse
    /// rule, and a value that does not parse yields `None` so the caller can
    /// report a coercion failure with full context.
    ///
    /// - `Text` takes the string verbatim
    /// - `Integer` / `Float` use the standard numeric parsers
    /// - `Boolean` accepts `true` / `false`, case-insensitively
    /// - `Identifier` accepts any UUID text form
    /// - `DateTime` accepts RFC 3339 timestamps
    pub fn parse(kind: ValueKind, raw: &str) -> Option<Self> {
        match kind {
            ValueKind::Text => Some(FieldValue::Text(raw.to_string())),
            ValueKind::Integer => raw.trim().parse::<i64>().ok().map(FieldValue::Integer),
            ValueKind::Float => raw.trim().parse::<f64>().ok().map(FieldValue::Float),
            ValueKind::Boolean => {
                let raw = raw.trim();
                if raw.eq_ignore_ascii_case("true") {
                    Some(FieldValue::Boolean(true))
                } else if raw.eq_ignore_ascii_case("false") {
                    Some(FieldValue::Boolean(false))
                } else {
                    None
                }
            }
            ValueKind::Identifier => Uuid::parse_str(raw.trim()).ok().map(FieldValue::Identifier),
            ValueKind::DateTime => DateTime::parse_from_rfc3339(raw.trim())
                .ok()
                .map(|dt| FieldValue::DateTime(dt.with_timezone(&Utc))),
        }
    }

    /// The kind of this value, or `None` for `Null`
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            FieldValue::Text(_) => Some(ValueKind::Text),
            FieldValue::Integer(_) => Some(ValueKind::Integer),
            FieldValue::Float(_) => Some(ValueKind::Float),
            FieldValue::Boolean(_) => Some(ValueKind::Boolean),
            FieldValue::Identifier(_) => Some(ValueKind::Identifier),
            FieldValue::DateTime(_) => Some(ValueKind::DateTime),
            FieldValue::Null => None,
        }
    }

    /// Get the value as text if possible
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Order two values of the same kind.
    ///
    /// `Null` orders before any non-null value so sorted output keeps
    /// missing values together at the ascending front. Integers and floats
    /// compare numerically with each other; any other cross-kind pair is not
    /// comparable and yields `None`.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Some(Ordering::Equal),
            (FieldValue::Null, _) => Some(Ordering::Less),
            (_, FieldValue::Null) => Some(Ordering::Greater),
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.partial_cmp(b),
            (FieldValue::Integer(a), FieldValue::Float(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Float(a), FieldValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => Some(a.cmp(b)),
            (FieldValue::Identifier(a), FieldValue::Identifier(b)) => Some(a.cmp(b)),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}
