//! Typed error handling for the query pipeline
//!
//! Failures split into two channels. Anything caused by untrusted request
//! data surfaces as a [`MappingError`] carrying a stable code and a message
//! safe to echo back to the caller. Anything caused by the service's own
//! code — catalog definition defects, compilation problems, pagination math
//! violations — surfaces as a typed error per subsystem, collected under the
//! [`QueryError`] umbrella.
//!
//! # Error Categories
//!
//! - [`DefinitionError`]: descriptor, catalog, and override definition defects
//! - [`MappingError`]: request validation failures (code + message)
//! - [`FilteringError`]: predicate compilation failures
//! - [`SortingError`]: comparator compilation failures
//! - [`PagingError`]: paging window and page assembly violations

use crate::core::operator::Operator;
use crate::core::value::ValueKind;
use std::fmt;

/// The umbrella error type for the query pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Descriptor/catalog/override definition defects (programmer errors)
    Definition(DefinitionError),

    /// Request validation failures, safe to echo to the caller
    Mapping(MappingError),

    /// Predicate compilation failures
    Filtering(FilteringError),

    /// Comparator compilation failures
    Sorting(SortingError),

    /// Paging window and page assembly violations
    Paging(PagingError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Definition(e) => write!(f, "{}", e),
            QueryError::Mapping(e) => write!(f, "{}", e),
            QueryError::Filtering(e) => write!(f, "{}", e),
            QueryError::Sorting(e) => write!(f, "{}", e),
            QueryError::Paging(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Definition(e) => Some(e),
            QueryError::Mapping(e) => Some(e),
            QueryError::Filtering(e) => Some(e),
            QueryError::Sorting(e) => Some(e),
            QueryError::Paging(e) => Some(e),
        }
    }
}

impl QueryError {
    /// The stable code identifying this error
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::Definition(e) => e.code(),
            QueryError::Mapping(e) => e.code,
            QueryError::Filtering(e) => e.code(),
            QueryError::Sorting(e) => e.code(),
            QueryError::Paging(e) => e.code(),
        }
    }
}

// =============================================================================
// Definition Errors
// =============================================================================

/// Defects in descriptor, catalog, or override definitions.
///
/// These are static programming errors: catalogs and override tables are
/// compiled in and built at startup, so the panicking constructors surface
/// them immediately instead of deferring to request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// Descriptor declared with a blank canonical name
    EmptyPropertyName,

    /// Descriptor declared without any alias
    EmptyAliases { property: String },

    /// Descriptor declared with a blank alias
    BlankAlias { property: String },

    /// Two aliases collide under the descriptor's case rule
    DuplicateAlias { property: String, alias: String },

    /// An operator appears twice in the forbidden set
    DuplicateForbiddenOperator {
        property: String,
        operator: Operator,
    },

    /// A catalog already holds a descriptor with this canonical name
    DuplicateProperty { name: String },

    /// A filter rule is already registered for this property and operator
    DuplicateFilterRule {
        property: String,
        operator: Operator,
    },

    /// A sort rule is already registered for this property
    DuplicateSortRule { property: String },

    /// A filter rule targets an operator the property forbids
    InapplicableRule {
        property: String,
        operator: Operator,
    },
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionError::EmptyPropertyName => {
                write!(f, "Property name cannot be empty")
            }
            DefinitionError::EmptyAliases { property } => {
                write!(f, "Property '{}' must declare at least one alias", property)
            }
            DefinitionError::BlankAlias { property } => {
                write!(f, "Property '{}' declares a blank alias", property)
            }
            DefinitionError::DuplicateAlias { property, alias } => {
                write!(
                    f,
                    "Property '{}' declares the alias '{}' more than once",
                    property, alias
                )
            }
            DefinitionError::DuplicateForbiddenOperator { property, operator } => {
                write!(
                    f,
                    "Property '{}' forbids the operator '{}' more than once",
                    property, operator
                )
            }
            DefinitionError::DuplicateProperty { name } => {
                write!(f, "Catalog already contains a property named '{}'", name)
            }
            DefinitionError::DuplicateFilterRule { property, operator } => {
                write!(
                    f,
                    "A filter rule for '{}' with operator '{}' is already registered",
                    property, operator
                )
            }
            DefinitionError::DuplicateSortRule { property } => {
                write!(f, "A sort rule for '{}' is already registered", property)
            }
            DefinitionError::InapplicableRule { property, operator } => {
                write!(
                    f,
                    "Cannot register a rule for '{}' with operator '{}': the property forbids it",
                    property, operator
                )
            }
        }
    }
}

impl std::error::Error for DefinitionError {}

impl DefinitionError {
    /// The stable code identifying this error
    pub fn code(&self) -> &'static str {
        match self {
            DefinitionError::EmptyPropertyName => "Definition.EmptyPropertyName",
            DefinitionError::EmptyAliases { .. } => "Definition.EmptyAliases",
            DefinitionError::BlankAlias { .. } => "Definition.BlankAlias",
            DefinitionError::DuplicateAlias { .. } => "Definition.DuplicateAlias",
            DefinitionError::DuplicateForbiddenOperator { .. } => {
                "Definition.DuplicateForbiddenOperator"
            }
            DefinitionError::DuplicateProperty { .. } => "Definition.DuplicateProperty",
            DefinitionError::DuplicateFilterRule { .. } => "Definition.DuplicateFilterRule",
            DefinitionError::DuplicateSortRule { .. } => "Definition.DuplicateSortRule",
            DefinitionError::InapplicableRule { .. } => "Definition.InapplicableRule",
        }
    }
}

impl From<DefinitionError> for QueryError {
    fn from(err: DefinitionError) -> Self {
        QueryError::Definition(err)
    }
}

// =============================================================================
// Mapping Errors
// =============================================================================

/// A request validation failure: a stable code plus human-readable text.
///
/// Mapping failures are values, not exceptions — the mapper returns them in
/// `Result` and never panics on request data. The code is stable across
/// releases so clients can match on it; the message is for humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingError {
    /// Stable, machine-matchable code (e.g. `"Paging.InvalidPageIndex"`)
    pub code: &'static str,
    /// Human-readable description, safe to echo to the caller
    pub message: String,
}

impl MappingError {
    /// Create a mapping error from a code and message
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for MappingError {}

impl From<MappingError> for QueryError {
    fn from(err: MappingError) -> Self {
        QueryError::Mapping(err)
    }
}

// =============================================================================
// Filtering Errors
// =============================================================================

/// Failures while compiling filtering options into a predicate
#[derive(Debug, Clone, PartialEq)]
pub enum FilteringError {
    /// The requested operator is forbidden for the property
    OperatorNotApplicable {
        property: String,
        operator: Operator,
    },

    /// The raw value does not coerce to the property's declared kind
    ValueCoercion {
        property: String,
        operator: Operator,
        value: Option<String>,
        kind: ValueKind,
    },

    /// The property has no primitive representation on the entity; only a
    /// custom override rule can filter it
    NotCoercible { property: String },

    /// Filtering options without any filter
    EmptyFilters,

    /// Two filters are structurally identical
    DuplicateFilters,
}

impl fmt::Display for FilteringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilteringError::OperatorNotApplicable { property, operator } => {
                write!(
                    f,
                    "Operator '{}' is not applicable for property '{}'",
                    operator, property
                )
            }
            FilteringError::ValueCoercion {
                property,
                operator,
                value,
                kind,
            } => match value {
                Some(value) => write!(
                    f,
                    "Unable to convert value '{}' to {} for property '{}' (operator '{}')",
                    value,
                    kind.as_str(),
                    property,
                    operator
                ),
                None => write!(
                    f,
                    "A null value cannot be used with operator '{}' on property '{}'",
                    operator, property
                ),
            },
            FilteringError::NotCoercible { property } => {
                write!(
                    f,
                    "Property '{}' has no primitive representation; register a filter rule for it",
                    property
                )
            }
            FilteringError::EmptyFilters => {
                write!(f, "Filters collection cannot be empty")
            }
            FilteringError::DuplicateFilters => {
                write!(f, "Filters collection cannot contain duplicates")
            }
        }
    }
}

impl std::error::Error for FilteringError {}

impl FilteringError {
    /// The stable code identifying this error
    pub fn code(&self) -> &'static str {
        match self {
            FilteringError::OperatorNotApplicable { .. } => "Filtering.OperatorNotApplicable",
            FilteringError::ValueCoercion { .. } => "Filtering.ValueCoercion",
            FilteringError::NotCoercible { .. } => "Filtering.NotCoercible",
            FilteringError::EmptyFilters => "Filtering.NullFilters",
            FilteringError::DuplicateFilters => "Filtering.DuplicateFilters",
        }
    }
}

impl From<FilteringError> for QueryError {
    fn from(err: FilteringError) -> Self {
        QueryError::Filtering(err)
    }
}

// =============================================================================
// Sorting Errors
// =============================================================================

/// Failures while compiling sorting options into an ordering instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortingError {
    /// The property is unknown to the entity and has no sort rule
    UnknownProperty { property: String },
}

impl fmt::Display for SortingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortingError::UnknownProperty { property } => {
                write!(
                    f,
                    "Cannot sort by '{}': the entity exposes no such property and no sort rule is registered",
                    property
                )
            }
        }
    }
}

impl std::error::Error for SortingError {}

impl SortingError {
    /// The stable code identifying this error
    pub fn code(&self) -> &'static str {
        match self {
            SortingError::UnknownProperty { .. } => "Sorting.UnknownProperty",
        }
    }
}

impl From<SortingError> for QueryError {
    fn from(err: SortingError) -> Self {
        QueryError::Sorting(err)
    }
}

// =============================================================================
// Paging Errors
// =============================================================================

/// Paging window and page assembly violations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagingError {
    /// Page index must be greater than zero
    InvalidPageIndex,

    /// Page size must be greater than zero
    InvalidPageSize,

    /// A page cannot hold more items than the total count
    ItemsExceedTotal { items: usize, total: usize },

    /// Without paging options the total must equal the item count
    TotalMismatch { items: usize, total: usize },
}

impl fmt::Display for PagingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagingError::InvalidPageIndex => {
                write!(f, "Page index must be greater than zero")
            }
            PagingError::InvalidPageSize => {
                write!(f, "Page size must be greater than zero")
            }
            PagingError::ItemsExceedTotal { items, total } => {
                write!(
                    f,
                    "Total items count ({}) cannot be lower than the current items count ({})",
                    total, items
                )
            }
            PagingError::TotalMismatch { items, total } => {
                write!(
                    f,
                    "Total items count ({}) must equal the current items count ({}) when no paging is applied",
                    total, items
                )
            }
        }
    }
}

impl std::error::Error for PagingError {}

impl PagingError {
    /// The stable code identifying this error
    pub fn code(&self) -> &'static str {
        match self {
            PagingError::InvalidPageIndex => "Paging.InvalidPageIndex",
            PagingError::InvalidPageSize => "Paging.InvalidPageSize",
            PagingError::ItemsExceedTotal { .. } => "Paging.ItemsExceedTotal",
            PagingError::TotalMismatch { .. } => "Paging.TotalMismatch",
        }
    }
}

impl From<PagingError> for QueryError {
    fn from(err: PagingError) -> Self {
        QueryError::Paging(err)
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for query pipeline operations
pub type QueryResult<T> = Result<T, QueryError>;

// =============================================================================
// Tests
// =============================================================================
