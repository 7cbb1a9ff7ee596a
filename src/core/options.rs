//! Validated option objects produced by the request mapper

use crate::core::descriptor::PropertyDescriptor;
use crate::core::error::FilteringError;
use crate::core::operator::{CombinationLogic, Operator, SortDirection};
use serde::Serialize;
use std::collections::HashSet;

/// One validated filter: a resolved property, an operator and the raw value.
///
/// The raw value stays a string until predicate compilation, where it is
/// coerced to the property's declared kind (or handed to a custom rule).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    property: PropertyDescriptor,
    operator: Operator,
    value: Option<String>,
}

impl Filter {
    /// Create a filter, enforcing that the property allows the operator
    pub fn new(
        property: PropertyDescriptor,
        operator: Operator,
        value: Option<&str>,
    ) -> Result<Self, FilteringError> {
        if !property.is_applicable(operator) {
            return Err(FilteringError::OperatorNotApplicable {
                property: property.name().to_string(),
                operator,
            });
        }
        Ok(Self {
            property,
            operator,
            value: value.map(str::to_string),
        })
    }

    /// The resolved property this filter targets
    pub fn property(&self) -> &PropertyDescriptor {
        &self.property
    }

    /// The comparison operator
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The raw wire-level value, if one was supplied
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// A validated, non-empty set of filters plus the logic combining them.
///
/// Construction rejects an empty set and structural duplicates — two filters
/// identical in (property, operator, value) — so a compiled predicate never
/// evaluates the same condition twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteringOptions {
    filters: Vec<Filter>,
    logic: CombinationLogic,
}

impl FilteringOptions {
    /// Create filtering options, enforcing the structural invariants
    pub fn new(filters: Vec<Filter>, logic: CombinationLogic) -> Result<Self, FilteringError> {
        if filters.is_empty() {
            return Err(FilteringError::EmptyFilters);
        }
        let distinct: HashSet<&Filter> = filters.iter().collect();
        if distinct.len() != filters.len() {
            return Err(FilteringError::DuplicateFilters);
        }
        Ok(Self { filters, logic })
    }

    /// The filters, in request order
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// How the per-filter predicates combine
    pub fn logic(&self) -> CombinationLogic {
        self.logic
    }
}

/// A validated sort request: one property, one direction.
///
/// Composite multi-key sorting is out of scope by design, so this is always
/// a single key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingOptions {
    pub direction: SortDirection,
    pub property: PropertyDescriptor,
}

impl SortingOptions {
    /// Create sorting options
    pub fn new(direction: SortDirection, property: PropertyDescriptor) -> Self {
        Self {
            direction,
            property,
        }
    }
}

/// A requested page window, one-based.
///
/// The fields are plain so callers that bypass the mapper can build the
/// struct directly; zero values are re-rejected by the paging applier and
/// the page assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingOptions {
    /// One-based page number
    pub page_index: usize,
    /// Items per page
    pub page_size: usize,
}

impl PagingOptions {
    /// Create paging options
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// Number of items skipped before this page starts
    pub fn offset(&self) -> usize {
        self.page_index.saturating_sub(1) * self.page_size
    }
}
