//! Request mapper: untrusted wire models in, validated options or a coded
//! failure out
//!
//! The mapper is the only gate between client strings and the typed option
//! objects the compilers accept. Every rejection is a [`MappingError`] with a
//! stable code from [`codes`] — nothing in this module panics on request
//! data.

use crate::core::catalog::PropertyCatalog;
use crate::core::error::MappingError;
use crate::core::operator::{CombinationLogic, Operator, SortDirection};
use crate::core::options::{Filter, FilteringOptions, PagingOptions, SortingOptions};
use crate::core::request::{FilteringRequest, PagingRequest, SortingRequest};
use std::collections::HashSet;

/// Stable codes for every mapping failure.
///
/// Clients match on these; the accompanying messages may change wording,
/// the codes may not.
pub mod codes {
    pub const INVALID_PAGE_INDEX: &str = "Paging.InvalidPageIndex";
    pub const INVALID_PAGE_SIZE: &str = "Paging.InvalidPageSize";

    pub const NULL_SORT_BY: &str = "Sorting.NullSortBy";
    pub const NULL_SORT_DIRECTION: &str = "Sorting.NullSortDirection";
    pub const INVALID_SORT_DIRECTION: &str = "Sorting.InvalidSortDirection";
    pub const INVALID_SORT_BY: &str = "Sorting.InvalidSortBy";

    pub const NULL_LOGIC: &str = "Filtering.NullLogic";
    pub const INVALID_LOGIC: &str = "Filtering.InvalidLogic";
    pub const NULL_FILTERS: &str = "Filtering.NullFilters";
    pub const NULL_FILTER: &str = "Filtering.NullFilter";
    pub const NULL_FILTER_BY: &str = "Filtering.NullFilterByValue";
    pub const INVALID_FILTER_BY: &str = "Filtering.InvalidFilterBy";
    pub const INVALID_OPERATOR: &str = "Filtering.InvalidOperator";
    pub const OPERATOR_NOT_APPLICABLE: &str = "Filtering.OperatorNotApplicable";
    pub const DUPLICATE_FILTERS: &str = "Filtering.DuplicateFilters";
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Validate a paging request into [`PagingOptions`].
///
/// Fails with `Paging.InvalidPageIndex` / `Paging.InvalidPageSize` when
/// either bound is not positive.
pub fn map_paging(request: &PagingRequest) -> Result<PagingOptions, MappingError> {
    if request.page_index <= 0 {
        return Err(MappingError::new(
            codes::INVALID_PAGE_INDEX,
            "Page index must be greater than zero",
        ));
    }
    if request.page_size <= 0 {
        return Err(MappingError::new(
            codes::INVALID_PAGE_SIZE,
            "Page size must be greater than zero",
        ));
    }
    Ok(PagingOptions::new(
        request.page_index as usize,
        request.page_size as usize,
    ))
}

/// Validate a sorting request into [`SortingOptions`], resolving the sort
/// property against the entity's catalog.
pub fn map_sorting(
    request: &SortingRequest,
    catalog: &PropertyCatalog,
) -> Result<SortingOptions, MappingError> {
    let sort_by = match request.sort_by.as_deref() {
        Some(sort_by) if !sort_by.trim().is_empty() => sort_by,
        _ => {
            return Err(MappingError::new(
                codes::NULL_SORT_BY,
                "sortBy cannot be null or empty",
            ));
        }
    };
    let direction_token = match request.sort_direction.as_deref() {
        Some(direction) if !direction.trim().is_empty() => direction,
        _ => {
            return Err(MappingError::new(
                codes::NULL_SORT_DIRECTION,
                "sortDirection cannot be null or empty",
            ));
        }
    };
    let direction = SortDirection::parse(direction_token).ok_or_else(|| {
        MappingError::new(
            codes::INVALID_SORT_DIRECTION,
            format!("Invalid sortDirection value: '{}'", direction_token),
        )
    })?;
    let property = catalog.lookup(sort_by).ok_or_else(|| {
        MappingError::new(
            codes::INVALID_SORT_BY,
            format!("Invalid sortBy value: '{}'", sort_by),
        )
    })?;

    Ok(SortingOptions::new(direction, property.clone()))
}

/// Validate a filtering request into [`FilteringOptions`], resolving every
/// filter's property against the entity's catalog.
///
/// Duplicate detection runs on the resolved (property, operator, value)
/// triple, so two wire filters addressing the same property through
/// different aliases still count as duplicates, regardless of order.
pub fn map_filtering(
    request: &FilteringRequest,
    catalog: &PropertyCatalog,
) -> Result<FilteringOptions, MappingError> {
    if is_blank(request.logic.as_deref()) {
        return Err(MappingError::new(
            codes::NULL_LOGIC,
            "logic cannot be null or empty",
        ));
    }
    let entries = match request.filters.as_deref() {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            return Err(MappingError::new(
                codes::NULL_FILTERS,
                "filters cannot be null or empty",
            ));
        }
    };
    if entries.iter().any(Option::is_none) {
        return Err(MappingError::new(
            codes::NULL_FILTER,
            "filters cannot contain a null entry",
        ));
    }
    let logic_token = request.logic.as_deref().unwrap_or_default();
    let logic = CombinationLogic::parse(logic_token).ok_or_else(|| {
        MappingError::new(
            codes::INVALID_LOGIC,
            format!("Invalid logic value: '{}'", logic_token),
        )
    })?;

    let mut filters = Vec::with_capacity(entries.len());
    for entry in entries.iter().flatten() {
        let filter_by = match entry.filter_by.as_deref() {
            Some(filter_by) if !filter_by.trim().is_empty() => filter_by,
            _ => {
                return Err(MappingError::new(
                    codes::NULL_FILTER_BY,
                    "filterBy cannot be null or empty",
                ));
            }
        };
        let property = catalog.lookup(filter_by).ok_or_else(|| {
            MappingError::new(
                codes::INVALID_FILTER_BY,
                format!("Invalid filterBy value: '{}'", filter_by),
            )
        })?;
        let operator_token = entry.operator.as_deref().unwrap_or_default();
        let operator = Operator::parse(operator_token).ok_or_else(|| {
            MappingError::new(
                codes::INVALID_OPERATOR,
                format!("Invalid operator value: '{}'", operator_token),
            )
        })?;
        let filter =
            Filter::new(property.clone(), operator, entry.value.as_deref()).map_err(|e| {
                MappingError::new(codes::OPERATOR_NOT_APPLICABLE, e.to_string())
            })?;
        filters.push(filter);
    }

    let distinct: HashSet<&Filter> = filters.iter().collect();
    if distinct.len() != filters.len() {
        return Err(MappingError::new(
            codes::DUPLICATE_FILTERS,
            "filters cannot contain duplicates",
        ));
    }

    FilteringOptions::new(filters, logic).map_err(|e| MappingError::new(e.code(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::PropertyDescriptor;
    use crate::core::request::FilterRequest;

    fn catalog() -> PropertyCatalog {
        PropertyCatalog::new()
            .register(PropertyDescriptor::new(
                "fullName",
                &["fullName", "user_fullname"],
            ))
            .register(PropertyDescriptor::forbidding(
                "age",
                &["age", "user_age"],
                &[Operator::Contains, Operator::StartsWith],
            ))
    }

    fn filter_entry(filter_by: &str, operator: &str, value: Option<&str>) -> Option<FilterRequest> {
        Some(FilterRequest {
            filter_by: Some(filter_by.to_string()),
            operator: Some(operator.to_string()),
            value: value.map(str::to_string),
        })
    }

    // --- paging ---

    #[test]
    fn test_map_paging_valid() {
        let options = map_paging(&PagingRequest {
            page_index: 2,
            page_size: 10,
        })
        .unwrap();
        assert_eq!(options.page_index, 2);
        assert_eq!(options.page_size, 10);
    }

    #[test]
    fn test_map_paging_rejects_non_positive_index() {
        for page_index in [0, -1, -100] {
            let err = map_paging(&PagingRequest {
                page_index,
                page_size: 10,
            })
            .unwrap_err();
            assert_eq!(err.code, codes::INVALID_PAGE_INDEX);
        }
    }

    #[test]
    fn test_map_paging_rejects_non_positive_size() {
        for page_size in [0, -5] {
            let err = map_paging(&PagingRequest {
                page_index: 1,
                page_size,
            })
            .unwrap_err();
            assert_eq!(err.code, codes::INVALID_PAGE_SIZE);
        }
    }

    // --- sorting ---

    #[test]
    fn test_map_sorting_valid() {
        let request = SortingRequest {
            sort_by: Some("user_age".to_string()),
            sort_direction: Some("Descending".to_string()),
        };
        let options = map_sorting(&request, &catalog()).unwrap();
        assert_eq!(options.direction, SortDirection::Descending);
        assert_eq!(options.property.name(), "age");
    }

    #[test]
    fn test_map_sorting_null_sort_by() {
        for sort_by in [None, Some("".to_string()), Some("   ".to_string())] {
            let request = SortingRequest {
                sort_by,
                sort_direction: Some("ascending".to_string()),
            };
            let err = map_sorting(&request, &catalog()).unwrap_err();
            assert_eq!(err.code, codes::NULL_SORT_BY);
        }
    }

    #[test]
    fn test_map_sorting_null_direction() {
        let request = SortingRequest {
            sort_by: Some("age".to_string()),
            sort_direction: None,
        };
        let err = map_sorting(&request, &catalog()).unwrap_err();
        assert_eq!(err.code, codes::NULL_SORT_DIRECTION);
    }

    #[test]
    fn test_map_sorting_invalid_direction() {
        let request = SortingRequest {
            sort_by: Some("age".to_string()),
            sort_direction: Some("sideways".to_string()),
        };
        let err = map_sorting(&request, &catalog()).unwrap_err();
        assert_eq!(err.code, codes::INVALID_SORT_DIRECTION);
    }

    #[test]
    fn test_map_sorting_unresolved_property() {
        let request = SortingRequest {
            sort_by: Some("email".to_string()),
            sort_direction: Some("ascending".to_string()),
        };
        let err = map_sorting(&request, &catalog()).unwrap_err();
        assert_eq!(err.code, codes::INVALID_SORT_BY);
    }

    // --- filtering ---

    #[test]
    fn test_map_filtering_valid() {
        let request = FilteringRequest {
            logic: Some("and".to_string()),
            filters: Some(vec![
                filter_entry("user_age", "lessThanOrEqual", Some("30")),
                filter_entry("fullName", "contains", Some("smith")),
            ]),
        };
        let options = map_filtering(&request, &catalog()).unwrap();
        assert_eq!(options.logic(), CombinationLogic::And);
        assert_eq!(options.filters().len(), 2);
        assert_eq!(options.filters()[0].property().name(), "age");
    }

    #[test]
    fn test_map_filtering_null_logic() {
        let request = FilteringRequest {
            logic: None,
            filters: Some(vec![filter_entry("age", "equal", Some("1"))]),
        };
        let err = map_filtering(&request, &catalog()).unwrap_err();
        assert_eq!(err.code, codes::NULL_LOGIC);
    }

    #[test]
    fn test_map_filtering_invalid_logic() {
        let request = FilteringRequest {
            logic: Some("xor".to_string()),
            filters: Some(vec![filter_entry("age", "equal", Some("1"))]),
        };
        let err = map_filtering(&request, &catalog()).unwrap_err();
        assert_eq!(err.code, codes::INVALID_LOGIC);
    }

    #[test]
    fn test_map_filtering_missing_filters() {
        for filters in [None, Some(Vec::new())] {
            let request = FilteringRequest {
                logic: Some("and".to_string()),
                filters,
            };
            let err = map_filtering(&request, &catalog()).unwrap_err();
            assert_eq!(err.code, codes::NULL_FILTERS);
        }
    }

    #[test]
    fn test_map_filtering_null_entry() {
        let request = FilteringRequest {
            logic: Some("and".to_string()),
            filters: Some(vec![filter_entry("age", "equal", Some("1")), None]),
        };
        let err = map_filtering(&request, &catalog()).unwrap_err();
        assert_eq!(err.code, codes::NULL_FILTER);
    }

    #[test]
    fn test_map_filtering_blank_filter_by() {
        let request = FilteringRequest {
            logic: Some("and".to_string()),
            filters: Some(vec![filter_entry(" ", "equal", Some("1"))]),
        };
        let err = map_filtering(&request, &catalog()).unwrap_err();
        assert_eq!(err.code, codes::NULL_FILTER_BY);
    }

    #[test]
    fn test_map_filtering_unresolved_filter_by() {
        let request = FilteringRequest {
            logic: Some("and".to_string()),
            filters: Some(vec![filter_entry("email", "equal", Some("x"))]),
        };
        let err = map_filtering(&request, &catalog()).unwrap_err();
        assert_eq!(err.code, codes::INVALID_FILTER_BY);
    }

    #[test]
    fn test_map_filtering_invalid_operator() {
        let request = FilteringRequest {
            logic: Some("and".to_string()),
            filters: Some(vec![filter_entry("age", "like", Some("1"))]),
        };
        let err = map_filtering(&request, &catalog()).unwrap_err();
        assert_eq!(err.code, codes::INVALID_OPERATOR);
    }

    #[test]
    fn test_map_filtering_forbidden_operator() {
        let request = FilteringRequest {
            logic: Some("and".to_string()),
            filters: Some(vec![filter_entry("user_age", "contains", Some("3"))]),
        };
        let err = map_filtering(&request, &catalog()).unwrap_err();
        assert_eq!(err.code, codes::OPERATOR_NOT_APPLICABLE);
    }

    #[test]
    fn test_map_filtering_duplicates_detected_across_aliases() {
        // Same resolved property + operator + value, addressed through two
        // different aliases: still a duplicate.
        let request = FilteringRequest {
            logic: Some("or".to_string()),
            filters: Some(vec![
                filter_entry("age", "equal", Some("4")),
                filter_entry("user_age", "equal", Some("4")),
            ]),
        };
        let err = map_filtering(&request, &catalog()).unwrap_err();
        assert_eq!(err.code, codes::DUPLICATE_FILTERS);
    }

    #[test]
    fn test_map_filtering_duplicate_detection_is_order_independent() {
        let request = FilteringRequest {
            logic: Some("or".to_string()),
            filters: Some(vec![
                filter_entry("age", "equal", Some("4")),
                filter_entry("fullName", "equal", Some("x")),
                filter_entry("user_age", "equal", Some("4")),
            ]),
        };
        let err = map_filtering(&request, &catalog()).unwrap_err();
        assert_eq!(err.code, codes::DUPLICATE_FILTERS);
    }

    #[test]
    fn test_map_filtering_null_value_is_accepted_by_mapper() {
        // Null values are a compile-time concern (coercion); the mapper only
        // validates structure.
        let request = FilteringRequest {
            logic: Some("and".to_string()),
            filters: Some(vec![filter_entry("fullName", "equal", None)]),
        };
        let options = map_filtering(&request, &catalog()).unwrap();
        assert_eq!(options.filters()[0].value(), None);
    }
}
