//! The page result: one window of items plus pagination metadata
//!
//! A `Page` is the invariant-bearing object a service returns to its caller.
//! Construction is the only way to get one, and construction enforces the
//! pagination math, so a page that exists is a page that is consistent.

use crate::core::error::PagingError;
use crate::core::options::{FilteringOptions, PagingOptions, SortingOptions};
use serde::Serialize;

const FIRST_PAGE: usize = 1;

/// A bounded window of items plus metadata describing the rest of the
/// result set.
///
/// Invariants, enforced at construction:
/// - `items.len() <= total_items_count`
/// - without paging options: `total_items_count == items.len()`,
///   `page_index == 1`, `total_pages_count == 1`
/// - with paging options: both bounds positive,
///   `total_pages_count == 1` when the total fits one page, else
///   `ceil(total / page_size)`
/// - `has_next_page == page_index < total_pages_count`
/// - `has_previous_page == page_index > 1`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    total_items_count: usize,
    page_index: usize,
    total_pages_count: usize,
    has_next_page: bool,
    has_previous_page: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied_sorting: Option<SortingOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied_filtering: Option<FilteringOptions>,
}

impl<T> Page<T> {
    /// Assemble a page, enforcing the pagination invariants.
    ///
    /// `total_items_count` is the size of the whole (filtered) result set,
    /// of which `items` is one window. Without paging options the window is
    /// the whole set, so the counts must agree.
    pub fn new(
        items: Vec<T>,
        total_items_count: usize,
        paging: Option<&PagingOptions>,
    ) -> Result<Self, PagingError> {
        Self::with_applied(items, total_items_count, None, None, paging)
    }

    /// Assemble a page that also echoes the applied sorting and filtering
    /// options back to the caller.
    pub fn with_applied(
        items: Vec<T>,
        total_items_count: usize,
        applied_sorting: Option<SortingOptions>,
        applied_filtering: Option<FilteringOptions>,
        paging: Option<&PagingOptions>,
    ) -> Result<Self, PagingError> {
        if let Some(paging) = paging {
            if paging.page_index < 1 {
                return Err(PagingError::InvalidPageIndex);
            }
            if paging.page_size < 1 {
                return Err(PagingError::InvalidPageSize);
            }
        }
        if items.len() > total_items_count {
            return Err(PagingError::ItemsExceedTotal {
                items: items.len(),
                total: total_items_count,
            });
        }
        if paging.is_none() && total_items_count != items.len() {
            return Err(PagingError::TotalMismatch {
                items: items.len(),
                total: total_items_count,
            });
        }

        let page_index = paging.map_or(FIRST_PAGE, |p| p.page_index);
        let total_pages_count = match paging {
            Some(paging) if total_items_count > paging.page_size => {
                total_items_count.div_ceil(paging.page_size)
            }
            _ => FIRST_PAGE,
        };

        Ok(Self {
            items,
            total_items_count,
            page_index,
            total_pages_count,
            has_next_page: page_index < total_pages_count,
            has_previous_page: page_index > FIRST_PAGE,
            applied_sorting,
            applied_filtering,
        })
    }

    /// The items of this page window
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, keeping only the items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Size of the whole result set this page windows into
    pub fn total_items_count(&self) -> usize {
        self.total_items_count
    }

    /// One-based index of this page
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Number of pages the result set spans
    pub fn total_pages_count(&self) -> usize {
        self.total_pages_count
    }

    /// Whether a later page exists
    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Whether an earlier page exists
    pub fn has_previous_page(&self) -> bool {
        self.has_previous_page
    }

    /// The sorting options this page was produced with, if echoed
    pub fn applied_sorting(&self) -> Option<&SortingOptions> {
        self.applied_sorting.as_ref()
    }

    /// The filtering options this page was produced with, if echoed
    pub fn applied_filtering(&self) -> Option<&FilteringOptions> {
        self.applied_filtering.as_ref()
    }

    /// Map the items while preserving the metadata (domain-to-DTO
    /// convenience)
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_items_count: self.total_items_count,
            page_index: self.page_index,
            total_pages_count: self.total_pages_count,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
            applied_sorting: self.applied_sorting,
            applied_filtering: self.applied_filtering,
        }
    }
}
