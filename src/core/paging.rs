//! Paging applier: offset/limit windows over a data source

use crate::core::error::PagingError;
use crate::core::options::PagingOptions;
use crate::core::store::QuerySource;

/// Applies a validated page window to a data source.
///
/// The window is `skip((page_index - 1) * page_size)` then
/// `take(page_size)`. Bounds are re-validated here even though the mapper
/// already did — this component can be invoked directly, bypassing the
/// mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct PagingManager;

impl PagingManager {
    /// Create a paging manager
    pub fn new() -> Self {
        Self
    }

    /// Apply the page window. Absent options leave the source untouched:
    /// the entire result is one page.
    pub fn apply<T, S: QuerySource<T>>(
        &self,
        source: S,
        options: Option<&PagingOptions>,
    ) -> Result<S, PagingError> {
        let Some(options) = options else {
            return Ok(source);
        };
        if options.page_index < 1 {
            return Err(PagingError::InvalidPageIndex);
        }
        if options.page_size < 1 {
            return Err(PagingError::InvalidPageSize);
        }
        tracing::debug!(
            page_index = options.page_index,
            page_size = options.page_size,
            "applying page window"
        );
        Ok(source.skip(options.offset()).take(options.page_size))
    }
}
