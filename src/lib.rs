//! # Pagewise
//!
//! Validated filtering, sorting and paging for collection-returning services.
//!
//! Pagewise bridges untrusted, string-typed client requests and strongly
//! typed query operations. A service declares which properties of an entity
//! are queryable; pagewise validates incoming requests against that catalog,
//! compiles them into predicates, sort keys and page windows, and assembles
//! the result into a page object whose pagination math is enforced by
//! construction.
//!
//! ## Features
//!
//! - **Property Catalogs**: Explicit per-entity registries of queryable
//!   properties, with wire-level aliases, case rules and forbidden operators
//! - **Request Mapping**: Untrusted wire models become validated option
//!   objects or coded, echo-safe failures — never panics, never exceptions
//! - **Predicate Compilation**: A closed operator set compiled against a
//!   closed value-coercion table, with per-property custom rules for
//!   anything beyond primitive comparison
//! - **Two-Tier Sorting**: Custom key extractors where registered, generic
//!   property access otherwise
//! - **Invariant-Bearing Pages**: Page objects that cannot exist with
//!   inconsistent counts or navigation flags
//! - **Pluggable Execution**: Compiled instructions are handed to any
//!   [`QuerySource`](core::QuerySource); an in-memory source ships in the box
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewise::prelude::*;
//!
//! // Declare what clients may filter on
//! let filters = PropertyCatalog::new()
//!     .register(PropertyDescriptor::new("fullName", &["fullName", "user_fullname"]))
//!     .register(PropertyDescriptor::forbidding(
//!         "age",
//!         &["age", "user_age"],
//!         &[Operator::Contains, Operator::StartsWith],
//!     ));
//!
//! // Validate the untrusted request
//! let options = mapper::map_filtering(&request, &filters)?;
//!
//! // Compile and execute
//! let manager = FilteringManager::<User>::new();
//! let source = manager.apply(MemorySource::new(users), Some(&options))?;
//! let total = source.count();
//! let page = Page::with_applied(source.into_items(), total, None, Some(options), None)?;
//! ```

pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        catalog::PropertyCatalog,
        descriptor::PropertyDescriptor,
        entity::Queryable,
        error::{
            DefinitionError, FilteringError, MappingError, PagingError, QueryError, QueryResult,
            SortingError,
        },
        filtering::{FilterOverrides, FilteringManager},
        mapper,
        operator::{CombinationLogic, Operator, SortDirection},
        options::{Filter, FilteringOptions, PagingOptions, SortingOptions},
        page::Page,
        paging::PagingManager,
        request::{FilterRequest, FilteringRequest, PagingRequest, QueryRequest, SortingRequest},
        sorting::{SortInstruction, SortOverrides, SortingManager},
        store::{Predicate, QuerySource, SortKey},
        value::{FieldValue, ValueKind},
    };

    // === Storage ===
    pub use crate::storage::MemorySource;

    // === External dependencies ===
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
