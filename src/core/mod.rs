//! Core module containing the query-specification engine

pub mod catalog;
pub mod descriptor;
pub mod entity;
pub mod error;
pub mod filtering;
pub mod mapper;
pub mod operator;
pub mod options;
pub mod page;
pub mod paging;
pub mod request;
pub mod sorting;
pub mod store;
pub mod value;

pub use catalog::PropertyCatalog;
pub use descriptor::PropertyDescriptor;
pub use entity::Queryable;
pub use error::{
    DefinitionError, FilteringError, MappingError, PagingError, QueryError, QueryResult,
    SortingError,
};
pub use filtering::{FilterOverrides, FilteringManager};
pub use operator::{CombinationLogic, Operator, SortDirection};
pub use options::{Filter, FilteringOptions, PagingOptions, SortingOptions};
pub use page::Page;
pub use paging::PagingManager;
pub use request::{FilterRequest, FilteringRequest, PagingRequest, QueryRequest, SortingRequest};
pub use sorting::{SortInstruction, SortOverrides, SortingManager};
pub use store::{Predicate, QuerySource, SortKey};
pub use value::{FieldValue, ValueKind};
