//! Wire-level request models, consumed verbatim from the client
//!
//! Everything here is untrusted: numbers may be negative, strings blank,
//! lists missing or holding nulls. The structs only mirror the wire shape;
//! all judgement lives in the mapper.

use serde::{Deserialize, Serialize};

/// Requested page window, as received (`{"pageIndex": 2, "pageSize": 10}`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingRequest {
    pub page_index: i64,
    pub page_size: i64,
}

/// Requested sort, as received
/// (`{"sortBy": "user_age", "sortDirection": "descending"}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingRequest {
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_direction: Option<String>,
}

/// One requested filter, as received
/// (`{"filterBy": "user_age", "operator": "lessThan", "value": "30"}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default)]
    pub filter_by: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Requested filtering, as received.
///
/// The filter list is doubly optional on purpose: the list itself may be
/// missing, and a client may send a literal `null` inside it. Both defects
/// get their own validation code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteringRequest {
    #[serde(default)]
    pub logic: Option<String>,
    #[serde(default)]
    pub filters: Option<Vec<Option<FilterRequest>>>,
}

/// The combined request body: every section optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub paging: Option<PagingRequest>,
    #[serde(default)]
    pub sorting: Option<SortingRequest>,
    #[serde(default)]
    pub filtering: Option<FilteringRequest>,
}
