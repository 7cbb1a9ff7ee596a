//! Integration tests driving the whole pipeline: wire request -> mapper ->
//! compilers -> in-memory source -> page.

use pagewise::prelude::*;
use serde_json::json;
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, PartialEq)]
struct User {
    full_name: String,
    age: i64,
    account_ids: Vec<Uuid>,
}

impl User {
    fn new(full_name: &str, age: i64) -> Self {
        Self {
            full_name: full_name.to_string(),
            age,
            account_ids: Vec::new(),
        }
    }
}

impl Queryable for User {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "fullName" => Some(FieldValue::Text(self.full_name.clone())),
            "age" => Some(FieldValue::Integer(self.age)),
            _ => None,
        }
    }

    fn field_kind(name: &str) -> Option<ValueKind> {
        match name {
            "fullName" => Some(ValueKind::Text),
            "age" => Some(ValueKind::Integer),
            _ => None,
        }
    }
}

fn filtering_properties() -> &'static PropertyCatalog {
    static CATALOG: OnceLock<PropertyCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        PropertyCatalog::new()
            .register(PropertyDescriptor::forbidding(
                "fullName",
                &["fullName", "user_fullname"],
                &[
                    Operator::GreaterThan,
                    Operator::GreaterThanOrEqual,
                    Operator::LessThan,
                    Operator::LessThanOrEqual,
                ],
            ))
            .register(PropertyDescriptor::forbidding(
                "age",
                &["age", "user_age"],
                &[Operator::Contains, Operator::StartsWith],
            ))
            .register(PropertyDescriptor::forbidding(
                "accounts",
                &["accounts", "user_accounts"],
                &[
                    Operator::GreaterThan,
                    Operator::GreaterThanOrEqual,
                    Operator::LessThan,
                    Operator::LessThanOrEqual,
                    Operator::StartsWith,
                ],
            ))
    })
}

fn sorting_properties() -> &'static PropertyCatalog {
    static CATALOG: OnceLock<PropertyCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        PropertyCatalog::new()
            .register(PropertyDescriptor::new(
                "fullName",
                &["fullName", "user_fullname"],
            ))
            .register(PropertyDescriptor::new("age", &["age", "user_age"]))
            .register(PropertyDescriptor::new(
                "accountsCount",
                &["accountsCount", "accounts_count"],
            ))
    })
}

fn filtering_request(value: serde_json::Value) -> FilteringRequest {
    serde_json::from_value(value).expect("filtering request literal")
}

fn sorting_request(value: serde_json::Value) -> SortingRequest {
    serde_json::from_value(value).expect("sorting request literal")
}

fn three_users() -> Vec<User> {
    vec![
        User::new("Alice", 2),
        User::new("Bob", 3),
        User::new("Carol", 1),
    ]
}

// --- Scenario A: filter ages [2, 3, 1] with age <= 2 ---

#[test]
fn filtering_by_age_keeps_matching_users() {
    let request = filtering_request(json!({
        "logic": "and",
        "filters": [{"filterBy": "user_age", "operator": "lessThanOrEqual", "value": "2"}]
    }));
    let options = mapper::map_filtering(&request, filtering_properties()).unwrap();

    let manager = FilteringManager::<User>::new();
    let out = manager
        .apply(MemorySource::new(three_users()), Some(&options))
        .unwrap()
        .into_items();

    let mut ages: Vec<i64> = out.iter().map(|u| u.age).collect();
    ages.sort_unstable();
    assert_eq!(ages, vec![1, 2]);
}

// --- Scenario B: sort by age both directions ---

#[test]
fn sorting_by_age_orders_users() {
    let manager = SortingManager::<User>::new();

    let request = sorting_request(json!({"sortBy": "age", "sortDirection": "ascending"}));
    let options = mapper::map_sorting(&request, sorting_properties()).unwrap();
    let out = manager
        .apply(MemorySource::new(three_users()), Some(&options))
        .unwrap()
        .into_items();
    assert_eq!(out.iter().map(|u| u.age).collect::<Vec<_>>(), vec![1, 2, 3]);

    let request = sorting_request(json!({"sortBy": "age", "sortDirection": "DESCENDING"}));
    let options = mapper::map_sorting(&request, sorting_properties()).unwrap();
    let out = manager
        .apply(MemorySource::new(three_users()), Some(&options))
        .unwrap()
        .into_items();
    assert_eq!(out.iter().map(|u| u.age).collect::<Vec<_>>(), vec![3, 2, 1]);
}

// --- Scenario C: 50 users, pageIndex 2, pageSize 10 ---

#[test]
fn paging_windows_into_the_collection() {
    let users: Vec<User> = (0..50)
        .map(|n| User::new(&format!("User {:02}", n), n))
        .collect();

    let request: PagingRequest =
        serde_json::from_value(json!({"pageIndex": 2, "pageSize": 10})).unwrap();
    let options = mapper::map_paging(&request).unwrap();

    let source = PagingManager::new()
        .apply(MemorySource::new(users), Some(&options))
        .unwrap();
    let items = source.into_items();

    assert_eq!(items.len(), 10);
    assert_eq!(items[0].age, 10);
    assert_eq!(items[9].age, 19);

    let page = Page::new(items, 50, Some(&options)).unwrap();
    assert!(page.has_previous_page());
    assert!(page.has_next_page());
    assert_eq!(page.total_pages_count(), 5);
}

// --- Scenario D: unpaged page of five ---

#[test]
fn unpaged_result_is_one_page() {
    let users: Vec<User> = (0..5).map(|n| User::new("u", n)).collect();
    let page = Page::new(users, 5, None).unwrap();
    assert_eq!(page.total_pages_count(), 1);
    assert_eq!(page.page_index(), 1);
    assert!(!page.has_next_page());
    assert!(!page.has_previous_page());
}

// --- identity behaviors ---

#[test]
fn absent_options_leave_the_collection_untouched() {
    let users = three_users();
    let filtered = FilteringManager::<User>::new()
        .apply(MemorySource::new(users.clone()), None)
        .unwrap();
    let sorted = SortingManager::<User>::new().apply(filtered, None).unwrap();
    let paged = PagingManager::new().apply(sorted, None).unwrap();
    assert_eq!(paged.into_items(), users);
}

// --- override rules end to end ---

#[test]
fn account_membership_filter_uses_the_custom_rule() {
    let account_id = Uuid::new_v4();
    let mut users = three_users();
    users[1].account_ids.push(account_id);

    let accounts = filtering_properties().get("accounts").unwrap();
    let overrides = Arc::new(FilterOverrides::new().rule_for(
        accounts,
        Operator::Contains,
        |value| {
            let wanted = value.and_then(|raw| Uuid::parse_str(raw.trim()).ok());
            let Some(wanted) = wanted else {
                return Err(FilteringError::NotCoercible {
                    property: "accounts".to_string(),
                });
            };
            Ok(Box::new(move |user: &User| {
                user.account_ids.contains(&wanted)
            }))
        },
    ));
    let manager = FilteringManager::with_overrides(overrides);

    let request = filtering_request(json!({
        "logic": "and",
        "filters": [
            {"filterBy": "user_accounts", "operator": "contains", "value": account_id.to_string()}
        ]
    }));
    let options = mapper::map_filtering(&request, filtering_properties()).unwrap();

    let out = manager
        .apply(MemorySource::new(users), Some(&options))
        .unwrap()
        .into_items();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].full_name, "Bob");
}

#[test]
fn account_membership_filter_fails_without_the_rule() {
    // Same request, no override table: the generic path cannot coerce a
    // collection-valued property.
    let request = filtering_request(json!({
        "logic": "and",
        "filters": [
            {"filterBy": "user_accounts", "operator": "contains", "value": "anything"}
        ]
    }));
    let options = mapper::map_filtering(&request, filtering_properties()).unwrap();

    let err = FilteringManager::<User>::new()
        .compile(Some(&options))
        .err()
        .unwrap();
    assert!(matches!(err, FilteringError::NotCoercible { .. }));
}

#[test]
fn accounts_count_sort_uses_the_custom_rule() {
    let mut users = three_users();
    users[0].account_ids.push(Uuid::new_v4());
    users[2].account_ids.push(Uuid::new_v4());
    users[2].account_ids.push(Uuid::new_v4());

    let accounts_count = sorting_properties().get("accountsCount").unwrap();
    let overrides = Arc::new(SortOverrides::new().rule_for(accounts_count, |user: &User| {
        FieldValue::Integer(user.account_ids.len() as i64)
    }));
    let manager = SortingManager::with_overrides(overrides);

    let request =
        sorting_request(json!({"sortBy": "accounts_count", "sortDirection": "descending"}));
    let options = mapper::map_sorting(&request, sorting_properties()).unwrap();

    let out = manager
        .apply(MemorySource::new(users), Some(&options))
        .unwrap()
        .into_items();
    let names: Vec<&str> = out.iter().map(|u| u.full_name.as_str()).collect();
    assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
}

// --- the full pipeline in request order ---

#[test]
fn full_request_flows_through_every_stage() {
    let users: Vec<User> = (1..=20)
        .map(|n| User::new(&format!("User {:02}", n), n))
        .collect();

    let request: QueryRequest = serde_json::from_value(json!({
        "paging": {"pageIndex": 2, "pageSize": 3},
        "sorting": {"sortBy": "user_age", "sortDirection": "descending"},
        "filtering": {
            "logic": "and",
            "filters": [
                {"filterBy": "user_age", "operator": "greaterThan", "value": "10"}
            ]
        }
    }))
    .unwrap();

    let paging = mapper::map_paging(request.paging.as_ref().unwrap()).unwrap();
    let sorting = mapper::map_sorting(request.sorting.as_ref().unwrap(), sorting_properties())
        .unwrap();
    let filtering = mapper::map_filtering(
        request.filtering.as_ref().unwrap(),
        filtering_properties(),
    )
    .unwrap();

    let source = FilteringManager::<User>::new()
        .apply(MemorySource::new(users), Some(&filtering))
        .unwrap();
    let total = source.count();
    assert_eq!(total, 10);

    let source = SortingManager::<User>::new()
        .apply(source, Some(&sorting))
        .unwrap();
    let source = PagingManager::new().apply(source, Some(&paging)).unwrap();

    let page =
        Page::with_applied(source.into_items(), total, Some(sorting), Some(filtering), Some(&paging))
            .unwrap();

    // Ages over 10 sorted descending are 20..=11; page 2 of size 3 holds
    // 17, 16, 15.
    assert_eq!(
        page.items().iter().map(|u| u.age).collect::<Vec<_>>(),
        vec![17, 16, 15]
    );
    assert_eq!(page.total_pages_count(), 4);
    assert!(page.has_next_page());
    assert!(page.has_previous_page());
    assert!(page.applied_sorting().is_some());
    assert!(page.applied_filtering().is_some());
}

// --- mapping failures surface as coded results, end to end ---

#[test]
fn invalid_requests_fail_with_stable_codes() {
    let request: PagingRequest =
        serde_json::from_value(json!({"pageIndex": 0, "pageSize": 10})).unwrap();
    assert_eq!(
        mapper::map_paging(&request).unwrap_err().code,
        "Paging.InvalidPageIndex"
    );

    let request = filtering_request(json!({
        "logic": "and",
        "filters": [
            {"filterBy": "user_age", "operator": "contains", "value": "3"}
        ]
    }));
    assert_eq!(
        mapper::map_filtering(&request, filtering_properties())
            .unwrap_err()
            .code,
        "Filtering.OperatorNotApplicable"
    );

    let request = filtering_request(json!({
        "logic": "and",
        "filters": [
            {"filterBy": "age", "operator": "equal", "value": "4"},
            {"filterBy": "user_age", "operator": "equal", "value": "4"}
        ]
    }));
    assert_eq!(
        mapper::map_filtering(&request, filtering_properties())
            .unwrap_err()
            .code,
        "Filtering.DuplicateFilters"
    );
}

#[test]
fn serialized_page_echoes_applied_options() {
    #[derive(Debug, Clone, Serialize, PartialEq)]
    struct Dto {
        name: String,
    }

    let request = filtering_request(json!({
        "logic": "or",
        "filters": [{"filterBy": "user_fullname", "operator": "startsWith", "value": "A"}]
    }));
    let filtering = mapper::map_filtering(&request, filtering_properties()).unwrap();

    let source = FilteringManager::<User>::new()
        .apply(MemorySource::new(three_users()), Some(&filtering))
        .unwrap();
    let total = source.count();
    let page = Page::with_applied(source.into_items(), total, None, Some(filtering), None)
        .unwrap()
        .map_items(|u| Dto { name: u.full_name });

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["items"], json!([{"name": "Alice"}]));
    assert_eq!(json["totalItemsCount"], 1);
    assert_eq!(json["appliedFiltering"]["logic"], json!("Or"));
    assert_eq!(
        json["appliedFiltering"]["filters"][0]["operator"],
        json!("StartsWith")
    );
}
