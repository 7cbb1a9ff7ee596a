//! End-to-end example: a users collection queried with untrusted requests

use pagewise::prelude::*;
use serde_json::json;
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    id: Uuid,
    followers: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct User {
    id: Uuid,
    full_name: String,
    age: i64,
    created: DateTime<Utc>,
    accounts: Vec<Account>,
}

impl Queryable for User {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "fullName" => Some(FieldValue::Text(self.full_name.clone())),
            "age" => Some(FieldValue::Integer(self.age)),
            "created" => Some(FieldValue::DateTime(self.created)),
            _ => None,
        }
    }

    fn field_kind(name: &str) -> Option<ValueKind> {
        match name {
            "fullName" => Some(ValueKind::Text),
            "age" => Some(ValueKind::Integer),
            "created" => Some(ValueKind::DateTime),
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
                "created",
                &["created", "created_date"],
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

/// Filtering "accounts contains <id>" walks the related collection, which
/// the generic path cannot do — a custom rule covers it.
fn filter_overrides() -> Arc<FilterOverrides<User>> {
    let accounts = filtering_properties().get("accounts").unwrap();
    Arc::new(
        FilterOverrides::new().rule_for(accounts, Operator::Contains, |value| {
            let wanted = value.and_then(|raw| Uuid::parse_str(raw.trim()).ok());
            let Some(wanted) = wanted else {
                return Err(FilteringError::ValueCoercion {
                    property: "accounts".to_string(),
                    operator: Operator::Contains,
                    value: value.map(str::to_string),
                    kind: ValueKind::Identifier,
                });
            };
            Ok(Box::new(move |user: &User| {
                user.accounts.iter().any(|account| account.id == wanted)
            }))
        }),
    )
}

fn sort_overrides() -> Arc<SortOverrides<User>> {
    let accounts_count = sorting_properties().get("accountsCount").unwrap();
    Arc::new(SortOverrides::new().rule_for(accounts_count, |user: &User| {
        FieldValue::Integer(user.accounts.len() as i64)
    }))
}

fn seed_users() -> Vec<User> {
    let names = [
        ("Mike Johnson", 34, 3),
        ("Sarah Connor", 29, 1),
        ("John Smith", 41, 2),
        ("Jane Smith", 35, 0),
        ("Tom Baker", 58, 4),
        ("Ada Wong", 29, 1),
        ("Leon Kennedy", 31, 2),
        ("Claire Redfield", 27, 0),
    ];
    names
        .iter()
        .enumerate()
        .map(|(index, (name, age, account_count))| User {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            age: *age,
            created: Utc::now() - chrono::Duration::days(index as i64 * 30),
            accounts: (0..*account_count)
                .map(|n| Account {
                    id: Uuid::new_v4(),
                    followers: (n + 1) * 100,
                })
                .collect(),
        })
        .collect()
}

fn run_query(users: &[User], request: QueryRequest) -> Result<Page<User>, QueryError> {
    let paging = request
        .paging
        .as_ref()
        .map(mapper::map_paging)
        .transpose()?;
    let sorting = request
        .sorting
        .as_ref()
        .map(|r| mapper::map_sorting(r, sorting_properties()))
        .transpose()?;
    let filtering = request
        .filtering
        .as_ref()
        .map(|r| mapper::map_filtering(r, filtering_properties()))
        .transpose()?;

    let filtering_manager = FilteringManager::with_overrides(filter_overrides());
    let sorting_manager = SortingManager::with_overrides(sort_overrides());
    let paging_manager = PagingManager::new();

    let source = filtering_manager.apply(MemorySource::new(users.to_vec()), filtering.as_ref())?;
    let total = source.count();
    let source = sorting_manager.apply(source, sorting.as_ref())?;
    let source = paging_manager.apply(source, paging.as_ref())?;

    Ok(Page::with_applied(
        source.into_items(),
        total,
        sorting,
        filtering,
        paging.as_ref(),
    )?)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let users = seed_users();
    println!("Seeded {} users\n", users.len());

    // A full request, exactly as a client would post it
    let request: QueryRequest = serde_json::from_value(json!({
        "paging": {"pageIndex": 1, "pageSize": 3},
        "sorting": {"sortBy": "user_age", "sortDirection": "descending"},
        "filtering": {
            "logic": "and",
            "filters": [
                {"filterBy": "user_age", "operator": "greaterThanOrEqual", "value": "29"},
                {"filterBy": "fullName", "operator": "notEqual", "value": "Tom Baker"}
            ]
        }
    }))
    .expect("request literal is valid JSON");

    match run_query(&users, request) {
        Ok(page) => {
            println!(
                "Page {}/{} ({} matching users):",
                page.page_index(),
                page.total_pages_count(),
                page.total_items_count()
            );
            for user in page.items() {
                println!("  {:<18} age {:>2}", user.full_name, user.age);
            }
            println!(
                "\nhasNextPage={} hasPreviousPage={}",
                page.has_next_page(),
                page.has_previous_page()
            );
        }
        Err(e) => println!("query failed: {}", e),
    }

    // Sorting by a computed key through the sort override
    let request: QueryRequest = serde_json::from_value(json!({
        "sorting": {"sortBy": "accounts_count", "sortDirection": "descending"}
    }))
    .unwrap();
    let page = run_query(&users, request).expect("sort by accounts count");
    println!("\nMost connected users:");
    for user in page.items().iter().take(3) {
        println!("  {:<18} {} accounts", user.full_name, user.accounts.len());
    }

    // Filtering on the related collection through the filter override
    let some_account = users[0].accounts[0].id;
    let request: QueryRequest = serde_json::from_value(json!({
        "filtering": {
            "logic": "and",
            "filters": [
                {"filterBy": "user_accounts", "operator": "contains", "value": some_account.to_string()}
            ]
        }
    }))
    .unwrap();
    let page = run_query(&users, request).expect("filter by account id");
    println!(
        "\nOwner of account {}: {}",
        some_account,
        page.items()[0].full_name
    );

    // An invalid request comes back as a coded failure, never a panic
    let request: QueryRequest = serde_json::from_value(json!({
        "paging": {"pageIndex": 0, "pageSize": 10}
    }))
    .unwrap();
    match run_query(&users, request) {
        Ok(_) => println!("\nunexpected success"),
        Err(e) => println!("\nRejected as expected -> {}", e),
    }
}
