//! Predicate compiler: validated filtering options into one boolean test
//!
//! Sub-predicates resolve in two tiers. A custom rule registered for the
//! (property, operator) pair always wins — that is how joins, collection
//! membership and anything else beyond primitive comparison get expressed.
//! Otherwise the generic path reads the named property off the entity,
//! coerces the raw value to the property's declared kind once, and compares.

use crate::core::descriptor::PropertyDescriptor;
use crate::core::entity::Queryable;
use crate::core::error::{DefinitionError, FilteringError};
use crate::core::operator::{CombinationLogic, Operator};
use crate::core::options::{Filter, FilteringOptions};
use crate::core::store::{Predicate, QuerySource};
use crate::core::value::{FieldValue, ValueKind};
use std::collections::HashMap;
use std::sync::Arc;

type FilterRule<T> = Box<dyn Fn(Option<&str>) -> Result<Predicate<T>, FilteringError> + Send + Sync>;

/// Table of custom filter rules for one entity type.
///
/// Each rule is keyed by (property, operator) and receives the raw wire
/// value when its filter compiles. Tables are built at startup next to the
/// catalogs and shared read-only across requests.
pub struct FilterOverrides<T> {
    rules: HashMap<(PropertyDescriptor, Operator), FilterRule<T>>,
}

impl<T> Default for FilterOverrides<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FilterOverrides<T> {
    /// Create an empty override table
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Register a rule, consuming and returning the table so registrations
    /// chain.
    ///
    /// # Panics
    ///
    /// Panics if the property forbids the operator or a rule for the pair is
    /// already registered — override tables are compiled-in configuration,
    /// so defects must surface at startup.
    pub fn rule_for(
        mut self,
        property: &PropertyDescriptor,
        operator: Operator,
        rule: impl Fn(Option<&str>) -> Result<Predicate<T>, FilteringError> + Send + Sync + 'static,
    ) -> Self {
        self.try_rule_for(property, operator, rule)
            .unwrap_or_else(|e| panic!("{}", e));
        self
    }

    /// Register a rule, reporting the defect instead of panicking
    pub fn try_rule_for(
        &mut self,
        property: &PropertyDescriptor,
        operator: Operator,
        rule: impl Fn(Option<&str>) -> Result<Predicate<T>, FilteringError> + Send + Sync + 'static,
    ) -> Result<(), DefinitionError> {
        if !property.is_applicable(operator) {
            return Err(DefinitionError::InapplicableRule {
                property: property.name().to_string(),
                operator,
            });
        }
        let key = (property.clone(), operator);
        if self.rules.contains_key(&key) {
            return Err(DefinitionError::DuplicateFilterRule {
                property: property.name().to_string(),
                operator,
            });
        }
        self.rules.insert(key, Box::new(rule));
        Ok(())
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn get(
        &self,
        property: &PropertyDescriptor,
        operator: Operator,
    ) -> Option<&FilterRule<T>> {
        self.rules.get(&(property.clone(), operator))
    }
}

/// Compiles validated [`FilteringOptions`] into a single predicate and hands
/// it to a data source.
pub struct FilteringManager<T: Queryable> {
    overrides: Arc<FilterOverrides<T>>,
}

impl<T: Queryable> Clone for FilteringManager<T> {
    fn clone(&self) -> Self {
        Self {
            overrides: Arc::clone(&self.overrides),
        }
    }
}

impl<T: Queryable> Default for FilteringManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Queryable> FilteringManager<T> {
    /// Create a manager with no custom rules
    pub fn new() -> Self {
        Self {
            overrides: Arc::new(FilterOverrides::new()),
        }
    }

    /// Create a manager using the given override table
    pub fn with_overrides(overrides: Arc<FilterOverrides<T>>) -> Self {
        Self { overrides }
    }

    /// Compile filtering options into one combined predicate.
    ///
    /// Absent options compile to `None`: no filtering is applied. Any
    /// failure aborts the whole compilation and names the offending filter.
    pub fn compile(
        &self,
        options: Option<&FilteringOptions>,
    ) -> Result<Option<Predicate<T>>, FilteringError> {
        let Some(options) = options else {
            return Ok(None);
        };

        let mut parts = Vec::with_capacity(options.filters().len());
        for filter in options.filters() {
            parts.push(self.compile_filter(filter)?);
        }

        let predicate: Predicate<T> = match options.logic() {
            CombinationLogic::And => Box::new(move |item| parts.iter().all(|p| p(item))),
            CombinationLogic::Or => Box::new(move |item| parts.iter().any(|p| p(item))),
        };
        Ok(Some(predicate))
    }

    /// Compile and apply filtering to a data source. Absent options leave
    /// the source untouched.
    pub fn apply<S: QuerySource<T>>(
        &self,
        source: S,
        options: Option<&FilteringOptions>,
    ) -> Result<S, FilteringError> {
        match self.compile(options)? {
            Some(predicate) => Ok(source.filter(predicate)),
            None => Ok(source),
        }
    }

    fn compile_filter(&self, filter: &Filter) -> Result<Predicate<T>, FilteringError> {
        let property = filter.property();
        let operator = filter.operator();

        // Filter construction already enforces this; re-checked because the
        // compiler must hold the invariant on its own.
        if !property.is_applicable(operator) {
            return Err(FilteringError::OperatorNotApplicable {
                property: property.name().to_string(),
                operator,
            });
        }

        if let Some(rule) = self.overrides.get(property, operator) {
            tracing::debug!(
                property = property.name(),
                operator = %operator,
                "compiling filter through custom rule"
            );
            return rule(filter.value());
        }

        let name = property.name().to_string();
        let Some(kind) = T::field_kind(&name) else {
            return Err(FilteringError::NotCoercible { property: name });
        };
        tracing::debug!(
            property = %name,
            operator = %operator,
            kind = kind.as_str(),
            "compiling generic filter"
        );

        match operator {
            Operator::Equal | Operator::NotEqual => {
                let expected = match filter.value() {
                    // Null is a meaningful operand for equality: the filter
                    // tests whether the field is (not) null.
                    None => FieldValue::Null,
                    Some(raw) => Self::coerce(kind, raw, filter)?,
                };
                let negate = operator == Operator::NotEqual;
                Ok(Box::new(move |item| {
                    let actual = item.field(&name).unwrap_or(FieldValue::Null);
                    (actual == expected) != negate
                }))
            }
            Operator::LessThan
            | Operator::LessThanOrEqual
            | Operator::GreaterThan
            | Operator::GreaterThanOrEqual => {
                let raw = filter.value().ok_or_else(|| FilteringError::ValueCoercion {
                    property: name.clone(),
                    operator,
                    value: None,
                    kind,
                })?;
                let bound = Self::coerce(kind, raw, filter)?;
                Ok(Box::new(move |item| {
                    let actual = item.field(&name).unwrap_or(FieldValue::Null);
                    if actual.is_null() {
                        return false;
                    }
                    match actual.compare(&bound) {
                        Some(ordering) => match operator {
                            Operator::LessThan => ordering.is_lt(),
                            Operator::LessThanOrEqual => ordering.is_le(),
                            Operator::GreaterThan => ordering.is_gt(),
                            Operator::GreaterThanOrEqual => ordering.is_ge(),
                            _ => unreachable!(),
                        },
                        None => false,
                    }
                }))
            }
            Operator::Contains | Operator::StartsWith => {
                if kind != ValueKind::Text {
                    // Substring operators only make sense on text; catalogs
                    // normally forbid them elsewhere, this is the backstop.
                    return Err(FilteringError::OperatorNotApplicable {
                        property: name,
                        operator,
                    });
                }
                let needle = filter
                    .value()
                    .ok_or_else(|| FilteringError::ValueCoercion {
                        property: name.clone(),
                        operator,
                        value: None,
                        kind,
                    })?
                    .to_string();
                let starts_with = operator == Operator::StartsWith;
                Ok(Box::new(move |item| match item.field(&name) {
                    Some(FieldValue::Text(haystack)) => {
                        if starts_with {
                            haystack.starts_with(&needle)
                        } else {
                            haystack.contains(&needle)
                        }
                    }
                    _ => false,
                }))
            }
        }
    }

    fn coerce(kind: ValueKind, raw: &str, filter: &Filter) -> Result<FieldValue, FilteringError> {
        FieldValue::parse(kind, raw).ok_or_else(|| FilteringError::ValueCoercion {
            property: filter.property().name().to_string(),
            operator: filter.operator(),
            value: Some(raw.to_string()),
            kind,
        })
    }
}
