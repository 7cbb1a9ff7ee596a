//! Comparator compiler: validated sorting options into an ordering
//! instruction
//!
//! Key extraction resolves in the same two tiers as filtering: a custom rule
//! registered for the property wins (computed keys, related-collection
//! counts), otherwise the generic path reads the named property off the
//! entity. One sort key per request, by design.

use crate::core::descriptor::PropertyDescriptor;
use crate::core::entity::Queryable;
use crate::core::error::{DefinitionError, SortingError};
use crate::core::operator::SortDirection;
use crate::core::options::SortingOptions;
use crate::core::store::{QuerySource, SortKey};
use crate::core::value::FieldValue;
use std::collections::HashMap;
use std::sync::Arc;

type SortRule<T> = Arc<dyn Fn(&T) -> FieldValue + Send + Sync>;

/// Table of custom sort-key rules for one entity type.
///
/// Each rule maps a property to a key extractor. Tables are built at startup
/// next to the catalogs and shared read-only across requests.
pub struct SortOverrides<T> {
    rules: HashMap<PropertyDescriptor, SortRule<T>>,
}

impl<T> Default for SortOverrides<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SortOverrides<T> {
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
    /// Panics if a rule for the property is already registered — override
    /// tables are compiled-in configuration, so defects must surface at
    /// startup.
    pub fn rule_for(
        mut self,
        property: &PropertyDescriptor,
        rule: impl Fn(&T) -> FieldValue + Send + Sync + 'static,
    ) -> Self {
        self.try_rule_for(property, rule)
            .unwrap_or_else(|e| panic!("{}", e));
        self
    }

    /// Register a rule, reporting the defect instead of panicking
    pub fn try_rule_for(
        &mut self,
        property: &PropertyDescriptor,
        rule: impl Fn(&T) -> FieldValue + Send + Sync + 'static,
    ) -> Result<(), DefinitionError> {
        if self.rules.contains_key(property) {
            return Err(DefinitionError::DuplicateSortRule {
                property: property.name().to_string(),
            });
        }
        self.rules.insert(property.clone(), Arc::new(rule));
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

    fn get(&self, property: &PropertyDescriptor) -> Option<&SortRule<T>> {
        self.rules.get(property)
    }
}

/// A compiled ordering instruction: one key extractor plus a direction
pub struct SortInstruction<T> {
    pub key: SortKey<T>,
    pub direction: SortDirection,
}

/// Compiles validated [`SortingOptions`] into an ordering instruction and
/// hands it to a data source.
pub struct SortingManager<T: Queryable> {
    overrides: Arc<SortOverrides<T>>,
}

impl<T: Queryable> Clone for SortingManager<T> {
    fn clone(&self) -> Self {
        Self {
            overrides: Arc::clone(&self.overrides),
        }
    }
}

impl<T: Queryable> Default for SortingManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Queryable> SortingManager<T> {
    /// Create a manager with no custom rules
    pub fn new() -> Self {
        Self {
            overrides: Arc::new(SortOverrides::new()),
        }
    }

    /// Create a manager using the given override table
    pub fn with_overrides(overrides: Arc<SortOverrides<T>>) -> Self {
        Self { overrides }
    }

    /// Compile sorting options into an ordering instruction.
    ///
    /// Absent options compile to `None`: no sorting is applied. A property
    /// the entity does not expose and no rule covers is a compilation
    /// failure, not a silent no-op.
    pub fn compile(
        &self,
        options: Option<&SortingOptions>,
    ) -> Result<Option<SortInstruction<T>>, SortingError> {
        let Some(options) = options else {
            return Ok(None);
        };
        let property = &options.property;

        if let Some(rule) = self.overrides.get(property) {
            tracing::debug!(
                property = property.name(),
                direction = %options.direction,
                "compiling sort through custom rule"
            );
            let rule = Arc::clone(rule);
            return Ok(Some(SortInstruction {
                key: Box::new(move |item| rule(item)),
                direction: options.direction,
            }));
        }

        let name = property.name().to_string();
        if T::field_kind(&name).is_none() {
            return Err(SortingError::UnknownProperty { property: name });
        }
        tracing::debug!(property = %name, direction = %options.direction, "compiling generic sort");
        Ok(Some(SortInstruction {
            key: Box::new(move |item| item.field(&name).unwrap_or(FieldValue::Null)),
            direction: options.direction,
        }))
    }

    /// Compile and apply sorting to a data source. Absent options leave the
    /// source untouched.
    pub fn apply<S: QuerySource<T>>(
        &self,
        source: S,
        options: Option<&SortingOptions>,
    ) -> Result<S, SortingError> {
        match self.compile(options)? {
            Some(instruction) => Ok(source.order_by(instruction.key, instruction.direction)),
            None => Ok(source),
        }
    }
}
