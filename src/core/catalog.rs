//! Property catalogs: per-entity registries of queryable properties

use crate::core::descriptor::PropertyDescriptor;
use crate::core::error::DefinitionError;
use indexmap::IndexMap;

/// Registry of the properties one entity type exposes for querying.
///
/// A catalog is populated by explicit `register` calls at process start —
/// there is no scanning or reflection, so what was registered is exactly what
/// can be addressed from the wire. Catalogs preserve declaration order and
/// are immutable once built; the usual pattern parks one behind a `OnceLock`
/// per entity type:
///
/// ```rust,ignore
/// static USER_FILTERS: OnceLock<PropertyCatalog> = OnceLock::new();
///
/// fn user_filters() -> &'static PropertyCatalog {
///     USER_FILTERS.get_or_init(|| {
///         PropertyCatalog::new()
///             .register(PropertyDescriptor::new("fullName", &["fullName", "user_fullname"]))
///             .register(PropertyDescriptor::forbidding(
///                 "age",
///                 &["age", "user_age"],
///                 &[Operator::Contains, Operator::StartsWith],
///             ))
///     })
/// }
/// ```
#[derive(Debug, Default)]
pub struct PropertyCatalog {
    entries: IndexMap<String, PropertyDescriptor>,
}

impl PropertyCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Register a descriptor, consuming and returning the catalog so
    /// registrations chain.
    ///
    /// # Panics
    ///
    /// Panics if a descriptor with the same canonical name (under either
    /// descriptor's case rule) is already registered — a catalog defect is a
    /// programmer error and must surface at startup.
    pub fn register(mut self, descriptor: PropertyDescriptor) -> Self {
        self.try_register(descriptor)
            .unwrap_or_else(|e| panic!("{}", e));
        self
    }

    /// Register a descriptor, reporting the defect instead of panicking
    pub fn try_register(&mut self, descriptor: PropertyDescriptor) -> Result<(), DefinitionError> {
        let collides = self.entries.values().any(|existing| {
            if existing.ignore_case() || descriptor.ignore_case() {
                existing.name().to_lowercase() == descriptor.name().to_lowercase()
            } else {
                existing.name() == descriptor.name()
            }
        });
        if collides {
            return Err(DefinitionError::DuplicateProperty {
                name: descriptor.name().to_string(),
            });
        }
        self.entries
            .insert(descriptor.name().to_string(), descriptor);
        Ok(())
    }

    /// Resolve a wire-level alias to its descriptor.
    ///
    /// Each descriptor is probed under its own case rule, in declaration
    /// order. `None` is a normal outcome — the caller turns it into a
    /// validation failure, not an error of the catalog.
    pub fn lookup(&self, alias: &str) -> Option<&PropertyDescriptor> {
        self.entries.values().find(|d| d.matches(alias))
    }

    /// Fetch a descriptor by its exact canonical name
    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.entries.get(name)
    }

    /// Iterate the registered descriptors in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.entries.values()
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no descriptors
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
