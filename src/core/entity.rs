//! Entity trait giving the query engine reflection-free property access

use crate::core::value::{FieldValue, ValueKind};

/// Trait implemented by every entity type the engine can query generically.
///
/// The predicate and comparator compilers never inspect an entity's layout;
/// they only read named properties through this trait. An implementation is a
/// pair of explicit match tables:
/// - `field` reads a property value off an instance
/// - `field_kind` declares the primitive kind of a property, so raw wire
///   values can be coerced once at compile time
///
/// A property with no primitive representation (a related collection, a
/// nested object) returns `None` from `field_kind`; filtering on it only
/// works through a custom override rule.
///
/// # Example
///
/// ```rust,ignore
/// impl Queryable for User {
///     fn field(&self, name: &str) -> Option<FieldValue> {
///         match name {
///             "fullName" => Some(FieldValue::Text(self.full_name.clone())),
///             "age" => Some(FieldValue::Integer(self.age)),
///             "created" => Some(FieldValue::DateTime(self.created)),
///             _ => None,
///         }
///     }
///
///     fn field_kind(name: &str) -> Option<ValueKind> {
///         match name {
///             "fullName" => Some(ValueKind::Text),
///             "age" => Some(ValueKind::Integer),
///             "created" => Some(ValueKind::DateTime),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Queryable: Clone + Send + Sync + 'static {
    /// Read the named property off this instance.
    ///
    /// Returns `None` when the entity does not expose the property; a known
    /// property whose value is absent returns `Some(FieldValue::Null)`.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// The declared primitive kind of the named property.
    ///
    /// Returns `None` when the property is unknown or has no primitive
    /// representation.
    fn field_kind(name: &str) -> Option<ValueKind>;
}
