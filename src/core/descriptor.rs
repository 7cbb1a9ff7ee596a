//! Property descriptors: the immutable identity of a queryable property

use crate::core::error::DefinitionError;
use crate::core::operator::Operator;
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// Immutable description of one queryable property of an entity type.
///
/// A descriptor names the property, lists the wire-level aliases clients may
/// use to address it, fixes the case rule for alias matching, and (for
/// filtering catalogs) lists the operators that must never be applied to it.
///
/// Descriptors are declared once per entity type at process start and never
/// mutated. Invalid declarations are programmer errors, so the convenience
/// constructors panic; [`PropertyDescriptor::try_new`] returns the underlying
/// [`DefinitionError`] instead.
///
/// Equality is by value: two descriptors are equal iff their name, case
/// rule, alias set (order-insensitive) and forbidden-operator set
/// (order-insensitive) all match.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    name: String,
    aliases: Vec<String>,
    ignore_case: bool,
    forbidden_operators: Vec<Operator>,
}

impl PropertyDescriptor {
    /// Create a descriptor, validating every declaration rule.
    ///
    /// Fails if the name is blank, the alias list is empty or contains a
    /// blank entry, two aliases collide under the case rule, or an operator
    /// appears twice in the forbidden set.
    pub fn try_new(
        name: &str,
        aliases: &[&str],
        ignore_case: bool,
        forbidden_operators: &[Operator],
    ) -> Result<Self, DefinitionError> {
        if name.trim().is_empty() {
            return Err(DefinitionError::EmptyPropertyName);
        }
        if aliases.is_empty() {
            return Err(DefinitionError::EmptyAliases {
                property: name.to_string(),
            });
        }
        for (index, alias) in aliases.iter().enumerate() {
            if alias.trim().is_empty() {
                return Err(DefinitionError::BlankAlias {
                    property: name.to_string(),
                });
            }
            let duplicated = aliases[..index].iter().any(|prior| {
                if ignore_case {
                    prior.to_lowercase() == alias.to_lowercase()
                } else {
                    prior == alias
                }
            });
            if duplicated {
                return Err(DefinitionError::DuplicateAlias {
                    property: name.to_string(),
                    alias: alias.to_string(),
                });
            }
        }
        for (index, operator) in forbidden_operators.iter().enumerate() {
            if forbidden_operators[..index].contains(operator) {
                return Err(DefinitionError::DuplicateForbiddenOperator {
                    property: name.to_string(),
                    operator: *operator,
                });
            }
        }

        Ok(Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            ignore_case,
            forbidden_operators: forbidden_operators.to_vec(),
        })
    }

    /// Create a case-insensitive descriptor with no forbidden operators.
    ///
    /// # Panics
    ///
    /// Panics on any declaration defect; see [`PropertyDescriptor::try_new`].
    pub fn new(name: &str, aliases: &[&str]) -> Self {
        Self::try_new(name, aliases, true, &[]).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Create a case-insensitive descriptor with forbidden operators.
    ///
    /// # Panics
    ///
    /// Panics on any declaration defect; see [`PropertyDescriptor::try_new`].
    pub fn forbidding(name: &str, aliases: &[&str], forbidden_operators: &[Operator]) -> Self {
        Self::try_new(name, aliases, true, forbidden_operators)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Create a case-sensitive descriptor with no forbidden operators.
    ///
    /// # Panics
    ///
    /// Panics on any declaration defect; see [`PropertyDescriptor::try_new`].
    pub fn case_sensitive(name: &str, aliases: &[&str]) -> Self {
        Self::try_new(name, aliases, false, &[]).unwrap_or_else(|e| panic!("{}", e))
    }

    /// The canonical property name, as entities expose it
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wire-level aliases clients may use, in declaration order
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Whether alias matching ignores case
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// The operators that must never be applied to this property
    pub fn forbidden_operators(&self) -> &[Operator] {
        &self.forbidden_operators
    }

    /// Whether the operator may be applied to this property
    pub fn is_applicable(&self, operator: Operator) -> bool {
        !self.forbidden_operators.contains(&operator)
    }

    /// Whether the candidate string addresses this property under its
    /// case rule
    pub fn matches(&self, candidate: &str) -> bool {
        self.aliases.iter().any(|alias| {
            if self.ignore_case {
                alias.to_lowercase() == candidate.to_lowercase()
            } else {
                alias == candidate
            }
        })
    }

    fn sorted_aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.aliases.iter().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }

    fn sorted_forbidden(&self) -> Vec<Operator> {
        let mut operators = self.forbidden_operators.clone();
        operators.sort_unstable();
        operators
    }
}

impl PartialEq for PropertyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.ignore_case == other.ignore_case
            && self.sorted_aliases() == other.sorted_aliases()
            && self.sorted_forbidden() == other.sorted_forbidden()
    }
}

impl Eq for PropertyDescriptor {}

impl Hash for PropertyDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.ignore_case.hash(state);
        self.sorted_aliases().hash(state);
        self.sorted_forbidden().hash(state);
    }
}
