//! Symbol table for declared variables.

use std::collections::HashMap;
use std::fmt;

use crate::parser::ast::EntityKind;
use crate::types::Value;

/// Declared variables in declaration order, with name lookup.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    bindings: Vec<VariableBinding>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding. An existing binding with the same name is replaced in place.
    pub fn insert(&mut self, binding: VariableBinding) {
        if let Some(&slot) = self.index.get(&binding.name) {
            self.bindings[slot] = binding;
        } else {
            self.index.insert(binding.name.clone(), self.bindings.len());
            self.bindings.push(binding);
        }
    }

    /// Looks up a variable by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&VariableBinding> {
        self.index.get(name).map(|&slot| &self.bindings[slot])
    }

    /// Returns true if a variable with the given name is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &VariableBinding> {
        self.bindings.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Names of `Player` variables in declaration order.
    #[must_use]
    pub fn player_names(&self) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|b| b.entity_kind == EntityKind::Player)
            .map(|b| b.name.as_str())
            .collect()
    }

    /// Number of `Player` variables.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.bindings
            .iter()
            .filter(|b| b.entity_kind == EntityKind::Player)
            .count()
    }

    /// Returns true if any variable is bound through a relationship.
    #[must_use]
    pub fn has_relational(&self) -> bool {
        self.bindings.iter().any(VariableBinding::is_relational)
    }
}

/// A declared variable and what it is bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBinding {
    pub name: String,
    pub entity_kind: EntityKind,
    pub value: BindingValue,
}

impl VariableBinding {
    /// Creates a new binding.
    #[must_use]
    pub fn new(name: impl Into<String>, entity_kind: EntityKind, value: BindingValue) -> Self {
        VariableBinding {
            name: name.into(),
            entity_kind,
            value,
        }
    }

    /// Returns the relation and source variable when bound relationally.
    #[must_use]
    pub fn relation(&self) -> Option<(Relation, &str)> {
        match &self.value {
            BindingValue::Relation { source, relation } => Some((*relation, source.as_str())),
            _ => None,
        }
    }

    /// Returns true if bound through the given relation.
    #[must_use]
    pub fn is_related_by(&self, relation: Relation) -> bool {
        self.relation().is_some_and(|(r, _)| r == relation)
    }

    #[must_use]
    pub fn is_relational(&self) -> bool {
        self.relation().is_some()
    }
}

/// Binding target of a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingValue {
    /// Declared without an initializer.
    Unbound,
    /// Bound to a literal, e.g. a player's full name.
    Literal(Value),
    /// Bound through a relationship of another variable (`p.opponent`).
    Relation { source: String, relation: Relation },
}

/// Relationships usable in a relational initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Opponent,
    Team,
    Played,
}

impl Relation {
    /// All relations, in the order they are listed in error messages.
    pub const ALL: [Relation; 3] = [Relation::Opponent, Relation::Team, Relation::Played];

    /// Parses a relation from the field name of an initializer.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "opponent" => Some(Relation::Opponent),
            "team" => Some(Relation::Team),
            "played" => Some(Relation::Played),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Opponent => "opponent",
            Relation::Team => "team",
            Relation::Played => "played",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table_keeps_declaration_order() {
        let mut table = SymbolTable::new();
        table.insert(VariableBinding::new("q", EntityKind::Player, BindingValue::Unbound));
        table.insert(VariableBinding::new("t", EntityKind::Team, BindingValue::Unbound));
        table.insert(VariableBinding::new("p", EntityKind::Player, BindingValue::Unbound));

        let names: Vec<_> = table.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["q", "t", "p"]);
        assert_eq!(table.player_names(), vec!["q", "p"]);
        assert_eq!(table.player_count(), 2);
        assert!(!table.has_relational());
    }

    #[test]
    fn test_relational_binding() {
        let binding = VariableBinding::new(
            "q",
            EntityKind::Player,
            BindingValue::Relation {
                source: "p".to_string(),
                relation: Relation::Opponent,
            },
        );
        assert_eq!(binding.relation(), Some((Relation::Opponent, "p")));
        assert!(binding.is_related_by(Relation::Opponent));
        assert!(!binding.is_related_by(Relation::Team));
    }

    #[test]
    fn test_relation_parse() {
        assert_eq!(Relation::parse("team"), Some(Relation::Team));
        assert_eq!(Relation::parse("teammate"), None);
        assert_eq!(Relation::Played.to_string(), "played");
    }
}
