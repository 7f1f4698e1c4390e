//! Binding resolution for variable declarations.

use crate::error::Result;
use crate::parser::ast::{EntityKind, Expression, Program, VariableDeclaration};

use super::scope::{BindingValue, Relation, SymbolTable, VariableBinding};

/// Valid `(relation, source kind, declared kind)` combinations.
const COMPATIBLE_RELATIONS: &[(Relation, EntityKind, EntityKind)] = &[
    (Relation::Opponent, EntityKind::Player, EntityKind::Player),
    (Relation::Opponent, EntityKind::Player, EntityKind::Team),
    (Relation::Opponent, EntityKind::Player, EntityKind::Opponent),
    (Relation::Team, EntityKind::Player, EntityKind::Team),
    (Relation::Played, EntityKind::Player, EntityKind::Player),
];

/// Errors that can occur during binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// Referenced an undeclared variable.
    UndefinedVariable(String),
    /// Declared the same name twice.
    DuplicateVariable(String),
    /// Initializer field is not a known relation.
    UnknownRelation(String),
    /// Relation not valid between these entity kinds.
    IncompatibleRelation {
        relation: Relation,
        source: EntityKind,
        target: EntityKind,
    },
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindError::UndefinedVariable(name) => write!(f, "Undefined variable: {name}"),
            BindError::DuplicateVariable(name) => write!(f, "Duplicate variable: {name}"),
            BindError::UnknownRelation(name) => {
                let valid: Vec<&str> = Relation::ALL.iter().map(Relation::as_str).collect();
                write!(
                    f,
                    "Unknown relationship: '{name}' (valid: {})",
                    valid.join(", ")
                )
            }
            BindError::IncompatibleRelation {
                relation,
                source,
                target,
            } => {
                if *source == EntityKind::Player {
                    write!(
                        f,
                        "'{relation}' relationship cannot bind a {target} variable"
                    )
                } else {
                    write!(
                        f,
                        "'{relation}' relationship is only valid from Player variables, not {source}"
                    )
                }
            }
        }
    }
}

impl std::error::Error for BindError {}

/// Resolves declarations into a [`SymbolTable`], strictly in textual order.
#[derive(Debug, Default)]
pub struct Binder {
    symbols: SymbolTable,
}

impl Binder {
    /// Creates a binder with an empty symbol table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bindings resolved so far.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Binds every declaration of a program and returns the symbol table.
    ///
    /// # Errors
    ///
    /// Returns the first binding error encountered.
    pub fn bind_program(mut self, program: &Program) -> Result<SymbolTable> {
        for declaration in &program.declarations {
            self.bind_declaration(declaration)?;
        }
        tracing::debug!(
            variables = self.symbols.len(),
            players = self.symbols.player_count(),
            relational = self.symbols.has_relational(),
            "bound declarations"
        );
        Ok(self.symbols)
    }

    /// Binds one declaration against the variables declared before it.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already declared, the relational
    /// source is undeclared, or the relation is unknown or incompatible.
    pub fn bind_declaration(&mut self, declaration: &VariableDeclaration) -> Result<&VariableBinding> {
        let name = &declaration.name;
        if self.symbols.contains(name) {
            return Err(BindError::DuplicateVariable(name.clone()).into());
        }

        let value = match &declaration.initializer {
            None => BindingValue::Unbound,
            Some(Expression::Literal(literal)) => BindingValue::Literal(literal.value.clone()),
            Some(Expression::FieldAccess(access)) => {
                let source = self
                    .symbols
                    .lookup(&access.variable)
                    .ok_or_else(|| BindError::UndefinedVariable(access.variable.clone()))?;
                let relation = Relation::parse(&access.field)
                    .ok_or_else(|| BindError::UnknownRelation(access.field.clone()))?;
                Self::check_compatible(relation, source.entity_kind, declaration.entity_kind)?;
                BindingValue::Relation {
                    source: access.variable.clone(),
                    relation,
                }
            }
            // Other initializer shapes carry no binding.
            Some(_) => BindingValue::Unbound,
        };

        tracing::trace!(variable = %name, kind = %declaration.entity_kind, ?value, "bound variable");
        self.symbols.insert(VariableBinding::new(
            name.clone(),
            declaration.entity_kind,
            value,
        ));
        self.symbols
            .lookup(name)
            .ok_or_else(|| BindError::UndefinedVariable(name.clone()).into())
    }

    fn check_compatible(
        relation: Relation,
        source: EntityKind,
        target: EntityKind,
    ) -> std::result::Result<(), BindError> {
        if COMPATIBLE_RELATIONS.contains(&(relation, source, target)) {
            Ok(())
        } else {
            Err(BindError::IncompatibleRelation {
                relation,
                source,
                target,
            })
        }
    }
}
