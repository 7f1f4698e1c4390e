//! Planning context threaded through every code generation step.
//!
//! Steps take the context by value and hand back the successor together with
//! the fragment they produced, so parameter numbering follows the order in
//! which fragments are generated.

use crate::binder::{BindError, SymbolTable, VariableBinding};
use crate::catalog::schema::SHARED_STATS_ALIAS;
use crate::error::Result;
use crate::types::Value;

/// How player-derived columns are namespaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aliasing {
    /// One shared `player_statistics` join.
    Shared,
    /// One `<var>_stats` join per variable.
    PerVariable,
}

impl Aliasing {
    /// Per-variable aliasing is needed once more than one Player variable is
    /// declared or any variable is bound relationally.
    #[must_use]
    pub fn for_symbols(symbols: &SymbolTable) -> Self {
        if symbols.player_count() > 1 || symbols.has_relational() {
            Aliasing::PerVariable
        } else {
            Aliasing::Shared
        }
    }

    #[must_use]
    pub fn is_per_variable(self) -> bool {
        self == Aliasing::PerVariable
    }

    /// Statistics alias for a variable under this mode.
    #[must_use]
    pub fn stats_alias(self, variable: &str) -> String {
        match self {
            Aliasing::Shared => SHARED_STATS_ALIAS.to_string(),
            Aliasing::PerVariable => stats_alias(variable),
        }
    }
}

/// `<var>_stats`.
#[must_use]
pub fn stats_alias(variable: &str) -> String {
    format!("{variable}_stats")
}

/// Positional parameters collected so far. Placeholder `?N` binds index `N - 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters(Vec<Value>);

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value and returns the successor with its placeholder.
    #[must_use]
    pub fn bind(mut self, value: Value) -> (Self, String) {
        self.0.push(value);
        let placeholder = format!("?{}", self.0.len());
        (self, placeholder)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

/// Immutable inputs plus the parameter list being built.
#[derive(Debug, Clone)]
pub struct PlanContext<'a> {
    symbols: &'a SymbolTable,
    aliasing: Aliasing,
    parameters: Parameters,
}

impl<'a> PlanContext<'a> {
    /// Creates a context for one compilation.
    #[must_use]
    pub fn new(symbols: &'a SymbolTable) -> Self {
        PlanContext {
            symbols,
            aliasing: Aliasing::for_symbols(symbols),
            parameters: Parameters::new(),
        }
    }

    #[must_use]
    pub fn symbols(&self) -> &'a SymbolTable {
        self.symbols
    }

    #[must_use]
    pub fn aliasing(&self) -> Aliasing {
        self.aliasing
    }

    /// Extracts a literal into the next positional parameter.
    #[must_use]
    pub fn bind(self, value: Value) -> (Self, String) {
        let (parameters, placeholder) = self.parameters.bind(value);
        (
            PlanContext {
                parameters,
                ..self
            },
            placeholder,
        )
    }

    /// Looks up a declared variable.
    ///
    /// # Errors
    ///
    /// Returns `UndefinedVariable` if the name was never declared.
    pub fn lookup(&self, name: &str) -> Result<&'a VariableBinding> {
        self.symbols
            .lookup(name)
            .ok_or_else(|| BindError::UndefinedVariable(name.to_string()).into())
    }

    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    #[must_use]
    pub fn into_parameters(self) -> Vec<Value> {
        self.parameters.into_values()
    }
}
