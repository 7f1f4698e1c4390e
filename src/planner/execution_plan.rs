//! Compilation output handed to an external executor.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::parser::ast::Scope;
use crate::types::Value;

/// Shape of the rows the generated statement returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultShape {
    /// One row per game.
    Games,
    /// A single row of averages (`avg(games)`).
    Averages,
    /// No query in the program.
    Unknown,
    /// Raw scope text of any other scope.
    Raw(String),
}

impl ResultShape {
    /// Result shape of a query scope.
    #[must_use]
    pub fn for_scope(scope: &Scope) -> Self {
        match scope {
            Scope::Games => ResultShape::Games,
            Scope::AvgGames => ResultShape::Averages,
            other => ResultShape::Raw(other.as_str().to_string()),
        }
    }

    /// Returns the tag text (`"games"`, `"averages"`, ...).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ResultShape::Games => "games",
            ResultShape::Averages => "averages",
            ResultShape::Unknown => "unknown",
            ResultShape::Raw(scope) => scope,
        }
    }
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResultShape {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Generated statement, its positional parameters and descriptive metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionPlan {
    /// Statement text with `?1..?N` placeholders. Empty when the program has no query.
    pub sql: String,
    /// `parameters[i]` binds placeholder `?{i + 1}`.
    pub parameters: Vec<Value>,
    pub result_shape: ResultShape,
    /// Field names referenced in `where` and `order by`.
    pub referenced_fields: BTreeSet<String>,
    /// Declared Player variable names.
    pub player_variables: BTreeSet<String>,
}

impl ExecutionPlan {
    /// Returns the value bound to placeholder `?index` (1-based).
    #[must_use]
    pub fn parameter(&self, index: usize) -> Option<&Value> {
        index.checked_sub(1).and_then(|i| self.parameters.get(i))
    }

    /// Returns true if the program had no query to compile.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

impl fmt::Display for ExecutionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.sql)?;
        for (i, value) in self.parameters.iter().enumerate() {
            writeln!(f, "  ?{} = {value}", i + 1)?;
        }
        write!(f, "  result: {}", self.result_shape)
    }
}
