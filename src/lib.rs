//! hoopsql - basketball statistics query compiler
//!
//! Compiles HoopsQL programs into a parameterized SQL statement plus a
//! positional parameter list. The pipeline runs scanner, parser, binder and
//! planner in sequence; each stage consumes only the previous stage's output
//! and the first error aborts the compilation.
//!
//! ```
//! let plan = hoopsql::compile(r#"Player p = "Kobe Bryant" get games where p.points >= 40"#)?;
//! assert_eq!(plan.parameters.len(), 2);
//! # Ok::<(), hoopsql::HoopsError>(())
//! ```

pub mod binder;
pub mod catalog;
pub mod error;
pub mod parser;
pub mod planner;
pub mod types;

use rayon::prelude::*;

pub use error::{HoopsError, Result};
pub use planner::{ExecutionPlan, ResultShape};
pub use types::Value;

use binder::Binder;
use parser::parse_query;
use planner::Planner;

/// Default maximum source length in bytes (64 KiB).
pub const DEFAULT_MAX_SOURCE_LEN: usize = 64 * 1024;

/// Configuration for compiling queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Row cap for `games` queries without a `limit` clause (default: none).
    pub default_limit: Option<u64>,
    /// Longest accepted source text in bytes (default: 64 KiB).
    pub max_source_len: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            default_limit: None,
            max_source_len: DEFAULT_MAX_SOURCE_LEN,
        }
    }
}

impl CompilerConfig {
    /// Creates a new compiler configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default row cap.
    #[must_use]
    pub fn with_default_limit(mut self, limit: u64) -> Self {
        self.default_limit = Some(limit);
        self
    }

    /// Sets the maximum source length in bytes.
    #[must_use]
    pub fn with_max_source_len(mut self, max_source_len: usize) -> Self {
        self.max_source_len = max_source_len;
        self
    }
}

/// Query compiler.
///
/// Holds only configuration; every call builds a fresh scanner, parser,
/// symbol table and plan context, so one compiler can be shared freely
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    /// Creates a compiler with the given configuration.
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        Compiler { config }
    }

    /// Returns the compiler configuration.
    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles one HoopsQL program.
    ///
    /// # Errors
    ///
    /// Returns the first lexical, syntax, binding or planning error, or
    /// `SourceTooLarge` if the source exceeds the configured length.
    pub fn compile(&self, source: &str) -> Result<ExecutionPlan> {
        if source.len() > self.config.max_source_len {
            return Err(HoopsError::SourceTooLarge {
                len: source.len(),
                max: self.config.max_source_len,
            });
        }

        let program = parse_query(source)?;
        let symbols = Binder::new().bind_program(&program)?;
        Planner::new()
            .with_default_limit(self.config.default_limit)
            .plan(&program, &symbols)
    }

    /// Compiles independent programs in parallel. Results keep input order.
    pub fn compile_batch<S>(&self, sources: &[S]) -> Vec<Result<ExecutionPlan>>
    where
        S: AsRef<str> + Sync,
    {
        sources
            .par_iter()
            .map(|source| self.compile(source.as_ref()))
            .collect()
    }
}

/// Compiles one HoopsQL program with the default configuration.
///
/// # Errors
///
/// See [`Compiler::compile`].
pub fn compile(source: &str) -> Result<ExecutionPlan> {
    Compiler::default().compile(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = CompilerConfig::new()
            .with_default_limit(25)
            .with_max_source_len(128);
        assert_eq!(config.default_limit, Some(25));
        assert_eq!(config.max_source_len, 128);
        assert_eq!(CompilerConfig::default().default_limit, None);
    }

    #[test]
    fn test_source_too_large() {
        let compiler = Compiler::new(CompilerConfig::new().with_max_source_len(8));
        let err = compiler.compile("get games where p.points > 1").unwrap_err();
        assert!(matches!(err, HoopsError::SourceTooLarge { len: 28, max: 8 }));
    }

    #[test]
    fn test_compile_batch_keeps_order() {
        let compiler = Compiler::default();
        let results = compiler.compile_batch(&["get games", "get careers", "Player p get avg(games)"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().result_shape, ResultShape::Games);
        assert!(matches!(results[1], Err(HoopsError::UnsupportedScope(_))));
        assert_eq!(results[2].as_ref().unwrap().result_shape, ResultShape::Averages);
    }
}
