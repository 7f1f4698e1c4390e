//! Error types for HoopsQL compilation.

use thiserror::Error;

use crate::binder::BindError;

/// Result type alias using [`HoopsError`].
pub type Result<T> = std::result::Result<T, HoopsError>;

/// Error types for every compilation stage.
///
/// Each stage fails fast: the first error aborts the whole compilation and
/// no partial plan is ever produced.
#[derive(Debug, Error)]
pub enum HoopsError {
    // ==================== Lexical Errors ====================
    /// A character that starts no token.
    #[error("Lexical error at line {line}, column {col}: unexpected character '{ch}'")]
    UnexpectedCharacter { ch: char, line: usize, col: usize },

    /// A string literal that runs to the end of the input.
    #[error("Lexical error at line {line}, column {col}: unterminated string")]
    UnterminatedString { line: usize, col: usize },

    // ==================== Syntax Errors ====================
    /// Parse error with location information.
    #[error("Parse error at line {line}, column {col}: expected {expected}, found '{found}'")]
    ParseError {
        line: usize,
        col: usize,
        expected: String,
        found: String,
    },

    // ==================== Semantic Errors ====================
    /// Binding error (unknown variable, bad relation, duplicate name).
    #[error("Bind error: {0}")]
    Bind(#[from] BindError),

    /// Query scope that has no code generation.
    #[error("Unsupported scope: '{0}' (only 'games' and 'avg(games)' are supported)")]
    UnsupportedScope(String),

    /// Season name missing from the season table.
    #[error("Unknown season: '{0}'")]
    UnknownSeason(String),

    // ==================== Configuration Guards ====================
    /// Source text exceeds the configured maximum length.
    #[error("Query source is {len} bytes, limit is {max} bytes")]
    SourceTooLarge { len: usize, max: usize },
}

impl HoopsError {
    /// Returns the `(line, column)` of the error, when it has one.
    #[must_use]
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            HoopsError::UnexpectedCharacter { line, col, .. }
            | HoopsError::UnterminatedString { line, col }
            | HoopsError::ParseError { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }
}
