//! Binder module for semantic analysis.
//!
//! The binder resolves variable declarations, in textual order, into an
//! insertion-ordered symbol table:
//! - Unbound, literal, or relational bindings
//! - Relation validation against the entity-kind compatibility table
//! - Duplicate and undeclared name checks

mod scope;
mod semantic;

pub use scope::{BindingValue, Relation, SymbolTable, VariableBinding};
pub use semantic::{BindError, Binder};
