//! Query planner module.
//!
//! The planner turns a parsed program and its symbol table into a single
//! parameterized SQL statement. Each step threads a [`PlanContext`] through
//! and returns the fragment it produced:
//! - projection (explicit, default, or averages)
//! - source joins, chosen by the aliasing mode
//! - filters: binding conditions, same-game chain, query expressions
//! - ordering and limit (`games` scope only)

mod context;
mod execution_plan;
mod filter;
mod projection;
mod source;
mod statement;

pub use context::{stats_alias, Aliasing, Parameters, PlanContext};
pub use execution_plan::{ExecutionPlan, ResultShape};
pub use filter::{compile_expression, filter_conditions, resolve_field, same_game_conditions};
pub use statement::SqlStatement;

use std::collections::BTreeSet;

use crate::binder::SymbolTable;
use crate::catalog::base_table;
use crate::catalog::schema::order_expression;
use crate::error::{HoopsError, Result};
use crate::parser::ast::{Expression, Program, Query, Scope};
use crate::types::Value;

/// Query planner.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    default_limit: Option<u64>,
}

impl Planner {
    /// Creates a planner that emits `LIMIT` only when the query asks for one.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a row cap for `games` queries without a `limit` clause.
    #[must_use]
    pub fn with_default_limit(mut self, limit: Option<u64>) -> Self {
        self.default_limit = limit;
        self
    }

    /// Generates the execution plan for a bound program.
    ///
    /// A program without a query yields an empty statement with result shape
    /// `unknown`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedScope` for scopes other than `games` and
    /// `avg(games)`, `UnknownSeason` for an unknown season name, and a bind
    /// error for a reference to an undeclared variable.
    pub fn plan(&self, program: &Program, symbols: &SymbolTable) -> Result<ExecutionPlan> {
        let player_variables: BTreeSet<String> = symbols
            .player_names()
            .into_iter()
            .map(String::from)
            .collect();

        let Some(query) = &program.query else {
            return Ok(ExecutionPlan {
                sql: String::new(),
                parameters: Vec::new(),
                result_shape: ResultShape::Unknown,
                referenced_fields: BTreeSet::new(),
                player_variables,
            });
        };

        let result_shape = ResultShape::for_scope(&query.scope);
        if !matches!(query.scope, Scope::Games | Scope::AvgGames) {
            return Err(HoopsError::UnsupportedScope(query.scope.to_string()));
        }

        let referenced_fields = referenced_fields(query);
        let ctx = PlanContext::new(symbols);
        let aliasing = ctx.aliasing();
        tracing::debug!(?aliasing, scope = %query.scope, "planning query");

        let (sql, parameters) = self.statement(ctx, query, &referenced_fields)?;
        tracing::debug!(%sql, parameters = parameters.len(), "generated statement");

        Ok(ExecutionPlan {
            sql,
            parameters,
            result_shape,
            referenced_fields,
            player_variables,
        })
    }

    fn statement(
        &self,
        ctx: PlanContext<'_>,
        query: &Query,
        referenced: &BTreeSet<String>,
    ) -> Result<(String, Vec<Value>)> {
        let symbols = ctx.symbols();
        let aliasing = ctx.aliasing();
        let is_games = query.scope == Scope::Games;

        let projection = match (&query.select, is_games) {
            (_, false) => projection::averages(),
            (Some(select), true) => projection::selected(select),
            (None, true) => projection::default_games(symbols, aliasing, referenced),
        };

        let (ctx, filters) = filter_conditions(ctx, &query.filters)?;

        let (order_by, limit) = if is_games {
            let order_by = query.order_by.as_ref().map(|order| {
                let direction = if order.ascending { "ASC" } else { "DESC" };
                format!("{} {direction}", order_expression(&order.field))
            });
            let limit = query.limit.map(|l| l.count).or(self.default_limit);
            (order_by, limit)
        } else {
            (None, None)
        };

        let statement = SqlStatement {
            projection,
            from: base_table(&query.scope).to_string(),
            joins: source::joins(symbols, aliasing),
            filters,
            order_by,
            limit,
        };
        Ok((statement.to_string(), ctx.into_parameters()))
    }
}

/// Field names referenced in `where` filters and the order-by clause. The
/// order-by field is skipped for `avg(games)`, which drops that clause.
#[must_use]
pub fn referenced_fields(query: &Query) -> BTreeSet<String> {
    fn collect(expr: &Expression, fields: &mut BTreeSet<String>) {
        match expr {
            Expression::Binary { left, right, .. } => {
                collect(left, fields);
                collect(right, fields);
            }
            Expression::FieldAccess(access) => {
                fields.insert(access.field.clone());
            }
            Expression::Aggregation { argument, .. } => collect(argument, fields),
            Expression::Literal(_) | Expression::Identifier(_) => {}
        }
    }

    let mut fields = BTreeSet::new();
    for filter in &query.filters {
        collect(filter, &mut fields);
    }
    if let Some(order) = query.order_by.as_ref().filter(|_| query.scope != Scope::AvgGames) {
        fields.insert(order.field.clone());
    }
    fields
}
