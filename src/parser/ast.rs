//! Abstract Syntax Tree definitions for HoopsQL programs.
//!
//! Nodes carry data only. The binder and the planner each match exhaustively
//! over the variants they consume.

use std::fmt;

use crate::types::Value;

/// A parsed HoopsQL program: declarations followed by an optional query.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declarations: Vec<VariableDeclaration>,
    pub query: Option<Query>,
}

/// Variable declaration (`Player p`, `Team t = p.team`).
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub entity_kind: EntityKind,
    pub name: String,
    /// Initializer after `=`, if any.
    pub initializer: Option<Expression>,
}

/// The three declarable entity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Player,
    Team,
    Opponent,
}

impl EntityKind {
    /// Returns the keyword spelling of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Player => "Player",
            EntityKind::Team => "Team",
            EntityKind::Opponent => "Opponent",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main query (`get games where ...`).
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub scope: Scope,
    /// `where` conditions, implicitly joined by `and`.
    pub filters: Vec<Expression>,
    pub select: Option<Select>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<Limit>,
}

/// Query granularity after `get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Games,
    Seasons,
    Careers,
    /// `avg(games)`.
    AvgGames,
    /// Any other identifier; accepted by the parser, rejected by the planner.
    Named(String),
}

impl Scope {
    /// Returns the scope as written in source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Scope::Games => "games",
            Scope::Seasons => "seasons",
            Scope::Careers => "careers",
            Scope::AvgGames => "avg(games)",
            Scope::Named(name) => name,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expression in a declaration initializer or `where` condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Comparison of two primaries.
    Binary {
        left: Box<Expression>,
        op: CompareOp,
        right: Box<Expression>,
    },
    /// `var.field`.
    FieldAccess(FieldAccess),
    Literal(Literal),
    /// Bare name, including the `game_date` and `season` keywords.
    Identifier(String),
    /// `FUNC(argument)`; built programmatically, not produced by the grammar.
    Aggregation {
        function: AggregateFunction,
        argument: Box<Expression>,
    },
}

impl Expression {
    /// Creates a comparison expression.
    #[must_use]
    pub fn binary(left: Expression, op: CompareOp, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a field access expression.
    #[must_use]
    pub fn field(variable: impl Into<String>, field: impl Into<String>) -> Self {
        Expression::FieldAccess(FieldAccess {
            variable: variable.into(),
            field: field.into(),
        })
    }

    /// Creates an identifier expression.
    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    /// Creates a literal expression.
    #[must_use]
    pub fn literal(value: impl Into<Value>, kind: LiteralKind) -> Self {
        Expression::Literal(Literal {
            value: value.into(),
            kind,
        })
    }
}

/// `var.field` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAccess {
    pub variable: String,
    pub field: String,
}

/// Literal value with its source category.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
    pub kind: LiteralKind,
}

/// Source category of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
    CanonicalName,
    Date,
    Boolean,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    /// Returns the SQL spelling of this operator.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Neq => "!=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
        }
    }

    /// Returns true for `=` and `!=`.
    #[must_use]
    pub fn is_equality(&self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::Neq)
    }
}

/// Aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Avg,
    Sum,
    Count,
    Min,
    Max,
}

impl AggregateFunction {
    /// Returns the SQL name of this function.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }
}

/// `select f1, f2 basic = false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub fields: Vec<String>,
    /// `true` unless `basic = false` was given.
    pub basic: bool,
}

/// `order by most|least field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    /// `true` for `least`, `false` for `most`.
    pub ascending: bool,
}

/// `limit N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub count: u64,
}
