//! WHERE clause generation: binding conditions, the same-game chain, and
//! compilation of query expressions and field references.

use crate::binder::{BindingValue, Relation, SymbolTable, VariableBinding};
use crate::catalog::{column_name, full_name, is_stat_column, season_dates};
use crate::catalog::schema::SHARED_STATS_ALIAS;
use crate::error::{HoopsError, Result};
use crate::parser::ast::{CompareOp, EntityKind, Expression, FieldAccess, Literal};
use crate::types::Value;

use super::context::{stats_alias, Aliasing, PlanContext};

/// Always-true condition.
const TAUTOLOGY: &str = "1=1";

/// Builds every WHERE condition in order: binding conditions, the same-game
/// chain, then the query's own filters.
///
/// # Errors
///
/// Fails on an undeclared variable or an unknown season.
pub fn filter_conditions<'a>(
    ctx: PlanContext<'a>,
    filters: &[Expression],
) -> Result<(PlanContext<'a>, Vec<String>)> {
    let (mut ctx, mut conditions) = binding_conditions(ctx);
    conditions.extend(same_game_conditions(ctx.symbols()));

    for filter in filters {
        let (next, condition) = compile_expression(ctx, filter)?;
        ctx = next;
        conditions.push(condition);
    }
    Ok((ctx, conditions))
}

/// One condition per literal-bound Player, then one per relational binding,
/// each group in declaration order.
fn binding_conditions(ctx: PlanContext<'_>) -> (PlanContext<'_>, Vec<String>) {
    let symbols = ctx.symbols();
    let mut ctx = ctx;
    let mut conditions = Vec::new();

    for binding in symbols.iter() {
        if let BindingValue::Literal(value) = &binding.value {
            if binding.entity_kind == EntityKind::Player {
                let alias = ctx.aliasing().stats_alias(&binding.name);
                let (next, placeholder) = ctx.bind(value.clone());
                ctx = next;
                conditions.push(format!("{} = {placeholder}", full_name(&alias)));
            }
        }
    }

    for binding in symbols.iter() {
        if let BindingValue::Relation { source, relation } = &binding.value {
            let source_kind = symbols.lookup(source).map(|b| b.entity_kind);
            if let Some(condition) = relational_condition(binding, source, source_kind, *relation) {
                conditions.push(condition);
            }
        }
    }
    (ctx, conditions)
}

fn relational_condition(
    binding: &VariableBinding,
    source: &str,
    source_kind: Option<EntityKind>,
    relation: Relation,
) -> Option<String> {
    let name = &binding.name;
    match (relation, binding.entity_kind, source_kind) {
        (Relation::Opponent, EntityKind::Player | EntityKind::Opponent, Some(EntityKind::Player)) => {
            Some(format!(
                "({}.playerteamName != {}.playerteamName)",
                stats_alias(name),
                stats_alias(source)
            ))
        }
        // Accepts either side of the game; the true opposing side is not singled out.
        // `<name>_team` is never joined: source joins skip opponent-bound Team variables.
        (Relation::Opponent, EntityKind::Team, _) => Some(format!(
            "({name}_team.teamId = games.hometeamId OR {name}_team.teamId = games.awayteamId)"
        )),
        (Relation::Team, EntityKind::Team, Some(EntityKind::Player)) => Some(TAUTOLOGY.to_string()),
        // `played` is covered by the same-game chain.
        _ => None,
    }
}

/// Chains `a_stats.gameId = b_stats.gameId` over name-sorted Player variables.
#[must_use]
pub fn same_game_conditions(symbols: &SymbolTable) -> Vec<String> {
    let mut players = symbols.player_names();
    if players.len() < 2 {
        return Vec::new();
    }
    players.sort_unstable();
    players
        .windows(2)
        .map(|pair| {
            format!(
                "{}.gameId = {}.gameId",
                stats_alias(pair[0]),
                stats_alias(pair[1])
            )
        })
        .collect()
}

/// Compiles a query expression. Every literal becomes the next positional
/// parameter, in left-to-right order.
///
/// # Errors
///
/// Fails on an undeclared variable or an unknown season.
pub fn compile_expression<'a>(
    ctx: PlanContext<'a>,
    expr: &Expression,
) -> Result<(PlanContext<'a>, String)> {
    match expr {
        Expression::Binary { left, op, right } => compile_binary(ctx, left, *op, right),
        Expression::FieldAccess(access) => {
            let column = resolve_field(&ctx, access)?;
            Ok((ctx, column))
        }
        Expression::Literal(literal) => Ok(ctx.bind(literal.value.clone())),
        Expression::Identifier(name) => {
            let column = match name.as_str() {
                "game_date" => "games.gameDate".to_string(),
                other => other.to_string(),
            };
            Ok((ctx, column))
        }
        Expression::Aggregation { function, argument } => {
            let (ctx, inner) = compile_expression(ctx, argument)?;
            Ok((ctx, format!("{}({inner})", function.name())))
        }
    }
}

fn compile_binary<'a>(
    ctx: PlanContext<'a>,
    left: &Expression,
    op: CompareOp,
    right: &Expression,
) -> Result<(PlanContext<'a>, String)> {
    if let (CompareOp::Eq, Expression::Identifier(name), Expression::Literal(literal)) =
        (op, left, right)
    {
        if name == "season" {
            return season_range(ctx, literal);
        }
    }

    let (ctx, left_sql) = compile_expression(ctx, left)?;
    let (ctx, right_sql) = compile_expression(ctx, right)?;

    if op.is_equality() {
        if let (Expression::Identifier(a), Expression::Identifier(b)) = (left, right) {
            if is_player(ctx.symbols(), a) && is_player(ctx.symbols(), b) {
                let condition = format!(
                    "{}.personId {} {}.personId",
                    stats_alias(a),
                    op.as_str(),
                    stats_alias(b)
                );
                return Ok((ctx, condition));
            }
        }
        if let (Expression::FieldAccess(a), Expression::FieldAccess(b)) = (left, right) {
            if a.field == "played" && b.field == "played" {
                return Ok((ctx, TAUTOLOGY.to_string()));
            }
        }
    }

    let left_sql = if reads_stat_column(ctx.symbols(), left) {
        format!("CAST({left_sql} AS REAL)")
    } else {
        left_sql
    };
    Ok((ctx, format!("{left_sql} {} {right_sql}", op.as_str())))
}

/// `season = "<name>"` becomes a closed date range over two parameters.
fn season_range<'a>(ctx: PlanContext<'a>, literal: &Literal) -> Result<(PlanContext<'a>, String)> {
    let name = literal.value.to_text();
    let season = season_dates(&name).ok_or(HoopsError::UnknownSeason(name))?;
    let (ctx, start) = ctx.bind(Value::String(season.start_text()));
    let (ctx, end) = ctx.bind(Value::String(season.end_text()));
    Ok((
        ctx,
        format!("games.gameDate >= {start} AND games.gameDate <= {end}"),
    ))
}

fn is_player(symbols: &SymbolTable, name: &str) -> bool {
    symbols
        .lookup(name)
        .is_some_and(|b| b.entity_kind == EntityKind::Player)
}

/// True when the expression reads one of the textual statistic columns.
fn reads_stat_column(symbols: &SymbolTable, expr: &Expression) -> bool {
    match expr {
        Expression::FieldAccess(access) => symbols.lookup(&access.variable).is_some_and(|b| {
            !(b.entity_kind == EntityKind::Player && access.field == "played")
                && is_stat_column(column_name(b.entity_kind, &access.field))
        }),
        Expression::Identifier(name) => is_stat_column(column_name(EntityKind::Player, name)),
        _ => false,
    }
}

/// Resolves `var.field` to column text under the current aliasing mode,
/// following relational redirection.
///
/// # Errors
///
/// Returns `UndefinedVariable` if the variable was never declared.
pub fn resolve_field(ctx: &PlanContext<'_>, access: &FieldAccess) -> Result<String> {
    let binding = ctx.lookup(&access.variable)?;
    let variable = access.variable.as_str();
    let field = access.field.as_str();
    let column = column_name(binding.entity_kind, field);

    let resolved = match binding.entity_kind {
        EntityKind::Player => match (ctx.aliasing(), field) {
            (_, "played") => TAUTOLOGY.to_string(),
            (Aliasing::PerVariable, "name") => full_name(&format!("{variable}_player")),
            (Aliasing::PerVariable, _) => format!("{}.{column}", stats_alias(variable)),
            (Aliasing::Shared, "name") => full_name("players"),
            (Aliasing::Shared, _) => format!("{SHARED_STATS_ALIAS}.{column}"),
        },
        EntityKind::Team => match binding.relation() {
            Some((Relation::Team, source)) if field == "name" => {
                format!("{}.playerteamName", stats_alias(source))
            }
            Some((Relation::Team, source)) => format!("{}.playerteam{field}", stats_alias(source)),
            _ => format!("games.{column}"),
        },
        EntityKind::Opponent => {
            if binding.is_related_by(Relation::Opponent) {
                let alias = stats_alias(variable);
                match field {
                    "name" => full_name(&alias),
                    "team" => format!("{alias}.playerteamName"),
                    _ => format!("{alias}.{column}"),
                }
            } else {
                format!("games.{column}")
            }
        }
    };
    Ok(resolved)
}
