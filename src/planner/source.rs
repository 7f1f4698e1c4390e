//! FROM clause joins.

use crate::binder::{Relation, SymbolTable};
use crate::catalog::required_join;
use crate::parser::ast::EntityKind;

use super::context::{stats_alias, Aliasing};

/// Joins for the `games` and `avg(games)` scopes.
///
/// Shared mode takes one join per distinct entity kind. Per-variable mode
/// joins the statistics table once per Player or Opponent variable, then team
/// history once per Team variable not reached through a relation.
#[must_use]
pub fn joins(symbols: &SymbolTable, aliasing: Aliasing) -> Vec<String> {
    match aliasing {
        Aliasing::Shared => [EntityKind::Player, EntityKind::Team, EntityKind::Opponent]
            .into_iter()
            .filter(|kind| symbols.iter().any(|b| b.entity_kind == *kind))
            .map(|kind| required_join(kind).to_string())
            .collect(),
        Aliasing::PerVariable => {
            let stats = symbols
                .iter()
                .filter(|b| matches!(b.entity_kind, EntityKind::Player | EntityKind::Opponent))
                .map(|b| {
                    let alias = stats_alias(&b.name);
                    format!("LEFT JOIN player_statistics AS {alias} ON games.gameId = {alias}.gameId")
                });
            let teams = symbols
                .iter()
                .filter(|b| b.entity_kind == EntityKind::Team)
                .filter(|b| !b.is_related_by(Relation::Team) && !b.is_related_by(Relation::Opponent))
                .map(|b| {
                    let alias = format!("{}_team", b.name);
                    format!(
                        "LEFT JOIN team_histories AS {alias} ON games.hometeamId = {alias}.teamId OR games.awayteamId = {alias}.teamId"
                    )
                });
            stats.chain(teams).collect()
        }
    }
}
