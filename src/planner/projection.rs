//! SELECT list generation.

use std::collections::BTreeSet;

use crate::binder::SymbolTable;
use crate::catalog::schema::{
    select_expression, AVERAGED_COLUMNS, DEFAULT_STAT_FIELDS, SHARED_STATS_ALIAS,
};
use crate::catalog::{column_name, full_name};
use crate::parser::ast::{EntityKind, Select};

use super::context::Aliasing;

/// Projection for explicit `select` fields.
#[must_use]
pub fn selected(select: &Select) -> Vec<String> {
    select
        .fields
        .iter()
        .map(|field| select_expression(field))
        .collect()
}

/// Default projection of the `games` scope.
///
/// With a Player variable, the first declared player's row supplies identity,
/// team, outcome and the headline stats. The curated stat set is added in
/// full when no field is referenced, otherwise only the referenced subset.
#[must_use]
pub fn default_games(
    symbols: &SymbolTable,
    aliasing: Aliasing,
    referenced: &BTreeSet<String>,
) -> Vec<String> {
    let mut fields = vec!["games.gameDate AS game_date".to_string()];

    let Some(first_player) = symbols.player_names().first().copied() else {
        fields.extend(
            [
                "games.hometeamName AS home_team",
                "games.awayteamName AS away_team",
                "games.homeScore AS home_score",
                "games.awayScore AS away_score",
            ]
            .map(String::from),
        );
        return fields;
    };

    let alias = aliasing.stats_alias(first_player);
    fields.push(format!("{} AS player_name", full_name(&alias)));
    fields.push(format!("{alias}.playerteamName AS team"));
    fields.push(format!("{alias}.opponentteamName AS opponent"));
    fields.push(format!("{alias}.win AS win"));
    fields.push(
        "ABS(CAST(games.homeScore AS INTEGER) - CAST(games.awayScore AS INTEGER)) AS margin"
            .to_string(),
    );
    fields.push(format!("{alias}.points AS points"));
    fields.push(format!("{alias}.reboundsTotal AS rebounds"));
    fields.push(format!("{alias}.assists AS assists"));

    for stat in DEFAULT_STAT_FIELDS {
        if referenced.is_empty() || referenced.contains(*stat) {
            let column = column_name(EntityKind::Player, stat);
            fields.push(format!("{alias}.{column} AS {stat}"));
        }
    }
    fields
}

/// Aggregate projection of the `avg(games)` scope.
#[must_use]
pub fn averages() -> Vec<String> {
    AVERAGED_COLUMNS
        .iter()
        .map(|(column, name)| format!("AVG(CAST({SHARED_STATS_ALIAS}.{column} AS REAL)) AS {name}"))
        .chain(std::iter::once("COUNT(*) AS games_count".to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::Binder;
    use crate::parser::parse_query;

    fn symbols(source: &str) -> SymbolTable {
        Binder::new()
            .bind_program(&parse_query(source).unwrap())
            .unwrap()
    }

    #[test]
    fn test_selected_fields() {
        let select = Select {
            fields: vec!["date".to_string(), "rebounds".to_string(), "steals".to_string()],
            basic: true,
        };
        assert_eq!(
            selected(&select),
            vec![
                "games.gameDate AS date",
                "player_statistics.reboundsTotal AS rebounds",
                "player_statistics.steals",
            ]
        );
    }

    #[test]
    fn test_default_without_players() {
        let table = symbols("Team t");
        let fields = default_games(&table, Aliasing::Shared, &BTreeSet::new());
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[1], "games.hometeamName AS home_team");
    }

    #[test]
    fn test_default_full_stat_set_when_nothing_referenced() {
        let table = symbols("Player p");
        let fields = default_games(&table, Aliasing::Shared, &BTreeSet::new());
        assert_eq!(fields.len(), 9 + DEFAULT_STAT_FIELDS.len());
        assert!(fields.contains(&"player_statistics.numMinutes AS minutes".to_string()));
        assert!(fields.contains(&"player_statistics.steals AS steals".to_string()));
    }

    #[test]
    fn test_default_referenced_subset() {
        let table = symbols("Player p\nPlayer q");
        let referenced = BTreeSet::from(["points".to_string(), "steals".to_string()]);
        let fields = default_games(&table, Aliasing::PerVariable, &referenced);
        assert_eq!(fields.len(), 10);
        assert_eq!(
            fields[1],
            "TRIM(p_stats.firstName || ' ' || p_stats.lastName) AS player_name"
        );
        assert_eq!(fields[9], "p_stats.steals AS steals");
    }

    #[test]
    fn test_averages() {
        let fields = averages();
        assert_eq!(fields.len(), 10);
        assert_eq!(
            fields[0],
            "AVG(CAST(player_statistics.points AS REAL)) AS avg_points"
        );
        assert_eq!(fields[9], "COUNT(*) AS games_count");
    }
}
