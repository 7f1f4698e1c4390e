//! Fixed schema tables mapping HoopsQL names onto the relational store.
//!
//! The store has three tables: `games` (one row per game, home/away team
//! columns), `player_statistics` (one row per player per game, textual stat
//! columns plus `firstName`, `lastName`, `playerteamName`, ...), and
//! `team_histories`.

use crate::parser::ast::{EntityKind, Scope};

/// Base table for per-game scopes.
pub const GAMES_TABLE: &str = "games";

/// Shared alias of the statistics table outside per-variable aliasing.
pub const SHARED_STATS_ALIAS: &str = "player_statistics";

/// Player field → `player_statistics` column.
const PLAYER_COLUMNS: &[(&str, &str)] = &[
    ("name", "firstName || ' ' || lastName"),
    ("points", "points"),
    ("rebounds", "reboundsTotal"),
    ("assists", "assists"),
    ("steals", "steals"),
    ("blocks", "blocks"),
    ("turnovers", "turnovers"),
    ("minutes", "numMinutes"),
    ("game", "gameId"),
    ("team", "playerteamName"),
    ("opponent", "opponentteamName"),
    ("reboundsDefensive", "reboundsDefensive"),
    ("reboundsOffensive", "reboundsOffensive"),
    ("fieldGoalsAttempted", "fieldGoalsAttempted"),
    ("fieldGoalsMade", "fieldGoalsMade"),
    ("fieldGoalsPercentage", "fieldGoalsPercentage"),
    ("threePointersAttempted", "threePointersAttempted"),
    ("threePointersMade", "threePointersMade"),
    ("threePointersPercentage", "threePointersPercentage"),
    ("freeThrowsAttempted", "freeThrowsAttempted"),
    ("freeThrowsMade", "freeThrowsMade"),
    ("freeThrowsPercentage", "freeThrowsPercentage"),
    ("foulsPersonal", "foulsPersonal"),
    ("plusMinusPoints", "plusMinusPoints"),
    // Short aliases
    ("fg", "fieldGoalsMade"),
    ("fga", "fieldGoalsAttempted"),
    ("fgpct", "fieldGoalsPercentage"),
    ("threept", "threePointersMade"),
    ("threepta", "threePointersAttempted"),
    ("threeptpct", "threePointersPercentage"),
    ("ft", "freeThrowsMade"),
    ("fta", "freeThrowsAttempted"),
    ("ftpct", "freeThrowsPercentage"),
    ("oreb", "reboundsOffensive"),
    ("dreb", "reboundsDefensive"),
    ("to", "turnovers"),
    ("pf", "foulsPersonal"),
    ("plusminus", "plusMinusPoints"),
];

/// Team fields read the home side of `games`.
const TEAM_COLUMNS: &[(&str, &str)] = &[
    ("name", "hometeamName"),
    ("city", "hometeamCity"),
    ("score", "homeScore"),
];

/// Opponent fields read the away side of `games`.
const OPPONENT_COLUMNS: &[(&str, &str)] = &[
    ("name", "awayteamName"),
    ("city", "awayteamCity"),
    ("score", "awayScore"),
];

/// Statistic columns stored as text; comparisons on them are cast to `REAL`.
pub const STAT_COLUMNS: &[&str] = &[
    "points",
    "assists",
    "reboundsTotal",
    "steals",
    "blocks",
    "turnovers",
    "threePointersMade",
    "threePointersAttempted",
    "fieldGoalsMade",
    "fieldGoalsAttempted",
    "freeThrowsMade",
    "freeThrowsAttempted",
    "foulsPersonal",
    "plusMinusPoints",
    "numMinutes",
    "reboundsDefensive",
    "reboundsOffensive",
];

/// Curated statistics of the default `games` projection, in output order.
pub const DEFAULT_STAT_FIELDS: &[&str] = &[
    "steals",
    "blocks",
    "turnovers",
    "minutes",
    "reboundsDefensive",
    "reboundsOffensive",
    "fieldGoalsAttempted",
    "fieldGoalsMade",
    "fieldGoalsPercentage",
    "threePointersAttempted",
    "threePointersMade",
    "threePointersPercentage",
    "freeThrowsAttempted",
    "freeThrowsMade",
    "freeThrowsPercentage",
    "foulsPersonal",
    "plusMinusPoints",
];

/// `(column, output name)` pairs averaged by the `avg(games)` projection.
pub const AVERAGED_COLUMNS: &[(&str, &str)] = &[
    ("points", "avg_points"),
    ("reboundsTotal", "avg_rebounds"),
    ("assists", "avg_assists"),
    ("steals", "avg_steals"),
    ("blocks", "avg_blocks"),
    ("turnovers", "avg_turnovers"),
    ("threePointersMade", "avg_threePointersMade"),
    ("fieldGoalsMade", "avg_fieldGoalsMade"),
    ("freeThrowsMade", "avg_freeThrowsMade"),
];

/// Explicit `select` fields with bespoke expressions.
const SELECT_ALIASES: &[(&str, &str)] = &[
    ("date", "games.gameDate AS date"),
    ("opponent", "games.awayteamName AS opponent"),
    ("points", "player_statistics.points AS points"),
    ("rebounds", "player_statistics.reboundsTotal AS rebounds"),
    ("assists", "player_statistics.assists AS assists"),
    ("name", "TRIM(players.firstName || ' ' || players.lastName) AS name"),
];

/// Order-by fields with bespoke sort expressions.
const ORDER_ALIASES: &[(&str, &str)] = &[
    ("points", "CAST(player_statistics.points AS INTEGER)"),
    ("rebounds", "CAST(player_statistics.reboundsTotal AS INTEGER)"),
    ("assists", "CAST(player_statistics.assists AS INTEGER)"),
    ("minutes", "CAST(player_statistics.numMinutes AS REAL)"),
    (
        "name",
        "TRIM(player_statistics.firstName || ' ' || player_statistics.lastName)",
    ),
];

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Maps an entity field onto its column name. Unknown fields map to themselves.
#[must_use]
pub fn column_name(kind: EntityKind, field: &str) -> &str {
    let table = match kind {
        EntityKind::Player => PLAYER_COLUMNS,
        EntityKind::Team => TEAM_COLUMNS,
        EntityKind::Opponent => OPPONENT_COLUMNS,
    };
    lookup(table, field).unwrap_or(field)
}

/// Returns true if the column holds a textual statistic.
#[must_use]
pub fn is_stat_column(column: &str) -> bool {
    STAT_COLUMNS.contains(&column)
}

/// Base table of a scope. Unknown scopes name their own table.
#[must_use]
pub fn base_table(scope: &Scope) -> &str {
    match scope {
        Scope::Games | Scope::AvgGames => GAMES_TABLE,
        Scope::Seasons | Scope::Careers => "player_statistics",
        Scope::Named(name) => name,
    }
}

/// Join required by an entity kind in shared aliasing mode.
#[must_use]
pub fn required_join(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Player => {
            "LEFT JOIN player_statistics ON games.gameId = player_statistics.gameId"
        }
        EntityKind::Team => {
            "LEFT JOIN team_histories AS home_team ON games.hometeamId = home_team.teamId"
        }
        EntityKind::Opponent => {
            "LEFT JOIN team_histories AS away_team ON games.awayteamId = away_team.teamId"
        }
    }
}

/// Projection item for an explicit `select` field.
#[must_use]
pub fn select_expression(field: &str) -> String {
    lookup(SELECT_ALIASES, field)
        .map_or_else(|| format!("{SHARED_STATS_ALIAS}.{field}"), str::to_string)
}

/// Sort expression for an order-by field, always on the shared alias.
#[must_use]
pub fn order_expression(field: &str) -> String {
    lookup(ORDER_ALIASES, field)
        .map_or_else(|| format!("CAST({SHARED_STATS_ALIAS}.{field} AS INTEGER)"), str::to_string)
}

/// `TRIM(alias.firstName || ' ' || alias.lastName)`.
#[must_use]
pub fn full_name(alias: &str) -> String {
    format!("TRIM({alias}.firstName || ' ' || {alias}.lastName)")
}
