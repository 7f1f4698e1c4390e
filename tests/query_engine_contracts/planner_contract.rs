//! Contract tests for the Planner module.
//!
//! These tests verify the code generation contracts:
//! - Aliasing mode follows the declared variables
//! - WHERE conditions appear in a fixed order
//! - Ordering and limits apply only to the games scope

use hoopsql::binder::{Binder, SymbolTable};
use hoopsql::parser::ast::Program;
use hoopsql::parser::parse_query;
use hoopsql::planner::{Aliasing, ExecutionPlan, PlanContext, Planner};

fn bound(source: &str) -> (Program, SymbolTable) {
    let program = parse_query(source).unwrap();
    let symbols = Binder::new().bind_program(&program).unwrap();
    (program, symbols)
}

fn plan(source: &str) -> ExecutionPlan {
    let (program, symbols) = bound(source);
    Planner::new().plan(&program, &symbols).unwrap()
}

#[test]
fn test_aliasing_mode_selection() {
    // Contract: per-variable aliasing iff more than one Player or any relational binding
    let cases = [
        ("Player p", Aliasing::Shared),
        ("Player p\nTeam t\nOpponent o", Aliasing::Shared),
        ("Player p\nPlayer q", Aliasing::PerVariable),
        ("Player p\nTeam t = p.team", Aliasing::PerVariable),
        ("Team t", Aliasing::Shared),
    ];
    for (source, expected) in cases {
        let (_, symbols) = bound(source);
        assert_eq!(PlanContext::new(&symbols).aliasing(), expected, "{source}");
    }
}

#[test]
fn test_shared_mode_never_uses_per_variable_aliases() {
    // Contract: shared mode reads every player column through player_statistics
    let plan = plan("Player p = \"Kobe Bryant\"\nget games where p.points > 30 and p.assists > 5");
    assert!(!plan.sql.contains("p_stats"));
    assert_eq!(
        plan.sql.matches("LEFT JOIN player_statistics ON").count(),
        1
    );
}

#[test]
fn test_where_condition_order() {
    // Contract: literal bindings, then relational bindings, then the same-game chain,
    //           then query filters
    let plan = plan(
        "Player p = \"Kobe Bryant\"\nPlayer q = p.opponent\nget games where q.points >= 30",
    );
    let where_clause = plan.sql.split(" WHERE ").nth(1).unwrap();
    let conditions: Vec<&str> = where_clause.split(" AND ").collect();
    assert_eq!(
        conditions,
        vec![
            "TRIM(p_stats.firstName || ' ' || p_stats.lastName) = ?1",
            "(q_stats.playerteamName != p_stats.playerteamName)",
            "p_stats.gameId = q_stats.gameId",
            "CAST(q_stats.points AS REAL) >= ?2",
        ]
    );
}

#[test]
fn test_literal_bindings_grouped_before_relational() {
    // Contract: literal Player bindings come first even when a relational binding
    //           is declared earlier
    let plan = plan("Player p\nPlayer q = p.opponent\nPlayer r = \"Kobe Bryant\"\nget games");
    let where_clause = plan.sql.split(" WHERE ").nth(1).unwrap();
    let conditions: Vec<&str> = where_clause.split(" AND ").collect();
    assert_eq!(
        conditions,
        vec![
            "TRIM(r_stats.firstName || ' ' || r_stats.lastName) = ?1",
            "(q_stats.playerteamName != p_stats.playerteamName)",
            "p_stats.gameId = q_stats.gameId",
            "q_stats.gameId = r_stats.gameId",
        ]
    );
}

#[test]
fn test_identity_comparison_uses_stats_alias() {
    // Contract: `p = q` compares identity keys through `<var>_stats`, in shared mode too
    let plan = plan("Player p\nget games where p = p");
    assert!(plan.sql.contains("LEFT JOIN player_statistics ON"));
    assert!(plan.sql.ends_with("WHERE p_stats.personId = p_stats.personId"));
}

#[test]
fn test_opponent_team_alias_not_joined() {
    // Contract: an opponent-bound Team variable gets its side check but no join of its own
    let plan = plan("Player p\nTeam u = p.opponent\nget games");
    assert!(!plan.sql.contains("AS u_team"));
    assert!(plan
        .sql
        .contains("(u_team.teamId = games.hometeamId OR u_team.teamId = games.awayteamId)"));
}

#[test]
fn test_same_game_chain_length() {
    // Contract: n Player variables produce n - 1 same-game conditions
    let plan = plan("Player a\nPlayer b\nPlayer c\nPlayer d\nget games");
    assert_eq!(plan.sql.matches("_stats.gameId = ").count(), 3);
    assert!(plan.sql.contains("a_stats.gameId = b_stats.gameId"));
    assert!(plan.sql.contains("c_stats.gameId = d_stats.gameId"));
}

#[test]
fn test_order_and_limit_games_only() {
    // Contract: avg(games) drops order-by and limit; games keeps them
    let games = plan("Player p\nget games most rebounds limit 7");
    assert!(games
        .sql
        .ends_with(" ORDER BY CAST(player_statistics.reboundsTotal AS INTEGER) DESC LIMIT 7"));

    let averages = plan("Player p\nget avg(games) most rebounds limit 7");
    assert!(!averages.sql.contains("ORDER BY"));
    assert!(!averages.sql.contains("LIMIT"));
}

#[test]
fn test_last_clause_wins() {
    // Contract: a repeated clause replaces the earlier one
    let plan = plan("Player p\nget games limit 5 most points limit 2 least assists");
    assert!(plan
        .sql
        .ends_with(" ORDER BY CAST(player_statistics.assists AS INTEGER) ASC LIMIT 2"));
}

#[test]
fn test_unsupported_scope_names_scope() {
    // Contract: scopes other than games and avg(games) fail with their name
    let (program, symbols) = bound("Player p\nget seasons");
    let err = Planner::new().plan(&program, &symbols).unwrap_err();
    assert!(err.to_string().contains("'seasons'"));
}
