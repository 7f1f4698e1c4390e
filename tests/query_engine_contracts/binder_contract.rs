//! Contract tests for the Binder module.
//!
//! These tests verify the binding contracts:
//! - Declarations resolve strictly in textual order
//! - Unknown and incompatible relations are rejected
//! - Duplicate names are rejected

use hoopsql::binder::{BindError, Binder, BindingValue, Relation, SymbolTable};
use hoopsql::error::HoopsError;
use hoopsql::parser::ast::EntityKind;
use hoopsql::parser::parse_query;
use hoopsql::types::Value;

fn bind(source: &str) -> hoopsql::Result<SymbolTable> {
    let program = parse_query(source)?;
    Binder::new().bind_program(&program)
}

fn bind_error(source: &str) -> BindError {
    match bind(source) {
        Err(HoopsError::Bind(err)) => err,
        Err(other) => panic!("Expected BindError, got {other}"),
        Ok(_) => panic!("Expected BindError for {source:?}"),
    }
}

#[test]
fn test_bind_forward_reference_rejected() {
    // Contract: a relational initializer may only name variables declared before it
    let err = bind_error("Player q = p.opponent\nPlayer p");
    assert_eq!(err, BindError::UndefinedVariable("p".to_string()));
    assert!(err.to_string().contains("Undefined variable"));
}

#[test]
fn test_bind_unknown_relation_rejected() {
    // Contract: only opponent, team and played are relations
    let err = bind_error("Player p\nPlayer q = p.coach");
    assert_eq!(err, BindError::UnknownRelation("coach".to_string()));
    assert!(err.to_string().contains("valid: opponent, team, played"));
}

#[test]
fn test_bind_incompatible_relations_rejected() {
    // Contract: every relation starts from a Player variable and targets a permitted kind
    let cases = [
        ("Team t\nPlayer p = t.opponent", Relation::Opponent, EntityKind::Team, EntityKind::Player),
        ("Player p\nPlayer q = p.team", Relation::Team, EntityKind::Player, EntityKind::Player),
        ("Player p\nOpponent o = p.team", Relation::Team, EntityKind::Player, EntityKind::Opponent),
        ("Player p\nTeam t = p.played", Relation::Played, EntityKind::Player, EntityKind::Team),
        ("Opponent o\nPlayer p = o.played", Relation::Played, EntityKind::Opponent, EntityKind::Player),
    ];
    for (source, relation, source_kind, target) in cases {
        assert_eq!(
            bind_error(source),
            BindError::IncompatibleRelation {
                relation,
                source: source_kind,
                target,
            },
            "{source}"
        );
    }
}

#[test]
fn test_bind_compatible_relations_accepted() {
    // Contract: the five permitted combinations all bind
    let symbols = bind(
        "Player p\nPlayer a = p.opponent\nTeam b = p.opponent\nOpponent c = p.opponent\nTeam d = p.team\nPlayer e = p.played",
    )
    .unwrap();
    assert_eq!(symbols.len(), 6);
    assert!(symbols.has_relational());
    for name in ["a", "b", "c", "d", "e"] {
        assert!(symbols.lookup(name).unwrap().is_relational(), "{name}");
    }
}

#[test]
fn test_bind_duplicate_rejected() {
    // Contract: a name may be declared once, whatever the kind
    let err = bind_error("Player p\nTeam p");
    assert_eq!(err, BindError::DuplicateVariable("p".to_string()));
}

#[test]
fn test_bind_preserves_declaration_order() {
    // Contract: iteration follows declaration order
    let symbols = bind("Team t\nPlayer z\nOpponent o\nPlayer a").unwrap();
    let names: Vec<&str> = symbols.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["t", "z", "o", "a"]);
    assert_eq!(symbols.player_names(), vec!["z", "a"]);
}

#[test]
fn test_bind_literal_values() {
    // Contract: literal initializers keep their value for later filtering
    let symbols = bind("Player p = \"Kobe Bryant\"\nTeam t = Golden_State\nPlayer q").unwrap();
    assert_eq!(
        symbols.lookup("p").unwrap().value,
        BindingValue::Literal(Value::from("Kobe Bryant"))
    );
    assert_eq!(
        symbols.lookup("t").unwrap().value,
        BindingValue::Literal(Value::from("Golden_State"))
    );
    assert_eq!(symbols.lookup("q").unwrap().value, BindingValue::Unbound);
}

#[test]
fn test_bind_ignores_query_references() {
    // Contract: the binder only checks declarations; query references fail later
    assert!(bind("Player p\nget games where x.points > 1").is_ok());
}
