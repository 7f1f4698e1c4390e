//! Compile-only HoopsQL front end.
//!
//! Prints the generated SQL, its numbered parameters and the result shape.
//! It never connects to a database.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use hoopsql::catalog::{season_dates, SeasonDates};
use hoopsql::parser::ast::{CompareOp, Expression};
use hoopsql::parser::parse_query;
use hoopsql::{Compiler, CompilerConfig, ExecutionPlan, HoopsError, Result};

/// Compile HoopsQL basketball queries to parameterized SQL.
#[derive(Parser, Debug)]
#[command(name = "hoopsql", version, about, long_about = None)]
struct Args {
    /// Query to compile.
    #[arg(value_name = "QUERY", conflicts_with = "files")]
    query: Option<String>,

    /// Query files to compile (repeatable).
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Row cap for `games` queries without a `limit` clause.
    #[arg(long, value_name = "N")]
    default_limit: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

const HELP: &str = r#"Examples:
  Player p = "Kobe Bryant" get games where p.points >= 40
  Player p = "Stephen Curry" get games where p.assists >= 10 order by most points
  Player p = "Kobe Bryant" Player q = p.opponent get games where p.points >= 30 and q.points >= 30
  Player p = "Stephen Curry" get avg(games) where season = "2015-16"
Type `exit` to quit."#;

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = CompilerConfig::new();
    if let Some(limit) = args.default_limit {
        config = config.with_default_limit(limit);
    }
    let compiler = Compiler::new(config);

    let ok = if let Some(query) = &args.query {
        report(query, &compiler.compile(query), args.format)
    } else if !args.files.is_empty() {
        compile_files(&compiler, &args.files, args.format)
    } else {
        interactive(&compiler, args.format)
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn compile_files(compiler: &Compiler, files: &[PathBuf], format: Format) -> bool {
    let mut sources = Vec::with_capacity(files.len());
    let mut ok = true;
    for path in files {
        match std::fs::read_to_string(path) {
            Ok(source) => sources.push((path, source)),
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                ok = false;
            }
        }
    }

    let texts: Vec<&str> = sources.iter().map(|(_, s)| s.as_str()).collect();
    let results = compiler.compile_batch(texts.as_slice());
    for ((path, source), result) in sources.iter().zip(&results) {
        println!("== {}", path.display());
        ok &= report(source, result, format);
    }
    ok
}

fn interactive(compiler: &Compiler, format: Format) -> bool {
    println!("HoopsQL compiler. Type `help` for examples, `exit` to quit.");
    let stdin = io::stdin();
    let mut ok = true;
    loop {
        print!("hoopsql> ");
        if io::stdout().flush().is_err() {
            return ok;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return ok,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error reading input: {e}");
                return false;
            }
        }

        match line.trim() {
            "" => {}
            "exit" | "quit" => return ok,
            "help" => println!("{HELP}"),
            query => ok &= report(query, &compiler.compile(query), format),
        }
    }
}

/// Prints a compilation result; returns false on error.
fn report(source: &str, result: &Result<ExecutionPlan>, format: Format) -> bool {
    match result {
        Ok(plan) => {
            match format {
                Format::Text => print_text(source, plan),
                Format::Json => match serde_json::to_string_pretty(plan) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("error: {e}");
                        return false;
                    }
                },
            }
            true
        }
        Err(e) => {
            match quote_hint(source, e) {
                Some(hint) => eprintln!("error: {e}\n{hint}"),
                None => eprintln!("error: {e}"),
            }
            false
        }
    }
}

fn print_text(source: &str, plan: &ExecutionPlan) {
    println!("{plan}");
    if let Some(season) = season_hint(source) {
        println!(
            "  season: {} ({} to {})",
            season.name,
            season.start_text(),
            season.end_text()
        );
    }
}

/// The season named by the first `season = "..."` filter of the query.
fn season_hint(source: &str) -> Option<SeasonDates> {
    let program = parse_query(source).ok()?;
    program.query?.filters.iter().find_map(|filter| match filter {
        Expression::Binary {
            left,
            op: CompareOp::Eq,
            right,
        } => match (left.as_ref(), right.as_ref()) {
            (Expression::Identifier(name), Expression::Literal(literal)) if name == "season" => {
                season_dates(&literal.value.to_text())
            }
            _ => None,
        },
        _ => None,
    })
}

/// Suggests quoting when an unquoted multi-word name broke the parse.
fn quote_hint(source: &str, err: &HoopsError) -> Option<&'static str> {
    (matches!(err, HoopsError::ParseError { .. }) && source.contains('=') && !source.contains('"'))
        .then_some("hint: names must be in quotes, e.g. Player p = \"Kobe Bryant\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_hint_follows_season_filter() {
        let season = season_hint(r#"Player p get games where season = "2005-06""#).unwrap();
        assert_eq!(season.name, "2005-06");
        assert_eq!(season.start_text(), "2005-11-01");
    }

    #[test]
    fn test_season_hint_ignores_plain_dates() {
        assert!(season_hint("get games where game_date >= 2006-01-22").is_none());
        assert!(season_hint("get games where season != \"2005-06\"").is_none());
        assert!(season_hint("get careers &").is_none());
    }

    #[test]
    fn test_quote_hint_for_unquoted_names() {
        let source = "Player p = Kobe Bryant get games";
        let err = hoopsql::compile(source).unwrap_err();
        assert!(quote_hint(source, &err).unwrap().contains("\"Kobe Bryant\""));

        let quoted = "Player p = \"Kobe Bryant\" get";
        let err = hoopsql::compile(quoted).unwrap_err();
        assert!(quote_hint(quoted, &err).is_none());

        let err = hoopsql::compile("get careers").unwrap_err();
        assert!(quote_hint("get careers", &err).is_none());
    }
}
