//! Scanner: source text to an ordered token sequence.
//!
//! Token boundaries come from the pest grammar in `tokens.pest`. Words are
//! then classified in a fixed order: keyword, date shape, canonical name,
//! plain identifier.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::error::{HoopsError, Result};
use crate::parser::token::{Token, TokenKind};

#[derive(Parser)]
#[grammar = "parser/tokens.pest"]
struct TokenGrammar;

/// Scanner over a single source text.
pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    /// Creates a scanner for the given source.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Lexer { source }
    }

    /// Scans the whole source. The returned sequence always ends with an
    /// `Eof` token; comments and blanks are dropped, newlines are kept.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedCharacter` for a character that starts no token and
    /// `UnterminatedString` for a string running to the end of input.
    pub fn tokenize(&self) -> Result<Vec<Token>> {
        let mut pairs = TokenGrammar::parse(Rule::tokens, self.source)
            .map_err(|e| self.grammar_error(&e))?;

        let mut tokens = Vec::new();
        let Some(root) = pairs.next() else {
            tokens.push(Token::new(TokenKind::Eof, "", 1, 1));
            return Ok(tokens);
        };

        for pair in root.into_inner() {
            let (line, col) = pair.line_col();
            match pair.as_rule() {
                Rule::newline => tokens.push(Token::new(TokenKind::Newline, "\n", line, col)),
                Rule::comment => {}
                Rule::operator => tokens.push(Self::fixed(&pair, TokenKind::operator)?),
                Rule::punctuation => tokens.push(Self::fixed(&pair, TokenKind::punctuation)?),
                Rule::string => {
                    let body = pair
                        .into_inner()
                        .next()
                        .map_or("", |inner| inner.as_str());
                    tokens.push(Token::new(TokenKind::String, body, line, col));
                }
                Rule::unterminated => return Err(HoopsError::UnterminatedString { line, col }),
                Rule::field_access => {
                    tokens.push(Token::new(TokenKind::FieldAccess, pair.as_str(), line, col));
                }
                Rule::word => {
                    let text = pair.as_str();
                    tokens.push(Token::new(classify_word(text), text, line, col));
                }
                Rule::number => tokens.push(Token::new(TokenKind::Number, pair.as_str(), line, col)),
                Rule::stray => {
                    let ch = pair.as_str().chars().next().unwrap_or('\0');
                    return Err(HoopsError::UnexpectedCharacter { ch, line, col });
                }
                Rule::EOI => tokens.push(Token::new(TokenKind::Eof, "", line, col)),
                _ => {}
            }
        }

        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let (line, col) = end_position(self.source);
            tokens.push(Token::new(TokenKind::Eof, "", line, col));
        }

        tracing::trace!(count = tokens.len(), "scanned tokens");
        Ok(tokens)
    }

    fn fixed(pair: &Pair<'_, Rule>, lookup: fn(&str) -> Option<TokenKind>) -> Result<Token> {
        let (line, col) = pair.line_col();
        let text = pair.as_str();
        match lookup(text) {
            Some(kind) => Ok(Token::new(kind, text, line, col)),
            None => Err(HoopsError::UnexpectedCharacter {
                ch: text.chars().next().unwrap_or('\0'),
                line,
                col,
            }),
        }
    }

    /// The token grammar accepts any input, so this only fires if the grammar
    /// and this scanner disagree. Report it as the character at the failure.
    fn grammar_error(&self, err: &pest::error::Error<Rule>) -> HoopsError {
        let (line, col) = match err.line_col {
            pest::error::LineColLocation::Pos((l, c))
            | pest::error::LineColLocation::Span((l, c), _) => (l, c),
        };
        let offset = match err.location {
            pest::error::InputLocation::Pos(p) | pest::error::InputLocation::Span((p, _)) => p,
        };
        let ch = self.source[offset..].chars().next().unwrap_or('\0');
        HoopsError::UnexpectedCharacter { ch, line, col }
    }
}

/// Classifies a scanned word: keyword, then date shape, then canonical name
/// (leading uppercase or any `_`), then plain identifier.
#[must_use]
pub fn classify_word(text: &str) -> TokenKind {
    if let Some(kind) = TokenKind::keyword(text) {
        return kind;
    }
    if is_date_shape(text) {
        return TokenKind::Date;
    }
    if text.contains('_') || text.chars().next().is_some_and(char::is_uppercase) {
        return TokenKind::CanonicalName;
    }
    TokenKind::Identifier
}

/// Matches `NNNN-NN-NN` or `NN-NN-NNNN`.
#[must_use]
pub fn is_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    let shape = |groups: [usize; 3]| {
        let mut parts = text.split('-');
        groups.iter().all(|&len| {
            parts
                .next()
                .is_some_and(|p| p.len() == len && p.bytes().all(|b| b.is_ascii_digit()))
        }) && parts.next().is_none()
    };
    bytes.len() == 10 && (shape([4, 2, 2]) || shape([2, 2, 4]))
}

fn end_position(source: &str) -> (usize, usize) {
    let line = source.matches('\n').count() + 1;
    let col = source.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_query_tokens() {
        assert_eq!(
            kinds("get games where p.points >= 40"),
            vec![
                TokenKind::Get,
                TokenKind::Games,
                TokenKind::Where,
                TokenKind::FieldAccess,
                TokenKind::GreaterEqual,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_word_classification_order() {
        assert_eq!(classify_word("Player"), TokenKind::Player);
        assert_eq!(classify_word("2016-12-25"), TokenKind::Date);
        assert_eq!(classify_word("12-25-2016"), TokenKind::Date);
        assert_eq!(classify_word("LeBron_James"), TokenKind::CanonicalName);
        assert_eq!(classify_word("lebron_james"), TokenKind::CanonicalName);
        assert_eq!(classify_word("Warriors"), TokenKind::CanonicalName);
        assert_eq!(classify_word("points"), TokenKind::Identifier);
    }

    #[test]
    fn test_date_shapes() {
        assert!(is_date_shape("2016-12-25"));
        assert!(is_date_shape("12-25-2016"));
        assert!(!is_date_shape("2016-1-25"));
        assert!(!is_date_shape("201612-25"));
        assert!(!is_date_shape("abcd-ef-gh"));
    }

    #[test]
    fn test_string_strips_quotes_and_keeps_position() {
        let tokens = Lexer::new("Player p = \"Kobe Bryant\"").tokenize().unwrap();
        let string = &tokens[3];
        assert_eq!(string.kind, TokenKind::String);
        assert_eq!(string.text, "Kobe Bryant");
        assert_eq!((string.line, string.col), (1, 12));
    }

    #[test]
    fn test_newlines_kept_comments_dropped() {
        assert_eq!(
            kinds("# players\nPlayer p\n"),
            vec![
                TokenKind::Newline,
                TokenKind::Player,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let tokens = Lexer::new("\"a\nb\" p").tokenize().unwrap();
        assert_eq!(tokens[0].text, "a\nb");
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_decimal_number() {
        let tokens = Lexer::new("45.5").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, "45.5");
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("get games @").tokenize().unwrap_err();
        assert!(matches!(
            err,
            HoopsError::UnexpectedCharacter { ch: '@', line: 1, col: 11 }
        ));
    }

    #[test]
    fn test_lone_bang_is_unexpected() {
        let err = Lexer::new("p ! q").tokenize().unwrap_err();
        assert!(matches!(err, HoopsError::UnexpectedCharacter { ch: '!', .. }));
    }

    #[test]
    fn test_nested_field_access_rejected() {
        let err = Lexer::new("a.b.c").tokenize().unwrap_err();
        assert!(matches!(err, HoopsError::UnexpectedCharacter { ch: '.', col: 4, .. }));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("Player p = \"Kobe").tokenize().unwrap_err();
        assert!(matches!(err, HoopsError::UnterminatedString { line: 1, col: 12 }));
    }

    #[test]
    fn test_empty_source_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }
}
