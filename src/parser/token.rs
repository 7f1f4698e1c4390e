//! Token definitions for the HoopsQL scanner.

use std::fmt;

/// Kinds of tokens produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Get,
    Where,
    Select,
    Order,
    By,
    Most,
    Least,
    Between,
    In,
    And,
    Or,
    Not,
    True,
    False,
    Limit,
    Basic,

    // Aggregation functions
    Avg,
    Sum,
    Count,
    Min,
    Max,

    // Scopes
    Games,
    Seasons,
    Careers,

    // Entity kinds
    Player,
    Team,
    Opponent,

    // Special fields
    GameDate,
    Season,

    // Operators
    Equals,
    NotEquals,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,

    // Punctuation
    Comma,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,

    // Literals
    Number,
    String,
    CanonicalName,
    Date,

    // Names
    Identifier,
    /// `var.field`, scanned as one token.
    FieldAccess,

    Newline,
    Eof,
}

/// Fixed keyword table. Keywords are case-sensitive.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("get", TokenKind::Get),
    ("where", TokenKind::Where),
    ("select", TokenKind::Select),
    ("order", TokenKind::Order),
    ("by", TokenKind::By),
    ("most", TokenKind::Most),
    ("least", TokenKind::Least),
    ("between", TokenKind::Between),
    ("in", TokenKind::In),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("not", TokenKind::Not),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("limit", TokenKind::Limit),
    ("basic", TokenKind::Basic),
    ("avg", TokenKind::Avg),
    ("sum", TokenKind::Sum),
    ("count", TokenKind::Count),
    ("min", TokenKind::Min),
    ("max", TokenKind::Max),
    ("games", TokenKind::Games),
    ("seasons", TokenKind::Seasons),
    ("careers", TokenKind::Careers),
    ("Player", TokenKind::Player),
    ("Team", TokenKind::Team),
    ("Opponent", TokenKind::Opponent),
    ("game_date", TokenKind::GameDate),
    ("season", TokenKind::Season),
];

impl TokenKind {
    /// Looks up a keyword by its exact spelling.
    #[must_use]
    pub fn keyword(text: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == text)
            .map(|(_, kind)| *kind)
    }

    /// Maps operator text to its token kind.
    #[must_use]
    pub fn operator(text: &str) -> Option<Self> {
        match text {
            "=" => Some(TokenKind::Equals),
            "!=" => Some(TokenKind::NotEquals),
            ">" => Some(TokenKind::Greater),
            "<" => Some(TokenKind::Less),
            ">=" => Some(TokenKind::GreaterEqual),
            "<=" => Some(TokenKind::LessEqual),
            _ => None,
        }
    }

    /// Maps punctuation text to its token kind.
    #[must_use]
    pub fn punctuation(text: &str) -> Option<Self> {
        match text {
            "," => Some(TokenKind::Comma),
            "(" => Some(TokenKind::LeftParen),
            ")" => Some(TokenKind::RightParen),
            "[" => Some(TokenKind::LeftBracket),
            "]" => Some(TokenKind::RightBracket),
            _ => None,
        }
    }

    /// Returns true for the three declarable entity kinds.
    #[must_use]
    pub fn is_entity_kind(self) -> bool {
        matches!(self, TokenKind::Player | TokenKind::Team | TokenKind::Opponent)
    }
}

/// A scanned token with its source position (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text. String tokens hold the contents without quotes.
    pub text: String,
    pub line: usize,
    pub col: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, col: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            col,
        }
    }

    /// Returns true if this token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Newline => write!(f, "newline"),
            _ => write!(f, "{}", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(TokenKind::keyword("Player"), Some(TokenKind::Player));
        assert_eq!(TokenKind::keyword("player"), None);
        assert_eq!(TokenKind::keyword("GET"), None);
        assert_eq!(TokenKind::keyword("game_date"), Some(TokenKind::GameDate));
    }

    #[test]
    fn test_operator_lookup() {
        assert_eq!(TokenKind::operator(">="), Some(TokenKind::GreaterEqual));
        assert_eq!(TokenKind::operator("!="), Some(TokenKind::NotEquals));
        assert_eq!(TokenKind::operator("<>"), None);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::new(TokenKind::Eof, "", 1, 1).to_string(), "end of input");
        assert_eq!(Token::new(TokenKind::Identifier, "p", 1, 1).to_string(), "p");
    }
}
