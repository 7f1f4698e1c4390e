//! Recursive descent parser for HoopsQL.
//!
//! One token of lookahead, no backtracking, no recovery: the first
//! unexpected token aborts with a `ParseError` naming what was expected.
//! Newline tokens are separators and are skipped between any two tokens.

use crate::error::{HoopsError, Result};
use crate::parser::ast::{
    CompareOp, EntityKind, Expression, FieldAccess, Limit, Literal, LiteralKind, OrderBy, Program,
    Query, Scope, Select, VariableDeclaration,
};
use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenKind};
use crate::types::Value;

/// Parses a HoopsQL source string into a [`Program`].
///
/// # Errors
///
/// Returns a lexical error if scanning fails, or a `ParseError` if the
/// program is syntactically invalid.
pub fn parse_query(source: &str) -> Result<Program> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse_program()
}

/// Token-stream parser.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a parser over a token sequence.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let (line, col) = tokens.last().map_or((1, 1), |t| (t.line, t.col + t.text.len()));
            tokens.push(Token::new(TokenKind::Eof, "", line, col));
        }
        Parser { tokens, pos: 0 }
    }

    /// Parses `declaration* query?` and requires the input to end there.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` at the first token that does not fit the grammar.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut declarations = Vec::new();
        while self.peek().kind.is_entity_kind() {
            declarations.push(self.parse_declaration()?);
        }

        let query = if self.check(TokenKind::Get) {
            Some(self.parse_query()?)
        } else {
            None
        };

        if !self.check(TokenKind::Eof) {
            let expected = if query.is_some() {
                "end of input"
            } else {
                "declaration or 'get'"
            };
            return Err(self.error(expected));
        }

        tracing::debug!(
            declarations = declarations.len(),
            has_query = query.is_some(),
            "parsed program"
        );
        Ok(Program { declarations, query })
    }

    fn parse_declaration(&mut self) -> Result<VariableDeclaration> {
        let entity_kind = match self.peek().kind {
            TokenKind::Player => EntityKind::Player,
            TokenKind::Team => EntityKind::Team,
            TokenKind::Opponent => EntityKind::Opponent,
            _ => return Err(self.error("'Player', 'Team' or 'Opponent'")),
        };
        self.advance();

        let name = self
            .expect(TokenKind::Identifier, &format!("variable name after '{entity_kind}'"))?
            .text;

        let initializer = if self.eat(TokenKind::Equals) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(VariableDeclaration {
            entity_kind,
            name,
            initializer,
        })
    }

    fn parse_query(&mut self) -> Result<Query> {
        self.expect(TokenKind::Get, "'get' to start query")?;
        let scope = self.parse_scope()?;

        let mut filters = Vec::new();
        if self.eat(TokenKind::Where) {
            filters.push(self.parse_expression()?);
            while self.eat(TokenKind::And) {
                filters.push(self.parse_expression()?);
            }
        }

        // Clauses may come in any order; a repeated clause replaces the earlier one.
        let mut select = None;
        let mut order_by = None;
        let mut limit = None;
        loop {
            match self.peek().kind {
                TokenKind::Select => {
                    self.advance();
                    let clause = self.parse_select()?;
                    Self::replace("select", &mut select, clause);
                }
                TokenKind::Order => {
                    self.advance();
                    self.expect(TokenKind::By, "'by' after 'order'")?;
                    let clause = self.parse_order_by()?;
                    Self::replace("order by", &mut order_by, clause);
                }
                TokenKind::Most | TokenKind::Least => {
                    let clause = self.parse_order_by()?;
                    Self::replace("order by", &mut order_by, clause);
                }
                TokenKind::Limit => {
                    self.advance();
                    let clause = self.parse_limit()?;
                    Self::replace("limit", &mut limit, clause);
                }
                _ => break,
            }
        }

        Ok(Query {
            scope,
            filters,
            select,
            order_by,
            limit,
        })
    }

    fn replace<T>(clause: &str, slot: &mut Option<T>, value: T) {
        if slot.replace(value).is_some() {
            tracing::debug!(clause, "repeated clause, keeping the last occurrence");
        }
    }

    fn parse_scope(&mut self) -> Result<Scope> {
        let token = self.peek().clone();
        let scope = match token.kind {
            TokenKind::Avg => {
                self.advance();
                self.expect(TokenKind::LeftParen, "'(' after 'avg'")?;
                self.expect(TokenKind::Games, "'games' after 'avg('")?;
                self.expect(TokenKind::RightParen, "')' after 'games'")?;
                return Ok(Scope::AvgGames);
            }
            TokenKind::Games => Scope::Games,
            TokenKind::Seasons => Scope::Seasons,
            TokenKind::Careers => Scope::Careers,
            TokenKind::Identifier => Scope::Named(token.text),
            _ => return Err(self.error("scope after 'get'")),
        };
        self.advance();
        Ok(scope)
    }

    fn parse_select(&mut self) -> Result<Select> {
        let mut fields = vec![
            self.expect(TokenKind::Identifier, "field name after 'select'")?
                .text,
        ];
        while self.eat(TokenKind::Comma) {
            fields.push(self.expect(TokenKind::Identifier, "field name after ','")?.text);
        }

        let mut basic = true;
        if self.eat(TokenKind::Basic) {
            self.expect(TokenKind::Equals, "'=' after 'basic'")?;
            if self.eat(TokenKind::False) {
                basic = false;
            } else if !self.eat(TokenKind::True) {
                return Err(self.error("'true' or 'false' after 'basic='"));
            }
        }

        Ok(Select { fields, basic })
    }

    fn parse_order_by(&mut self) -> Result<OrderBy> {
        let ascending = if self.eat(TokenKind::Most) {
            false
        } else if self.eat(TokenKind::Least) {
            true
        } else {
            return Err(self.error("'most' or 'least'"));
        };
        let field = self
            .expect(TokenKind::Identifier, "field name after order keyword")?
            .text;
        Ok(OrderBy { field, ascending })
    }

    fn parse_limit(&mut self) -> Result<Limit> {
        if !self.check(TokenKind::Number) {
            return Err(self.error("number after 'limit'"));
        }
        let text = self.peek().text.clone();
        let Ok(count) = text.parse::<u64>() else {
            return Err(self.error("whole row count after 'limit'"));
        };
        self.advance();
        Ok(Limit { count })
    }

    /// `primary (compareOp primary)?`
    fn parse_expression(&mut self) -> Result<Expression> {
        let left = self.parse_primary()?;

        let op = match self.peek().kind {
            TokenKind::Equals => CompareOp::Eq,
            TokenKind::NotEquals => CompareOp::Neq,
            TokenKind::Less => CompareOp::Lt,
            TokenKind::LessEqual => CompareOp::Lte,
            TokenKind::Greater => CompareOp::Gt,
            TokenKind::GreaterEqual => CompareOp::Gte,
            _ => return Ok(left),
        };
        self.advance();

        let right = self.parse_primary()?;
        Ok(Expression::binary(left, op, right))
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let token = self.peek().clone();
        let expr = match token.kind {
            TokenKind::FieldAccess => {
                let Some((variable, field)) = token.text.split_once('.') else {
                    return Err(self.error("field access"));
                };
                Expression::FieldAccess(FieldAccess {
                    variable: variable.to_string(),
                    field: field.to_string(),
                })
            }
            TokenKind::Number => Expression::Literal(Literal {
                value: self.parse_number(&token.text)?,
                kind: LiteralKind::Number,
            }),
            TokenKind::String => Expression::literal(token.text, LiteralKind::String),
            TokenKind::CanonicalName => Expression::literal(token.text, LiteralKind::CanonicalName),
            TokenKind::Date => Expression::literal(token.text, LiteralKind::Date),
            TokenKind::True => Expression::literal(true, LiteralKind::Boolean),
            TokenKind::False => Expression::literal(false, LiteralKind::Boolean),
            TokenKind::GameDate | TokenKind::Season | TokenKind::Identifier => {
                Expression::Identifier(token.text)
            }
            _ => return Err(self.error("expression")),
        };
        self.advance();
        Ok(expr)
    }

    fn parse_number(&self, text: &str) -> Result<Value> {
        if text.contains('.') {
            text.parse::<f64>()
                .map(Value::Float64)
                .map_err(|_| self.error("decimal number"))
        } else {
            text.parse::<i64>()
                .map(Value::Int64)
                .map_err(|_| self.error("integer within 64-bit range"))
        }
    }

    // ==================== Token helpers ====================

    /// Returns the current token, skipping newline separators.
    fn peek(&mut self) -> &Token {
        while self.pos < self.tokens.len() - 1 && self.tokens[self.pos].is(TokenKind::Newline) {
            self.pos += 1;
        }
        &self.tokens[self.pos]
    }

    fn check(&mut self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(expected))
        }
    }

    fn error(&self, expected: &str) -> HoopsError {
        let token = &self.tokens[self.pos];
        HoopsError::ParseError {
            line: token.line,
            col: token.col,
            expected: expected.to_string(),
            found: token.to_string(),
        }
    }
}
