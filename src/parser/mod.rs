//! HoopsQL front end: scanner and recursive descent parser.

pub mod ast;
mod grammar;
mod lexer;
mod token;

pub use grammar::{parse_query, Parser};
pub use lexer::{classify_word, is_date_shape, Lexer};
pub use token::{Token, TokenKind};
