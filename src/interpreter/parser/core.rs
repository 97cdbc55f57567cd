use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_binary, statement::parse_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token stream into a [`Program`].
///
/// Statements are parsed until the stream is exhausted. `#import` directives
/// must already have been resolved; an unresolved import is reported as an
/// unexpected token.
///
/// Grammar: `program := statement*`
///
/// # Example
/// ```
/// use tessel::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let tokens = tokenize("int x = 1; x = x + 1;").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    while iter.peek().is_some() {
        statements.push(parse_statement(&mut iter)?);
    }

    Ok(Program { statements })
}

/// Parses one expression, starting at the loosest operator (`||`).
///
/// Assignments are statements in tessel, so `=` is never part of an
/// expression and stops the parse.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_binary(tokens)
}
