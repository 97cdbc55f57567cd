use std::iter::Peekable;

use crate::{
    ast::Statement,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            statement::{parse_simple_statement, parse_statement},
            utils::expect,
        },
    },
};

/// Parses an `if` statement with an optional `else` branch.
///
/// Syntax:
/// ```text
///     if (<condition>) <statement>
///     else <statement>
/// ```
/// An `else if` chain is an `else` whose statement is another `if`.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `line`: Line number of the `if` token.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, line)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, line)?;

    let then_branch = Box::new(parse_statement(tokens)?);

    let else_branch = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       line })
}

/// Parses `while (<condition>) <statement>`.
pub fn parse_while<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, line)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, line)?;

    let body = Box::new(parse_statement(tokens)?);

    Ok(Statement::While { condition,
                          body,
                          line })
}

/// Parses `do <statement> while (<condition>);`.
pub fn parse_do_while<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let body = Box::new(parse_statement(tokens)?);

    expect(tokens, &Token::While, line)?;
    expect(tokens, &Token::LParen, line)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, line)?;
    expect(tokens, &Token::Semicolon, line)?;

    Ok(Statement::DoWhile { body,
                            condition,
                            line })
}

/// Parses a C style `for` loop.
///
/// Syntax:
/// ```text
///     for (<simple>?; <condition>; <simple>?) <statement>
/// ```
/// The initializer and update clauses are optional; the condition is not.
pub fn parse_for<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, line)?;

    let initializer = if let Some((Token::Semicolon, _)) = tokens.peek() {
        None
    } else {
        Some(Box::new(parse_simple_statement(tokens)?))
    };
    expect(tokens, &Token::Semicolon, line)?;

    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Semicolon, line)?;

    let update = if let Some((Token::RParen, _)) = tokens.peek() {
        None
    } else {
        Some(Box::new(parse_simple_statement(tokens)?))
    };
    expect(tokens, &Token::RParen, line)?;

    let body = Box::new(parse_statement(tokens)?);

    Ok(Statement::For { initializer,
                        condition,
                        update,
                        body,
                        line })
}
