use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult, value::types::DeclaredType},
};

/// Collects `item ("," item)*` up to and including `closing`.
///
/// Used for argument, parameter, array and map lists. A `closing` token right
/// away yields an empty list; a trailing comma is rejected because
/// `parse_item` then sees the closing token.
///
/// `line` is the line of the opening delimiter and is only reported when the
/// input runs out.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    line: usize)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("{tok:?} where ',' or {closing:?} should follow a list item"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }
    Ok(items)
}

/// Consumes the next token, which must equal `expected`.
///
/// # Returns
/// The line of the consumed token.
///
/// # Errors
/// - `UnexpectedToken` if a different token follows.
/// - `UnexpectedEndOfInput` if the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    line: usize)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, found_line)) if tok == expected => Ok(*found_line),
        Some((tok, found_line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected {expected:?}, found {tok:?}"),
                                              line:  *found_line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Consumes an identifier and returns its name.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              line: usize)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected identifier, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Parses a type name: a builtin type keyword or a class name.
///
/// Grammar: `type := int | float | bool | string | array | map | void | IDENT`
pub(in crate::interpreter::parser) fn parse_type<'a, I>(tokens: &mut Peekable<I>,
                                                        line: usize)
                                                        -> ParseResult<DeclaredType>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::IntType, _)) => Ok(DeclaredType::Int),
        Some((Token::FloatType, _)) => Ok(DeclaredType::Float),
        Some((Token::BoolType, _)) => Ok(DeclaredType::Bool),
        Some((Token::StringType, _)) => Ok(DeclaredType::String),
        Some((Token::ArrayType, _)) => Ok(DeclaredType::Array),
        Some((Token::MapType, _)) => Ok(DeclaredType::Map),
        Some((Token::Void, _)) => Ok(DeclaredType::Void),
        Some((Token::Identifier(name), _)) => Ok(DeclaredType::Class(name.clone())),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected type, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Returns `true` if the upcoming tokens start a typed declaration.
///
/// A declaration starts with a type keyword, or with two identifiers in a row
/// (`Point p`). Nothing is consumed.
pub(in crate::interpreter::parser) fn starts_declaration<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::IntType
              | Token::FloatType
              | Token::BoolType
              | Token::StringType
              | Token::ArrayType
              | Token::MapType
              | Token::Void,
              _)) => true,
        Some((Token::Identifier(_), _)) => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            matches!(lookahead.peek(), Some((Token::Identifier(_), _)))
        },
        _ => false,
    }
}

/// Returns the line of the next token, or `fallback` at the end of input.
pub(in crate::interpreter::parser) fn current_line<'a, I>(tokens: &mut Peekable<I>,
                                                          fallback: usize)
                                                          -> usize
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().map_or(fallback, |(_, line)| *line)
}
