use std::iter::Peekable;

use crate::{
    ast::{CallArgument, Expr, IncrementOp, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses prefix operators, then a primary with its postfix chain.
///
/// `-` and `!` nest (`!-x` is `!(-x)`); `++`/`--` in prefix position only
/// accept a variable name.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | ("++" | "--") IDENT
///            | primary postfix*
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek().copied() {
        Some((Token::Minus, line)) => {
            tokens.next();
            let expr = parse_unary(tokens)?;
            Ok(Expr::UnaryOp { op:   UnaryOperator::Negate,
                               expr: Box::new(expr),
                               line: *line, })
        },
        Some((Token::Bang, line)) => {
            tokens.next();
            let expr = parse_unary(tokens)?;
            Ok(Expr::UnaryOp { op:   UnaryOperator::Not,
                               expr: Box::new(expr),
                               line: *line, })
        },
        Some((token @ (Token::PlusPlus | Token::MinusMinus), line)) => {
            tokens.next();
            let name = parse_identifier(tokens, *line)?;
            Ok(Expr::Increment { name,
                                 op: increment_op(token),
                                 prefix: true,
                                 line: *line })
        },
        _ => {
            let primary = parse_primary(tokens)?;
            parse_postfix(tokens, primary)
        },
    }
}

/// Maps `++` / `--` to the increment direction.
const fn increment_op(token: &Token) -> IncrementOp {
    match token {
        Token::MinusMinus => IncrementOp::Decrement,
        _ => IncrementOp::Increment,
    }
}

/// Parses an operand: a literal, a variable or call, `( expr )`, an array or
/// map literal, or `new Class(args)`.
///
/// # Errors
/// Returns `UnexpectedToken` for any other token and `UnexpectedEndOfInput`
/// when the stream is exhausted.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(n), line)) => Ok(Expr::Literal { value: LiteralValue::Number(*n),
                                                             line:  *line, }),
        Some((Token::Str(s), line)) => Ok(Expr::Literal { value: LiteralValue::Str(s.clone()),
                                                          line:  *line, }),
        Some((Token::Bool(b), line)) => Ok(Expr::Literal { value: LiteralValue::Bool(*b),
                                                           line:  *line, }),
        Some((Token::Identifier(name), line)) => {
            if let Some((Token::LParen, _)) = tokens.peek() {
                tokens.next();
                let arguments = parse_comma_separated(tokens,
                                                      |t| parse_expression(t).map(CallArgument::from),
                                                      &Token::RParen,
                                                      *line)?;
                return Ok(Expr::FunctionCall { name: name.clone(),
                                               arguments,
                                               line: *line });
            }

            Ok(Expr::Variable { name: name.clone(),
                                line: *line, })
        },
        Some((Token::LParen, line)) => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, *line)?;
            Ok(expr)
        },
        Some((Token::LBracket, line)) => {
            let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket, *line)?;
            Ok(Expr::ArrayLiteral { elements,
                                    line: *line })
        },
        Some((Token::LBrace, line)) => {
            let entries = parse_comma_separated(tokens, parse_map_entry, &Token::RBrace, *line)?;
            Ok(Expr::MapLiteral { entries,
                                  line: *line })
        },
        Some((Token::New, line)) => {
            let class = parse_identifier(tokens, *line)?;
            expect(tokens, &Token::LParen, *line)?;
            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen, *line)?;
            Ok(Expr::New { class,
                           arguments,
                           line: *line })
        },
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses one `key: value` entry of a map literal.
///
/// Keys are string literals or bare identifiers.
fn parse_map_entry<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(String, Expr)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (key, line) = match tokens.next() {
        Some((Token::Str(key) | Token::Identifier(key), line)) => (key.clone(), *line),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected map key, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    expect(tokens, &Token::Colon, line)?;
    let value = parse_expression(tokens)?;

    Ok((key, value))
}

/// Applies `[index]`, `.member`, `.method(args)` and postfix `++`/`--` to
/// `expr`, left to right. Chains are allowed:
/// `a.items[0].name`, `make().reset()`.
///
/// Grammar:
/// ```text
///     postfix := "[" expression "]"
///              | "." IDENT ( "(" args? ")" )?
///              | "++" | "--"            (variables only)
/// ```
///
/// # Errors
/// - `UnexpectedToken` when `++`/`--` follow anything but a variable.
/// - Propagates errors from index and argument parsing.
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut expr: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    loop {
        match tokens.peek().copied() {
            Some((Token::LBracket, line)) => {
                tokens.next();
                let index = parse_expression(tokens)?;
                expect(tokens, &Token::RBracket, *line)?;

                expr = Expr::Index { target: Box::new(expr),
                                     index:  Box::new(index),
                                     line:   *line, };
            },
            Some((Token::Dot, line)) => {
                tokens.next();
                let member = parse_identifier(tokens, *line)?;

                if let Some((Token::LParen, _)) = tokens.peek() {
                    tokens.next();
                    let arguments =
                        parse_comma_separated(tokens, parse_expression, &Token::RParen, *line)?;

                    expr = Expr::MemberCall { object: Box::new(expr),
                                              method: member,
                                              arguments,
                                              line: *line };
                } else {
                    expr = Expr::MemberAccess { object: Box::new(expr),
                                                member,
                                                line: *line };
                }
            },
            Some((token @ (Token::PlusPlus | Token::MinusMinus), line)) => {
                let Expr::Variable { name, .. } = expr else {
                    return Err(ParseError::UnexpectedToken { token: format!("{token:?} can only follow a variable"),
                                                             line:  *line, });
                };
                tokens.next();

                expr = Expr::Increment { name,
                                         op: increment_op(token),
                                         prefix: false,
                                         line: *line };
            },
            _ => return Ok(expr),
        }
    }
}
